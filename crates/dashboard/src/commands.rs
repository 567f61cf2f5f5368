//! Dashboard IPC commands.
//!
//! Each command has a typed handler taking an `IpcRequest<P>`; `dispatch`
//! routes a raw call to it by name. Commands that change the session answer
//! with a fresh `RenderFrame` so the UI never has to issue a second call.

use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::ipc::{HostError, IpcCall, IpcRequest, IpcResponse};
use crate::render::{RegionOption, RenderFrame, region_options};
use crate::session::DashboardSession;

pub const REGIONS_LIST: &str = "dashboard.regions.list";
pub const REGION_SET: &str = "dashboard.region.set";
pub const MAP_CLICK: &str = "dashboard.map.click";
pub const SELECTION_SUBMIT: &str = "dashboard.selection.submit";
pub const SELECTION_CLEAR: &str = "dashboard.selection.clear";
pub const RENDER: &str = "dashboard.render";

/// Every command the host answers, in registration order.
pub const COMMANDS: [&str; 6] = [
    REGIONS_LIST,
    REGION_SET,
    MAP_CLICK,
    SELECTION_SUBMIT,
    SELECTION_CLEAR,
    RENDER,
];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionSetPayload {
    pub region: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapClickPayload {
    pub properties: Map<String, JsonValue>,
}

pub fn dashboard_regions_list(
    session: &DashboardSession,
    request: IpcRequest<()>,
) -> IpcResponse<Vec<RegionOption>> {
    let active = session.state().active_region();
    IpcResponse::ok(
        request.request_id,
        region_options(session.catalog(), active),
    )
}

pub fn dashboard_region_set(
    session: &mut DashboardSession,
    request: IpcRequest<RegionSetPayload>,
) -> IpcResponse<RenderFrame> {
    let result = session
        .set_active_region(&request.payload.region)
        .and_then(|()| session.render());
    IpcResponse::from_result(request.request_id, result)
}

/// Stage a clicked feature; the selection is unchanged until submit.
pub fn dashboard_map_click(
    session: &mut DashboardSession,
    request: IpcRequest<MapClickPayload>,
) -> IpcResponse<RenderFrame> {
    session.stage_click(request.payload.properties);
    IpcResponse::from_result(request.request_id, session.render())
}

pub fn dashboard_selection_submit(
    session: &mut DashboardSession,
    request: IpcRequest<()>,
) -> IpcResponse<RenderFrame> {
    let result = session.submit().and_then(|()| session.render());
    IpcResponse::from_result(request.request_id, result)
}

pub fn dashboard_selection_clear(
    session: &mut DashboardSession,
    request: IpcRequest<()>,
) -> IpcResponse<RenderFrame> {
    let result = session.clear_selection().and_then(|()| session.render());
    IpcResponse::from_result(request.request_id, result)
}

pub fn dashboard_render(
    session: &DashboardSession,
    request: IpcRequest<()>,
) -> IpcResponse<RenderFrame> {
    IpcResponse::from_result(request.request_id, session.render())
}

fn typed<P: DeserializeOwned>(request: IpcRequest<JsonValue>) -> Result<IpcRequest<P>, HostError> {
    let payload = serde_json::from_value(request.payload)
        .map_err(|err| HostError::invalid_input(format!("invalid payload: {err}")))?;
    Ok(IpcRequest {
        request_id: request.request_id,
        payload,
    })
}

fn without_payload(request: IpcRequest<JsonValue>) -> IpcRequest<()> {
    IpcRequest {
        request_id: request.request_id,
        payload: (),
    }
}

fn erase<T: Serialize>(response: IpcResponse<T>) -> IpcResponse<JsonValue> {
    let IpcResponse {
        request_id,
        status,
        result,
        error,
    } = response;
    match result.map(serde_json::to_value).transpose() {
        Ok(result) => IpcResponse {
            request_id,
            status,
            result,
            error,
        },
        Err(err) => IpcResponse::err(
            request_id,
            HostError::internal(format!("failed to encode result: {err}")),
        ),
    }
}

/// Route one call to its handler by command name.
pub fn dispatch(
    session: &mut DashboardSession,
    command: &str,
    request: IpcRequest<JsonValue>,
) -> IpcResponse<JsonValue> {
    debug!("host: dispatch {command} request_id={}", request.request_id);
    match command {
        REGIONS_LIST => erase(dashboard_regions_list(session, without_payload(request))),
        REGION_SET => {
            let request_id = request.request_id.clone();
            match typed(request) {
                Ok(request) => erase(dashboard_region_set(session, request)),
                Err(err) => IpcResponse::err(request_id, err),
            }
        }
        MAP_CLICK => {
            let request_id = request.request_id.clone();
            match typed(request) {
                Ok(request) => erase(dashboard_map_click(session, request)),
                Err(err) => IpcResponse::err(request_id, err),
            }
        }
        SELECTION_SUBMIT => erase(dashboard_selection_submit(session, without_payload(request))),
        SELECTION_CLEAR => erase(dashboard_selection_clear(session, without_payload(request))),
        RENDER => erase(dashboard_render(session, without_payload(request))),
        other => {
            warn!("host: unknown command '{other}'");
            IpcResponse::err(
                request.request_id,
                HostError::invalid_input(format!("unknown command '{other}'")),
            )
        }
    }
}

/// Handle one line of newline-delimited JSON and return the response line.
pub fn handle_line(session: &mut DashboardSession, line: &str) -> String {
    let response = match serde_json::from_str::<IpcCall>(line) {
        Ok(call) => {
            let (command, request) = call.into_request();
            dispatch(session, &command, request)
        }
        Err(err) => {
            warn!("host: malformed request line: {err}");
            IpcResponse::err(
                String::new(),
                HostError::invalid_input(format!("malformed request: {err}")),
            )
        }
    };
    serde_json::to_string(&response).unwrap_or_else(|err| {
        warn!("host: failed to encode response: {err}");
        r#"{"requestId":"","status":"error","error":{"code":"internal_error","message":"failed to encode response","details":null}}"#
            .to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_names_are_unique_and_namespaced() {
        let mut names = COMMANDS.to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), COMMANDS.len());
        assert!(COMMANDS.iter().all(|name| name.starts_with("dashboard.")));
    }

    #[test]
    fn typed_payload_rejects_wrong_shape() {
        let request = IpcRequest {
            request_id: "r1".to_string(),
            payload: serde_json::json!({"regionId": 4}),
        };
        let err = typed::<RegionSetPayload>(request).expect_err("bad payload");
        assert_eq!(err.code, "invalid_input");
    }
}
