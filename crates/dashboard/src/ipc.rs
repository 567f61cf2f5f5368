//! IPC envelope and error types shared by every host command.
//!
//! Every response carries the caller's `requestId` and either a `result` or a
//! stable, machine-readable `error`.

use atlas_region_core::AtlasError;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

/// Stable error envelope returned by host commands.
///
/// - `code` is a stable, machine-readable identifier (snake_case).
/// - `message` is user-facing and may change between releases.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HostError {
    pub code: &'static str,
    pub message: String,
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.code)
    }
}

impl std::error::Error for HostError {}

impl HostError {
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new("invalid_input", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("internal_error", message)
    }
}

impl From<AtlasError> for HostError {
    fn from(value: AtlasError) -> Self {
        let code = match &value {
            AtlasError::DataLoad { .. } => "data_load",
            AtlasError::MissingSelectionField { .. } => "missing_selection_field",
            AtlasError::InvalidInput { .. } => "invalid_input",
            AtlasError::RegionUnavailable { .. } => "region_unavailable",
        };
        Self::new(code, value.to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpcRequest<T> {
    pub request_id: String,
    pub payload: T,
}

/// One line on the host's stdin: a request addressed to a named command.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpcCall {
    pub command: String,
    pub request_id: String,
    #[serde(default)]
    pub payload: JsonValue,
}

impl IpcCall {
    pub fn into_request(self) -> (String, IpcRequest<JsonValue>) {
        (
            self.command,
            IpcRequest {
                request_id: self.request_id,
                payload: self.payload,
            },
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IpcStatus {
    Ok,
    Error,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IpcErrorBody {
    pub code: &'static str,
    pub message: String,
    pub details: JsonValue,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IpcResponse<T> {
    pub request_id: String,
    pub status: IpcStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<IpcErrorBody>,
}

impl<T> IpcResponse<T> {
    pub fn ok(request_id: impl Into<String>, result: T) -> Self {
        Self {
            request_id: request_id.into(),
            status: IpcStatus::Ok,
            result: Some(result),
            error: None,
        }
    }

    pub fn err(request_id: impl Into<String>, error: HostError) -> Self {
        Self {
            request_id: request_id.into(),
            status: IpcStatus::Error,
            result: None,
            error: Some(IpcErrorBody {
                code: error.code,
                message: error.message,
                details: JsonValue::Null,
            }),
        }
    }

    pub fn from_result(request_id: impl Into<String>, result: Result<T, HostError>) -> Self {
        match result {
            Ok(value) => Self::ok(request_id, value),
            Err(err) => Self::err(request_id, err),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == IpcStatus::Ok
    }
}
