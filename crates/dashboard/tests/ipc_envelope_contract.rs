use atlas_dashboard_lib::{
    HostError, IpcCall, IpcRequest, IpcResponse, MapClickPayload, MetricsPanel, RegionOption,
    RegionSetPayload, RenderFrame,
};
use atlas_region_core::{AtlasError, RegionSetId};
use serde_json::json;

fn surabaya_frame() -> RenderFrame {
    RenderFrame {
        region: RegionSetId::new("Surabaya"),
        regions: vec![RegionOption {
            id: RegionSetId::new("Surabaya"),
            label: "Surabaya".into(),
            available: false,
            active: true,
        }],
        map: None,
        panel: MetricsPanel::NoSelection,
    }
}

#[test]
fn map_click_request_keeps_feature_properties() {
    let json = r#"{"requestId":"req-1","payload":{"properties":{"district":"Menteng","regency":"Jakarta Pusat","total":20}}}"#;
    let request: IpcRequest<MapClickPayload> = serde_json::from_str(json).expect("deserialize");
    assert_eq!(request.request_id, "req-1");
    assert_eq!(request.payload.properties["district"], "Menteng");
    assert_eq!(request.payload.properties["total"], 20);
}

#[test]
fn region_set_call_converts_to_typed_payload() {
    let json = r#"{"command":"dashboard.region.set","requestId":"req-4","payload":{"region":"Surabaya"}}"#;
    let call: IpcCall = serde_json::from_str(json).expect("deserialize");
    let (command, request) = call.into_request();
    assert_eq!(command, "dashboard.region.set");
    let payload: RegionSetPayload = serde_json::from_value(request.payload).expect("payload");
    assert_eq!(payload.region, "Surabaya");
}

#[test]
fn render_frame_result_uses_camel_case_and_tagged_panel() {
    let response = IpcResponse::ok("req-2", surabaya_frame());
    let value = serde_json::to_value(&response).expect("serialize");
    assert_eq!(value["requestId"], "req-2");
    assert_eq!(value["status"], "ok");
    assert!(value.get("error").is_none());
    let result = &value["result"];
    assert_eq!(result["region"], "Surabaya");
    assert!(result["map"].is_null());
    assert_eq!(result["panel"], json!({"state": "noSelection"}));
    assert_eq!(
        result["regions"][0],
        json!({"id": "Surabaya", "label": "Surabaya", "available": false, "active": true})
    );
}

#[test]
fn domain_error_response_keeps_request_id_and_code() {
    let error = HostError::from(AtlasError::region_unavailable("Jawa Barat"));
    let response: IpcResponse<RenderFrame> = IpcResponse::err("req-3", error);
    assert!(!response.is_ok());
    let value = serde_json::to_value(&response).expect("serialize");
    assert_eq!(value["requestId"], "req-3");
    assert_eq!(value["status"], "error");
    assert!(value.get("result").is_none());
    assert_eq!(value["error"]["code"], "region_unavailable");
    assert!(
        value["error"]["message"]
            .as_str()
            .expect("message")
            .contains("Jawa Barat")
    );
    assert!(value["error"]["details"].is_null());
}
