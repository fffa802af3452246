//! End-to-end pairing flow against a stub backend

use sanad_api::ApiClient;
use sanad_core::ApiConfig;
use sanad_pairing::{
    CameraAccess, FixedProbe, FlowState, PairingFlow, ScanOutcome, SubmitOutcome,
};
use serde_json::json;
use std::sync::{Arc, Mutex};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const VALID_UUID: &str = "11111111-1111-4111-8111-111111111111";

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(ApiConfig::new().with_base_url(server.uri())).unwrap()
}

fn added_device_body() -> serde_json::Value {
    json!({
        "success": true,
        "message": "Device added",
        "data": {
            "device": {
                "id": 7,
                "uuid": VALID_UUID,
                "version": "1.0.0",
                "customer_id": 1
            }
        }
    })
}

#[tokio::test]
async fn test_scan_to_pair() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/customer/screen/devices/add"))
        .and(body_json(json!({ "uuid": VALID_UUID })))
        .respond_with(ResponseTemplate::new(200).set_body_json(added_device_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let paired = Arc::new(Mutex::new(Vec::new()));
    let sink = paired.clone();
    let mut flow =
        PairingFlow::new().with_on_success(move |raw| sink.lock().unwrap().push(raw.to_string()));

    flow.open(&FixedProbe(CameraAccess::Available)).await;
    let ScanOutcome::Accepted(uuid) = flow.on_scan(VALID_UUID) else {
        panic!("scan should be accepted");
    };
    let outcome = flow.submit(&client, uuid).await;

    assert_eq!(outcome, SubmitOutcome::Paired(VALID_UUID.to_string()));
    assert_eq!(flow.state(), FlowState::Idle);
    assert_eq!(paired.lock().unwrap().as_slice(), &[VALID_UUID.to_string()]);
}

#[tokio::test]
async fn test_pairing_rejected_by_backend() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/customer/screen/devices/add"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "success": false,
            "message": "Device already assigned",
            "data": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut flow = PairingFlow::new().with_on_success(|_| panic!("must not fire on failure"));
    flow.open(&FixedProbe(CameraAccess::Available)).await;

    let ScanOutcome::Accepted(uuid) = flow.on_scan(VALID_UUID) else {
        panic!("scan should be accepted");
    };
    let outcome = flow.submit(&client, uuid).await;

    assert_eq!(
        outcome,
        SubmitOutcome::Failed("Device already assigned".to_string())
    );
    assert_eq!(flow.state(), FlowState::Scanning);
    assert_eq!(flow.last_message(), Some("Device already assigned"));
    // Lock reset; the user can scan again
    assert!(matches!(flow.on_scan(VALID_UUID), ScanOutcome::Accepted(_)));
}

#[tokio::test]
async fn test_invalid_scan_never_reaches_backend() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/customer/screen/devices/add"))
        .respond_with(ResponseTemplate::new(200).set_body_json(added_device_body()))
        .expect(0)
        .mount(&server)
        .await;

    let mut flow = PairingFlow::new();
    flow.open(&FixedProbe(CameraAccess::Available)).await;

    assert_eq!(flow.on_scan("not-a-uuid"), ScanOutcome::Rejected);
    assert_eq!(flow.state(), FlowState::Scanning);
    // expect(0) is verified when the mock server shuts down
}

#[tokio::test]
async fn test_manual_entry_submits_same_call_as_scan() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/customer/screen/devices/add"))
        .and(body_json(json!({ "uuid": VALID_UUID })))
        .respond_with(ResponseTemplate::new(200).set_body_json(added_device_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut flow = PairingFlow::new();

    // Camera denied: straight to manual entry, no retry loop
    let state = flow.open(&FixedProbe(CameraAccess::Denied)).await;
    assert_eq!(state, FlowState::ManualEntry);

    flow.set_manual_input(VALID_UUID);
    let uuid = flow.validate_manual().unwrap();
    let outcome = flow.submit(&client, uuid).await;
    assert_eq!(outcome, SubmitOutcome::Paired(VALID_UUID.to_string()));
}
