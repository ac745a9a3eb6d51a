//! HTTP API tests driven through the router in-process

mod common;

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use parking_lot::Mutex;
use serde_json::{Value, json};
use tower::ServiceExt;

use notify_server::api::build_app;
use notify_server::roster::RosterStore;
use notify_server::{Config, ServerState};
use shared::models::MemberRecord;
use sms_transport::{SendOutcome, SmsTransport, TransportError, TransportMode, TransportResult};

#[derive(Default)]
struct FakeTransport {
    sent: Mutex<Vec<(String, String)>>,
    failing: HashSet<String>,
}

#[async_trait]
impl SmsTransport for FakeTransport {
    async fn send(&self, phone: &str, text: &str) -> TransportResult<SendOutcome> {
        self.sent.lock().push((phone.to_string(), text.to_string()));
        if self.failing.contains(phone) {
            return Err(TransportError::Rejected {
                status: 400,
                raw: json!({ "error": "blocked" }),
            });
        }
        Ok(SendOutcome {
            accepted: true,
            provider_message_id: Some("fake-1".into()),
            raw: json!({ "data": { "success": true } }),
        })
    }

    fn mode(&self) -> TransportMode {
        TransportMode::Simulated
    }
}

fn member(id: &str, phone: Option<&str>) -> MemberRecord {
    MemberRecord {
        membership_id: id.into(),
        name: format!("Member {id}"),
        email: format!("{id}@example.org"),
        phone_primary: phone.map(String::from),
        ..Default::default()
    }
}

fn roster_of(n: usize) -> Vec<MemberRecord> {
    (0..n)
        .map(|i| member(&format!("M-{i}"), Some(&format!("98765432{i:02}"))))
        .collect()
}

fn setup(members: Vec<MemberRecord>, transport: Arc<FakeTransport>) -> (Router, ServerState) {
    let config = Config {
        default_delay_ms: 0,
        ..Config::default()
    };
    let state = ServerState::new(config, RosterStore::new(members), transport);
    (build_app(state.clone()), state)
}

async fn call(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn multipart(field: &str, content: &[u8]) -> Request<Body> {
    let boundary = "XBOUNDARYX";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"members.xlsx\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::post("/upload-excel")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_health() {
    let (app, _) = setup(roster_of(3), Arc::new(FakeTransport::default()));
    let (status, body) = call(&app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 0);
    assert_eq!(body["data"]["status"], "ok");
    assert_eq!(body["data"]["members"], 3);
    assert_eq!(body["data"]["transport"], "simulated");
}

#[tokio::test]
async fn test_send_password_success() {
    let transport = Arc::new(FakeTransport::default());
    let (app, state) = setup(roster_of(2), transport.clone());

    let (status, body) = call(&app, post_json("/send-password", json!({ "membership_id": "M-1" }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["membership_id"], "M-1");
    assert_eq!(body["data"]["status"], "simulated");
    assert_eq!(body["data"]["last4"], "3201");
    assert_eq!(state.audit.len(), 1);

    let password = state.roster.find("M-1").unwrap().1.password.unwrap();
    assert!(transport.sent.lock()[0].1.contains(&password));
}

#[tokio::test]
async fn test_send_password_unknown_member_leaves_log_unchanged() {
    let (app, state) = setup(roster_of(2), Arc::new(FakeTransport::default()));

    let (status, body) =
        call(&app, post_json("/send-password", json!({ "membership_id": "NOPE" }))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 1001);
    assert_eq!(body["details"]["membership_id"], "NOPE");
    assert!(state.audit.is_empty());
}

#[tokio::test]
async fn test_send_password_validation() {
    let mut members = roster_of(1);
    members.push(member("NOPHONE", None));
    let (app, state) = setup(members, Arc::new(FakeTransport::default()));

    let (status, body) = call(&app, post_json("/send-password", json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "membership_id");

    let (status, _) = call(&app, post_json("/send-password", json!({ "membership_id": "  " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) =
        call(&app, post_json("/send-password", json!({ "membership_id": "NOPHONE" }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(state.audit.is_empty());
}

#[tokio::test]
async fn test_send_password_numeric_id() {
    let members = vec![member("1042", Some("9876543210"))];
    let (app, _) = setup(members, Arc::new(FakeTransport::default()));

    let (status, body) = call(&app, post_json("/send-password", json!({ "membership_id": 1042 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["membership_id"], "1042");
}

#[tokio::test]
async fn test_send_password_transport_failure() {
    let transport = Arc::new(FakeTransport {
        failing: ["9876543200".to_string()].into_iter().collect(),
        ..Default::default()
    });
    let (app, state) = setup(roster_of(1), transport);

    let (status, body) =
        call(&app, post_json("/send-password", json!({ "membership_id": "M-0" }))).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], 4001);
    assert_eq!(state.audit.recent(1)[0].status.as_str(), "failed");
}

#[tokio::test]
async fn test_bulk_send() {
    let transport = Arc::new(FakeTransport::default());
    let (app, state) = setup(roster_of(7), transport.clone());

    let (status, body) = call(
        &app,
        post_json(
            "/bulk-send",
            json!({ "batchSize": 5, "delayMs": 0, "start": 0, "limit": 7 }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["batches"], 2);
    assert_eq!(body["data"]["total"], 7);
    assert_eq!(body["data"]["successful"], 7);
    assert_eq!(body["data"]["failed"], 0);
    assert_eq!(state.audit.len(), 7);
    assert_eq!(transport.sent.lock().len(), 7);
}

#[tokio::test]
async fn test_bulk_send_empty_body_uses_defaults() {
    let (app, state) = setup(roster_of(3), Arc::new(FakeTransport::default()));

    let req = Request::post("/bulk-send").body(Body::empty()).unwrap();
    let (status, body) = call(&app, req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 3);
    assert_eq!(body["data"]["batches"], 1);
    assert_eq!(state.audit.len(), 3);
}

#[tokio::test]
async fn test_bulk_send_nothing_to_process() {
    let (app, _) = setup(roster_of(3), Arc::new(FakeTransport::default()));

    let (status, body) = call(&app, post_json("/bulk-send", json!({ "start": 10 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 3001);

    let (status, _) = call(&app, post_json("/bulk-send", json!({ "batchSize": 0 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_bulk_send_rejected_while_dispatch_active() {
    let (app, state) = setup(roster_of(3), Arc::new(FakeTransport::default()));

    let guard = state.engine.try_reserve().unwrap();
    let (status, body) = call(&app, post_json("/bulk-send", json!({}))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 3002);
    drop(guard);
}

#[tokio::test]
async fn test_bulk_send_invalid_json() {
    let (app, _) = setup(roster_of(1), Arc::new(FakeTransport::default()));
    let req = Request::post("/bulk-send")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = call(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 5);
}

#[tokio::test]
async fn test_manual_send() {
    let transport = Arc::new(FakeTransport::default());
    let (app, state) = setup(Vec::new(), transport.clone());

    let (status, body) = call(
        &app,
        post_json(
            "/send-manual-numbers",
            json!({ "numbers": ["123", "9876543210", "abc-987-654-3210"] }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 3);
    assert_eq!(body["data"]["successCount"], 2);
    assert_eq!(body["data"]["failCount"], 1);
    assert_eq!(body["data"]["results"][0]["success"], false);
    assert_eq!(transport.sent.lock().len(), 2);
    assert_eq!(state.audit.recent(1)[0].membership_id, "MANUAL");
}

#[tokio::test]
async fn test_manual_send_empty_list() {
    let (app, _) = setup(Vec::new(), Arc::new(FakeTransport::default()));

    let (status, body) =
        call(&app, post_json("/send-manual-numbers", json!({ "numbers": [] }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 3003);
}

#[tokio::test]
async fn test_template_update_and_read() {
    let transport = Arc::new(FakeTransport::default());
    let (app, _) = setup(roster_of(1), transport.clone());

    let (status, _) = call(
        &app,
        post_json(
            "/update-template",
            json!({ "template": "ID {membership_id} PW {password}" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = call(&app, get("/template")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["password"], "ID {membership_id} PW {password}");

    call(&app, post_json("/send-password", json!({ "membership_id": "M-0" }))).await;
    assert!(transport.sent.lock()[0].1.starts_with("ID M-0 PW "));
}

#[tokio::test]
async fn test_template_update_rejects_missing_placeholder() {
    let (app, state) = setup(roster_of(1), Arc::new(FakeTransport::default()));
    let before = state.templates.current();

    let (status, body) = call(
        &app,
        post_json("/update-template", json!({ "template": "Your ID is {membership_id}" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2001);
    assert_eq!(body["details"]["placeholder"], "{password}");
    assert_eq!(state.templates.current(), before);

    let (status, body) = call(&app, post_json("/update-template", json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "template");
}

#[tokio::test]
async fn test_birthday_template_update() {
    let (app, state) = setup(roster_of(1), Arc::new(FakeTransport::default()));

    let (status, _) = call(
        &app,
        post_json(
            "/update-template",
            json!({ "template": "Cheers {name}!", "kind": "birthday" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(state.templates.current().birthday, "Cheers {name}!");
}

#[tokio::test]
async fn test_sent_logs_newest_first_with_limit() {
    let (app, _) = setup(roster_of(5), Arc::new(FakeTransport::default()));
    call(&app, post_json("/bulk-send", json!({ "delayMs": 0 }))).await;

    let (status, body) = call(&app, get("/sent-logs?limit=2")).await;
    assert_eq!(status, StatusCode::OK);
    let entries = body["data"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["membership_id"], "M-4");
    assert_eq!(entries[1]["membership_id"], "M-3");
    assert!(entries[0].get("password").is_none());

    let (_, body) = call(&app, get("/sent-logs")).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_birthday_send_with_date_override() {
    let mut celebrant = member("B-1", Some("9876543201"));
    celebrant.date_of_birth = Some("19/10/1985".into());
    let transport = Arc::new(FakeTransport::default());
    let (app, state) = setup(vec![celebrant, member("B-2", Some("9876543202"))], transport.clone());

    let req = Request::post("/birthday-send?date=2026-10-19")
        .body(Body::empty())
        .unwrap();
    let (status, body) = call(&app, req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["date"], "19/10");
    assert_eq!(body["data"]["matched"], 1);
    assert_eq!(body["data"]["successful"], 1);
    assert_eq!(state.audit.recent(1)[0].status.as_str(), "birthday-simulated");
}

#[tokio::test]
async fn test_upload_requires_file_field() {
    let (app, _) = setup(roster_of(1), Arc::new(FakeTransport::default()));

    let (status, body) = call(&app, multipart("document", b"data")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 1004);

    let (status, body) = call(&app, multipart("file", b"")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 1005);
}

#[tokio::test]
async fn test_upload_unparsable_file_is_generic_500() {
    let (app, state) = setup(roster_of(2), Arc::new(FakeTransport::default()));

    let (status, body) = call(&app, multipart("file", b"definitely not a workbook")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], 9001);
    assert_eq!(body["message"], "Internal server error");
    // Previous roster survives a failed upload
    assert_eq!(state.roster.len(), 2);
}

#[tokio::test]
async fn test_upload_rejected_while_dispatch_active() {
    let (app, state) = setup(roster_of(2), Arc::new(FakeTransport::default()));

    let guard = state.engine.try_reserve().unwrap();
    let (status, body) = call(&app, multipart("file", b"anything")).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 1006);
    drop(guard);
}

#[tokio::test]
async fn test_upload_replaces_roster_and_clears_log() {
    let (app, state) = setup(roster_of(2), Arc::new(FakeTransport::default()));

    call(&app, post_json("/send-password", json!({ "membership_id": "M-0" }))).await;
    assert!(state.roster.find("M-0").unwrap().1.password.is_some());
    assert_eq!(state.audit.len(), 1);

    let bytes = common::member_workbook(&[
        ("M-0", "Member M-0", 9876543200.0),
        ("M-5", "Member M-5", 9876543205.0),
        ("M-6", "Member M-6", 9876543206.0),
    ]);
    let (status, body) = call(&app, multipart("file", &bytes)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["loaded"], 3);
    assert_eq!(body["data"]["withPhone"], 3);
    assert_eq!(state.roster.len(), 3);
    // Reload discards generated passwords
    assert!(state.roster.find("M-0").unwrap().1.password.is_none());

    let (_, logs) = call(&app, get("/sent-logs")).await;
    assert!(logs["data"].as_array().unwrap().is_empty());

    let (_, health) = call(&app, get("/health")).await;
    assert_eq!(health["data"]["members"], 3);
}

#[tokio::test]
async fn test_sent_logs_lenient_limit() {
    let (app, _) = setup(roster_of(3), Arc::new(FakeTransport::default()));
    call(&app, post_json("/bulk-send", json!({ "delayMs": 0 }))).await;

    let (status, body) = call(&app, get("/sent-logs?limit=abc")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 0);
    assert_eq!(body["data"].as_array().unwrap().len(), 3);

    let (status, body) = call(&app, get("/sent-logs?limit=1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}
