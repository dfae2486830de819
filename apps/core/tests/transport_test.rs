mod support;

use std::sync::Arc;

use quicklaunch_core::app_state::AppState;
use quicklaunch_core::config::Config;
use quicklaunch_core::contract::{CoreRequest, CoreResponse, JsonOperation};
use quicklaunch_core::transport::{handle_json, handle_request, ErrorCode, TransportResponse};
use serde_json::Value;
use support::{FakeSync, RecordingHost};

fn state() -> AppState {
    AppState::with_parts(Config::default(), None, Arc::new(FakeSync::default())).unwrap()
}

fn call(state: &mut AppState, host: &mut RecordingHost, raw: &str) -> Value {
    serde_json::from_str(&handle_json(state, host, raw)).unwrap()
}

#[test]
fn query_returns_state_snapshot() {
    let mut state = state();
    let mut host = RecordingHost::default();

    let reply = call(
        &mut state,
        &mut host,
        r#"{"kind":"query","payload":{"text":"terminal"}}"#,
    );
    assert_eq!(reply["status"], "ok");
    let snapshot = &reply["response"]["payload"];
    assert_eq!(reply["response"]["kind"], "state");
    assert_eq!(snapshot["view"], "search");
    assert_eq!(snapshot["candidates"][0]["action"], "terminal");
    assert_eq!(snapshot["candidates"][0]["kind"], "action");
}

#[test]
fn submit_runs_selected_candidate() {
    let mut state = state();
    let mut host = RecordingHost::default();
    call(
        &mut state,
        &mut host,
        r#"{"kind":"query","payload":{"text":"setting"}}"#,
    );

    let reply = call(&mut state, &mut host, r#"{"kind":"submit"}"#);
    assert_eq!(reply["response"]["payload"]["view"], "settings");

    let back = call(&mut state, &mut host, r#"{"kind":"back"}"#);
    assert_eq!(back["response"]["payload"]["view"], "search");
    assert_eq!(back["response"]["payload"]["query"], "");
}

#[test]
fn invalid_json_reports_error_code() {
    let mut state = state();
    let mut host = RecordingHost::default();
    let reply = call(&mut state, &mut host, "{not-json");
    assert_eq!(reply["status"], "err");
    assert_eq!(reply["error"]["code"], "invalid_json");
}

#[test]
fn unknown_favorite_is_not_found() {
    let mut state = state();
    let mut host = RecordingHost::default();
    let response = handle_request(
        &mut state,
        &mut host,
        CoreRequest::DeleteFavorite { id: "nope".into() },
    );
    match response {
        TransportResponse::Err { error } => assert_eq!(error.code, ErrorCode::ItemNotFound),
        other => panic!("expected error, got {other:?}"),
    }
}

#[test]
fn add_favorite_reports_status_message() {
    let mut state = state();
    let mut host = RecordingHost::default();
    let reply = call(
        &mut state,
        &mut host,
        r#"{"kind":"add_favorite","payload":{"name":"Docs","url":"https://docs.rs"}}"#,
    );
    let snapshot = &reply["response"]["payload"];
    assert_eq!(snapshot["favorites"][0]["name"], "Docs");
    assert_eq!(snapshot["favorite_status"], "Not logged in; saved locally.");
}

#[test]
fn json_tool_formats_and_rejects_bad_documents() {
    let mut state = state();
    let mut host = RecordingHost::default();

    let formatted = handle_request(
        &mut state,
        &mut host,
        CoreRequest::Json {
            operation: JsonOperation::Minify,
            text: "{ \"a\" : [1, 2] }".into(),
        },
    );
    assert_eq!(
        formatted,
        TransportResponse::Ok {
            response: CoreResponse::Json {
                text: r#"{"a":[1,2]}"#.into()
            }
        }
    );

    let reply = call(
        &mut state,
        &mut host,
        r#"{"kind":"json","payload":{"operation":"validate","text":"{\"a\":"}}"#,
    );
    assert_eq!(reply["error"]["code"], "invalid_document");
}

#[test]
fn login_requires_credentials() {
    let mut state = state();
    let mut host = RecordingHost::default();
    let reply = call(
        &mut state,
        &mut host,
        r#"{"kind":"login","payload":{"username":"","password":""}}"#,
    );
    assert_eq!(reply["error"]["code"], "invalid_request");

    let ok = call(
        &mut state,
        &mut host,
        r#"{"kind":"login","payload":{"username":"ada","password":"pw"}}"#,
    );
    assert_eq!(ok["response"]["payload"]["logged_in_as"], "ada");
}

#[test]
fn save_settings_writes_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = Config {
        config_path: dir.path().join("config.toml"),
        ..Default::default()
    };
    let mut state = AppState::with_parts(cfg, None, Arc::new(FakeSync::default())).unwrap();
    let mut host = RecordingHost::default();

    let reply = call(
        &mut state,
        &mut host,
        r#"{"kind":"save_settings","payload":{"hotkey":"ctrl+shift+p","api_base_url":"http://localhost:8080","tray_mode":true}}"#,
    );
    assert_eq!(reply["status"], "ok");
    assert_eq!(state.config().hotkey, "Ctrl+Shift+P");
    let saved = std::fs::read_to_string(dir.path().join("config.toml")).unwrap();
    assert!(saved.contains("Ctrl+Shift+P"));

    let rejected = call(
        &mut state,
        &mut host,
        r#"{"kind":"save_settings","payload":{"hotkey":"Alt+F4","api_base_url":"http://localhost:8080"}}"#,
    );
    assert_eq!(rejected["error"]["code"], "invalid_request");
    assert_eq!(state.config().hotkey, "Ctrl+Shift+P");
}

#[test]
fn snapshot_hands_the_canonical_hotkey_to_the_host() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = Config {
        config_path: dir.path().join("config.toml"),
        ..Default::default()
    };
    let mut state = AppState::with_parts(cfg, None, Arc::new(FakeSync::default())).unwrap();
    let mut host = RecordingHost::default();

    let initial = call(&mut state, &mut host, r#"{"kind":"state"}"#);
    assert_eq!(initial["response"]["payload"]["hotkey"], "Shift+F");

    let saved = call(
        &mut state,
        &mut host,
        r#"{"kind":"save_settings","payload":{"hotkey":"shift + ALT + space","api_base_url":"http://localhost:8080"}}"#,
    );
    assert_eq!(saved["response"]["payload"]["hotkey"], "Alt+Shift+Space");
}
