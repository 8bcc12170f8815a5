#![allow(dead_code)]

use serde_json::{json, Value};
use simpkey::{build_router, AppState};
use simpkey_core::{SecureHeaders, SessionCookies};
use simpkey_test::{MockRemote, TestApp};

pub const TOKEN: &str = "T";
pub const HOST: &str = "misskey.example";
pub const ME: &str = "me";

pub fn app(remote: &MockRemote) -> TestApp {
    app_with_headers(remote, SecureHeaders::default())
}

pub fn app_with_headers(remote: &MockRemote, headers: SecureHeaders) -> TestApp {
    TestApp::new(build_router(
        AppState::new(remote.clone(), SessionCookies::new(false)),
        headers,
    ))
}

pub fn identity() -> Value {
    json!({
        "id": ME,
        "username": "alice",
        "clientData": { "reactions": ["👍", "❤", "🎉"] }
    })
}

pub fn note(id: &str, user_id: &str, visibility: &str) -> Value {
    json!({ "id": id, "userId": user_id, "visibility": visibility, "text": "hello" })
}
