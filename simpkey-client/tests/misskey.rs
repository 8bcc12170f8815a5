use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use simpkey_client::{ClientError, MisskeyClient, RemoteClient};
use simpkey_core::models::Visibility;

/// Fake instance: echoes selected endpoints, fails others like Misskey does.
async fn api(Path(endpoint): Path<String>, Json(params): Json<Value>) -> axum::response::Response {
    match endpoint.as_str() {
        "i" if params["i"] == "T" => Json(json!({
            "id": "me",
            "username": "alice",
            "clientData": { "reactions": ["👍"] }
        }))
        .into_response(),
        "i" => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": {
                "message": "Credential required.",
                "code": "CREDENTIAL_REQUIRED",
                "id": "1384574d-a912-4b81-8601-c7b1c4085df1"
            }})),
        )
            .into_response(),
        "notes/show" => Json(json!({
            "id": params["noteId"],
            "userId": "someone",
            "visibility": "followers",
            "text": "hi"
        }))
        .into_response(),
        "users/show" => Json(json!({
            "id": "u2",
            "username": params["username"],
            "host": params.get("host").cloned().unwrap_or(Value::Null),
            "echo": params
        }))
        .into_response(),
        "signin" => Json(json!({ "id": "me", "i": format!("token-for-{}", params["username"].as_str().unwrap_or_default()), "echo": params })).into_response(),
        "notes/reactions/delete" => StatusCode::NO_CONTENT.into_response(),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
    }
}

async fn start_fake_instance() -> String {
    let app = Router::new().route("/api/{*endpoint}", post(api));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr.to_string()
}

fn client() -> MisskeyClient {
    MisskeyClient::new(reqwest::Client::new(), "http")
}

#[tokio::test]
async fn identity_decodes_client_data() {
    let host = start_fake_instance().await;
    let me = client().identity(&host, "T").await.unwrap();
    assert_eq!(me.id, "me");
    assert_eq!(me.reactions().unwrap(), ["👍"]);
    assert_eq!(me.extra["username"], "alice");
}

#[tokio::test]
async fn api_errors_carry_remote_message() {
    let host = start_fake_instance().await;
    let err = client().identity(&host, "wrong").await.unwrap_err();
    assert_eq!(
        err,
        ClientError::Api {
            status: 401,
            code: Some("CREDENTIAL_REQUIRED".into()),
            message: "Credential required.".into(),
        }
    );
    assert_eq!(err.message(), "Credential required.");
}

#[tokio::test]
async fn non_json_errors_mention_status() {
    let host = start_fake_instance().await;
    let err = client()
        .call(&host, "unknown/endpoint", json!({}))
        .await
        .unwrap_err();
    match err {
        ClientError::Api { status, code, message } => {
            assert_eq!(status, 500);
            assert!(code.is_none());
            assert!(message.contains("500"), "{message}");
        }
        other => panic!("expected Api error, got {other}"),
    }
}

#[tokio::test]
async fn note_by_id_sends_note_id() {
    let host = start_fake_instance().await;
    let note = client().note_by_id(&host, "abc").await.unwrap();
    assert_eq!(note.id, "abc");
    assert_eq!(note.visibility, Visibility::Followers);
}

#[tokio::test]
async fn user_by_name_omits_host_for_local_accounts() {
    let host = start_fake_instance().await;
    let local = client().user_by_name(&host, "bob", None).await.unwrap();
    assert_eq!(local.username, "bob");
    assert!(local.host.is_none());
    assert!(local.extra["echo"].get("host").is_none());

    let remote = client()
        .user_by_name(&host, "carol", Some("other.example"))
        .await
        .unwrap();
    assert_eq!(remote.host.as_deref(), Some("other.example"));
}

#[tokio::test]
async fn sign_in_forwards_second_factor() {
    let host = start_fake_instance().await;
    let signed = client()
        .sign_in(&host, "alice", "pw", Some("123456"))
        .await
        .unwrap();
    assert_eq!(signed.id, "me");
    assert_eq!(signed.i, "token-for-alice");
}

#[tokio::test]
async fn empty_success_body_is_null() {
    let host = start_fake_instance().await;
    let value = client()
        .call(&host, "notes/reactions/delete", json!({ "i": "T", "noteId": "n" }))
        .await
        .unwrap();
    assert_eq!(value, Value::Null);
}

#[tokio::test]
async fn unreachable_host_is_transport_error() {
    let err = client()
        .identity("127.0.0.1:1", "T")
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)), "{err}");
}
