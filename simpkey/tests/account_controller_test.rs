mod common;

use common::{app, identity, HOST};
use http::StatusCode;
use serde_json::json;
use simpkey_test::MockRemote;

#[tokio::test]
async fn login_sets_session_and_root_uses_it() {
    let remote = MockRemote::new()
        .respond("signin", json!({ "id": "u1", "i": "secret-token" }))
        .respond("i", identity())
        .respond("notes/timeline", json!([]));
    let app = app(&remote);

    let resp = app
        .post("/")
        .form(&[("host", HOST), ("username", "alice"), ("password", "pw"), ("token", "")])
        .send()
        .await
        .assert_redirect_to("/");

    let cookies = resp.set_cookies();
    assert_eq!(cookies.len(), 3);
    assert!(cookies.iter().any(|c| c.starts_with("id=u1;")));
    assert!(cookies.iter().any(|c| c.starts_with(&format!("host={HOST};"))));
    assert!(cookies.iter().any(|c| c.starts_with("i=secret-token;")));
    assert!(cookies.iter().all(|c| c.contains("HttpOnly")));

    assert_eq!(
        remote.calls_to("signin")[0].params,
        json!({ "username": "alice", "password": "pw" })
    );
    assert_eq!(remote.calls_to("signin")[0].host, HOST);

    app.get("/")
        .cookie_header(&resp.cookie_jar())
        .send()
        .await
        .assert_ok()
        .assert_json_path("label", "Home Timeline");

    let identity_calls = remote.calls_to("i");
    assert_eq!(identity_calls.len(), 1);
    assert_eq!(identity_calls[0].host, HOST);
    assert_eq!(identity_calls[0].params, json!({ "i": "secret-token" }));
}

#[tokio::test]
async fn login_forwards_second_factor() {
    let remote = MockRemote::new().respond("signin", json!({ "id": "u1", "i": "tok" }));

    app(&remote)
        .post("/")
        .form(&[("host", HOST), ("username", "alice"), ("password", "pw"), ("token", "123456")])
        .send()
        .await
        .assert_redirect_to("/");

    assert_eq!(
        remote.calls()[0].params,
        json!({ "username": "alice", "password": "pw", "token": "123456" })
    );
}

#[tokio::test]
async fn login_with_missing_fields_makes_no_call() {
    let remote = MockRemote::new();
    let app = app(&remote);

    for form in [
        vec![("username", "alice"), ("password", "pw")],
        vec![("host", HOST), ("username", ""), ("password", "pw")],
        vec![("host", HOST), ("username", "alice")],
    ] {
        let resp = app
            .post("/")
            .form(&form)
            .send()
            .await
            .assert_status(StatusCode::BAD_REQUEST)
            .assert_error("Some parameters are missing. Please retry.");
        assert!(resp.set_cookies().is_empty());
    }

    assert_eq!(remote.call_count(), 0);
}

#[tokio::test]
async fn failed_sign_in_sets_no_cookies() {
    let remote = MockRemote::new().fail("signin", "Invalid username or password.");

    let resp = app(&remote)
        .post("/")
        .form(&[("host", HOST), ("username", "alice"), ("password", "nope")])
        .send()
        .await
        .assert_status(StatusCode::BAD_GATEWAY)
        .assert_error("Invalid username or password.");

    assert!(resp.set_cookies().is_empty());
}

#[tokio::test]
async fn logout_clears_all_cookies() {
    let remote = MockRemote::new();

    let resp = app(&remote)
        .post("/logout")
        .session("T", HOST)
        .send()
        .await
        .assert_redirect_to("/");

    let cookies = resp.set_cookies();
    assert_eq!(cookies.len(), 3);
    assert!(cookies.iter().all(|c| c.contains("Max-Age=0")));
    assert_eq!(remote.call_count(), 0);
}

#[tokio::test]
async fn bodyless_login_reports_missing_parameters() {
    let remote = MockRemote::new();

    let resp = app(&remote)
        .post("/")
        .send()
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error("Some parameters are missing. Please retry.");

    assert!(resp.set_cookies().is_empty());
    assert_eq!(remote.call_count(), 0);
}
