use serde_json::{json, Value};
use simpkey_client::RemoteClient;
use simpkey_test::{resolve_path, MockRemote};

#[test]
fn test_resolve_nested_field() {
    let v = json!({"identity": {"id": "me"}});
    assert_eq!(resolve_path(&v, "identity.id"), json!("me"));
}

#[test]
fn test_resolve_array_nested() {
    let v = json!({"notes": [{"note": {"id": "n1"}, "canReact": true}]});
    assert_eq!(resolve_path(&v, "notes[0].note.id"), json!("n1"));
    assert_eq!(resolve_path(&v, "notes[0].canReact"), json!(true));
}

#[test]
fn test_resolve_len() {
    let v = json!({"notes": [1, 2, 3]});
    assert_eq!(resolve_path(&v, "notes.len()"), json!(3));
}

#[test]
fn test_resolve_missing_field() {
    let v = json!({"label": "Home Timeline"});
    assert_eq!(resolve_path(&v, "missing.deeper[2]"), Value::Null);
}

#[tokio::test]
async fn mock_records_calls_and_replays_scripts() {
    let remote = MockRemote::new().respond("i", json!({ "id": "me" }));

    let me = remote.identity("h.example", "T").await.unwrap();
    assert_eq!(me.id, "me");

    let calls = remote.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].host, "h.example");
    assert_eq!(calls[0].endpoint, "i");
    assert_eq!(calls[0].params, json!({ "i": "T" }));
}

#[tokio::test]
async fn mock_fails_unscripted_and_scripted_failures() {
    let remote = MockRemote::new().fail("notes/show", "No such note.");

    let err = remote.note_by_id("h", "n").await.unwrap_err();
    assert_eq!(err.message(), "No such note.");

    let err = remote.call("h", "meta", json!({})).await.unwrap_err();
    assert_eq!(err.message(), "unscripted endpoint: meta");

    assert_eq!(remote.endpoints(), ["notes/show", "meta"]);
}
