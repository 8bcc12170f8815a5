mod common;

use common::{app, identity, note, HOST, ME, TOKEN};
use http::StatusCode;
use serde_json::json;
use simpkey_test::MockRemote;

#[tokio::test]
async fn renote_preview_for_public_note() {
    let remote = MockRemote::new()
        .respond("i", identity())
        .respond("notes/show", note("n1", "other", "public"));

    app(&remote)
        .get("/renote/n1")
        .session(TOKEN, HOST)
        .send()
        .await
        .assert_ok()
        .assert_json_path("note.id", "n1")
        .assert_json_path("canRenote", true);

    assert_eq!(remote.endpoints(), ["i", "notes/show"]);
    assert_eq!(remote.calls_to("notes/show")[0].params, json!({ "noteId": "n1" }));
}

#[tokio::test]
async fn renote_preview_refuses_others_followers_note() {
    let remote = MockRemote::new()
        .respond("i", identity())
        .respond("notes/show", note("n1", "other", "followers"));

    app(&remote)
        .get("/renote/n1")
        .session(TOKEN, HOST)
        .send()
        .await
        .assert_ok()
        .assert_json_path("canRenote", false);
}

#[tokio::test]
async fn reply_preview_fetches_only_the_note() {
    let remote = MockRemote::new().respond("notes/show", note("n9", "other", "home"));

    app(&remote)
        .get("/reply/n9")
        .session(TOKEN, HOST)
        .send()
        .await
        .assert_ok()
        .assert_json_path("note.id", "n9");

    assert_eq!(remote.endpoints(), ["notes/show"]);
}

#[tokio::test]
async fn react_preview_offers_palette() {
    let remote = MockRemote::new()
        .respond("notes/show", note("n1", "other", "public"))
        .respond("i", identity());

    app(&remote)
        .get("/react/n1")
        .session(TOKEN, HOST)
        .send()
        .await
        .assert_ok()
        .assert_json_path("canReact", true)
        .assert_json_path("reactions.len()", 3)
        .assert_json_path("reactions[0]", "👍");

    assert_eq!(remote.endpoints(), ["notes/show", "i"]);
}

#[tokio::test]
async fn react_preview_blocks_second_reaction() {
    let mut reacted = note("n1", "other", "public");
    reacted["myReaction"] = json!("👍");
    let remote = MockRemote::new()
        .respond("notes/show", reacted)
        .respond("i", identity());

    app(&remote)
        .get("/react/n1")
        .session(TOKEN, HOST)
        .send()
        .await
        .assert_ok()
        .assert_json_path("canReact", false);
}

#[tokio::test]
async fn react_preview_blocks_own_note() {
    let remote = MockRemote::new()
        .respond("notes/show", note("n1", ME, "public"))
        .respond("i", identity());

    app(&remote)
        .get("/react/n1")
        .session(TOKEN, HOST)
        .send()
        .await
        .assert_ok()
        .assert_json_path("canReact", false);
}

#[tokio::test]
async fn missing_note_fails_with_remote_message() {
    let remote = MockRemote::new().fail("notes/show", "No such note.");

    app(&remote)
        .get("/reply/gone")
        .session(TOKEN, HOST)
        .send()
        .await
        .assert_status(StatusCode::BAD_GATEWAY)
        .assert_error("No such note.");
}

#[tokio::test]
async fn previews_require_session() {
    let remote = MockRemote::new();
    for path in ["/renote/n1", "/reply/n1", "/react/n1"] {
        app(&remote)
            .get(path)
            .send()
            .await
            .assert_unauthorized()
            .assert_error("Please login");
    }
    assert_eq!(remote.call_count(), 0);
}
