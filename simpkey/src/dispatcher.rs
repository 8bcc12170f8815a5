//! Validation and dispatch of mutating requests.
//!
//! A form submission to `/action/{kind}` is parsed into an [`ActionRequest`]
//! before anything leaves the process. Validation failures surface as
//! [`AppError::MissingField`] and issue no remote call; an accepted action
//! issues exactly one.

use std::collections::HashMap;

use serde_json::{json, Map, Value};
use simpkey_client::RemoteClient;
use simpkey_core::{AppError, Session};
use tracing::info;

const NOTE_ID_REQUIRED: &str = "noteId required";
const NO_EMOJI: &str = "No emoji was specified";
const CUSTOM_REACTION: &str = "custom";

/// Fields of a `create-note` submission. Every field is optional and only
/// non-empty ones are forwarded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateNote {
    pub text: Option<String>,
    pub renote_id: Option<String>,
    pub reply_id: Option<String>,
    /// Set only when the form asked for a content warning.
    pub cw: Option<String>,
    pub visibility: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionRequest {
    CreateNote(CreateNote),
    React { note_id: String, reaction: String },
    Unreact { note_id: String },
    /// Any other kind. Dispatching it is a no-op that still redirects.
    Unrecognized(String),
}

/// Form fields are present only when non-empty.
fn field(fields: &HashMap<String, String>, name: &str) -> Option<String> {
    fields.get(name).filter(|value| !value.is_empty()).cloned()
}

fn require(
    fields: &HashMap<String, String>,
    name: &'static str,
    message: &str,
) -> Result<String, AppError> {
    field(fields, name).ok_or_else(|| AppError::missing_field(name, message))
}

impl ActionRequest {
    pub fn parse(kind: &str, fields: &HashMap<String, String>) -> Result<Self, AppError> {
        match kind {
            "create-note" => Ok(ActionRequest::CreateNote(CreateNote {
                text: field(fields, "text"),
                renote_id: field(fields, "renoteId"),
                reply_id: field(fields, "replyId"),
                cw: field(fields, "useCw").map(|_| field(fields, "cw").unwrap_or_default()),
                visibility: field(fields, "visibility"),
            })),
            "react" => {
                let note_id = require(fields, "noteId", NOTE_ID_REQUIRED)?;
                let reaction = require(fields, "reaction", NO_EMOJI)?;
                let reaction = if reaction == CUSTOM_REACTION {
                    require(fields, "customReaction", NO_EMOJI)?
                } else {
                    reaction
                };
                Ok(ActionRequest::React { note_id, reaction })
            }
            "unreact" => Ok(ActionRequest::Unreact {
                note_id: require(fields, "noteId", NOTE_ID_REQUIRED)?,
            }),
            other => Ok(ActionRequest::Unrecognized(other.to_string())),
        }
    }
}

impl CreateNote {
    /// `notes/create` body: the credential plus every field that is set.
    pub fn payload(&self, token: &str) -> Value {
        let mut body = Map::new();
        body.insert("i".into(), json!(token));
        let optional = [
            ("text", &self.text),
            ("renoteId", &self.renote_id),
            ("replyId", &self.reply_id),
            ("cw", &self.cw),
            ("visibility", &self.visibility),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                body.insert(key.into(), json!(value));
            }
        }
        Value::Object(body)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Dispatched(&'static str),
    Ignored(String),
}

/// Issue the remote call for `action`. At most one call per invocation.
pub async fn dispatch<C: RemoteClient>(
    client: &C,
    session: &Session,
    action: &ActionRequest,
) -> Result<DispatchOutcome, AppError> {
    let token = &session.token;
    let (endpoint, payload) = match action {
        ActionRequest::CreateNote(note) => ("notes/create", note.payload(token)),
        ActionRequest::React { note_id, reaction } => (
            "notes/reactions/create",
            json!({ "i": token, "noteId": note_id, "reaction": reaction }),
        ),
        ActionRequest::Unreact { note_id } => (
            "notes/reactions/delete",
            json!({ "i": token, "noteId": note_id }),
        ),
        ActionRequest::Unrecognized(kind) => {
            info!(kind = %kind, "ignoring unrecognized action");
            return Ok(DispatchOutcome::Ignored(kind.clone()));
        }
    };

    client.call(&session.host, endpoint, payload).await?;
    info!(host = %session.host, endpoint, "action dispatched");
    Ok(DispatchOutcome::Dispatched(endpoint))
}

#[cfg(test)]
mod tests {
    use simpkey_test::MockRemote;

    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn missing(result: Result<ActionRequest, AppError>) -> (&'static str, String) {
        match result {
            Err(AppError::MissingField { field, message }) => (field, message),
            other => panic!("expected MissingField, got {other:?}"),
        }
    }

    #[test]
    fn react_requires_note_id_then_reaction() {
        assert_eq!(
            missing(ActionRequest::parse("react", &fields(&[("reaction", "👍")]))),
            ("noteId", "noteId required".to_string())
        );
        assert_eq!(
            missing(ActionRequest::parse("react", &fields(&[("noteId", "n1")]))),
            ("reaction", "No emoji was specified".to_string())
        );
    }

    #[test]
    fn custom_reaction_replaces_literal() {
        let parsed = ActionRequest::parse(
            "react",
            &fields(&[("noteId", "n1"), ("reaction", "custom"), ("customReaction", ":blob:")]),
        )
        .unwrap();
        assert_eq!(
            parsed,
            ActionRequest::React { note_id: "n1".into(), reaction: ":blob:".into() }
        );

        let (field, _) = missing(ActionRequest::parse(
            "react",
            &fields(&[("noteId", "n1"), ("reaction", "custom")]),
        ));
        assert_eq!(field, "customReaction");
    }

    #[test]
    fn empty_note_id_counts_as_absent() {
        let (field, _) = missing(ActionRequest::parse("unreact", &fields(&[("noteId", "")])));
        assert_eq!(field, "noteId");
    }

    fn create_note(pairs: &[(&str, &str)]) -> CreateNote {
        match ActionRequest::parse("create-note", &fields(pairs)).unwrap() {
            ActionRequest::CreateNote(note) => note,
            other => panic!("expected CreateNote, got {other:?}"),
        }
    }

    #[test]
    fn create_note_omits_absent_fields() {
        let note = create_note(&[("text", "hello"), ("replyId", ""), ("cw", "ignored")]);
        assert_eq!(note.payload("T"), json!({ "i": "T", "text": "hello" }));
    }

    #[test]
    fn use_cw_forwards_cw_or_empty() {
        let with_cw = create_note(&[("useCw", "on"), ("cw", "spoilers"), ("visibility", "home")]);
        assert_eq!(
            with_cw.payload("T"),
            json!({ "i": "T", "cw": "spoilers", "visibility": "home" })
        );

        let bare = create_note(&[("useCw", "on")]);
        assert_eq!(bare.payload("T"), json!({ "i": "T", "cw": "" }));
    }

    #[test]
    fn unknown_kind_is_unrecognized() {
        let parsed = ActionRequest::parse("frobnicate", &HashMap::new()).unwrap();
        assert_eq!(parsed, ActionRequest::Unrecognized("frobnicate".into()));
    }

    #[tokio::test]
    async fn dispatch_reports_endpoint_or_ignored_kind() {
        let remote = MockRemote::new().respond("notes/reactions/delete", Value::Null);
        let session = Session::new("T", "h.example");

        let unreact = ActionRequest::Unreact { note_id: "abc".into() };
        assert_eq!(
            dispatch(&remote, &session, &unreact).await.unwrap(),
            DispatchOutcome::Dispatched("notes/reactions/delete")
        );

        let unknown = ActionRequest::Unrecognized("frobnicate".into());
        assert_eq!(
            dispatch(&remote, &session, &unknown).await.unwrap(),
            DispatchOutcome::Ignored("frobnicate".into())
        );

        assert_eq!(remote.endpoints(), ["notes/reactions/delete"]);
        assert_eq!(
            remote.calls()[0].params,
            json!({ "i": "T", "noteId": "abc" })
        );
    }
}
