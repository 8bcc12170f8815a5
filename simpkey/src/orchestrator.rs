//! Resource fetching for views.
//!
//! Each view maps to a fixed sequence of remote calls. Calls run one after
//! another; the first failure aborts the view and no partial model is
//! built.

use serde_json::json;
use simpkey_client::RemoteClient;
use simpkey_core::models::{Meta, Note, Notification, User};
use simpkey_core::{AppError, Session};
use tracing::debug;

use crate::views::{
    NoteEntry, NotificationsView, ProfileView, ReactView, RenoteView, ReplyView, TimelineView,
    SITE_NAME,
};

/// The four timelines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timeline {
    Home,
    Local,
    Social,
    Global,
}

/// Instance switch that can turn a timeline off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineGate {
    LocalTimeline,
    GlobalTimeline,
}

impl TimelineGate {
    pub fn is_closed(self, meta: &Meta) -> bool {
        match self {
            TimelineGate::LocalTimeline => meta.disable_local_timeline,
            TimelineGate::GlobalTimeline => meta.disable_global_timeline,
        }
    }
}

impl Timeline {
    pub fn endpoint(self) -> &'static str {
        match self {
            Timeline::Home => "notes/timeline",
            Timeline::Local => "notes/local-timeline",
            Timeline::Social => "notes/hybrid-timeline",
            Timeline::Global => "notes/global-timeline",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Timeline::Home => "Home Timeline",
            Timeline::Local => "Local Timeline",
            Timeline::Social => "Social Timeline",
            Timeline::Global => "Global Timeline",
        }
    }

    /// The social timeline mixes in local posts, so it shares the local
    /// switch. The home timeline cannot be disabled.
    pub fn gate(self) -> Option<TimelineGate> {
        match self {
            Timeline::Home => None,
            Timeline::Local | Timeline::Social => Some(TimelineGate::LocalTimeline),
            Timeline::Global => Some(TimelineGate::GlobalTimeline),
        }
    }

    pub fn disabled_message(self) -> &'static str {
        match self {
            Timeline::Home => "Home timeline has been disabled",
            Timeline::Local => "Local timeline has been disabled",
            Timeline::Social => "Social timeline has been disabled",
            Timeline::Global => "Global timeline has been disabled",
        }
    }
}

/// A profile handle: `name` or `name@remote.host`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acct {
    pub username: String,
    pub host: Option<String>,
}

impl Acct {
    /// Parse the part after the leading `@`. The host is the segment after
    /// the first `@`; anything past a second `@` is dropped.
    pub fn parse(handle: &str) -> Self {
        let mut segments = handle.split('@');
        let username = segments.next().unwrap_or_default().to_string();
        let host = segments
            .next()
            .filter(|host| !host.is_empty())
            .map(str::to_string);
        Acct { username, host }
    }
}

/// Fetches what a view needs on behalf of one session.
pub struct ResourceFetcher<'a, C> {
    client: &'a C,
    session: &'a Session,
}

impl<'a, C: RemoteClient> ResourceFetcher<'a, C> {
    pub fn new(client: &'a C, session: &'a Session) -> Self {
        Self { client, session }
    }

    fn host(&self) -> &str {
        &self.session.host
    }

    fn token_params(&self) -> serde_json::Value {
        json!({ "i": self.session.token })
    }

    /// Timeline view. A gated timeline checks `meta` first and stops there
    /// when the instance has it switched off.
    pub async fn timeline(&self, timeline: Timeline) -> Result<TimelineView, AppError> {
        if let Some(gate) = timeline.gate() {
            let meta: Meta = self
                .client
                .call_as(self.host(), "meta", self.token_params())
                .await?;
            if gate.is_closed(&meta) {
                debug!(host = %self.host(), ?timeline, "timeline disabled by instance");
                return Err(AppError::Disabled(timeline.disabled_message().to_string()));
            }
        }

        let identity = self.client.identity(self.host(), &self.session.token).await?;
        let notes: Vec<Note> = self
            .client
            .call_as(self.host(), timeline.endpoint(), self.token_params())
            .await?;

        debug!(host = %self.host(), ?timeline, notes = notes.len(), "timeline fetched");
        Ok(TimelineView {
            title: format!("{} - {SITE_NAME}", timeline.label()),
            label: timeline.label(),
            notes: NoteEntry::list(&identity, notes),
            identity,
        })
    }

    pub async fn notifications(&self) -> Result<NotificationsView, AppError> {
        let identity = self.client.identity(self.host(), &self.session.token).await?;
        let notifications: Vec<Notification> = self
            .client
            .call_as(self.host(), "i/notifications", self.token_params())
            .await?;
        Ok(NotificationsView::new(identity, notifications))
    }

    pub async fn renote_preview(&self, note_id: &str) -> Result<RenoteView, AppError> {
        let identity = self.client.identity(self.host(), &self.session.token).await?;
        let note = self.client.note_by_id(self.host(), note_id).await?;
        Ok(RenoteView::new(&identity, note))
    }

    pub async fn reply_preview(&self, note_id: &str) -> Result<ReplyView, AppError> {
        let note = self.client.note_by_id(self.host(), note_id).await?;
        Ok(ReplyView { note })
    }

    pub async fn react_preview(&self, note_id: &str) -> Result<ReactView, AppError> {
        let note = self.client.note_by_id(self.host(), note_id).await?;
        let identity = self.client.identity(self.host(), &self.session.token).await?;
        Ok(ReactView::new(&identity, note))
    }

    /// Profile view: resolve the account, then list its notes.
    pub async fn profile(&self, acct: &Acct) -> Result<ProfileView, AppError> {
        let identity = self.client.identity(self.host(), &self.session.token).await?;
        let user: User = self
            .client
            .user_by_name(self.host(), &acct.username, acct.host.as_deref())
            .await?;
        let notes: Vec<Note> = self
            .client
            .call_as(
                self.host(),
                "users/notes",
                json!({ "i": self.session.token, "userId": user.id }),
            )
            .await?;

        let handle = match &acct.host {
            Some(host) => format!("@{}@{}", acct.username, host),
            None => format!("@{}", acct.username),
        };
        Ok(ProfileView {
            title: format!("{handle} - {SITE_NAME}"),
            notes: NoteEntry::list(&identity, notes),
            user,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acct_local_and_remote() {
        assert_eq!(
            Acct::parse("alice"),
            Acct { username: "alice".into(), host: None }
        );
        assert_eq!(
            Acct::parse("bob@remote.example"),
            Acct { username: "bob".into(), host: Some("remote.example".into()) }
        );
        assert_eq!(
            Acct::parse("carol@"),
            Acct { username: "carol".into(), host: None }
        );
        assert_eq!(
            Acct::parse("dave@first.example@second.example"),
            Acct { username: "dave".into(), host: Some("first.example".into()) }
        );
    }

    #[test]
    fn social_shares_local_gate() {
        assert_eq!(Timeline::Social.gate(), Timeline::Local.gate());
        assert_eq!(Timeline::Global.gate(), Some(TimelineGate::GlobalTimeline));
        assert_eq!(Timeline::Home.gate(), None);
    }

    #[test]
    fn gates_read_matching_flag() {
        let meta = Meta {
            disable_local_timeline: true,
            disable_global_timeline: false,
        };
        assert!(TimelineGate::LocalTimeline.is_closed(&meta));
        assert!(!TimelineGate::GlobalTimeline.is_closed(&meta));
    }
}
