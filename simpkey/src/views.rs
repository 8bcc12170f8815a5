//! View models handed to rendering.
//!
//! Each view carries the fetched resources plus the permission flags
//! already evaluated for the current viewer, so rendering never needs the
//! viewer's identity to decide what to offer.

use serde::Serialize;
use simpkey_core::models::{Identity, Note, Notification, User};
use simpkey_core::permissions::{can_react_single, can_renote, NotePermissions};

pub const SITE_NAME: &str = "Simpkey";

/// Shown to visitors without a session.
#[derive(Debug, Clone, Serialize)]
pub struct LandingView {
    pub title: &'static str,
}

impl LandingView {
    pub fn new() -> Self {
        Self { title: SITE_NAME }
    }
}

impl Default for LandingView {
    fn default() -> Self {
        Self::new()
    }
}

/// A note with what the viewer may do with it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteEntry {
    pub note: Note,
    #[serde(flatten)]
    pub permissions: NotePermissions,
}

impl NoteEntry {
    pub fn new(viewer: &Identity, note: Note) -> Self {
        let permissions = NotePermissions::of(viewer, &note);
        Self { note, permissions }
    }

    pub fn list(viewer: &Identity, notes: Vec<Note>) -> Vec<Self> {
        notes
            .into_iter()
            .map(|note| NoteEntry::new(viewer, note))
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineView {
    pub title: String,
    pub label: &'static str,
    pub identity: Identity,
    pub notes: Vec<NoteEntry>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationEntry {
    pub notification: Notification,
    /// Present when the notification embeds a note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<NotePermissions>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationsView {
    pub title: String,
    pub identity: Identity,
    pub notifications: Vec<NotificationEntry>,
}

impl NotificationsView {
    pub fn new(identity: Identity, notifications: Vec<Notification>) -> Self {
        let notifications = notifications
            .into_iter()
            .map(|notification| NotificationEntry {
                permissions: notification
                    .note
                    .as_ref()
                    .map(|note| NotePermissions::of(&identity, note)),
                notification,
            })
            .collect();
        Self {
            title: format!("Notifications - {SITE_NAME}"),
            identity,
            notifications,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenoteView {
    pub note: Note,
    pub can_renote: bool,
}

impl RenoteView {
    pub fn new(viewer: &Identity, note: Note) -> Self {
        Self {
            can_renote: can_renote(viewer, &note),
            note,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReplyView {
    pub note: Note,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactView {
    pub note: Note,
    /// The viewer's configured reaction palette.
    pub reactions: Option<Vec<String>>,
    pub can_react: bool,
}

impl ReactView {
    pub fn new(viewer: &Identity, note: Note) -> Self {
        Self {
            can_react: can_react_single(viewer, &note),
            reactions: viewer.reactions().map(<[String]>::to_vec),
            note,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    pub title: String,
    pub user: User,
    pub notes: Vec<NoteEntry>,
}
