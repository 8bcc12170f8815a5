//! Viewer permission predicates.
//!
//! Pure functions of the viewer and a note. They decide which secondary
//! actions a view offers and are recomputed on every render.

use serde::Serialize;

use crate::models::{Identity, Note, Visibility};

/// The viewer may renote their own notes and anyone's public or home notes.
pub fn can_renote(viewer: &Identity, note: &Note) -> bool {
    note.user_id == viewer.id || matches!(note.visibility, Visibility::Public | Visibility::Home)
}

/// The viewer may react to notes they did not write.
pub fn can_react(viewer: &Identity, note: &Note) -> bool {
    note.user_id != viewer.id
}

/// Single-note variant of [`can_react`]: a note the viewer already reacted
/// to cannot be reacted to again.
pub fn can_react_single(viewer: &Identity, note: &Note) -> bool {
    can_react(viewer, note) && note.my_reaction.is_none()
}

/// Both predicates evaluated for one note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotePermissions {
    pub can_renote: bool,
    pub can_react: bool,
}

impl NotePermissions {
    pub fn of(viewer: &Identity, note: &Note) -> Self {
        Self {
            can_renote: can_renote(viewer, note),
            can_react: can_react(viewer, note),
        }
    }
}
