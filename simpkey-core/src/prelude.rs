//! Common imports for controller code.
//!
//! ```ignore
//! use simpkey_core::prelude::*;
//! ```

pub use crate::error::{die, AppError};
pub use crate::models::{Identity, Meta, Note, Notification, User, Visibility};
pub use crate::permissions::{can_react, can_react_single, can_renote, NotePermissions};
pub use crate::session::{Session, SessionCookies, SessionState};

pub use axum::extract::{Form, FromRef, Path, State};
pub use axum::http::{HeaderMap, HeaderValue, StatusCode};
pub use axum::response::{AppendHeaders, IntoResponse, Redirect, Response};
pub use axum::{Json, Router};

/// Handler result with the uniform failure as error type.
pub type ApiResult<T> = Result<T, AppError>;
