//! Route table.
//!
//! | method | path                | handler                     |
//! |--------|---------------------|-----------------------------|
//! | GET    | `/`                 | landing or home timeline    |
//! | POST   | `/`                 | login                       |
//! | GET    | `/ltl` `/stl` `/gtl`| local, social, global       |
//! | GET    | `/notifications`    | notifications               |
//! | GET    | `/renote/{id}`      | renote preview              |
//! | GET    | `/reply/{id}`       | reply preview               |
//! | GET    | `/react/{id}`       | react preview               |
//! | POST   | `/action/{action}`  | action dispatch             |
//! | POST   | `/logout`           | logout                      |
//! | GET    | `/{@acct}`          | profile                     |

pub mod account;
pub mod action;
pub mod note;
pub mod profile;
pub mod timeline;

use axum::routing::{get, post};
use axum::Router;
use simpkey_client::RemoteClient;
use simpkey_core::AppError;

use crate::state::AppState;

pub fn routes<C: RemoteClient>() -> Router<AppState<C>> {
    Router::new()
        .route("/", get(timeline::index::<C>).post(account::login::<C>))
        .route("/ltl", get(timeline::local::<C>))
        .route("/stl", get(timeline::social::<C>))
        .route("/gtl", get(timeline::global::<C>))
        .route("/notifications", get(timeline::notifications::<C>))
        .route("/renote/{id}", get(note::renote::<C>))
        .route("/reply/{id}", get(note::reply::<C>))
        .route("/react/{id}", get(note::react::<C>))
        .route("/action/{action}", post(action::submit::<C>))
        .route("/logout", post(account::logout::<C>))
        .route("/{handle}", get(profile::show::<C>))
}

/// Catch-all for unmatched paths and methods.
pub async fn not_found() -> AppError {
    AppError::NotFound("Resource not found".into())
}
