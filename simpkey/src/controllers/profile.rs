use axum::extract::{Path, State};
use axum::Json;
use simpkey_client::RemoteClient;
use simpkey_core::prelude::ApiResult;
use simpkey_core::{AppError, Session};

use crate::orchestrator::{Acct, ResourceFetcher};
use crate::state::AppState;
use crate::views::ProfileView;

/// `/@name` or `/@name@host`. Any other single segment is not a route,
/// so the prefix is checked before the session.
pub async fn show<C: RemoteClient>(
    State(state): State<AppState<C>>,
    session: Option<Session>,
    Path(handle): Path<String>,
) -> ApiResult<Json<ProfileView>> {
    let Some(acct) = handle.strip_prefix('@').filter(|rest| !rest.is_empty()) else {
        return Err(AppError::NotFound("Resource not found".into()));
    };
    let session = session.ok_or(AppError::Unauthenticated)?;

    let view = ResourceFetcher::new(&state.client, &session)
        .profile(&Acct::parse(acct))
        .await?;
    Ok(Json(view))
}
