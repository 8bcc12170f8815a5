//! Single-note previews for the renote, reply and react forms.

use axum::extract::{Path, State};
use axum::Json;
use simpkey_client::RemoteClient;
use simpkey_core::prelude::ApiResult;
use simpkey_core::Session;

use crate::orchestrator::ResourceFetcher;
use crate::state::AppState;
use crate::views::{ReactView, RenoteView, ReplyView};

pub async fn renote<C: RemoteClient>(
    State(state): State<AppState<C>>,
    session: Session,
    Path(id): Path<String>,
) -> ApiResult<Json<RenoteView>> {
    let view = ResourceFetcher::new(&state.client, &session)
        .renote_preview(&id)
        .await?;
    Ok(Json(view))
}

pub async fn reply<C: RemoteClient>(
    State(state): State<AppState<C>>,
    session: Session,
    Path(id): Path<String>,
) -> ApiResult<Json<ReplyView>> {
    let view = ResourceFetcher::new(&state.client, &session)
        .reply_preview(&id)
        .await?;
    Ok(Json(view))
}

pub async fn react<C: RemoteClient>(
    State(state): State<AppState<C>>,
    session: Session,
    Path(id): Path<String>,
) -> ApiResult<Json<ReactView>> {
    let view = ResourceFetcher::new(&state.client, &session)
        .react_preview(&id)
        .await?;
    Ok(Json(view))
}
