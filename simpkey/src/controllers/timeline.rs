use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use simpkey_client::RemoteClient;
use simpkey_core::prelude::ApiResult;
use simpkey_core::Session;
use tracing::debug;

use crate::orchestrator::{ResourceFetcher, Timeline};
use crate::state::AppState;
use crate::views::{LandingView, NotificationsView, TimelineView};

async fn show<C: RemoteClient>(
    state: &AppState<C>,
    session: &Session,
    timeline: Timeline,
) -> ApiResult<Json<TimelineView>> {
    let view = ResourceFetcher::new(&state.client, session)
        .timeline(timeline)
        .await?;
    Ok(Json(view))
}

/// Landing page for visitors, home timeline for signed-in users.
pub async fn index<C: RemoteClient>(
    State(state): State<AppState<C>>,
    session: Option<Session>,
) -> ApiResult<Response> {
    match session {
        Some(session) => Ok(show(&state, &session, Timeline::Home).await?.into_response()),
        None => {
            debug!("anonymous visit, serving landing page");
            Ok(Json(LandingView::new()).into_response())
        }
    }
}

pub async fn local<C: RemoteClient>(
    State(state): State<AppState<C>>,
    session: Session,
) -> ApiResult<Json<TimelineView>> {
    show(&state, &session, Timeline::Local).await
}

pub async fn social<C: RemoteClient>(
    State(state): State<AppState<C>>,
    session: Session,
) -> ApiResult<Json<TimelineView>> {
    show(&state, &session, Timeline::Social).await
}

pub async fn global<C: RemoteClient>(
    State(state): State<AppState<C>>,
    session: Session,
) -> ApiResult<Json<TimelineView>> {
    show(&state, &session, Timeline::Global).await
}

pub async fn notifications<C: RemoteClient>(
    State(state): State<AppState<C>>,
    session: Session,
) -> ApiResult<Json<NotificationsView>> {
    let view = ResourceFetcher::new(&state.client, &session)
        .notifications()
        .await?;
    Ok(Json(view))
}
