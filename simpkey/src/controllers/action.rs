use std::collections::HashMap;

use axum::extract::rejection::FormRejection;
use axum::extract::{Form, Path, State};
use axum::response::Redirect;
use simpkey_client::RemoteClient;
use simpkey_core::prelude::ApiResult;
use simpkey_core::{AppError, Session};

use crate::dispatcher::{dispatch, ActionRequest};
use crate::state::AppState;

/// `POST /action/{action}`. Redirects to the root on success, including
/// for action kinds that are not recognized.
pub async fn submit<C: RemoteClient>(
    State(state): State<AppState<C>>,
    session: Session,
    Path(kind): Path<String>,
    form: Result<Form<HashMap<String, String>>, FormRejection>,
) -> ApiResult<Redirect> {
    let fields = match form {
        Ok(Form(fields)) => fields,
        // A submission without a body carries no fields.
        Err(FormRejection::InvalidFormContentType(_)) => HashMap::new(),
        Err(e) => return Err(AppError::BadRequest(e.body_text())),
    };
    let action = ActionRequest::parse(&kind, &fields)?;
    dispatch(&state.client, &session, &action).await?;
    Ok(Redirect::to("/"))
}
