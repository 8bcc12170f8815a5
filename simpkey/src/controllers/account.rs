//! Login and logout.

use axum::extract::rejection::FormRejection;
use axum::extract::{Form, State};
use axum::http::header::SET_COOKIE;
use axum::response::{AppendHeaders, IntoResponse, Redirect, Response};
use garde::Validate;
use serde::Deserialize;
use simpkey_client::RemoteClient;
use simpkey_core::prelude::ApiResult;
use simpkey_core::AppError;
use tracing::{info, warn};

use crate::state::AppState;

const MISSING_PARAMETERS: &str = "Some parameters are missing. Please retry.";

#[derive(Debug, Default, Deserialize, Validate)]
pub struct LoginForm {
    #[garde(required, length(min = 1))]
    pub host: Option<String>,
    #[garde(required, length(min = 1))]
    pub username: Option<String>,
    #[garde(required, length(min = 1))]
    pub password: Option<String>,
    /// Second-factor code.
    #[garde(skip)]
    pub token: Option<String>,
}

pub async fn login<C: RemoteClient>(
    State(state): State<AppState<C>>,
    form: Result<Form<LoginForm>, FormRejection>,
) -> ApiResult<Response> {
    let form = match form {
        Ok(Form(form)) => form,
        // No body: every field is missing, which validation reports.
        Err(FormRejection::InvalidFormContentType(_)) => LoginForm::default(),
        Err(e) => return Err(AppError::BadRequest(e.body_text())),
    };
    if let Err(report) = form.validate() {
        warn!(%report, "login form rejected");
        return Err(AppError::BadRequest(MISSING_PARAMETERS.into()));
    }
    let (Some(host), Some(username), Some(password)) = (form.host, form.username, form.password)
    else {
        return Err(AppError::BadRequest(MISSING_PARAMETERS.into()));
    };
    let otp = form.token.filter(|code| !code.is_empty());

    let signed_in = state
        .client
        .sign_in(&host, &username, &password, otp.as_deref())
        .await
        .inspect_err(|e| warn!(%host, error = %e, "sign-in failed"))?;

    let cookies = state.cookies.login(&signed_in.id, &host, &signed_in.i)?;
    info!("login as {username}");
    Ok((
        AppendHeaders(cookies.into_iter().map(|value| (SET_COOKIE, value))),
        Redirect::to("/"),
    )
        .into_response())
}

pub async fn logout<C: RemoteClient>(State(state): State<AppState<C>>) -> ApiResult<Response> {
    let cookies = state.cookies.logout()?;
    Ok((
        AppendHeaders(cookies.into_iter().map(|value| (SET_COOKIE, value))),
        Redirect::to("/"),
    )
        .into_response())
}
