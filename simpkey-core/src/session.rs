//! Session resolution.
//!
//! The session lives in three cookies: `i` (credential token), `host`
//! (instance the token belongs to) and `id` (account id, written on login
//! for the browser's benefit and never read back). A request is
//! authenticated when both `i` and `host` are present and non-empty.
//!
//! Handlers receive the session as an extractor argument, so it is read
//! exactly once per request:
//!
//! ```ignore
//! async fn notifications(session: Session) -> Result<Json<View>, AppError> { ... }
//! async fn index(session: Option<Session>) -> Response { ... }
//! ```

use std::convert::Infallible;

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::header::COOKIE;
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderValue};
use tracing::debug;

use crate::error::AppError;

pub const TOKEN_COOKIE: &str = "i";
pub const HOST_COOKIE: &str = "host";
pub const ID_COOKIE: &str = "id";

/// Credentials of an authenticated viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub host: String,
}

impl Session {
    pub fn new(token: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            host: host.into(),
        }
    }
}

/// Outcome of session resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Authenticated(Session),
    Anonymous,
}

impl SessionState {
    /// Classify a request from its headers. No I/O.
    pub fn resolve(headers: &HeaderMap) -> Self {
        let token = cookie_value(headers, TOKEN_COOKIE);
        let host = cookie_value(headers, HOST_COOKIE);
        match (token, host) {
            (Some(token), Some(host)) => SessionState::Authenticated(Session { token, host }),
            _ => SessionState::Anonymous,
        }
    }

    pub fn into_session(self) -> Option<Session> {
        match self {
            SessionState::Authenticated(session) => Some(session),
            SessionState::Anonymous => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }
}

/// Find a non-empty cookie by name across all `Cookie` headers.
fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, raw)| decode_value(raw))
        .filter(|value| !value.is_empty())
}

fn encode_value(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

fn decode_value(raw: &str) -> String {
    form_urlencoded::parse(raw.as_bytes())
        .next()
        .map(|(decoded, _)| decoded.into_owned())
        .unwrap_or_default()
}

/// Writes the session cookies.
///
/// Login sets all three cookies at once and logout clears all three; the
/// session is never updated piecemeal.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionCookies {
    secure: bool,
}

impl SessionCookies {
    pub fn new(secure: bool) -> Self {
        Self { secure }
    }

    /// `Set-Cookie` values establishing a session.
    pub fn login(&self, id: &str, host: &str, token: &str) -> Result<Vec<HeaderValue>, AppError> {
        [(ID_COOKIE, id), (HOST_COOKIE, host), (TOKEN_COOKIE, token)]
            .into_iter()
            .map(|(name, value)| self.header(name, &encode_value(value), None))
            .collect()
    }

    /// `Set-Cookie` values expiring every session cookie.
    pub fn logout(&self) -> Result<Vec<HeaderValue>, AppError> {
        [ID_COOKIE, HOST_COOKIE, TOKEN_COOKIE]
            .into_iter()
            .map(|name| self.header(name, "", Some(0)))
            .collect()
    }

    fn header(&self, name: &str, value: &str, max_age: Option<u64>) -> Result<HeaderValue, AppError> {
        let mut cookie = format!("{name}={value}; Path=/; HttpOnly; SameSite=Lax");
        if let Some(age) = max_age {
            cookie.push_str(&format!("; Max-Age={age}"));
        }
        if self.secure {
            cookie.push_str("; Secure");
        }
        HeaderValue::from_str(&cookie).map_err(|e| AppError::Internal(e.to_string()))
    }
}

fn resolve_parts(parts: &Parts) -> SessionState {
    let state = SessionState::resolve(&parts.headers);
    debug!(uri = %parts.uri, authenticated = state.is_authenticated(), "session resolved");
    state
}

impl<S> FromRequestParts<S> for SessionState
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(resolve_parts(parts))
    }
}

/// Guard extractor: rejects with [`AppError::Unauthenticated`] before the
/// handler body runs, so no remote call is made without a session.
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        resolve_parts(parts)
            .into_session()
            .ok_or(AppError::Unauthenticated)
    }
}

/// `Option<Session>` for views that also serve anonymous visitors.
impl<S> OptionalFromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(resolve_parts(parts).into_session())
    }
}
