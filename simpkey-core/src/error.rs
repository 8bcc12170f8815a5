use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

/// Helper to create a JSON error response with a standard `{ "error": message }` body.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let body = serde_json::json!({ "error": message.into() });
    (status, Json(body)).into_response()
}

/// Render the uniform failure view.
///
/// Every failure the controller produces goes through here, whatever its
/// cause. When no status is given the failure is rendered as `500`.
pub fn die(message: impl Into<String>, status: Option<StatusCode>) -> Response {
    error_response(status.unwrap_or(StatusCode::INTERNAL_SERVER_ERROR), message)
}

/// Failures a request can end in.
///
/// All variants render through [`die`]; only the status code and message
/// differ.
pub enum AppError {
    /// A guarded view was requested without a session.
    Unauthenticated,
    /// The remote API (or the transport to it) failed. The message is the
    /// remote's own text, passed through untouched.
    RemoteCallFailure(String),
    /// A mutating request lacked a required field.
    MissingField {
        field: &'static str,
        message: String,
    },
    /// The instance has switched the requested view off.
    Disabled(String),
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl AppError {
    pub fn missing_field(field: &'static str, message: impl Into<String>) -> Self {
        AppError::MissingField {
            field,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::RemoteCallFailure(_) => StatusCode::BAD_GATEWAY,
            AppError::MissingField { .. } | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Disabled(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The user-visible message.
    pub fn message(&self) -> &str {
        match self {
            AppError::Unauthenticated => "Please login",
            AppError::RemoteCallFailure(msg)
            | AppError::Disabled(msg)
            | AppError::BadRequest(msg)
            | AppError::NotFound(msg)
            | AppError::Internal(msg) => msg,
            AppError::MissingField { message, .. } => message,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::warn!(status = %self.status(), error = %self, "request failed");
        die(self.message().to_string(), Some(self.status()))
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Unauthenticated => write!(f, "Unauthenticated"),
            AppError::RemoteCallFailure(msg) => write!(f, "Remote Call Failure: {msg}"),
            AppError::MissingField { field, message } => {
                write!(f, "Missing Field `{field}`: {message}")
            }
            AppError::Disabled(msg) => write!(f, "Disabled: {msg}"),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {msg}"),
            AppError::NotFound(msg) => write!(f, "Not Found: {msg}"),
            AppError::Internal(msg) => write!(f, "Internal Error: {msg}"),
        }
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as std::fmt::Display>::fmt(self, f)
    }
}

impl std::error::Error for AppError {}
