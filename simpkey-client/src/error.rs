use simpkey_core::AppError;

/// Failure of a remote API call.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientError {
    /// The request never produced a response (DNS, connect, TLS, timeout).
    Transport(String),

    /// The remote answered with an error status.
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// The response body did not have the expected shape.
    Decode { endpoint: String, message: String },
}

impl ClientError {
    /// The text shown to the user, as the remote or transport phrased it.
    pub fn message(&self) -> &str {
        match self {
            ClientError::Transport(msg) => msg,
            ClientError::Api { message, .. } => message,
            ClientError::Decode { message, .. } => message,
        }
    }
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::Transport(msg) => write!(f, "transport error: {msg}"),
            ClientError::Api {
                status,
                code: Some(code),
                message,
            } => write!(f, "remote error {status} ({code}): {message}"),
            ClientError::Api {
                status,
                code: None,
                message,
            } => write!(f, "remote error {status}: {message}"),
            ClientError::Decode { endpoint, message } => {
                write!(f, "unexpected response from {endpoint}: {message}")
            }
        }
    }
}

impl std::error::Error for ClientError {}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        AppError::RemoteCallFailure(err.message().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_message_passes_through_verbatim() {
        let err = ClientError::Api {
            status: 400,
            code: Some("NO_SUCH_NOTE".into()),
            message: "No such note.".into(),
        };
        assert_eq!(err.to_string(), "remote error 400 (NO_SUCH_NOTE): No such note.");
        match AppError::from(err) {
            AppError::RemoteCallFailure(msg) => assert_eq!(msg, "No such note."),
            other => panic!("expected RemoteCallFailure, got {other}"),
        }
    }
}
