use serde::Deserialize;
use serde_json::Value;
use simpkey_core::AppConfig;
use tracing::debug;

use crate::client::RemoteClient;
use crate::error::ClientError;

/// HTTP client for the Misskey API (`POST {scheme}://{host}/api/{endpoint}`).
///
/// The instance is chosen per call, since every session carries its own
/// host.
#[derive(Clone)]
pub struct MisskeyClient {
    client: reqwest::Client,
    scheme: String,
}

/// Error envelope: `{ "error": { "message": ..., "code": ... } }`.
#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(default)]
    code: Option<String>,
}

impl MisskeyClient {
    pub fn new(client: reqwest::Client, scheme: impl Into<String>) -> Self {
        Self {
            client,
            scheme: scheme.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder().user_agent(config.remote_user_agent.clone());
        if let Some(timeout) = config.remote_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        Ok(Self::new(client, config.remote_scheme.clone()))
    }

    fn url(&self, host: &str, endpoint: &str) -> String {
        format!("{}://{}/api/{}", self.scheme, host, endpoint)
    }
}

impl RemoteClient for MisskeyClient {
    async fn call(&self, host: &str, endpoint: &str, params: Value) -> Result<Value, ClientError> {
        let url = self.url(host, endpoint);
        debug!(%host, %endpoint, "remote call");

        let resp = self
            .client
            .post(&url)
            .json(&params)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .bytes()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        if !status.is_success() {
            debug!(%host, %endpoint, %status, "remote call failed");
            return Err(match serde_json::from_slice::<ErrorEnvelope>(&body) {
                Ok(envelope) => ClientError::Api {
                    status: status.as_u16(),
                    code: envelope.error.code,
                    message: envelope.error.message,
                },
                Err(_) => ClientError::Api {
                    status: status.as_u16(),
                    code: None,
                    message: format!("{host} returned {status}"),
                },
            });
        }

        if body.is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_slice(&body).map_err(|e| ClientError::Decode {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        })
    }
}
