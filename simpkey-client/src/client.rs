use std::future::Future;

use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use simpkey_core::models::{Identity, Note, SignIn, User};

use crate::error::ClientError;

/// RPC boundary to a remote Misskey instance.
///
/// Implementors only provide [`call`](RemoteClient::call); the typed
/// lookups are built on it, so every remote interaction goes through a
/// single method. Test doubles rely on this to observe every call.
pub trait RemoteClient: Clone + Send + Sync + 'static {
    /// Invoke `endpoint` on `host` with a JSON parameter object. Endpoints
    /// that answer with no content yield `Value::Null`.
    fn call(
        &self,
        host: &str,
        endpoint: &str,
        params: Value,
    ) -> impl Future<Output = Result<Value, ClientError>> + Send;

    /// [`call`](RemoteClient::call) and decode the response.
    fn call_as<T: DeserializeOwned + Send>(
        &self,
        host: &str,
        endpoint: &str,
        params: Value,
    ) -> impl Future<Output = Result<T, ClientError>> + Send {
        async move {
            let value = self.call(host, endpoint, params).await?;
            serde_json::from_value(value).map_err(|e| ClientError::Decode {
                endpoint: endpoint.to_string(),
                message: e.to_string(),
            })
        }
    }

    /// The account `token` belongs to.
    fn identity(
        &self,
        host: &str,
        token: &str,
    ) -> impl Future<Output = Result<Identity, ClientError>> + Send {
        async move { self.call_as(host, "i", json!({ "i": token })).await }
    }

    fn note_by_id(
        &self,
        host: &str,
        note_id: &str,
    ) -> impl Future<Output = Result<Note, ClientError>> + Send {
        async move {
            self.call_as(host, "notes/show", json!({ "noteId": note_id }))
                .await
        }
    }

    /// Look an account up by username. `remote_host` selects a remote
    /// account known to `host`; `None` means a local one.
    fn user_by_name(
        &self,
        host: &str,
        username: &str,
        remote_host: Option<&str>,
    ) -> impl Future<Output = Result<User, ClientError>> + Send {
        async move {
            let mut params = json!({ "username": username });
            if let Some(remote) = remote_host {
                params["host"] = json!(remote);
            }
            self.call_as(host, "users/show", params).await
        }
    }

    /// Password sign-in, with an optional second-factor code.
    fn sign_in(
        &self,
        host: &str,
        username: &str,
        password: &str,
        otp: Option<&str>,
    ) -> impl Future<Output = Result<SignIn, ClientError>> + Send {
        async move {
            let mut params = json!({ "username": username, "password": password });
            if let Some(code) = otp {
                params["token"] = json!(code);
            }
            self.call_as(host, "signin", params).await
        }
    }
}
