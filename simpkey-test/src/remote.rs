use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde_json::Value;
use simpkey_client::{ClientError, RemoteClient};

/// One call observed by [`MockRemote`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub host: String,
    pub endpoint: String,
    pub params: Value,
}

/// Recording [`RemoteClient`] with scripted responses.
///
/// Every call is recorded before the scripted outcome is returned, so
/// tests can assert both what was asked and how often. Calls to an
/// endpoint with no script fail with a `404` API error.
///
/// ```ignore
/// let remote = MockRemote::new()
///     .respond("i", json!({ "id": "me" }))
///     .fail("notes/show", "No such note.");
/// ```
#[derive(Clone, Default)]
pub struct MockRemote {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    scripts: HashMap<String, Result<Value, ClientError>>,
    calls: Vec<RecordedCall>,
}

impl MockRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every call to `endpoint` with `value`.
    pub fn respond(self, endpoint: &str, value: Value) -> Self {
        self.script(endpoint, Ok(value))
    }

    /// Fail every call to `endpoint` with an API error carrying `message`.
    pub fn fail(self, endpoint: &str, message: &str) -> Self {
        self.script(
            endpoint,
            Err(ClientError::Api {
                status: 400,
                code: None,
                message: message.to_string(),
            }),
        )
    }

    pub fn script(self, endpoint: &str, outcome: Result<Value, ClientError>) -> Self {
        self.inner
            .lock()
            .unwrap()
            .scripts
            .insert(endpoint.to_string(), outcome);
        self
    }

    /// Every call so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.inner.lock().unwrap().calls.clone()
    }

    /// Calls made to `endpoint`.
    pub fn calls_to(&self, endpoint: &str) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|call| call.endpoint == endpoint)
            .collect()
    }

    pub fn call_count(&self) -> usize {
        self.inner.lock().unwrap().calls.len()
    }

    /// Endpoint names in call order.
    pub fn endpoints(&self) -> Vec<String> {
        self.calls().into_iter().map(|call| call.endpoint).collect()
    }
}

impl RemoteClient for MockRemote {
    async fn call(&self, host: &str, endpoint: &str, params: Value) -> Result<Value, ClientError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(RecordedCall {
            host: host.to_string(),
            endpoint: endpoint.to_string(),
            params,
        });
        inner
            .scripts
            .get(endpoint)
            .cloned()
            .unwrap_or_else(|| {
                Err(ClientError::Api {
                    status: 404,
                    code: None,
                    message: format!("unscripted endpoint: {endpoint}"),
                })
            })
    }
}
