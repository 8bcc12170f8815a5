//! Security headers added to every response.
//!
//! # Default headers
//!
//! | Header | Value |
//! |--------|-------|
//! | `X-Content-Type-Options` | `nosniff` |
//! | `X-Frame-Options` | `DENY` |
//! | `Referrer-Policy` | `same-origin` |
//!
//! `Strict-Transport-Security` is only sent when `server.hsts-max-age-secs`
//! is configured, since the server is often run behind a plain-HTTP reverse
//! proxy in development.
//! The referrer policy keeps the session-bearing paths from leaking to the
//! remote instance's media hosts.

use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;
use axum::Router;

use crate::config::AppConfig;

pub struct SecureHeaders {
    headers: Vec<(HeaderName, HeaderValue)>,
}

impl SecureHeaders {
    pub fn builder() -> SecureHeadersBuilder {
        SecureHeadersBuilder::new()
    }

    /// Defaults plus HSTS when `server.hsts-max-age-secs` is set.
    pub fn from_config(config: &AppConfig) -> Self {
        let builder = SecureHeadersBuilder::new();
        match config.hsts_max_age {
            Some(max_age) => builder.hsts(max_age).build(),
            None => builder.build(),
        }
    }

    pub fn headers(&self) -> &[(HeaderName, HeaderValue)] {
        &self.headers
    }

    /// Install the headers on a router as a response middleware.
    pub fn apply<S: Clone + Send + Sync + 'static>(self, router: Router<S>) -> Router<S> {
        let headers = Arc::new(self.headers);
        router.layer(axum::middleware::from_fn(
            move |req: axum::extract::Request, next: Next| {
                let headers = headers.clone();
                async move {
                    let mut response: Response = next.run(req).await;
                    for (name, value) in headers.iter() {
                        response.headers_mut().insert(name.clone(), value.clone());
                    }
                    response
                }
            },
        ))
    }
}

impl Default for SecureHeaders {
    fn default() -> Self {
        SecureHeadersBuilder::new().build()
    }
}

pub struct SecureHeadersBuilder {
    frame_options: Option<String>,
    hsts_max_age: Option<u64>,
    referrer_policy: Option<String>,
}

impl SecureHeadersBuilder {
    fn new() -> Self {
        Self {
            frame_options: Some("DENY".to_string()),
            hsts_max_age: None,
            referrer_policy: Some("same-origin".to_string()),
        }
    }

    /// Send `Strict-Transport-Security: max-age=<seconds>`.
    pub fn hsts(mut self, max_age: u64) -> Self {
        self.hsts_max_age = Some(max_age);
        self
    }

    pub fn build(self) -> SecureHeaders {
        let mut headers = vec![(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        )];

        if let Some(ref fo) = self.frame_options {
            if let Ok(val) = HeaderValue::from_str(fo) {
                headers.push((HeaderName::from_static("x-frame-options"), val));
            }
        }

        if let Some(max_age) = self.hsts_max_age {
            if let Ok(val) = HeaderValue::from_str(&format!("max-age={max_age}")) {
                headers.push((HeaderName::from_static("strict-transport-security"), val));
            }
        }

        if let Some(ref rp) = self.referrer_policy {
            if let Ok(val) = HeaderValue::from_str(rp) {
                headers.push((HeaderName::from_static("referrer-policy"), val));
            }
        }

        SecureHeaders { headers }
    }
}
