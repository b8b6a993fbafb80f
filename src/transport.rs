//! Sending built requests.
//!
//! [`Transport`] is the seam between call definitions and the network.
//! [`HttpTransport`] is a plain reqwest implementation that attaches the
//! session credential; it does not retry, cache or rate limit. Tests and
//! embedders can supply their own transport.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, redirect::Policy};
use serde_json::Value;
use tracing::debug;

use crate::{
    config,
    error::{CallError, Result},
    protocol::Call,
    types::{AuthRequirement, Headers, Method, RequestDescriptor, ResponseDescriptor},
};

#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, call: &'static str, request: &RequestDescriptor) -> Result<ResponseDescriptor>;
}

/// reqwest-backed transport carrying a session token.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    auth_token: Option<String>,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(auth_token: Option<String>) -> Self {
        HttpTransport {
            auth_token,
            timeout: Duration::from_secs(30),
        }
    }

    /// Transport configured from the environment.
    pub fn from_env() -> Self {
        HttpTransport::new(config::auth_token()).with_timeout(config::request_timeout())
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn client(&self, request: &RequestDescriptor) -> Result<Client> {
        let policy = if request.follow_redirects {
            Policy::default()
        } else {
            Policy::none()
        };

        Ok(Client::builder()
            .redirect(policy)
            .danger_accept_invalid_certs(!request.verify_tls)
            .timeout(self.timeout)
            .build()?)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, call: &'static str, request: &RequestDescriptor) -> Result<ResponseDescriptor> {
        let client = self.client(request)?;

        let mut builder = match request.method {
            Method::Get => client.get(&request.url),
            Method::Post => client.post(&request.url),
        };

        builder = builder.query(&request.params);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        if request.auth == AuthRequirement::Session {
            let token = self
                .auth_token
                .as_deref()
                .ok_or(CallError::MissingCredential { call })?;
            builder = builder.header("Authorization", format!("GoogleLogin auth={}", token));
        }

        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await?;

        let status = response.status().as_u16();
        let headers: Headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_ascii_lowercase(), v.to_string()))
            })
            .collect();
        let body = response.text().await?;

        debug!(call, status, bytes = body.len(), "received response");

        Ok(ResponseDescriptor {
            status,
            headers,
            body,
        })
    }
}

/// Builds, sends and processes one call.
///
/// HTTP statuses of 400 and above are reported as [`CallError::Status`]
/// without looking at the body.
pub async fn perform<C>(transport: &dyn Transport, call: &C, args: &C::Args) -> Result<Value>
where
    C: Call + ?Sized,
{
    let request = call.build_request(args);
    let response = transport.send(call.name(), &request).await?;

    if response.status >= 400 {
        return Err(CallError::Status {
            call: call.name(),
            status: response.status,
        });
    }

    call.process(&response)
}
