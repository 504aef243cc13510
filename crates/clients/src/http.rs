//! Shared HTTP plumbing: client construction, timeout, and the retry policy.
//!
//! Every outbound call gets an explicit request timeout and at most one retry.
//! Only transport failures and 5xx answers are retried; 4xx answers are
//! returned immediately as [`ClientError::Status`].
//!
//! Request URLs carry API keys and the user's text as query parameters, so
//! every `reqwest::Error` is stripped of its URL before it is logged or wrapped.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::{ClientError, Result};

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// How often and how patiently a failed call is repeated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 1,
            backoff: Duration::from_millis(250),
        }
    }
}

impl RetryPolicy {
    /// Single attempt, no retry
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            backoff: Duration::ZERO,
        }
    }
}

/// Options common to every service client
#[derive(Debug, Clone, Copy)]
pub struct HttpOptions {
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            retry: RetryPolicy::default(),
        }
    }
}

impl HttpOptions {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            ..Self::default()
        }
    }

    /// Build a `reqwest::Client` carrying the configured timeout
    pub fn build_client(&self) -> Result<Client> {
        Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(ClientError::Build)
    }
}

/// Send a request, retrying per `policy`.
///
/// `make_request` is called once per attempt because a `RequestBuilder`
/// is consumed by `send`.
pub async fn send_with_retry<F>(
    service: &'static str,
    policy: RetryPolicy,
    mut make_request: F,
) -> Result<Response>
where
    F: FnMut() -> RequestBuilder,
{
    let mut attempt = 0;
    loop {
        let retries_left = attempt < policy.max_retries;

        match make_request().send().await {
            Ok(response) if response.status().is_server_error() && retries_left => {
                warn!(
                    "{} answered HTTP {} (attempt {}), retrying",
                    service,
                    response.status(),
                    attempt + 1
                );
            }
            Ok(response) if !response.status().is_success() => {
                let status = response.status().as_u16();
                let body = response.text().await.unwrap_or_default();
                return Err(ClientError::Status {
                    service,
                    status,
                    body,
                });
            }
            Ok(response) => {
                debug!("{} answered HTTP {}", service, response.status());
                return Ok(response);
            }
            Err(e) if retries_left => {
                warn!(
                    "{} request failed (attempt {}): {}, retrying",
                    service,
                    attempt + 1,
                    e.without_url()
                );
            }
            Err(source) => {
                return Err(ClientError::Transport {
                    service,
                    source: source.without_url(),
                });
            }
        }

        attempt += 1;
        tokio::time::sleep(policy.backoff).await;
    }
}

/// Decode a JSON body, mapping failures to [`ClientError::InvalidResponse`]
pub async fn decode_json<T: DeserializeOwned>(service: &'static str, response: Response) -> Result<T> {
    response
        .json::<T>()
        .await
        .map_err(|e| ClientError::InvalidResponse {
            service,
            reason: e.without_url().to_string(),
        })
}
