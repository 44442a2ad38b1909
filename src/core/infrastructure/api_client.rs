//! HTTP request executor for the Proxmox VE API.

use crate::core::domain::{
    error::{ProxmoxError, ProxmoxResult, ValidationError},
    model::{ApiMethod, ClientConfig, Envelope, Params, Payload, ProxmoxConnection},
    port::RequestExecutor,
};
use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota};
use reqwest::{
    Client, Method,
    header::{AUTHORIZATION, HeaderMap, HeaderValue},
};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// HTTP client that performs single calls against the remote API.
///
/// Every request carries the `Authorization: PVEAPIToken=...` header, built
/// once at construction. GET parameters travel in the query string, all other
/// verbs send them as a JSON body. A non-2xx status becomes
/// [`ProxmoxError::Api`] with the body kept verbatim; a 2xx body is unwrapped
/// from its `{"data": ...}` envelope into a [`Payload`].
#[derive(Debug)]
pub struct ApiClient {
    http_client: Client,
    connection: Arc<ProxmoxConnection>,
    rate_limiter: Option<Arc<DefaultDirectRateLimiter>>,
}

impl ApiClient {
    /// Creates a new `ApiClient`.
    ///
    /// # Errors
    /// Returns `ProxmoxError::Validation` if the credential cannot be used as a
    /// header value or the rate limit is zero, and `ProxmoxError::Connection`
    /// if the HTTP client cannot be built.
    pub fn new(connection: ProxmoxConnection, config: &ClientConfig) -> ProxmoxResult<Self> {
        let mut auth_value = HeaderValue::from_str(&connection.api_token().as_header_value())
            .map_err(|_| {
                ValidationError::Format("API token contains invalid header characters".to_string())
            })?;
        auth_value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth_value);

        let http_client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| ProxmoxError::Connection(e.to_string()))?;

        let rate_limiter = match config.rate_limit {
            Some(rl) => {
                let (rate, burst) = rl.quota_parts()?;
                let quota = Quota::per_second(rate).allow_burst(burst);
                Some(Arc::new(DefaultDirectRateLimiter::direct(quota)))
            }
            None => None,
        };

        Ok(Self {
            http_client,
            connection: Arc::new(connection),
            rate_limiter,
        })
    }

    /// Returns a reference to the underlying connection details.
    pub fn connection(&self) -> &ProxmoxConnection {
        &self.connection
    }
}

#[async_trait]
impl RequestExecutor for ApiClient {
    async fn execute(
        &self,
        method: ApiMethod,
        path: &str,
        params: &Params,
    ) -> ProxmoxResult<Payload> {
        if let Some(limiter) = &self.rate_limiter {
            limiter.until_ready().await;
        }

        let url = self.connection.proxmox_url().api_url(path);
        debug!(method = %method, path = %path, "Sending API request");

        let mut req_builder = self.http_client.request(http_method(method), &url);
        match method {
            ApiMethod::Get => {
                let query = encode_query(params)?;
                if !query.is_empty() {
                    req_builder = req_builder.query(&query);
                }
            }
            _ => {
                if !params.is_empty() {
                    req_builder = req_builder.json(params);
                }
            }
        }

        let response = req_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ProxmoxError::Connection(format!("request to {} timed out", path))
            } else {
                ProxmoxError::Connection(format!("HTTP request failed: {}", e))
            }
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProxmoxError::Connection(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            debug!(status = status.as_u16(), path = %path, "API request failed");
            return Err(ProxmoxError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: Envelope = serde_json::from_str(&body)
            .map_err(|e| ProxmoxError::Protocol(format!("Invalid response envelope: {}", e)))?;
        Ok(Payload::from(envelope.data))
    }
}

fn http_method(method: ApiMethod) -> Method {
    match method {
        ApiMethod::Get => Method::GET,
        ApiMethod::Post => Method::POST,
        ApiMethod::Put => Method::PUT,
        ApiMethod::Delete => Method::DELETE,
    }
}

/// Flattens parameters into query pairs.
///
/// Booleans are sent as `1`/`0`, nulls are skipped, nested values are refused.
fn encode_query(params: &Params) -> Result<Vec<(String, String)>, ValidationError> {
    let mut pairs = Vec::with_capacity(params.len());
    for (key, value) in params {
        let encoded = match value {
            Value::Null => continue,
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(flag) => u8::from(*flag).to_string(),
            Value::Array(_) | Value::Object(_) => {
                return Err(ValidationError::Format(format!(
                    "parameter '{}' cannot be encoded in a query string",
                    key
                )));
            }
        };
        pairs.push((key.clone(), encoded));
    }
    Ok(pairs)
}
