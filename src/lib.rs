//! Translation core between named tool invocations and the Proxmox VE REST API.
//!
//! A caller hands an operation name and a flat map of arguments to
//! [`ProxmoxClient::invoke`]. The operation is looked up in the
//! [`Catalog`], its arguments are validated, one or more HTTP calls are made
//! and the answer is normalized into an [`OperationResult`].

mod core;
mod tools;

pub use crate::core::{
    application::{
        fanout::ClusterFanout,
        normalizer::{ResultShape, normalize},
    },
    domain::{
        error::{FailureKind, ProxmoxError, ProxmoxResult, ValidationError},
        model::{
            ApiMethod, ClientConfig, EndpointDescriptor, OperationOutput, ParamKind, ParamSpec,
            Params, PathTemplate, Payload, ProxmoxConnection, RateLimitConfig, Record, RecordKind,
            client_config::DEFAULT_TIMEOUT,
            firewall::{FirewallRule, SecurityGroup},
            network::{NetworkInterface, VlanConfig},
            node::{DiskInfo, MemoryInfo, Node, NodeStatus},
            storage::{Backup, Storage},
            task::Task,
            vm::{Container, Vm},
        },
        port::RequestExecutor,
        value_object::{API_PREFIX, NodeName, ProxmoxApiToken, ProxmoxUrl, ResourceId},
    },
    infrastructure::api_client::ApiClient,
};
pub use crate::tools::application::{
    catalog::{Action, Catalog, CatalogEntry},
    response::{OperationFailure, OperationResult},
    service::{Args, Dispatcher},
};
pub use tokio_util::sync::CancellationToken;

use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// A client that runs catalog operations against a Proxmox VE cluster.
///
/// # Examples
///
/// ```no_run
/// use proxmox_tool_bridge::{Args, ProxmoxClient, ProxmoxResult};
/// use serde_json::json;
///
/// #[tokio::main]
/// async fn main() -> ProxmoxResult<()> {
///     let client = ProxmoxClient::builder()
///         .base_url("https://proxmox.example.com:8006")
///         .credentials("root@pam", "automation=00000000-0000-0000-0000-000000000000")
///         .build()?;
///
///     let mut args = Args::new();
///     args.insert("node_name".to_string(), json!("pve1"));
///     let result = client.invoke("get_vms", &args).await;
///     println!("{}", serde_json::to_string_pretty(&result).unwrap_or_default());
///     Ok(())
/// }
/// ```
pub struct ProxmoxClient {
    dispatcher: Dispatcher<ApiClient>,
}

/// Builder for ProxmoxClient configuration
#[derive(Debug, Default)]
pub struct ProxmoxClientBuilder {
    base_url: Option<String>,
    api_user: Option<String>,
    api_token: Option<String>,
    accept_invalid_certs: bool,
    timeout: Option<Duration>,
    rate_limit: Option<RateLimitConfig>,
}

impl ProxmoxClientBuilder {
    /// Base address of the API, e.g. `https://pve.example.com:8006`.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// API user (`user@realm`) and token (`tokenid=secret`).
    pub fn credentials(mut self, api_user: impl Into<String>, api_token: impl Into<String>) -> Self {
        self.api_user = Some(api_user.into());
        self.api_token = Some(api_token.into());
        self
    }

    /// Skips TLS certificate verification. Only use with trusted networks.
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn rate_limit(mut self, rate_limit: RateLimitConfig) -> Self {
        self.rate_limit = Some(rate_limit);
        self
    }

    /// Reads the configuration from the process environment.
    ///
    /// | Variable | Meaning |
    /// |---|---|
    /// | `PROXMOX_BASE_URL` | base address (required) |
    /// | `PROXMOX_API_USER` | `user@realm` (required) |
    /// | `PROXMOX_API_TOKEN` | `tokenid=secret` (required) |
    /// | `PROXMOX_SKIP_SSL_VERIFY` | `true` disables TLS verification |
    /// | `PROXMOX_TIMEOUT_SECS` | request timeout in seconds |
    pub fn from_env() -> ProxmoxResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> ProxmoxResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| ValidationError::Field {
                    field: key.to_string(),
                    message: "environment variable is not set".to_string(),
                })
        };

        let mut builder = Self::default()
            .base_url(required("PROXMOX_BASE_URL")?)
            .credentials(required("PROXMOX_API_USER")?, required("PROXMOX_API_TOKEN")?)
            .accept_invalid_certs(lookup("PROXMOX_SKIP_SSL_VERIFY").as_deref() == Some("true"));

        if let Some(raw) = lookup("PROXMOX_TIMEOUT_SECS") {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                ValidationError::Format(format!("PROXMOX_TIMEOUT_SECS is not a number: {}", raw))
            })?;
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(builder)
    }

    pub fn build(self) -> ProxmoxResult<ProxmoxClient> {
        let base_url = self.base_url.ok_or_else(|| ValidationError::Field {
            field: "base_url".to_string(),
            message: "Base URL is required".to_string(),
        })?;
        let api_user = self.api_user.ok_or_else(|| ValidationError::Field {
            field: "api_user".to_string(),
            message: "API user is required".to_string(),
        })?;
        let api_token = self.api_token.ok_or_else(|| ValidationError::Field {
            field: "api_token".to_string(),
            message: "API token is required".to_string(),
        })?;

        let connection = ProxmoxConnection::new(
            ProxmoxUrl::new(&base_url)?,
            ProxmoxApiToken::new(&api_user, &api_token)?,
        );

        if self.accept_invalid_certs {
            warn!(
                base_url = %connection.proxmox_url().as_str(),
                "TLS certificate verification is disabled"
            );
        }

        let config = ClientConfig {
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            accept_invalid_certs: self.accept_invalid_certs,
            rate_limit: self.rate_limit,
        };
        let api_client = ApiClient::new(connection, &config)?;

        Ok(ProxmoxClient {
            dispatcher: Dispatcher::new(Arc::new(Catalog::standard()), api_client),
        })
    }
}

impl ProxmoxClient {
    /// Creates a new builder for ProxmoxClient configuration
    pub fn builder() -> ProxmoxClientBuilder {
        ProxmoxClientBuilder::default()
    }

    /// Runs a catalog operation. Never fails; failures are part of the result.
    pub async fn invoke(&self, operation: &str, args: &Args) -> OperationResult {
        self.dispatcher.invoke(operation, args).await
    }

    /// Runs a catalog operation that is abandoned once `token` is cancelled.
    pub async fn invoke_with_cancellation(
        &self,
        operation: &str,
        args: &Args,
        token: &CancellationToken,
    ) -> OperationResult {
        self.dispatcher
            .invoke_with_cancellation(operation, args, token)
            .await
    }

    /// Tool definitions (`name`, `description`, `inputSchema`) of every operation.
    pub fn tool_definitions(&self) -> Vec<serde_json::Value> {
        self.dispatcher.catalog().tool_definitions()
    }

    pub fn catalog(&self) -> &Catalog {
        self.dispatcher.catalog()
    }

    /// Returns the connection details in use.
    pub fn connection(&self) -> &ProxmoxConnection {
        self.dispatcher.executor().connection()
    }
}
