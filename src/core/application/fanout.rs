//! Cluster Fan-out Helper: runs one logical operation against every node.
//!
//! Two strategies exist. [`ClusterFanout::collect`] issues the per-node calls
//! concurrently and concatenates the successes in node-listing order;
//! failing nodes are logged and skipped. [`ClusterFanout::first_success`]
//! tries nodes one at a time and stops at the first success.
//!
//! In both cases failing to enumerate the nodes aborts the whole operation.

use crate::core::application::normalizer::{ResultShape, normalize};
use crate::core::domain::{
    error::{ProxmoxError, ProxmoxResult},
    model::{ApiMethod, Params, Record, RecordKind},
    port::RequestExecutor,
};
use futures::future::join_all;
use std::future::Future;
use tracing::{debug, warn};

/// Path of the node listing.
const NODES_PATH: &str = "nodes";

pub struct ClusterFanout<'a, E: ?Sized> {
    executor: &'a E,
}

impl<'a, E> ClusterFanout<'a, E>
where
    E: RequestExecutor + ?Sized,
{
    pub fn new(executor: &'a E) -> Self {
        Self { executor }
    }

    /// Names of all cluster nodes, in listing order.
    pub async fn node_names(&self) -> ProxmoxResult<Vec<String>> {
        let payload = self
            .executor
            .execute(ApiMethod::Get, NODES_PATH, &Params::new())
            .await
            .inspect_err(|e| warn!(error = %e, "Failed to enumerate cluster nodes"))?;
        let output = normalize(payload, ResultShape::List(RecordKind::Node))?;
        Ok(output
            .items()
            .unwrap_or_default()
            .iter()
            .filter_map(|record| match record {
                Record::Node(node) => node.node.clone(),
                _ => None,
            })
            .collect())
    }

    /// Runs `op` on every node concurrently and concatenates the results.
    ///
    /// Per-node failures are logged and skipped; the result keeps the
    /// node-listing order.
    pub async fn collect<T, F, Fut>(&self, op: F) -> ProxmoxResult<Vec<T>>
    where
        F: Fn(String) -> Fut,
        Fut: Future<Output = ProxmoxResult<Vec<T>>>,
    {
        let nodes = self.node_names().await?;
        let results = join_all(nodes.iter().cloned().map(&op)).await;

        let mut collected = Vec::new();
        let mut failed = 0usize;
        for (node, result) in nodes.iter().zip(results) {
            match result {
                Ok(items) => collected.extend(items),
                Err(e) => {
                    failed += 1;
                    warn!(node = %node, error = %e, "Node call failed during fan-out");
                }
            }
        }

        if failed > 0 {
            warn!(
                failed,
                succeeded = nodes.len() - failed,
                "Fan-out returned partial results"
            );
        }
        Ok(collected)
    }

    /// Runs `op` on one node after another until it succeeds.
    ///
    /// # Errors
    /// Returns [`ProxmoxError::NotFound`] naming `what` when no node
    /// succeeds, including when the cluster has no nodes.
    pub async fn first_success<T, F, Fut>(&self, what: &str, op: F) -> ProxmoxResult<T>
    where
        F: Fn(String) -> Fut,
        Fut: Future<Output = ProxmoxResult<T>>,
    {
        let nodes = self.node_names().await?;
        let mut last_error = None;

        for node in nodes {
            match op(node.clone()).await {
                Ok(value) => {
                    debug!(node = %node, "Fan-out call succeeded");
                    return Ok(value);
                }
                Err(ProxmoxError::Cancelled) => return Err(ProxmoxError::Cancelled),
                Err(e) => {
                    debug!(node = %node, error = %e, "Fan-out call failed, trying next node");
                    last_error = Some(e);
                }
            }
        }

        Err(match last_error {
            Some(e) => ProxmoxError::NotFound {
                message: format!("{} not found on any node (last error: {})", what, e),
                status: e.status(),
            },
            None => ProxmoxError::NotFound {
                message: format!("{} not found on any node", what),
                status: None,
            },
        })
    }
}
