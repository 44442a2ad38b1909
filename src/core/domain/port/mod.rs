//! Outbound seam between operation logic and the remote API.

use crate::core::domain::{
    error::ProxmoxResult,
    model::{ApiMethod, Params, Payload},
};
use async_trait::async_trait;

/// Performs exactly one remote call and returns its unwrapped payload.
///
/// Implementations never retry and never fan out; `path` is relative to the
/// API prefix and already has every placeholder filled in.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RequestExecutor: Send + Sync {
    async fn execute(
        &self,
        method: ApiMethod,
        path: &str,
        params: &Params,
    ) -> ProxmoxResult<Payload>;
}
