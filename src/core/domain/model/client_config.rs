//! Transport settings for the HTTP client.

use crate::core::domain::error::ValidationError;
use std::num::NonZeroU32;
use std::time::Duration;

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client-side request throttling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Sustained number of requests per second.
    pub requests_per_second: u32,
    /// Number of requests allowed at once before throttling starts.
    pub burst_size: u32,
}

impl RateLimitConfig {
    /// Returns the rate and burst as non-zero values, rejecting zeros.
    pub(crate) fn quota_parts(&self) -> Result<(NonZeroU32, NonZeroU32), ValidationError> {
        let rate = NonZeroU32::new(self.requests_per_second).ok_or_else(|| {
            ValidationError::ConstraintViolation(
                "requests_per_second must be greater than zero".to_string(),
            )
        })?;
        let burst = NonZeroU32::new(self.burst_size).ok_or_else(|| {
            ValidationError::ConstraintViolation("burst_size must be greater than zero".to_string())
        })?;
        Ok((rate, burst))
    }
}

/// Settings applied to every request of one client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub timeout: Duration,
    /// Skip TLS certificate verification (self-signed clusters).
    pub accept_invalid_certs: bool,
    /// Disabled when `None`.
    pub rate_limit: Option<RateLimitConfig>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            accept_invalid_certs: false,
            rate_limit: None,
        }
    }
}
