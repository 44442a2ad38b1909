use crate::core::domain::error::ValidationError;

/// Fixed namespace every API path is rooted under.
pub const API_PREFIX: &str = "api2/json";

/// A validated base address of a Proxmox VE API, e.g. `https://pve:8006`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxmoxUrl(String);

impl ProxmoxUrl {
    /// Parses and validates a base address.
    pub fn new(base: &str) -> Result<Self, ValidationError> {
        validate_url(base)?;
        Ok(Self(base.trim_end_matches('/').to_string()))
    }

    /// Returns the base address without trailing slash.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Joins a relative API path onto the base address under the API prefix.
    #[must_use]
    pub fn api_url(&self, path: &str) -> String {
        format!("{}/{}/{}", self.0, API_PREFIX, path.trim_start_matches('/'))
    }
}

/// Validates a base address according to RFC 3986 and the API requirements.
pub(crate) fn validate_url(base: &str) -> Result<(), ValidationError> {
    if base.is_empty() {
        return Err(ValidationError::Missing("base_url".to_string()));
    }
    if base.len() > 2083 {
        return Err(ValidationError::Format(
            "URL exceeds maximum length of 2083 characters".to_string(),
        ));
    }

    let parsed = url::Url::parse(base)
        .map_err(|e| ValidationError::Format(format!("Invalid URL format: {}", e)))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ValidationError::ConstraintViolation(
            "Invalid scheme. Must be one of: https, http".to_string(),
        ));
    }
    if parsed.host_str().is_none() {
        return Err(ValidationError::Format("URL must contain a host".to_string()));
    }
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(ValidationError::ConstraintViolation(
            "Base URL must not carry a query or fragment".to_string(),
        ));
    }
    if parsed.path().trim_matches('/').starts_with("api2") {
        return Err(ValidationError::ConstraintViolation(format!(
            "Base URL must not include the '{}' prefix",
            API_PREFIX
        )));
    }
    Ok(())
}
