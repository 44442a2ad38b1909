use crate::core::domain::error::ValidationError;
use std::fmt;

/// A Proxmox API token credential in its combined form
/// `user@realm!tokenid=secret`.
///
/// The secret never appears in `Debug` output.
#[derive(Clone)]
pub struct ProxmoxApiToken {
    value: String,
}

impl ProxmoxApiToken {
    /// Combines an API user (`user@realm`) and a token (`tokenid=secret`)
    /// after validating both halves.
    pub fn new(api_user: &str, api_token: &str) -> Result<Self, ValidationError> {
        validate_api_user(api_user)?;
        validate_api_token(api_token)?;
        Ok(Self {
            value: format!("{}!{}", api_user, api_token),
        })
    }

    /// Returns the token identity (`user@realm!tokenid`), without the secret.
    #[must_use]
    pub fn identity(&self) -> &str {
        self.value
            .split_once('=')
            .map(|(identity, _)| identity)
            .unwrap_or(&self.value)
    }

    /// Formats the credential as an `Authorization` header value.
    #[must_use]
    pub fn as_header_value(&self) -> String {
        format!("PVEAPIToken={}", self.value)
    }
}

impl fmt::Debug for ProxmoxApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxmoxApiToken")
            .field("identity", &self.identity())
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Validates the API user half (`user@realm`).
pub(crate) fn validate_api_user(api_user: &str) -> Result<(), ValidationError> {
    if api_user.is_empty() {
        return Err(ValidationError::Missing("api_user".to_string()));
    }
    match api_user.split_once('@') {
        Some((user, realm)) if !user.is_empty() && !realm.is_empty() => {}
        _ => {
            return Err(ValidationError::Format(
                "API user must have the form 'user@realm'".to_string(),
            ));
        }
    }
    if api_user.contains(['!', '=']) || api_user.chars().any(char::is_whitespace) {
        return Err(ValidationError::Format(
            "API user contains invalid characters".to_string(),
        ));
    }
    Ok(())
}

/// Validates the token half (`tokenid=secret`).
pub(crate) fn validate_api_token(api_token: &str) -> Result<(), ValidationError> {
    if api_token.is_empty() {
        return Err(ValidationError::Missing("api_token".to_string()));
    }
    match api_token.split_once('=') {
        Some((id, secret)) if !id.is_empty() && !secret.is_empty() => Ok(()),
        _ => Err(ValidationError::Format(
            "API token must have the form 'tokenid=secret'".to_string(),
        )),
    }
}
