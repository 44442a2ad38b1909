use crate::core::domain::error::ValidationError;

/// A validated cluster node name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeName(String);

impl NodeName {
    /// Creates a new node name after validation.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        validate_node_name(&name)?;
        Ok(Self(name))
    }

    /// Returns the node name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validates a node name.
///
/// Node names end up inside request paths, so separators and whitespace are
/// refused.
pub(crate) fn validate_node_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::Missing("node_name".to_string()));
    }
    if name.len() > 63 {
        return Err(ValidationError::Format(format!(
            "Node name length must be at most 63 characters (got {})",
            name.len()
        )));
    }
    let allowed = |c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.';
    if !name.chars().all(allowed) {
        return Err(ValidationError::Format(
            "Node name contains invalid characters. Allowed: alphanumeric, -, _, .".to_string(),
        ));
    }
    if name.chars().all(|c| c == '.') {
        return Err(ValidationError::Format(
            "Node name must contain more than dots".to_string(),
        ));
    }
    Ok(())
}
