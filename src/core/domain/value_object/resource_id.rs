use crate::core::domain::error::ValidationError;

/// A validated guest identifier (VM or container ID).
///
/// The remote API rejects zero and negative identifiers with a generic error,
/// so they are refused up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceId(u32);

impl ResourceId {
    /// Creates a new identifier, validating that it is positive.
    pub fn new(field: &str, id: i64) -> Result<Self, ValidationError> {
        validate_resource_id(field, id)?;
        u32::try_from(id).map(Self).map_err(|_| ValidationError::Field {
            field: field.to_string(),
            message: format!("{} exceeds the maximum identifier", id),
        })
    }

    /// Returns the identifier.
    pub fn get(&self) -> u32 {
        self.0
    }
}

/// Validates that an identifier is strictly positive.
pub(crate) fn validate_resource_id(field: &str, id: i64) -> Result<(), ValidationError> {
    if id <= 0 {
        return Err(ValidationError::ConstraintViolation(format!(
            "{} parameter is required and must be a positive integer",
            field
        )));
    }
    Ok(())
}
