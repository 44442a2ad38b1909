use serde::Serialize;
use thiserror::Error;

/// The main error type for Proxmox tool operations.
///
/// Every variant corresponds to one failure class a caller can observe:
/// caller-input problems, transport problems, errors reported by the remote
/// API, and responses that do not have the shape the catalog expects.
#[derive(Error, Debug)]
pub enum ProxmoxError {
    /// Caller-supplied arguments violate an operation's contract.
    ///
    /// Raised before any network I/O takes place.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Represents errors that occur while connecting, sending or waiting
    ///
    /// # Fields
    /// * `0` - A description of what went wrong, including timeouts
    #[error("Connection error: {0}")]
    Connection(String),

    /// The call was abandoned through its cancellation token.
    #[error("Request cancelled")]
    Cancelled,

    /// The remote API answered with a non-2xx status.
    ///
    /// # Fields
    /// * `status` - The HTTP status code
    /// * `body` - The raw response body, verbatim
    #[error("API error (status {status}): {body}")]
    Api { status: u16, body: String },

    /// A 2xx response whose body or payload does not have the expected shape
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// A resource could not be located on any node of the cluster
    ///
    /// # Fields
    /// * `message` - What was looked for, with the last node's error
    /// * `status` - HTTP status of the last node's answer, if it had one
    #[error("Not found: {message}")]
    NotFound {
        message: String,
        status: Option<u16>,
    },

    /// An operation definition is internally inconsistent
    #[error("Contract violation: {0}")]
    Contract(String),
}

impl ProxmoxError {
    /// Classifies the error for reporting to the caller.
    pub fn kind(&self) -> FailureKind {
        match self {
            ProxmoxError::Validation(_) => FailureKind::Validation,
            ProxmoxError::Connection(_) => FailureKind::Transport,
            ProxmoxError::Cancelled => FailureKind::Cancelled,
            ProxmoxError::Api { .. } => FailureKind::Remote,
            ProxmoxError::Protocol(_) => FailureKind::Protocol,
            ProxmoxError::NotFound { .. } => FailureKind::NotFound,
            ProxmoxError::Contract(_) => FailureKind::Internal,
        }
    }

    /// Remote status code: the answer of an `Api` error, or the last
    /// answer seen before a `NotFound`.
    pub fn status(&self) -> Option<u16> {
        match self {
            ProxmoxError::Api { status, .. } => Some(*status),
            ProxmoxError::NotFound { status, .. } => *status,
            _ => None,
        }
    }
}

/// Serializable classification of a [`ProxmoxError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Validation,
    Transport,
    Cancelled,
    Remote,
    Protocol,
    NotFound,
    Internal,
}

/// Specialized error type for validation failures.
///
/// This enum provides detailed context about why a validation
/// failed, including field-specific errors and format violations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A required argument was not supplied
    #[error("{0} parameter is required")]
    Missing(String),

    /// Represents a validation failure for a specific field
    ///
    /// # Fields
    /// * `field` - The name of the field that failed validation
    /// * `message` - A detailed message about why validation failed
    #[error("Field '{field}' validation failed: {message}")]
    Field { field: String, message: String },

    /// Represents format/syntax validation failures
    #[error("Format error: {0}")]
    Format(String),

    /// Represents violations of domain constraints
    #[error("Domain constraint violation: {0}")]
    ConstraintViolation(String),

    /// The operation name is not part of the catalog
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),
}

/// Type alias for Results that may fail with a ProxmoxError
pub type ProxmoxResult<T> = Result<T, ProxmoxError>;
