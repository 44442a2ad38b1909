use crate::core::domain::{
    error::{FailureKind, ProxmoxError},
    model::OperationOutput,
};
use serde::Serialize;

/// Uniform outcome of one tool invocation.
///
/// Serialized with a `status` tag:
/// `{"status": "success", "data": ...}` or
/// `{"status": "failure", "kind": "remote", "message": "...", "status_code": 500}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OperationResult {
    Success { data: OperationOutput },
    Failure(OperationFailure),
}

/// Structured description of a failed invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationFailure {
    pub kind: FailureKind,
    pub message: String,
    /// Remote HTTP status of a remote failure, or of the last node tried
    /// before a not-found failure.
    #[serde(rename = "status_code", skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl OperationResult {
    pub fn success(data: OperationOutput) -> Self {
        OperationResult::Success { data }
    }

    /// Wraps an error raised while running `operation`.
    pub fn failure(operation: &str, error: &ProxmoxError) -> Self {
        OperationResult::Failure(OperationFailure {
            kind: error.kind(),
            message: format!("{} failed: {}", operation, error),
            status: error.status(),
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, OperationResult::Success { .. })
    }

    pub fn data(&self) -> Option<&OperationOutput> {
        match self {
            OperationResult::Success { data } => Some(data),
            OperationResult::Failure(_) => None,
        }
    }

    pub fn failure_details(&self) -> Option<&OperationFailure> {
        match self {
            OperationResult::Success { .. } => None,
            OperationResult::Failure(failure) => Some(failure),
        }
    }
}
