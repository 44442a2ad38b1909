use super::record::Record;
use serde::Serialize;
use serde_json::Value;

/// Normalized data returned by a successful operation.
///
/// Serializes as `{"items": [...], "count": n}`, the bare record, the raw JSON
/// value, or `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OperationOutput {
    List { items: Vec<Record>, count: usize },
    Single(Record),
    Raw(Value),
    Empty,
}

impl OperationOutput {
    pub fn list(items: Vec<Record>) -> Self {
        let count = items.len();
        OperationOutput::List { items, count }
    }

    /// Records carried by the output, if it is a list.
    pub fn items(&self) -> Option<&[Record]> {
        match self {
            OperationOutput::List { items, .. } => Some(items),
            _ => None,
        }
    }

    /// Consumes the output, returning its records; empty for non-list outputs.
    pub fn into_items(self) -> Vec<Record> {
        match self {
            OperationOutput::List { items, .. } => items,
            _ => Vec::new(),
        }
    }
}
