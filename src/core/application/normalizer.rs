//! Response Normalizer: converts an unwrapped [`Payload`] into the result
//! shape an operation declares.
//!
//! List normalization is lenient: an element that does not decode into the
//! target record is dropped (and logged) while the remaining elements are
//! kept. Single-record normalization is strict.

use crate::core::domain::{
    error::{ProxmoxError, ProxmoxResult},
    model::{OperationOutput, Payload, Record, RecordKind},
};
use serde_json::{Map, Value};
use tracing::debug;

/// Shape an operation's result is normalized into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultShape {
    /// A sequence of records.
    List(RecordKind),
    /// Exactly one record.
    Single(RecordKind),
    /// An object keyed by record name, or a plain sequence.
    Keyed(RecordKind),
    /// A free-form object passed through unchanged.
    Object,
    /// Whatever the API returned.
    Raw,
}

/// Normalizes `payload` into `shape`.
///
/// # Errors
/// Returns [`ProxmoxError::Protocol`] when the payload has a shape the target
/// cannot accept, or when a single record fails to decode.
pub fn normalize(payload: Payload, shape: ResultShape) -> ProxmoxResult<OperationOutput> {
    match (shape, payload) {
        (ResultShape::List(_) | ResultShape::Keyed(_), Payload::Null) => {
            Ok(OperationOutput::list(Vec::new()))
        }
        (_, Payload::Null) => Ok(OperationOutput::Empty),

        (ResultShape::List(kind) | ResultShape::Keyed(kind), Payload::Array(items)) => {
            Ok(OperationOutput::list(decode_list(items, kind)))
        }
        (ResultShape::Keyed(kind), Payload::Object(map)) => {
            Ok(OperationOutput::list(decode_keyed(map, kind)))
        }

        (ResultShape::Single(kind), Payload::Object(map)) => kind
            .decode(Value::Object(map))
            .map(OperationOutput::Single)
            .map_err(|e| ProxmoxError::Protocol(format!("Failed to decode {:?}: {}", kind, e))),

        (ResultShape::Object, Payload::Object(map)) => Ok(OperationOutput::Raw(Value::Object(map))),

        (ResultShape::Raw, payload) => Ok(OperationOutput::Raw(payload.into_value())),

        (shape, payload) => Err(ProxmoxError::Protocol(format!(
            "unexpected shape: expected {}, got {}",
            expected(shape),
            payload.shape()
        ))),
    }
}

/// Decodes every element, dropping those that do not fit `kind`.
pub fn decode_list(items: Vec<Value>, kind: RecordKind) -> Vec<Record> {
    let total = items.len();
    let records: Vec<Record> = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match kind.decode(item) {
            Ok(record) => Some(record),
            Err(e) => {
                debug!(index, kind = ?kind, error = %e, "Dropping malformed list element");
                None
            }
        })
        .collect();
    if records.len() < total {
        debug!(
            kept = records.len(),
            dropped = total - records.len(),
            "List normalized with dropped elements"
        );
    }
    records
}

fn decode_keyed(map: Map<String, Value>, kind: RecordKind) -> Vec<Record> {
    let key_field = kind.key_field();
    let items = map
        .into_iter()
        .map(|(key, value)| match value {
            Value::Object(mut fields) => {
                fields
                    .entry(key_field.to_string())
                    .or_insert(Value::String(key));
                Value::Object(fields)
            }
            other => other,
        })
        .collect();
    decode_list(items, kind)
}

/// Sums a numeric field across entries; missing or non-numeric values count
/// as zero.
pub fn sum_field(items: &[Value], field: &str) -> u64 {
    items
        .iter()
        .filter_map(|item| item.get(field))
        .filter_map(|value| {
            value
                .as_u64()
                .or_else(|| value.as_f64().filter(|f| *f > 0.0).map(|f| f as u64))
        })
        .sum()
}

fn expected(shape: ResultShape) -> &'static str {
    match shape {
        ResultShape::List(_) => "array",
        ResultShape::Keyed(_) => "object or array",
        ResultShape::Single(_) | ResultShape::Object => "object",
        ResultShape::Raw => "any",
    }
}
