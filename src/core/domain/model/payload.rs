//! The unwrapped `data` field of a response envelope.
//!
//! The remote API returns `data` as `null`, a single object, an array of
//! objects, or (for task-starting calls) a bare string. [`Payload`] makes
//! those shapes explicit so that consumers match on them exhaustively.

use serde::Deserialize;
use serde_json::{Map, Value};

/// Named request parameters, serialized as a query string or a JSON body.
pub type Params = Map<String, Value>;

/// A tagged view of an untyped API payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// No data (`null` or an absent `data` field).
    Null,
    /// A single JSON object.
    Object(Map<String, Value>),
    /// An ordered sequence of values.
    Array(Vec<Value>),
    /// A bare scalar, typically a task identifier (UPID).
    Scalar(Value),
}

impl Payload {
    /// Short name of the shape, used in error messages.
    pub fn shape(&self) -> &'static str {
        match self {
            Payload::Null => "null",
            Payload::Object(_) => "object",
            Payload::Array(_) => "array",
            Payload::Scalar(_) => "scalar",
        }
    }

    /// Converts the payload back into plain JSON.
    pub fn into_value(self) -> Value {
        match self {
            Payload::Null => Value::Null,
            Payload::Object(map) => Value::Object(map),
            Payload::Array(items) => Value::Array(items),
            Payload::Scalar(value) => value,
        }
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Payload::Null,
            Value::Object(map) => Payload::Object(map),
            Value::Array(items) => Payload::Array(items),
            scalar => Payload::Scalar(scalar),
        }
    }
}

/// Success envelope of the remote API: `{"data": ...}`.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope {
    #[serde(default)]
    pub data: Value,
}
