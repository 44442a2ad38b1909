//! Endpoint descriptors: HTTP verb, path template and parameter contract.
//!
//! Descriptors are plain data built once when the catalog is constructed and
//! never mutated afterwards.

use crate::core::domain::{
    error::{ProxmoxError, ProxmoxResult, ValidationError},
    value_object::{ResourceId, validate_node_name},
};
use serde_json::{Value, json};
use std::fmt;

/// HTTP verbs used by the remote API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl ApiMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiMethod::Get => "GET",
            ApiMethod::Post => "POST",
            ApiMethod::Put => "PUT",
            ApiMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for ApiMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A relative API path with `{name}` placeholders, e.g.
/// `nodes/{node_name}/qemu/{vmid}/status/current`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathTemplate(&'static str);

impl PathTemplate {
    pub const fn new(template: &'static str) -> Self {
        Self(template)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }

    /// Names of all placeholders, in order of appearance.
    pub fn placeholders(&self) -> ProxmoxResult<Vec<&'static str>> {
        let mut names = Vec::new();
        let mut rest = self.0;
        while let Some(start) = rest.find('{') {
            let after = &rest[start + 1..];
            let end = after.find('}').ok_or_else(|| self.unclosed())?;
            names.push(&after[..end]);
            rest = &after[end + 1..];
        }
        Ok(names)
    }

    /// Fills every placeholder with the value returned by `lookup`.
    ///
    /// A placeholder without a value is a contract violation of the catalog
    /// entry that owns the template, not a caller error.
    pub fn render<F>(&self, lookup: F) -> ProxmoxResult<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut out = String::with_capacity(self.0.len() + 16);
        let mut rest = self.0;
        while let Some(start) = rest.find('{') {
            out.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            let end = after.find('}').ok_or_else(|| self.unclosed())?;
            let name = &after[..end];
            let value = lookup(name).ok_or_else(|| {
                ProxmoxError::Contract(format!(
                    "no value for placeholder '{{{}}}' in '{}'",
                    name, self.0
                ))
            })?;
            out.push_str(&value);
            rest = &after[end + 1..];
        }
        out.push_str(rest);
        Ok(out)
    }

    fn unclosed(&self) -> ProxmoxError {
        ProxmoxError::Contract(format!("unclosed placeholder in '{}'", self.0))
    }
}

/// Verb plus path template of one remote call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointDescriptor {
    pub method: ApiMethod,
    pub path: PathTemplate,
}

impl EndpointDescriptor {
    pub const fn get(path: &'static str) -> Self {
        Self {
            method: ApiMethod::Get,
            path: PathTemplate::new(path),
        }
    }

    pub const fn post(path: &'static str) -> Self {
        Self {
            method: ApiMethod::Post,
            path: PathTemplate::new(path),
        }
    }

    pub const fn put(path: &'static str) -> Self {
        Self {
            method: ApiMethod::Put,
            path: PathTemplate::new(path),
        }
    }

    pub const fn delete(path: &'static str) -> Self {
        Self {
            method: ApiMethod::Delete,
            path: PathTemplate::new(path),
        }
    }
}

/// Kinds of caller-supplied arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    String,
    /// A cluster node name, safe to embed in a path.
    Node,
    Integer,
    /// A strictly positive guest identifier.
    ResourceId,
    /// A non-negative position.
    Index,
    Boolean,
    /// A free-form map whose entries are merged into the parameter set.
    Object,
}

impl ParamKind {
    /// JSON schema type name.
    pub fn json_type(&self) -> &'static str {
        match self {
            ParamKind::String | ParamKind::Node => "string",
            ParamKind::Integer | ParamKind::ResourceId | ParamKind::Index => "integer",
            ParamKind::Boolean => "boolean",
            ParamKind::Object => "object",
        }
    }
}

/// Contract of a single named argument.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub required: bool,
    pub default: Option<Value>,
    pub description: &'static str,
    /// Name used on the wire when it differs from `name`.
    pub wire_name: Option<&'static str>,
    /// Send booleans as `1`/`0` instead of JSON booleans.
    pub numeric_bool: bool,
    /// Also send the argument as a parameter when it fills a path placeholder.
    pub echo: bool,
}

impl ParamSpec {
    pub fn new(name: &'static str, kind: ParamKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            required: false,
            default: None,
            description,
            wire_name: None,
            numeric_bool: false,
            echo: false,
        }
    }

    pub fn string(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ParamKind::String, description)
    }

    pub fn node(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ParamKind::Node, description)
    }

    pub fn integer(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ParamKind::Integer, description)
    }

    pub fn resource_id(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ParamKind::ResourceId, description)
    }

    pub fn index(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ParamKind::Index, description)
    }

    pub fn boolean(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ParamKind::Boolean, description)
    }

    pub fn object(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ParamKind::Object, description)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn default_value(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    pub fn wire(mut self, wire_name: &'static str) -> Self {
        self.wire_name = Some(wire_name);
        self
    }

    pub fn numeric(mut self) -> Self {
        self.numeric_bool = true;
        self
    }

    pub fn echo(mut self) -> Self {
        self.echo = true;
        self
    }

    /// Key under which the argument is sent.
    pub fn wire_key(&self) -> &'static str {
        self.wire_name.unwrap_or(self.name)
    }

    /// Validates a raw argument and converts it into its canonical JSON form.
    ///
    /// Returns `Ok(None)` for an absent optional argument without default.
    /// An empty string counts as absent.
    pub fn coerce(&self, raw: Option<&Value>) -> Result<Option<Value>, ValidationError> {
        let raw = match raw {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) if s.is_empty() => None,
            Some(value) => Some(value),
        };

        let Some(raw) = raw else {
            if let Some(default) = &self.default {
                return Ok(Some(default.clone()));
            }
            if self.required {
                return Err(self.missing());
            }
            return Ok(None);
        };

        let value = match self.kind {
            ParamKind::String => Value::String(self.text(raw)?.to_string()),
            ParamKind::Node => {
                let name = self.text(raw)?;
                validate_node_name(name).map_err(|e| ValidationError::Field {
                    field: self.name.to_string(),
                    message: e.to_string(),
                })?;
                Value::String(name.to_string())
            }
            ParamKind::Integer => Value::from(self.whole_number(raw)?),
            ParamKind::ResourceId => {
                Value::from(ResourceId::new(self.name, self.whole_number(raw)?)?.get())
            }
            ParamKind::Index => {
                let position = self.whole_number(raw)?;
                if position < 0 {
                    return Err(ValidationError::ConstraintViolation(format!(
                        "{} parameter must be a non-negative integer",
                        self.name
                    )));
                }
                Value::from(position)
            }
            ParamKind::Boolean => Value::Bool(raw.as_bool().ok_or_else(|| self.wrong_kind())?),
            ParamKind::Object => match raw {
                Value::Object(map) => Value::Object(map.clone()),
                _ => return Err(self.wrong_kind()),
            },
        };
        Ok(Some(value))
    }

    /// Applies the wire encoding to an already coerced value.
    pub fn encode(&self, value: &Value) -> Value {
        match value {
            Value::Bool(flag) if self.numeric_bool => Value::from(u8::from(*flag)),
            other => other.clone(),
        }
    }

    /// JSON schema of this argument.
    pub fn schema(&self) -> Value {
        let mut schema = json!({
            "type": self.kind.json_type(),
            "description": self.description,
        });
        if let Some(default) = &self.default {
            schema["default"] = default.clone();
        }
        match self.kind {
            ParamKind::ResourceId => schema["minimum"] = json!(1),
            ParamKind::Index => schema["minimum"] = json!(0),
            _ => {}
        }
        schema
    }

    fn missing(&self) -> ValidationError {
        match self.kind {
            ParamKind::ResourceId => ValidationError::ConstraintViolation(format!(
                "{} parameter is required and must be a positive integer",
                self.name
            )),
            _ => ValidationError::Missing(self.name.to_string()),
        }
    }

    fn wrong_kind(&self) -> ValidationError {
        ValidationError::Field {
            field: self.name.to_string(),
            message: format!("expected {}", self.kind.json_type()),
        }
    }

    fn text<'v>(&self, raw: &'v Value) -> Result<&'v str, ValidationError> {
        raw.as_str().ok_or_else(|| self.wrong_kind())
    }

    fn whole_number(&self, raw: &Value) -> Result<i64, ValidationError> {
        raw.as_i64()
            .or_else(|| {
                raw.as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() < 9.0e15)
                    .map(|f| f as i64)
            })
            .or_else(|| raw.as_str().and_then(|s| s.trim().parse().ok()))
            .ok_or_else(|| self.wrong_kind())
    }
}
