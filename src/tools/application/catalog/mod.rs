//! Operation Catalog: the fixed table of tool operations.
//!
//! Each entry names an operation, describes its arguments and says how it is
//! carried out: a single remote call, a delegation to another entry, a
//! cluster fan-out, or one of the derived operations built from other calls.
//! The table is built once and never mutated afterwards.

mod backups;
mod cluster;
mod containers;
mod firewall;
mod snapshots;
mod storage;
mod vms;

use crate::core::{
    application::normalizer::ResultShape,
    domain::model::{EndpointDescriptor, ParamSpec, RecordKind},
};
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;

/// How an operation is carried out.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// One remote call whose payload is normalized into `shape`.
    Call {
        endpoint: EndpointDescriptor,
        shape: ResultShape,
    },
    /// Validates its own (stricter) arguments, then runs `target` with them.
    Compose { target: &'static str },
    /// Runs `endpoint` on every node and concatenates the records.
    CollectAcrossNodes {
        endpoint: EndpointDescriptor,
        kind: RecordKind,
    },
    /// Runs `endpoint` on one node after another until one succeeds.
    FirstAcrossNodes {
        endpoint: EndpointDescriptor,
        what: &'static str,
    },
    /// Storage info plus content, with the summed size of the content.
    StorageQuota {
        info: EndpointDescriptor,
        content: EndpointDescriptor,
    },
    /// VLANs derived from a node's network interfaces.
    VlanConfig { network: EndpointDescriptor },
}

impl Action {
    /// Endpoints this action calls directly.
    pub fn endpoints(&self) -> Vec<EndpointDescriptor> {
        match self {
            Action::Call { endpoint, .. }
            | Action::CollectAcrossNodes { endpoint, .. }
            | Action::FirstAcrossNodes { endpoint, .. } => vec![*endpoint],
            Action::StorageQuota { info, content } => vec![*info, *content],
            Action::VlanConfig { network } => vec![*network],
            Action::Compose { .. } => Vec::new(),
        }
    }

    /// Whether `{node_name}` is filled per node rather than by an argument.
    pub fn fans_out(&self) -> bool {
        matches!(
            self,
            Action::CollectAcrossNodes { .. } | Action::FirstAcrossNodes { .. }
        )
    }
}

/// Static description of one operation.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub params: Vec<ParamSpec>,
    pub action: Action,
}

impl CatalogEntry {
    pub fn new(name: &'static str, description: &'static str, action: Action) -> Self {
        Self {
            name,
            description,
            params: Vec::new(),
            action,
        }
    }

    /// Entry for a single call normalized into `shape`.
    pub fn call(
        name: &'static str,
        description: &'static str,
        endpoint: EndpointDescriptor,
        shape: ResultShape,
    ) -> Self {
        Self::new(name, description, Action::Call { endpoint, shape })
    }

    pub fn params(mut self, params: Vec<ParamSpec>) -> Self {
        self.params = params;
        self
    }

    pub fn param(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|spec| spec.name == name)
    }

    /// JSON schema of the entry's arguments.
    pub fn input_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .params
            .iter()
            .map(|spec| (spec.name.to_string(), spec.schema()))
            .collect();
        let required: Vec<&str> = self
            .params
            .iter()
            .filter(|spec| spec.required)
            .map(|spec| spec.name)
            .collect();
        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}

/// The immutable operation table.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: BTreeMap<&'static str, CatalogEntry>,
}

impl Catalog {
    /// Builds the catalog of every supported operation.
    pub fn standard() -> Self {
        Self::from_entries(
            cluster::entries()
                .into_iter()
                .chain(vms::entries())
                .chain(containers::entries())
                .chain(storage::entries())
                .chain(snapshots::entries())
                .chain(backups::entries())
                .chain(firewall::entries()),
        )
    }

    pub fn from_entries(entries: impl IntoIterator<Item = CatalogEntry>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|entry| (entry.name, entry))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries.get(name)
    }

    /// Entries in name order.
    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Tool definitions for advertising the catalog:
    /// `{name, description, inputSchema}` per entry.
    pub fn tool_definitions(&self) -> Vec<Value> {
        self.entries()
            .map(|entry| {
                json!({
                    "name": entry.name,
                    "description": entry.description,
                    "inputSchema": entry.input_schema(),
                })
            })
            .collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

fn node_name() -> ParamSpec {
    ParamSpec::node("node_name", "Name of the node").required()
}

fn vmid() -> ParamSpec {
    ParamSpec::resource_id("vmid", "VM ID").required()
}

fn container_id() -> ParamSpec {
    ParamSpec::resource_id("container_id", "Container ID").required()
}

fn storage_name() -> ParamSpec {
    ParamSpec::string("storage", "Storage identifier").required()
}

fn force() -> ParamSpec {
    ParamSpec::boolean("force", "Force the removal").default_value(json!(false))
}
