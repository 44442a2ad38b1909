//! Typed records produced by the response normalizer.

use super::{
    firewall::{FirewallRule, SecurityGroup},
    network::{NetworkInterface, VlanConfig},
    node::{Node, NodeStatus},
    storage::{Backup, Storage},
    task::Task,
    vm::{Container, Vm},
};
use serde::Serialize;
use serde_json::{Map, Value};

/// One normalized record.
///
/// Serializes as the inner record, without a variant tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Record {
    Node(Node),
    NodeStatus(NodeStatus),
    Vm(Vm),
    Container(Container),
    Storage(Storage),
    Task(Task),
    Backup(Backup),
    FirewallRule(FirewallRule),
    SecurityGroup(SecurityGroup),
    NetworkInterface(NetworkInterface),
    Vlan(VlanConfig),
    /// An untyped object, kept as returned.
    Entry(Map<String, Value>),
}

/// Target record type of a normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Node,
    NodeStatus,
    Vm,
    Container,
    Storage,
    Task,
    Backup,
    FirewallRule,
    SecurityGroup,
    NetworkInterface,
    Vlan,
    Entry,
}

impl RecordKind {
    /// Decodes one JSON value into a record of this kind.
    pub fn decode(self, value: Value) -> Result<Record, serde_json::Error> {
        Ok(match self {
            RecordKind::Node => Record::Node(serde_json::from_value(value)?),
            RecordKind::NodeStatus => Record::NodeStatus(serde_json::from_value(value)?),
            RecordKind::Vm => Record::Vm(serde_json::from_value(value)?),
            RecordKind::Container => Record::Container(serde_json::from_value(value)?),
            RecordKind::Storage => Record::Storage(serde_json::from_value(value)?),
            RecordKind::Task => Record::Task(serde_json::from_value(value)?),
            RecordKind::Backup => Record::Backup(serde_json::from_value(value)?),
            RecordKind::FirewallRule => Record::FirewallRule(serde_json::from_value(value)?),
            RecordKind::SecurityGroup => Record::SecurityGroup(serde_json::from_value(value)?),
            RecordKind::NetworkInterface => {
                Record::NetworkInterface(serde_json::from_value(value)?)
            }
            RecordKind::Vlan => Record::Vlan(serde_json::from_value(value)?),
            RecordKind::Entry => Record::Entry(serde_json::from_value(value)?),
        })
    }

    /// Field that holds the record's name when the API returns a keyed object.
    pub fn key_field(self) -> &'static str {
        match self {
            RecordKind::Node | RecordKind::NodeStatus => "node",
            RecordKind::Vm | RecordKind::Container => "name",
            RecordKind::Storage => "storage",
            RecordKind::Task => "upid",
            RecordKind::Backup => "volid",
            RecordKind::FirewallRule => "id",
            RecordKind::SecurityGroup => "group",
            RecordKind::NetworkInterface => "iface",
            RecordKind::Vlan => "interface",
            RecordKind::Entry => "name",
        }
    }
}
