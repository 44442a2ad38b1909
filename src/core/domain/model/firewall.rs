//! Domain models for cluster firewall rules and security groups.

use serde::{Deserialize, Serialize};

/// A firewall rule.
///
/// The remote API reports the direction as `type`; `direction` is accepted
/// as well.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FirewallRule {
    /// Position of the rule within its list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// "in", "out" or "group".
    #[serde(default, alias = "type", skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    /// "ACCEPT", "DROP", "REJECT" or a group name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proto: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sport: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dport: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iface: Option<String>,
    #[serde(default, rename = "macro", skip_serializing_if = "Option::is_none")]
    pub macro_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable: Option<u8>,
}

/// A security group (firewall group) with its rules.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SecurityGroup {
    #[serde(default, alias = "group", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<FirewallRule>>,
}
