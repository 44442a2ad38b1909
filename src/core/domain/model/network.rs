//! Domain models for node network interfaces and the VLANs derived from them.

use serde::{Deserialize, Serialize};

/// A network interface from `/nodes/{node}/network`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NetworkInterface {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iface: Option<String>,
    /// Interface type (e.g., "bridge", "eth", "vlan", "bond").
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub iface_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autostart: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bridge: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bridge_ports: Option<String>,
    /// VLAN tag for interfaces of type "vlan".
    #[serde(default, alias = "vlan-id", skip_serializing_if = "Option::is_none")]
    pub vlan: Option<u16>,
    #[serde(
        default,
        rename = "vlan-raw-device",
        skip_serializing_if = "Option::is_none"
    )]
    pub vlan_raw_device: Option<String>,
    #[serde(default, rename = "hwaddr", skip_serializing_if = "Option::is_none")]
    pub mac_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub netmask: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cidr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway: Option<String>,
    #[serde(default, rename = "ip_addrs", skip_serializing_if = "Option::is_none")]
    pub ip_addresses: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mtu: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

impl NetworkInterface {
    /// Returns the VLAN configuration if this is a tagged VLAN interface.
    pub fn vlan_config(&self) -> Option<VlanConfig> {
        let vid = self.vlan.filter(|vid| *vid > 0)?;
        if self.iface_type.as_deref() != Some("vlan") {
            return None;
        }
        let iface = self.iface.clone()?;
        Some(VlanConfig {
            vid,
            name: Some(iface.clone()),
            comment: Some(format!("VLAN {} on {}", vid, iface)),
            interface: iface,
        })
    }
}

/// VLAN configuration derived from a node's interfaces.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct VlanConfig {
    #[serde(rename = "vlan")]
    pub vid: u16,
    #[serde(default, rename = "vlan_name", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub interface: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}
