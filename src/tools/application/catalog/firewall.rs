use super::{Action, CatalogEntry, node_name};
use crate::core::{
    application::normalizer::ResultShape,
    domain::model::{EndpointDescriptor, ParamSpec, RecordKind},
};
use serde_json::json;

pub(super) fn entries() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry::call(
            "get_firewall_rules",
            "Get the cluster-wide firewall rules",
            EndpointDescriptor::get("cluster/firewall/rules"),
            ResultShape::List(RecordKind::FirewallRule),
        ),
        CatalogEntry::call(
            "create_firewall_rule",
            "Create a cluster-wide firewall rule",
            EndpointDescriptor::post("cluster/firewall/rules"),
            ResultShape::Raw,
        )
        .params(vec![
            ParamSpec::string("direction", "Rule direction: in, out or group")
                .required()
                .wire("type"),
            ParamSpec::string("action", "ACCEPT, DROP, REJECT or a group name").required(),
            ParamSpec::string("source", "Source address or alias"),
            ParamSpec::string("dest", "Destination address or alias"),
            ParamSpec::string("proto", "Protocol (e.g., tcp, udp)"),
            ParamSpec::string("sport", "Source port or range"),
            ParamSpec::string("dport", "Destination port or range"),
            ParamSpec::string("comment", "Rule comment"),
            ParamSpec::boolean("enable", "Enable the rule")
                .default_value(json!(true))
                .numeric(),
        ]),
        CatalogEntry::call(
            "delete_firewall_rule",
            "Delete a cluster-wide firewall rule by position",
            EndpointDescriptor::delete("cluster/firewall/rules/{pos}"),
            ResultShape::Raw,
        )
        .params(vec![
            ParamSpec::index("pos", "Position of the rule").required(),
        ]),
        CatalogEntry::call(
            "get_security_groups",
            "Get all security groups",
            EndpointDescriptor::get("cluster/firewall/groups"),
            ResultShape::List(RecordKind::SecurityGroup),
        ),
        CatalogEntry::call(
            "create_security_group",
            "Create a security group",
            EndpointDescriptor::post("cluster/firewall/groups"),
            ResultShape::Raw,
        )
        .params(vec![
            ParamSpec::string("name", "Name of the group")
                .required()
                .wire("group"),
            ParamSpec::string("comment", "Group comment"),
        ]),
        CatalogEntry::call(
            "get_network_interfaces",
            "Get the network interfaces of a node",
            EndpointDescriptor::get("nodes/{node_name}/network"),
            ResultShape::Keyed(RecordKind::NetworkInterface),
        )
        .params(vec![node_name()]),
        CatalogEntry::new(
            "get_vlan_config",
            "Get the VLANs configured on a node",
            Action::VlanConfig {
                network: EndpointDescriptor::get("nodes/{node_name}/network"),
            },
        )
        .params(vec![node_name()]),
    ]
}
