use super::{Action, CatalogEntry, force, node_name, vmid};
use crate::core::{
    application::normalizer::ResultShape,
    domain::model::{EndpointDescriptor, ParamSpec, RecordKind},
};
use serde_json::json;

fn power_action(
    name: &'static str,
    description: &'static str,
    path: &'static str,
) -> CatalogEntry {
    CatalogEntry::call(name, description, EndpointDescriptor::post(path), ResultShape::Raw)
        .params(vec![node_name(), vmid()])
}

pub(super) fn entries() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry::call(
            "get_vms",
            "Get all VMs on a specific node",
            EndpointDescriptor::get("nodes/{node_name}/qemu"),
            ResultShape::List(RecordKind::Vm),
        )
        .params(vec![node_name()]),
        CatalogEntry::call(
            "get_vm_status",
            "Get detailed status of a specific VM",
            EndpointDescriptor::get("nodes/{node_name}/qemu/{vmid}/status/current"),
            ResultShape::Single(RecordKind::Vm),
        )
        .params(vec![node_name(), vmid()]),
        CatalogEntry::call(
            "get_vm_config",
            "Get the full configuration of a VM",
            EndpointDescriptor::get("nodes/{node_name}/qemu/{vmid}/config"),
            ResultShape::Object,
        )
        .params(vec![node_name(), vmid()]),
        CatalogEntry::call(
            "get_vm_console",
            "Get console access information for a VM",
            EndpointDescriptor::get("nodes/{node_name}/qemu/{vmid}/status/current"),
            ResultShape::Object,
        )
        .params(vec![node_name(), vmid()]),
        power_action(
            "start_vm",
            "Power on a VM",
            "nodes/{node_name}/qemu/{vmid}/status/start",
        ),
        power_action(
            "stop_vm",
            "Power off a VM immediately",
            "nodes/{node_name}/qemu/{vmid}/status/stop",
        ),
        power_action(
            "reboot_vm",
            "Reboot a VM",
            "nodes/{node_name}/qemu/{vmid}/status/reboot",
        ),
        power_action(
            "shutdown_vm",
            "Gracefully shut down a VM",
            "nodes/{node_name}/qemu/{vmid}/status/shutdown",
        ),
        power_action(
            "suspend_vm",
            "Suspend (pause) a VM",
            "nodes/{node_name}/qemu/{vmid}/status/suspend",
        ),
        power_action(
            "resume_vm",
            "Resume a suspended VM",
            "nodes/{node_name}/qemu/{vmid}/status/resume",
        ),
        CatalogEntry::call(
            "create_vm",
            "Create a VM; extra settings may be passed in config",
            EndpointDescriptor::post("nodes/{node_name}/qemu"),
            ResultShape::Raw,
        )
        .params(vec![
            node_name(),
            vmid(),
            ParamSpec::string("name", "VM name"),
            ParamSpec::integer("memory", "Memory in MiB"),
            ParamSpec::integer("cores", "CPU cores per socket"),
            ParamSpec::integer("sockets", "CPU sockets"),
            ParamSpec::string("ostype", "Guest OS type (e.g., l26)"),
            ParamSpec::object("config", "Additional configuration options"),
        ]),
        CatalogEntry::new(
            "create_vm_full",
            "Create a VM with name, memory, cores and sockets",
            Action::Compose {
                target: "create_vm",
            },
        )
        .params(vec![
            node_name(),
            vmid(),
            ParamSpec::string("name", "VM name").required(),
            ParamSpec::integer("memory", "Memory in MiB").required(),
            ParamSpec::integer("cores", "CPU cores per socket").required(),
            ParamSpec::integer("sockets", "CPU sockets").required(),
        ]),
        CatalogEntry::call(
            "delete_vm",
            "Delete a VM",
            EndpointDescriptor::delete("nodes/{node_name}/qemu/{vmid}"),
            ResultShape::Raw,
        )
        .params(vec![node_name(), vmid(), force()]),
        CatalogEntry::call(
            "clone_vm",
            "Clone an existing VM",
            EndpointDescriptor::post("nodes/{node_name}/qemu/{vmid}/clone"),
            ResultShape::Raw,
        )
        .params(vec![
            node_name(),
            vmid(),
            ParamSpec::resource_id("new_vmid", "ID of the new VM")
                .required()
                .wire("newid"),
            ParamSpec::string("new_name", "Name of the new VM").wire("name"),
            ParamSpec::boolean("full", "Create a full copy instead of a linked clone")
                .default_value(json!(false)),
        ]),
        CatalogEntry::call(
            "update_vm_config",
            "Update the configuration of a VM",
            EndpointDescriptor::put("nodes/{node_name}/qemu/{vmid}/config"),
            ResultShape::Raw,
        )
        .params(vec![
            node_name(),
            vmid(),
            ParamSpec::object("config", "Configuration options to change").required(),
        ]),
        CatalogEntry::call(
            "migrate_vm",
            "Migrate a VM to another node",
            EndpointDescriptor::post("nodes/{node_name}/qemu/{vmid}/migrate"),
            ResultShape::Raw,
        )
        .params(vec![
            node_name(),
            vmid(),
            ParamSpec::node("target_node", "Destination node")
                .required()
                .wire("target"),
            ParamSpec::boolean("online", "Live-migrate a running VM")
                .default_value(json!(false))
                .numeric(),
        ]),
        CatalogEntry::call(
            "get_vm_firewall_rules",
            "Get the firewall rules of a VM",
            EndpointDescriptor::get("nodes/{node_name}/qemu/{vmid}/firewall/rules"),
            ResultShape::List(RecordKind::FirewallRule),
        )
        .params(vec![node_name(), vmid()]),
    ]
}
