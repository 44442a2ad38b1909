use super::{Action, CatalogEntry, container_id, force, node_name};
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
        .params(vec![node_name(), container_id()])
}

pub(super) fn entries() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry::call(
            "get_containers",
            "Get all containers on a specific node",
            EndpointDescriptor::get("nodes/{node_name}/lxc"),
            ResultShape::List(RecordKind::Container),
        )
        .params(vec![node_name()]),
        CatalogEntry::call(
            "get_container_status",
            "Get detailed status of a specific container",
            EndpointDescriptor::get("nodes/{node_name}/lxc/{container_id}/status/current"),
            ResultShape::Single(RecordKind::Container),
        )
        .params(vec![node_name(), container_id()]),
        CatalogEntry::call(
            "get_container_config",
            "Get the full configuration of a container",
            EndpointDescriptor::get("nodes/{node_name}/lxc/{container_id}/config"),
            ResultShape::Object,
        )
        .params(vec![node_name(), container_id()]),
        power_action(
            "start_container",
            "Start a container",
            "nodes/{node_name}/lxc/{container_id}/status/start",
        ),
        power_action(
            "stop_container",
            "Stop a container immediately",
            "nodes/{node_name}/lxc/{container_id}/status/stop",
        ),
        power_action(
            "shutdown_container",
            "Gracefully shut down a container",
            "nodes/{node_name}/lxc/{container_id}/status/shutdown",
        ),
        power_action(
            "reboot_container",
            "Reboot a container",
            "nodes/{node_name}/lxc/{container_id}/status/reboot",
        ),
        CatalogEntry::call(
            "create_container",
            "Create a container; extra settings may be passed in config",
            EndpointDescriptor::post("nodes/{node_name}/lxc"),
            ResultShape::Raw,
        )
        .params(vec![
            node_name(),
            container_id().wire("vmid"),
            ParamSpec::string("hostname", "Container hostname"),
            ParamSpec::string("storage", "Storage for the root filesystem"),
            ParamSpec::integer("memory", "Memory in MiB"),
            ParamSpec::integer("cores", "CPU cores"),
            ParamSpec::string("ostype", "OS type (e.g., debian)"),
            ParamSpec::object("config", "Additional configuration options"),
        ]),
        CatalogEntry::new(
            "create_container_full",
            "Create a container with hostname, storage, memory, cores and OS type",
            Action::Compose {
                target: "create_container",
            },
        )
        .params(vec![
            node_name(),
            container_id(),
            ParamSpec::string("hostname", "Container hostname").required(),
            ParamSpec::string("storage", "Storage for the root filesystem").required(),
            ParamSpec::integer("memory", "Memory in MiB").required(),
            ParamSpec::integer("cores", "CPU cores").required(),
            ParamSpec::string("ostype", "OS type (e.g., debian)").required(),
        ]),
        CatalogEntry::call(
            "delete_container",
            "Delete a container",
            EndpointDescriptor::delete("nodes/{node_name}/lxc/{container_id}"),
            ResultShape::Raw,
        )
        .params(vec![node_name(), container_id(), force()]),
        CatalogEntry::call(
            "clone_container",
            "Clone an existing container",
            EndpointDescriptor::post("nodes/{node_name}/lxc/{container_id}/clone"),
            ResultShape::Raw,
        )
        .params(vec![
            node_name(),
            container_id(),
            ParamSpec::resource_id("new_container_id", "ID of the new container")
                .required()
                .wire("newid"),
            ParamSpec::string("new_hostname", "Hostname of the new container").wire("hostname"),
            ParamSpec::boolean("full", "Create a full copy instead of a linked clone")
                .default_value(json!(false)),
        ]),
        CatalogEntry::call(
            "update_container_config",
            "Update the configuration of a container",
            EndpointDescriptor::put("nodes/{node_name}/lxc/{container_id}/config"),
            ResultShape::Raw,
        )
        .params(vec![
            node_name(),
            container_id(),
            ParamSpec::object("config", "Configuration options to change").required(),
        ]),
    ]
}
