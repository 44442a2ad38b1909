use super::{CatalogEntry, node_name};
use crate::core::{
    application::normalizer::ResultShape,
    domain::model::{EndpointDescriptor, RecordKind},
};

pub(super) fn entries() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry::call(
            "get_nodes",
            "Get all nodes in the Proxmox cluster",
            EndpointDescriptor::get("nodes"),
            ResultShape::List(RecordKind::Node),
        ),
        CatalogEntry::call(
            "get_node_status",
            "Get detailed status information for a specific node",
            EndpointDescriptor::get("nodes/{node_name}/status"),
            ResultShape::Single(RecordKind::NodeStatus),
        )
        .params(vec![node_name()]),
        CatalogEntry::call(
            "get_cluster_status",
            "Get cluster-wide status information",
            EndpointDescriptor::get("cluster/status"),
            ResultShape::Raw,
        ),
        CatalogEntry::call(
            "get_cluster_resources",
            "Get an overview of cluster resources (nodes, VMs, containers, storage)",
            EndpointDescriptor::get("cluster/resources"),
            ResultShape::Raw,
        ),
        CatalogEntry::call(
            "get_storage",
            "Get all storage definitions of the cluster",
            EndpointDescriptor::get("storage"),
            ResultShape::List(RecordKind::Storage),
        ),
        CatalogEntry::call(
            "get_node_storage",
            "Get the storage available on a specific node",
            EndpointDescriptor::get("nodes/{node_name}/storage"),
            ResultShape::List(RecordKind::Storage),
        )
        .params(vec![node_name()]),
        CatalogEntry::call(
            "get_tasks",
            "Get recent background tasks of the cluster",
            EndpointDescriptor::get("cluster/tasks"),
            ResultShape::List(RecordKind::Task),
        ),
    ]
}
