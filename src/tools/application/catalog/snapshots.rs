use super::{CatalogEntry, container_id, force, node_name, vmid};
use crate::core::{
    application::normalizer::ResultShape,
    domain::model::{EndpointDescriptor, ParamSpec, RecordKind},
};

fn snapshot_name() -> ParamSpec {
    ParamSpec::string("snapshot_name", "Name of the snapshot").required()
}

/// Create, list, delete and rollback entries for one guest type.
fn guest_snapshots(
    guest_id: fn() -> ParamSpec,
    names: [&'static str; 4],
    descriptions: [&'static str; 4],
    paths: [&'static str; 3],
) -> Vec<CatalogEntry> {
    let [create, list, delete, restore] = names;
    let [create_desc, list_desc, delete_desc, restore_desc] = descriptions;
    let [collection, item, rollback] = paths;
    vec![
        CatalogEntry::call(
            create,
            create_desc,
            EndpointDescriptor::post(collection),
            ResultShape::Raw,
        )
        .params(vec![
            node_name(),
            guest_id(),
            snapshot_name().wire("snapname"),
            ParamSpec::string("description", "Snapshot description"),
        ]),
        CatalogEntry::call(
            list,
            list_desc,
            EndpointDescriptor::get(collection),
            ResultShape::List(RecordKind::Entry),
        )
        .params(vec![node_name(), guest_id()]),
        CatalogEntry::call(
            delete,
            delete_desc,
            EndpointDescriptor::delete(item),
            ResultShape::Raw,
        )
        .params(vec![node_name(), guest_id(), snapshot_name(), force()]),
        CatalogEntry::call(
            restore,
            restore_desc,
            EndpointDescriptor::post(rollback),
            ResultShape::Raw,
        )
        .params(vec![node_name(), guest_id(), snapshot_name()]),
    ]
}

pub(super) fn entries() -> Vec<CatalogEntry> {
    let mut entries = guest_snapshots(
        vmid,
        [
            "create_vm_snapshot",
            "list_vm_snapshots",
            "delete_vm_snapshot",
            "restore_vm_snapshot",
        ],
        [
            "Create a snapshot of a VM",
            "List the snapshots of a VM",
            "Delete a snapshot of a VM",
            "Roll a VM back to a snapshot",
        ],
        [
            "nodes/{node_name}/qemu/{vmid}/snapshot",
            "nodes/{node_name}/qemu/{vmid}/snapshot/{snapshot_name}",
            "nodes/{node_name}/qemu/{vmid}/snapshot/{snapshot_name}/rollback",
        ],
    );
    entries.extend(guest_snapshots(
        container_id,
        [
            "create_container_snapshot",
            "list_container_snapshots",
            "delete_container_snapshot",
            "restore_container_snapshot",
        ],
        [
            "Create a snapshot of a container",
            "List the snapshots of a container",
            "Delete a snapshot of a container",
            "Roll a container back to a snapshot",
        ],
        [
            "nodes/{node_name}/lxc/{container_id}/snapshot",
            "nodes/{node_name}/lxc/{container_id}/snapshot/{snapshot_name}",
            "nodes/{node_name}/lxc/{container_id}/snapshot/{snapshot_name}/rollback",
        ],
    ));
    entries
}
