use super::{Action, CatalogEntry, container_id, node_name, storage_name, vmid};
use crate::core::{
    application::normalizer::ResultShape,
    domain::model::{EndpointDescriptor, ParamSpec, RecordKind},
};

fn backup_options() -> Vec<ParamSpec> {
    vec![
        storage_name(),
        ParamSpec::string("backup_id", "Identifier for the backup").wire("id"),
        ParamSpec::string("notes", "Notes attached to the backup"),
    ]
}

fn backup_id() -> ParamSpec {
    ParamSpec::string("backup_id", "Volume ID of the backup").required()
}

pub(super) fn entries() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry::call(
            "create_vm_backup",
            "Create a backup of a VM",
            EndpointDescriptor::post("nodes/{node_name}/qemu/{vmid}/backup"),
            ResultShape::Raw,
        )
        .params(
            [node_name(), vmid().echo()]
                .into_iter()
                .chain(backup_options())
                .collect(),
        ),
        CatalogEntry::call(
            "create_container_backup",
            "Create a backup of a container",
            EndpointDescriptor::post("nodes/{node_name}/lxc/{container_id}/backup"),
            ResultShape::Raw,
        )
        .params(
            [node_name(), container_id().echo().wire("vmid")]
                .into_iter()
                .chain(backup_options())
                .collect(),
        ),
        CatalogEntry::new(
            "list_backups",
            "List the backups in a storage across all nodes",
            Action::CollectAcrossNodes {
                endpoint: EndpointDescriptor::get("nodes/{node_name}/storage/{storage}/content"),
                kind: RecordKind::Backup,
            },
        )
        .params(vec![storage_name()]),
        CatalogEntry::new(
            "delete_backup",
            "Delete a backup from whichever node holds it",
            Action::FirstAcrossNodes {
                endpoint: EndpointDescriptor::delete(
                    "nodes/{node_name}/storage/{storage}/content/{backup_id}",
                ),
                what: "backup",
            },
        )
        .params(vec![storage_name(), backup_id()]),
        CatalogEntry::call(
            "restore_vm_backup",
            "Restore a VM from a backup",
            EndpointDescriptor::post("nodes/{node_name}/qemu"),
            ResultShape::Raw,
        )
        .params(vec![node_name(), backup_id().wire("archive"), storage_name()]),
        CatalogEntry::call(
            "restore_container_backup",
            "Restore a container from a backup",
            EndpointDescriptor::post("nodes/{node_name}/lxc"),
            ResultShape::Raw,
        )
        .params(vec![node_name(), backup_id().wire("archive"), storage_name()]),
    ]
}
