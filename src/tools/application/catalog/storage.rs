use super::{Action, CatalogEntry, storage_name};
use crate::core::{
    application::normalizer::ResultShape,
    domain::model::{EndpointDescriptor, ParamSpec, RecordKind},
};

pub(super) fn entries() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry::call(
            "get_storage_info",
            "Get detailed information about a storage",
            EndpointDescriptor::get("storage/{storage}"),
            ResultShape::Object,
        )
        .params(vec![storage_name()]),
        CatalogEntry::call(
            "get_storage_content",
            "List the contents of a storage (ISOs, backups, templates)",
            EndpointDescriptor::get("storage/{storage}/content"),
            ResultShape::List(RecordKind::Entry),
        )
        .params(vec![storage_name()]),
        CatalogEntry::call(
            "create_storage",
            "Create a storage definition",
            EndpointDescriptor::post("storage"),
            ResultShape::Raw,
        )
        .params(vec![
            storage_name(),
            ParamSpec::string("storage_type", "Storage type (e.g., dir, nfs, lvm)")
                .required()
                .wire("type"),
            ParamSpec::string("content", "Allowed content types (e.g., images,backup)")
                .required(),
            ParamSpec::object("config", "Additional storage options"),
        ]),
        CatalogEntry::call(
            "update_storage",
            "Update a storage definition",
            EndpointDescriptor::put("storage/{storage}"),
            ResultShape::Raw,
        )
        .params(vec![
            storage_name().echo(),
            ParamSpec::object("config", "Storage options to change").required(),
        ]),
        CatalogEntry::call(
            "delete_storage",
            "Remove a storage definition",
            EndpointDescriptor::delete("storage/{storage}"),
            ResultShape::Raw,
        )
        .params(vec![storage_name()]),
        CatalogEntry::new(
            "get_storage_quota",
            "Get storage information together with the space used by its content",
            Action::StorageQuota {
                info: EndpointDescriptor::get("storage/{storage}"),
                content: EndpointDescriptor::get("storage/{storage}/content"),
            },
        )
        .params(vec![storage_name()]),
    ]
}
