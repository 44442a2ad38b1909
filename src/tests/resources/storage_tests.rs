use super::{args, create_test_client};
use crate::{FailureKind, OperationOutput, Record};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, method, path},
};

#[tokio::test]
async fn test_storage_list() {
    let mock_server = MockServer::start().await;
    let client = create_test_client(&mock_server);

    Mock::given(method("GET"))
        .and(path("/api2/json/nodes/pve1/storage"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {
                    "storage": "local",
                    "type": "dir",
                    "content": "iso,vztmpl,backup",
                    "active": 1,
                    "enabled": 1,
                    "shared": 0,
                    "total": 100000,
                    "used": 25000,
                    "avail": 75000,
                    "used_fraction": 0.25
                },
                {"storage": "nfs-backup", "type": "nfs", "active": 0}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = client
        .invoke("get_node_storage", &args(json!({"node_name": "pve1"})))
        .await;
    let items = result.data().and_then(OperationOutput::items).unwrap();
    assert_eq!(items.len(), 2);
    let Record::Storage(local) = &items[0] else {
        panic!("expected a storage record");
    };
    assert_eq!(local.storage_type.as_deref(), Some("dir"));
    assert_eq!(local.used_fraction, Some(0.25));
    let Record::Storage(nfs) = &items[1] else {
        panic!("expected a storage record");
    };
    assert_eq!(nfs.total, None);

    let serialized = serde_json::to_value(&result).unwrap();
    assert_eq!(serialized["data"]["items"][0]["type"], "dir");
}

#[tokio::test]
async fn test_storage_quota_sums_content_sizes() {
    let mock_server = MockServer::start().await;
    let client = create_test_client(&mock_server);

    Mock::given(method("GET"))
        .and(path("/api2/json/storage/local"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"storage": "local", "type": "dir", "path": "/var/lib/vz", "content": "iso,backup"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api2/json/storage/local/content"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"volid": "local:iso/debian-12.iso", "size": 600},
                {"volid": "local:backup/vzdump-qemu-100.vma.zst", "size": 400},
                {"volid": "local:vztmpl/alpine.tar.xz"}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = client
        .invoke("get_storage_quota", &args(json!({"storage": "local"})))
        .await;
    let Some(OperationOutput::Raw(quota)) = result.data() else {
        panic!("expected a raw quota object, got {:?}", result);
    };
    assert_eq!(quota["storage"], "local");
    assert_eq!(quota["used_bytes"], 1000);
    assert_eq!(quota["info"]["path"], "/var/lib/vz");
    assert_eq!(quota["content"].as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn test_storage_quota_fails_when_info_fails() {
    let mock_server = MockServer::start().await;
    let client = create_test_client(&mock_server);

    Mock::given(method("GET"))
        .and(path("/api2/json/storage/missing"))
        .respond_with(
            ResponseTemplate::new(500).set_body_string("storage 'missing' does not exist"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api2/json/storage/missing/content"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let result = client
        .invoke("get_storage_quota", &args(json!({"storage": "missing"})))
        .await;
    let failure = result.failure_details().unwrap();
    assert_eq!(failure.kind, FailureKind::Remote);
    assert!(failure.message.contains("does not exist"));
}

#[tokio::test]
async fn test_create_storage_wire_names() {
    let mock_server = MockServer::start().await;
    let client = create_test_client(&mock_server);

    Mock::given(method("POST"))
        .and(path("/api2/json/storage"))
        .and(body_json(json!({
            "storage": "backup-nfs",
            "type": "nfs",
            "content": "backup",
            "server": "10.0.0.5",
            "export": "/srv/backup"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"storage": "backup-nfs", "type": "nfs"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = client
        .invoke(
            "create_storage",
            &args(json!({
                "storage": "backup-nfs",
                "storage_type": "nfs",
                "content": "backup",
                "config": {"server": "10.0.0.5", "export": "/srv/backup"}
            })),
        )
        .await;
    assert!(result.is_success(), "{:?}", result);
}

#[tokio::test]
async fn test_update_storage_echoes_identifier() {
    let mock_server = MockServer::start().await;
    let client = create_test_client(&mock_server);

    Mock::given(method("PUT"))
        .and(path("/api2/json/storage/local"))
        .and(body_json(json!({"storage": "local", "content": "iso,backup,vztmpl"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": null})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = client
        .invoke(
            "update_storage",
            &args(json!({"storage": "local", "config": {"content": "iso,backup,vztmpl"}})),
        )
        .await;
    assert_eq!(result.data(), Some(&OperationOutput::Empty));
}

#[tokio::test]
async fn test_delete_storage() {
    let mock_server = MockServer::start().await;
    let client = create_test_client(&mock_server);

    Mock::given(method("DELETE"))
        .and(path("/api2/json/storage/old-nfs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": null})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = client
        .invoke("delete_storage", &args(json!({"storage": "old-nfs"})))
        .await;
    assert!(result.is_success(), "{:?}", result);
}

#[tokio::test]
async fn test_storage_content_entries() {
    let mock_server = MockServer::start().await;
    let client = create_test_client(&mock_server);

    Mock::given(method("GET"))
        .and(path("/api2/json/storage/local/content"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"volid": "local:iso/debian-12.iso", "content": "iso", "size": 600, "format": "iso"}
            ]
        })))
        .mount(&mock_server)
        .await;

    let result = client
        .invoke("get_storage_content", &args(json!({"storage": "local"})))
        .await;
    let items = result.data().and_then(OperationOutput::items).unwrap();
    let Record::Entry(entry) = &items[0] else {
        panic!("expected a generic entry");
    };
    assert_eq!(entry["volid"], "local:iso/debian-12.iso");
}
