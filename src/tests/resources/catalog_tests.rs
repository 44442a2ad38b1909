use super::args;
use crate::core::domain::port::MockRequestExecutor;
use crate::{ApiMethod, Catalog, Dispatcher, Params, Payload};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

type Recorded = Arc<Mutex<Vec<(ApiMethod, String, Params)>>>;

const BACKUP_VOLUME: &str = "local:backup/vzdump-qemu-100.vma.zst";

fn sample_args() -> Value {
    json!({
        "node_name": "pve1",
        "vmid": 100,
        "container_id": 200,
        "storage": "local",
        "snapshot_name": "snap1",
        "backup_id": BACKUP_VOLUME,
        "pos": 3,
        "new_vmid": 101,
        "new_container_id": 201,
        "target_node": "pve2",
        "config": {"memory": 1024},
        "name": "sample",
        "memory": 1024,
        "cores": 2,
        "sockets": 1,
        "hostname": "sample",
        "ostype": "l26",
        "storage_type": "dir",
        "content": "images",
        "direction": "in",
        "action": "ACCEPT"
    })
}

fn recording_dispatcher() -> (Dispatcher<MockRequestExecutor>, Recorded) {
    let recorded: Recorded = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&recorded);

    let mut executor = MockRequestExecutor::new();
    executor
        .expect_execute()
        .returning(move |method, path, params| {
            sink.lock()
                .unwrap()
                .push((method, path.to_string(), params.clone()));
            Ok(match path {
                "nodes" => Payload::Array(vec![json!({"node": "pve1", "status": "online"})]),
                "storage/local" => Payload::from(json!({"storage": "local", "type": "dir"})),
                _ => Payload::Null,
            })
        });
    (
        Dispatcher::new(Arc::new(Catalog::standard()), executor),
        recorded,
    )
}

fn expected_calls() -> Vec<(&'static str, Vec<(ApiMethod, String)>)> {
    use ApiMethod::{Delete, Get, Post, Put};

    let one = |method: ApiMethod, path: &str| vec![(method, path.to_string())];
    let vm = "nodes/pve1/qemu/100";
    let ct = "nodes/pve1/lxc/200";

    vec![
        ("get_nodes", one(Get, "nodes")),
        ("get_node_status", one(Get, "nodes/pve1/status")),
        ("get_cluster_status", one(Get, "cluster/status")),
        ("get_cluster_resources", one(Get, "cluster/resources")),
        ("get_storage", one(Get, "storage")),
        ("get_node_storage", one(Get, "nodes/pve1/storage")),
        ("get_tasks", one(Get, "cluster/tasks")),
        ("get_vms", one(Get, "nodes/pve1/qemu")),
        ("get_vm_status", one(Get, &format!("{vm}/status/current"))),
        ("get_vm_config", one(Get, &format!("{vm}/config"))),
        ("get_vm_console", one(Get, &format!("{vm}/status/current"))),
        ("start_vm", one(Post, &format!("{vm}/status/start"))),
        ("stop_vm", one(Post, &format!("{vm}/status/stop"))),
        ("reboot_vm", one(Post, &format!("{vm}/status/reboot"))),
        ("shutdown_vm", one(Post, &format!("{vm}/status/shutdown"))),
        ("suspend_vm", one(Post, &format!("{vm}/status/suspend"))),
        ("resume_vm", one(Post, &format!("{vm}/status/resume"))),
        ("create_vm", one(Post, "nodes/pve1/qemu")),
        ("create_vm_full", one(Post, "nodes/pve1/qemu")),
        ("delete_vm", one(Delete, vm)),
        ("clone_vm", one(Post, &format!("{vm}/clone"))),
        ("update_vm_config", one(Put, &format!("{vm}/config"))),
        ("migrate_vm", one(Post, &format!("{vm}/migrate"))),
        ("get_vm_firewall_rules", one(Get, &format!("{vm}/firewall/rules"))),
        ("get_containers", one(Get, "nodes/pve1/lxc")),
        ("get_container_status", one(Get, &format!("{ct}/status/current"))),
        ("get_container_config", one(Get, &format!("{ct}/config"))),
        ("start_container", one(Post, &format!("{ct}/status/start"))),
        ("stop_container", one(Post, &format!("{ct}/status/stop"))),
        ("shutdown_container", one(Post, &format!("{ct}/status/shutdown"))),
        ("reboot_container", one(Post, &format!("{ct}/status/reboot"))),
        ("create_container", one(Post, "nodes/pve1/lxc")),
        ("create_container_full", one(Post, "nodes/pve1/lxc")),
        ("delete_container", one(Delete, ct)),
        ("clone_container", one(Post, &format!("{ct}/clone"))),
        ("update_container_config", one(Put, &format!("{ct}/config"))),
        ("get_storage_info", one(Get, "storage/local")),
        ("get_storage_content", one(Get, "storage/local/content")),
        ("create_storage", one(Post, "storage")),
        ("update_storage", one(Put, "storage/local")),
        ("delete_storage", one(Delete, "storage/local")),
        (
            "get_storage_quota",
            vec![
                (Get, "storage/local".to_string()),
                (Get, "storage/local/content".to_string()),
            ],
        ),
        ("create_vm_snapshot", one(Post, &format!("{vm}/snapshot"))),
        ("list_vm_snapshots", one(Get, &format!("{vm}/snapshot"))),
        ("delete_vm_snapshot", one(Delete, &format!("{vm}/snapshot/snap1"))),
        (
            "restore_vm_snapshot",
            one(Post, &format!("{vm}/snapshot/snap1/rollback")),
        ),
        ("create_container_snapshot", one(Post, &format!("{ct}/snapshot"))),
        ("list_container_snapshots", one(Get, &format!("{ct}/snapshot"))),
        (
            "delete_container_snapshot",
            one(Delete, &format!("{ct}/snapshot/snap1")),
        ),
        (
            "restore_container_snapshot",
            one(Post, &format!("{ct}/snapshot/snap1/rollback")),
        ),
        ("create_vm_backup", one(Post, &format!("{vm}/backup"))),
        ("create_container_backup", one(Post, &format!("{ct}/backup"))),
        (
            "list_backups",
            vec![
                (Get, "nodes".to_string()),
                (Get, "nodes/pve1/storage/local/content".to_string()),
            ],
        ),
        (
            "delete_backup",
            vec![
                (Get, "nodes".to_string()),
                (
                    Delete,
                    "nodes/pve1/storage/local/content/local:backup%2Fvzdump-qemu-100.vma.zst"
                        .to_string(),
                ),
            ],
        ),
        ("restore_vm_backup", one(Post, "nodes/pve1/qemu")),
        ("restore_container_backup", one(Post, "nodes/pve1/lxc")),
        ("get_firewall_rules", one(Get, "cluster/firewall/rules")),
        ("create_firewall_rule", one(Post, "cluster/firewall/rules")),
        ("delete_firewall_rule", one(Delete, "cluster/firewall/rules/3")),
        ("get_security_groups", one(Get, "cluster/firewall/groups")),
        ("create_security_group", one(Post, "cluster/firewall/groups")),
        ("get_network_interfaces", one(Get, "nodes/pve1/network")),
        ("get_vlan_config", one(Get, "nodes/pve1/network")),
    ]
}

#[tokio::test]
async fn test_every_operation_calls_its_endpoint() {
    let (dispatcher, recorded) = recording_dispatcher();
    let expected = expected_calls();
    assert_eq!(expected.len(), dispatcher.catalog().len());

    let sample = args(sample_args());
    for (operation, calls) in expected {
        recorded.lock().unwrap().clear();
        let result = dispatcher.invoke(operation, &sample).await;
        assert!(result.is_success(), "{} failed: {:?}", operation, result);

        let actual: Vec<(ApiMethod, String)> = recorded
            .lock()
            .unwrap()
            .iter()
            .map(|(method, path, _)| (*method, path.clone()))
            .collect();
        assert_eq!(actual, calls, "unexpected calls for {}", operation);
    }
}

#[tokio::test]
async fn test_path_arguments_are_not_resent() {
    let (dispatcher, recorded) = recording_dispatcher();
    let sample = args(sample_args());

    for entry in dispatcher.catalog().entries() {
        recorded.lock().unwrap().clear();
        dispatcher.invoke(entry.name, &sample).await;
        for (_, path, params) in recorded.lock().unwrap().iter() {
            assert!(
                !params.contains_key("node_name"),
                "{} sent node_name to {}",
                entry.name,
                path
            );
            assert!(
                !params.contains_key("snapshot_name"),
                "{} sent snapshot_name to {}",
                entry.name,
                path
            );
        }
    }
}

#[tokio::test]
async fn test_read_operations_send_no_parameters() {
    let (dispatcher, recorded) = recording_dispatcher();
    let sample = args(sample_args());

    for entry in dispatcher.catalog().entries() {
        if !entry.name.starts_with("get_") && !entry.name.starts_with("list_") {
            continue;
        }
        recorded.lock().unwrap().clear();
        dispatcher.invoke(entry.name, &sample).await;
        for (method, path, params) in recorded.lock().unwrap().iter() {
            assert_eq!(*method, ApiMethod::Get, "{} used {}", entry.name, method);
            assert!(params.is_empty(), "{} sent {:?} to {}", entry.name, params, path);
        }
    }
}

#[tokio::test]
async fn test_snapshot_wire_name() {
    let (dispatcher, recorded) = recording_dispatcher();
    let result = dispatcher
        .invoke("create_vm_snapshot", &args(sample_args()))
        .await;
    assert!(result.is_success());

    let calls = recorded.lock().unwrap();
    let (_, _, params) = &calls[0];
    assert_eq!(params.get("snapname"), Some(&json!("snap1")));
    assert!(params.get("snapshot_name").is_none());
}
