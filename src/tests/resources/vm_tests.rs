use super::{args, create_test_client};
use crate::{FailureKind, OperationOutput, Record};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{any, body_json, method, path, query_param},
};

#[tokio::test]
async fn test_vm_list_success() {
    let mock_server = MockServer::start().await;
    let client = create_test_client(&mock_server);

    Mock::given(method("GET"))
        .and(path("/api2/json/nodes/pve1/qemu"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {
                    "vmid": 100,
                    "name": "web",
                    "status": "running",
                    "cpu": 0.12,
                    "cpus": 2,
                    "mem": 1073741824_i64,
                    "maxmem": 2147483648_i64,
                    "uptime": 3600,
                    "tags": "prod;web"
                },
                {"vmid": 101, "name": "db", "status": "stopped", "template": 0}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = client
        .invoke("get_vms", &args(json!({"node_name": "pve1"})))
        .await;
    let items = result.data().and_then(OperationOutput::items).unwrap();
    assert_eq!(items.len(), 2);
    let Record::Vm(web) = &items[0] else {
        panic!("expected a VM record");
    };
    assert_eq!(web.vmid, Some(100));
    assert_eq!(web.cpus, Some(2.0));
    assert_eq!(web.tags.as_deref(), Some("prod;web"));
    let Record::Vm(db) = &items[1] else {
        panic!("expected a VM record");
    };
    assert_eq!(db.status.as_deref(), Some("stopped"));
    assert_eq!(db.uptime, None);
}

#[tokio::test]
async fn test_vm_status_path_and_record() {
    let mock_server = MockServer::start().await;
    let client = create_test_client(&mock_server);

    Mock::given(method("GET"))
        .and(path("/api2/json/nodes/pve1/qemu/100/status/current"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "vmid": 100,
                "name": "web",
                "status": "running",
                "qmpstatus": "running",
                "pid": 4242,
                "netin": 1024,
                "netout": 2048
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = client
        .invoke("get_vm_status", &args(json!({"node_name": "pve1", "vmid": 100})))
        .await;
    let Some(OperationOutput::Single(Record::Vm(vm))) = result.data() else {
        panic!("expected a single VM, got {:?}", result);
    };
    assert_eq!(vm.qmpstatus.as_deref(), Some("running"));
    assert_eq!(vm.pid, Some(4242));
}

#[tokio::test]
async fn test_vm_id_given_as_string() {
    let mock_server = MockServer::start().await;
    let client = create_test_client(&mock_server);

    Mock::given(method("GET"))
        .and(path("/api2/json/nodes/pve1/qemu/105/config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"memory": 2048, "cores": 2, "net0": "virtio=BC:24:11:00:00:01,bridge=vmbr0"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = client
        .invoke("get_vm_config", &args(json!({"node_name": "pve1", "vmid": "105"})))
        .await;
    assert_eq!(
        result.data(),
        Some(&OperationOutput::Raw(json!({
            "memory": 2048,
            "cores": 2,
            "net0": "virtio=BC:24:11:00:00:01,bridge=vmbr0"
        })))
    );
}

#[tokio::test]
async fn test_start_vm_returns_task_id() {
    let mock_server = MockServer::start().await;
    let client = create_test_client(&mock_server);

    Mock::given(method("POST"))
        .and(path("/api2/json/nodes/pve1/qemu/100/status/start"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": "UPID:pve1:00001234:00ABCDEF:66AA0000:qmstart:100:root@pam:"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = client
        .invoke("start_vm", &args(json!({"node_name": "pve1", "vmid": 100})))
        .await;
    assert_eq!(
        result.data(),
        Some(&OperationOutput::Raw(json!(
            "UPID:pve1:00001234:00ABCDEF:66AA0000:qmstart:100:root@pam:"
        )))
    );
}

#[tokio::test]
async fn test_start_vm_remote_failure() {
    let mock_server = MockServer::start().await;
    let client = create_test_client(&mock_server);

    Mock::given(method("POST"))
        .and(path("/api2/json/nodes/pve1/qemu/100/status/start"))
        .respond_with(ResponseTemplate::new(500).set_body_string("pve error: lock held"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = client
        .invoke("start_vm", &args(json!({"node_name": "pve1", "vmid": 100})))
        .await;
    assert!(!result.is_success());
    let failure = result.failure_details().unwrap();
    assert_eq!(failure.kind, FailureKind::Remote);
    assert_eq!(failure.status, Some(500));
    assert!(failure.message.starts_with("start_vm failed"));
    assert!(failure.message.contains("pve error: lock held"));

    let serialized = serde_json::to_value(&result).unwrap();
    assert_eq!(serialized["status"], "failure");
    assert_eq!(serialized["kind"], "remote");
    assert_eq!(serialized["status_code"], 500);
}

#[tokio::test]
async fn test_invalid_vmid_never_reaches_server() {
    let mock_server = MockServer::start().await;
    let client = create_test_client(&mock_server);

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": null})))
        .expect(0)
        .mount(&mock_server)
        .await;

    for vmid in [json!(0), json!(-1), json!("abc"), json!(1.5)] {
        let result = client
            .invoke("stop_vm", &args(json!({"node_name": "pve1", "vmid": vmid})))
            .await;
        assert_eq!(
            result.failure_details().map(|failure| failure.kind),
            Some(FailureKind::Validation),
            "vmid {} should be rejected",
            vmid
        );
    }
}

#[tokio::test]
async fn test_create_vm_merges_config() {
    let mock_server = MockServer::start().await;
    let client = create_test_client(&mock_server);

    Mock::given(method("POST"))
        .and(path("/api2/json/nodes/pve1/qemu"))
        .and(body_json(json!({
            "vmid": 120,
            "name": "app",
            "memory": 4096,
            "net0": "virtio,bridge=vmbr0",
            "scsi0": "local-lvm:32"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": "UPID:pve1:00001235:00ABCDF0:66AA0001:qmcreate:120:root@pam:"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = client
        .invoke(
            "create_vm",
            &args(json!({
                "node_name": "pve1",
                "vmid": 120,
                "name": "app",
                "memory": 4096,
                "config": {
                    "net0": "virtio,bridge=vmbr0",
                    "scsi0": "local-lvm:32",
                    "memory": 512
                }
            })),
        )
        .await;
    assert!(result.is_success(), "{:?}", result);
}

#[tokio::test]
async fn test_create_vm_full_requires_every_field() {
    let mock_server = MockServer::start().await;
    let client = create_test_client(&mock_server);

    let result = client
        .invoke(
            "create_vm_full",
            &args(json!({"node_name": "pve1", "vmid": 120, "name": "app", "memory": 4096, "cores": 2})),
        )
        .await;
    let failure = result.failure_details().unwrap();
    assert_eq!(failure.kind, FailureKind::Validation);
    assert!(failure.message.contains("sockets"));
}

#[tokio::test]
async fn test_delete_vm_sends_force_flag() {
    let mock_server = MockServer::start().await;
    let client = create_test_client(&mock_server);

    Mock::given(method("DELETE"))
        .and(path("/api2/json/nodes/pve1/qemu/100"))
        .and(body_json(json!({"force": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": "UPID:pve1:00001236:00ABCDF1:66AA0002:qmdestroy:100:root@pam:"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = client
        .invoke(
            "delete_vm",
            &args(json!({"node_name": "pve1", "vmid": 100, "force": true})),
        )
        .await;
    assert!(result.is_success(), "{:?}", result);
}

#[tokio::test]
async fn test_clone_vm_wire_names() {
    let mock_server = MockServer::start().await;
    let client = create_test_client(&mock_server);

    Mock::given(method("POST"))
        .and(path("/api2/json/nodes/pve1/qemu/100/clone"))
        .and(body_json(json!({"newid": 150, "name": "web-clone", "full": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": "UPID:clone"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = client
        .invoke(
            "clone_vm",
            &args(json!({
                "node_name": "pve1",
                "vmid": 100,
                "new_vmid": 150,
                "new_name": "web-clone",
                "full": true
            })),
        )
        .await;
    assert!(result.is_success(), "{:?}", result);
}

#[tokio::test]
async fn test_migrate_vm_online_is_numeric() {
    let mock_server = MockServer::start().await;
    let client = create_test_client(&mock_server);

    Mock::given(method("POST"))
        .and(path("/api2/json/nodes/pve1/qemu/100/migrate"))
        .and(body_json(json!({"target": "pve2", "online": 1})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": "UPID:migrate"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = client
        .invoke(
            "migrate_vm",
            &args(json!({"node_name": "pve1", "vmid": 100, "target_node": "pve2", "online": true})),
        )
        .await;
    assert!(result.is_success(), "{:?}", result);
}

#[tokio::test]
async fn test_vm_firewall_rules() {
    let mock_server = MockServer::start().await;
    let client = create_test_client(&mock_server);

    Mock::given(method("GET"))
        .and(path("/api2/json/nodes/pve1/qemu/100/firewall/rules"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"pos": 0, "type": "in", "action": "ACCEPT", "proto": "tcp", "dport": "22", "enable": 1}
            ]
        })))
        .mount(&mock_server)
        .await;

    let result = client
        .invoke(
            "get_vm_firewall_rules",
            &args(json!({"node_name": "pve1", "vmid": 100})),
        )
        .await;
    let items = result.data().and_then(OperationOutput::items).unwrap();
    let Record::FirewallRule(rule) = &items[0] else {
        panic!("expected a firewall rule");
    };
    assert_eq!(rule.direction.as_deref(), Some("in"));
    assert_eq!(rule.dport.as_deref(), Some("22"));
}

#[tokio::test]
async fn test_query_parameters_are_not_sent_for_path_arguments() {
    let mock_server = MockServer::start().await;
    let client = create_test_client(&mock_server);

    Mock::given(method("GET"))
        .and(path("/api2/json/nodes/pve1/qemu"))
        .and(query_param("node_name", "pve1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(0)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api2/json/nodes/pve1/qemu"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = client
        .invoke("get_vms", &args(json!({"node_name": "pve1"})))
        .await;
    assert!(result.is_success());
}

#[tokio::test]
async fn test_dot_segment_arguments_never_reach_the_server() {
    let mock_server = MockServer::start().await;
    let client = create_test_client(&mock_server);

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": null})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let snapshot = client
        .invoke(
            "delete_vm_snapshot",
            &args(json!({"node_name": "pve1", "vmid": 100, "snapshot_name": ".."})),
        )
        .await;
    let vms = client
        .invoke("get_vms", &args(json!({"node_name": ".."})))
        .await;

    for result in [snapshot, vms] {
        assert_eq!(
            result.failure_details().map(|failure| failure.kind),
            Some(FailureKind::Validation)
        );
    }
}
