use crate::{
    PollPolicy, RetentionPolicy, RetryPolicy, RunMode, RunReport, RunSettings, VmFilter,
    snapshot::application::service::run_service::RunService,
    tests::{RecordingSleeper, test_gateway},
};
use std::time::Duration;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

fn xml(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "application/xml")
}

fn settings(keep: usize) -> RunSettings {
    RunSettings {
        filter: VmFilter::default(),
        description: "Nightly".to_string(),
        retention: RetentionPolicy::new(keep),
        poll: PollPolicy::default(),
        retry: RetryPolicy::default(),
    }
}

fn snapshot_xml(id: &str, status: &str) -> String {
    format!(
        r#"<snapshot id="{id}"><description>Nightly - created by oSnap</description><snapshot_status>{status}</snapshot_status></snapshot>"#
    )
}

async fn mount_inventory(server: &MockServer, vm_ids: &[&str]) {
    let vms: String = vm_ids
        .iter()
        .map(|id| format!(r#"<vm id="{id}"><name>web{id}</name><cluster id="c1"/></vm>"#))
        .collect();
    Mock::given(method("GET"))
        .and(path("/ovirt-engine/api/vms"))
        .respond_with(xml(format!("<vms>{vms}</vms>")))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_owned_snapshots(server: &MockServer, vm_id: &str, count: usize) {
    let snapshots: String = (1..=count)
        .map(|i| snapshot_xml(&format!("{vm_id}-s{i}"), "ok"))
        .collect();
    Mock::given(method("GET"))
        .and(path(format!("/ovirt-engine/api/vms/{vm_id}/snapshots")))
        .respond_with(xml(format!("<snapshots>{snapshots}</snapshots>")))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_run_purges_oldest_snapshot_of_each_vm() {
    let mock_server = MockServer::start().await;
    let vm_ids = ["1", "2", "3"];
    mount_inventory(&mock_server, &vm_ids).await;

    for vm_id in vm_ids {
        Mock::given(method("POST"))
            .and(path(format!("/ovirt-engine/api/vms/{vm_id}/snapshots")))
            .respond_with(xml(snapshot_xml(&format!("{vm_id}-new"), "locked")))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path(format!("/ovirt-engine/api/vms/{vm_id}/snapshots/{vm_id}-new")))
            .respond_with(xml(snapshot_xml(&format!("{vm_id}-new"), "ok")))
            .expect(1)
            .mount(&mock_server)
            .await;
        mount_owned_snapshots(&mock_server, vm_id, 4).await;
        Mock::given(method("DELETE"))
            .and(path(format!("/ovirt-engine/api/vms/{vm_id}/snapshots/{vm_id}-s1")))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    let gateway = test_gateway(&mock_server.uri()).unwrap();
    let sleeper = RecordingSleeper::default();
    let settings = settings(2);

    let report = RunService::new(&gateway, &sleeper, &settings)
        .execute(RunMode::Snapshot)
        .await
        .unwrap();

    assert_eq!(
        report,
        RunReport {
            selected: 3,
            succeeded: 3
        }
    );
    assert!(sleeper.slept().is_empty());
}

#[tokio::test]
async fn test_conflicting_delete_is_retried() {
    let mock_server = MockServer::start().await;
    mount_inventory(&mock_server, &["1"]).await;
    mount_owned_snapshots(&mock_server, "1", 3).await;

    // mounted first, so it answers the first two deletes
    Mock::given(method("DELETE"))
        .and(path("/ovirt-engine/api/vms/1/snapshots/1-s1"))
        .respond_with(ResponseTemplate::new(409))
        .up_to_n_times(2)
        .expect(2)
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/ovirt-engine/api/vms/1/snapshots/1-s1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let gateway = test_gateway(&mock_server.uri()).unwrap();
    let sleeper = RecordingSleeper::default();
    let settings = settings(1);

    let report = RunService::new(&gateway, &sleeper, &settings)
        .execute(RunMode::PurgeOnly)
        .await
        .unwrap();

    assert!(report.is_success());
    assert_eq!(sleeper.slept(), vec![Duration::from_secs(60); 2]);
}

#[tokio::test]
async fn test_failed_snapshot_is_not_purged() {
    let mock_server = MockServer::start().await;
    mount_inventory(&mock_server, &["1"]).await;

    Mock::given(method("POST"))
        .and(path("/ovirt-engine/api/vms/1/snapshots"))
        .respond_with(xml(snapshot_xml("1-new", "locked")))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/ovirt-engine/api/vms/1/snapshots/1-new"))
        .respond_with(xml(snapshot_xml("1-new", "failed")))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/ovirt-engine/api/vms/1/snapshots"))
        .respond_with(xml("<snapshots/>".to_string()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let gateway = test_gateway(&mock_server.uri()).unwrap();
    let sleeper = RecordingSleeper::default();
    let settings = settings(0);

    let report = RunService::new(&gateway, &sleeper, &settings)
        .execute(RunMode::Snapshot)
        .await
        .unwrap();

    assert_eq!(
        report,
        RunReport {
            selected: 1,
            succeeded: 0
        }
    );
}
