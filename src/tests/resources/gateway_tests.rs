use crate::{
    ApiErrorKind, OsnapError, SnapshotGateway, SnapshotStatus, tests::test_gateway,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_string, header, method, path, query_param},
};

fn xml(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.to_string(), "application/xml")
}

#[tokio::test]
async fn test_list_vms() {
    let mock_server = MockServer::start().await;
    let gateway = test_gateway(&mock_server.uri()).unwrap();

    Mock::given(method("GET"))
        .and(path("/ovirt-engine/api/vms"))
        .respond_with(xml(
            r#"<vms>
                <vm href="/ovirt-engine/api/vms/a1" id="a1">
                    <name>web01</name>
                    <cluster href="/ovirt-engine/api/clusters/c1" id="c1"/>
                    <memory>4294967296</memory>
                </vm>
                <vm href="/ovirt-engine/api/vms/a2" id="a2">
                    <name>db01</name>
                    <cluster href="/ovirt-engine/api/clusters/c2" id="c2"/>
                </vm>
            </vms>"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let vms = gateway.list_vms().await.unwrap();
    assert_eq!(vms.len(), 2);
    assert_eq!(vms[0].id, "a1");
    assert_eq!(vms[0].name, "web01");
    assert_eq!(vms[0].cluster_id(), Some("c1"));
    assert_eq!(vms[1].cluster_id(), Some("c2"));
}

#[tokio::test]
async fn test_list_vms_empty() {
    let mock_server = MockServer::start().await;
    let gateway = test_gateway(&mock_server.uri()).unwrap();

    Mock::given(method("GET"))
        .and(path("/ovirt-engine/api/vms"))
        .respond_with(xml("<vms/>"))
        .mount(&mock_server)
        .await;

    assert!(gateway.list_vms().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_search_clusters_sends_name_as_query() {
    let mock_server = MockServer::start().await;
    let gateway = test_gateway(&mock_server.uri()).unwrap();

    Mock::given(method("GET"))
        .and(path("/ovirt-engine/api/clusters"))
        .and(query_param("search", "prod"))
        .respond_with(xml(
            r#"<clusters>
                <cluster id="c1"><name>prod</name></cluster>
                <cluster id="c3"><name>prod-old</name></cluster>
            </clusters>"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let clusters = gateway.search_clusters("prod").await.unwrap();
    let names: Vec<_> = clusters.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["prod", "prod-old"]);
}

#[tokio::test]
async fn test_create_snapshot_posts_disk_only_request() {
    let mock_server = MockServer::start().await;
    let gateway = test_gateway(&mock_server.uri()).unwrap();

    Mock::given(method("POST"))
        .and(path("/ovirt-engine/api/vms/a1/snapshots"))
        .and(header("content-type", "application/xml"))
        .and(body_string(
            "<snapshot><description>Nightly - created by oSnap</description>\
             <persist_memorystate>false</persist_memorystate></snapshot>",
        ))
        .respond_with(xml(
            r#"<snapshot href="/ovirt-engine/api/vms/a1/snapshots/s9" id="s9">
                <description>Nightly - created by oSnap</description>
                <persist_memorystate>false</persist_memorystate>
                <snapshot_status>locked</snapshot_status>
                <vm href="/ovirt-engine/api/vms/a1" id="a1"/>
            </snapshot>"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let snapshot = gateway
        .create_snapshot("a1", "Nightly - created by oSnap")
        .await
        .unwrap();
    assert_eq!(snapshot.id.as_deref(), Some("s9"));
    assert!(snapshot.is_owned());
    assert!(!snapshot.persist_memorystate);
    assert_eq!(snapshot.vm.map(|vm| vm.id), Some("a1".to_string()));
    assert_eq!(
        snapshot.status.map(|s| SnapshotStatus::parse(&s)),
        Some(SnapshotStatus::Pending("locked".to_string()))
    );
}

#[tokio::test]
async fn test_get_snapshot() {
    let mock_server = MockServer::start().await;
    let gateway = test_gateway(&mock_server.uri()).unwrap();

    Mock::given(method("GET"))
        .and(path("/ovirt-engine/api/vms/a1/snapshots/s9"))
        .respond_with(xml(
            r#"<snapshot id="s9">
                <description>Nightly - created by oSnap</description>
                <snapshot_status>ok</snapshot_status>
            </snapshot>"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let snapshot = gateway.get_snapshot("a1", "s9").await.unwrap();
    assert_eq!(snapshot.status(), SnapshotStatus::Ok);
}

#[tokio::test]
async fn test_list_snapshots_keeps_api_order() {
    let mock_server = MockServer::start().await;
    let gateway = test_gateway(&mock_server.uri()).unwrap();

    Mock::given(method("GET"))
        .and(path("/ovirt-engine/api/vms/a1/snapshots"))
        .respond_with(xml(
            r#"<snapshots>
                <snapshot id="active"><description>Active VM</description><snapshot_status>ok</snapshot_status></snapshot>
                <snapshot id="s1"><description>Nightly - created by oSnap</description><snapshot_status>ok</snapshot_status></snapshot>
                <snapshot id="s2"><description>Nightly - created by oSnap</description><snapshot_status>ok</snapshot_status></snapshot>
            </snapshots>"#,
        ))
        .mount(&mock_server)
        .await;

    let snapshots = gateway.list_snapshots("a1").await.unwrap();
    let ids: Vec<_> = snapshots.iter().map(|s| s.id_str()).collect();
    assert_eq!(ids, vec!["active", "s1", "s2"]);
    assert!(!snapshots[0].is_owned());
    assert!(snapshots[1].is_owned());
}

#[tokio::test]
async fn test_delete_snapshot_conflict() {
    let mock_server = MockServer::start().await;
    let gateway = test_gateway(&mock_server.uri()).unwrap();

    Mock::given(method("DELETE"))
        .and(path("/ovirt-engine/api/vms/a1/snapshots/s1"))
        .respond_with(ResponseTemplate::new(409))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = gateway.delete_snapshot("a1", "s1").await.unwrap_err();
    assert!(err.is_conflict());
    assert_eq!(err.to_string(), "409 Conflict");
}

#[tokio::test]
async fn test_delete_snapshot_success() {
    let mock_server = MockServer::start().await;
    let gateway = test_gateway(&mock_server.uri()).unwrap();

    Mock::given(method("DELETE"))
        .and(path("/ovirt-engine/api/vms/a1/snapshots/s1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    assert!(gateway.delete_snapshot("a1", "s1").await.is_ok());
}

#[tokio::test]
async fn test_unauthorized_is_classified() {
    let mock_server = MockServer::start().await;
    let gateway = test_gateway(&mock_server.uri()).unwrap();

    Mock::given(method("GET"))
        .and(path("/ovirt-engine/api/vms"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let err = gateway.list_vms().await.unwrap_err();
    assert_eq!(err.api_kind(), Some(ApiErrorKind::Unauthorized));
    assert!(matches!(err, OsnapError::Api { status: 401, .. }));
}
