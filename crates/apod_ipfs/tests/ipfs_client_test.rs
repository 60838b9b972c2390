//! Tests for the content-store client against a local stub node.

use apod_core::UploadOutcome;
use apod_error::ContentStoreErrorKind;
use apod_interface::ContentStore;
use apod_ipfs::{ADD_PATH, AddOptions, IpfsClient, PEERS_PATH};
use apod_test_utils::{StubResponse, StubServer};
use std::io::Write;

const PEERS_REPLY: &str = r#"{"Peers":[
    {"Addr":"/ip4/10.0.0.1/tcp/4001","Peer":"QmPeerOne","Latency":"","Muxer":"","Streams":null},
    {"Addr":"/ip4/10.0.0.2/udp/4001/quic","Peer":"QmPeerTwo"}
]}"#;

const ADD_REPLY: &str = r#"{"Name":"galaxy.jpg","Hash":"QmGalaxy","Size":"12"}"#;

#[test]
fn test_construction_probes_peers_once() {
    let node = StubServer::builder()
        .route("POST", PEERS_PATH, StubResponse::json(200, PEERS_REPLY))
        .start();

    let client = IpfsClient::new(Some(node.base_url()));

    assert_eq!(node.hits(PEERS_PATH), 1);
    assert_eq!(client.peers().len(), 2);
    assert_eq!(client.peers()[0].peer_id(), "QmPeerOne");
    assert_eq!(client.peers()[1].address(), "/ip4/10.0.0.2/udp/4001/quic");
}

#[test]
fn test_null_peer_list_is_empty() {
    let node = StubServer::builder()
        .route("POST", PEERS_PATH, StubResponse::json(200, r#"{"Peers":null}"#))
        .start();

    let mut client = IpfsClient::new(Some(node.base_url()));
    assert!(client.list_peers().is_empty());
}

#[test]
fn test_peer_failure_resets_cache() {
    let node = StubServer::builder()
        .route("POST", PEERS_PATH, StubResponse::json(500, "boom"))
        .start();

    let mut client = IpfsClient::new(Some(node.base_url()));
    assert!(client.peers().is_empty());
    assert!(client.list_peers().is_empty());
    assert_eq!(node.hits(PEERS_PATH), 2);
}

#[test]
fn test_disabled_client_never_calls_out() {
    let mut client = IpfsClient::new(None);
    assert!(!client.is_enabled());
    assert!(client.list_peers().is_empty());
    assert_eq!(client.upload_from_url("http://127.0.0.1:1/x.jpg"), UploadOutcome::Failed);

    let empty = IpfsClient::new(Some("   ".to_string()));
    assert!(!empty.is_enabled());

    let err = client.try_upload_from_url("http://127.0.0.1:1/x.jpg").unwrap_err();
    assert_eq!(err.kind, ContentStoreErrorKind::Disabled);
}

#[test]
fn test_upload_from_url_sends_multipart_file() {
    let source = StubServer::builder()
        .route("GET", "/image/galaxy.jpg", StubResponse::bytes(200, b"galaxy-bytes"))
        .start();
    let node = StubServer::builder()
        .route("POST", PEERS_PATH, StubResponse::json(200, PEERS_REPLY))
        .route("POST", ADD_PATH, StubResponse::json(200, ADD_REPLY))
        .start();

    let client = IpfsClient::new(Some(format!("{}/", node.base_url())));
    let outcome = client.upload_from_url(&source.url("/image/galaxy.jpg"));

    let result = outcome.stored().expect("upload should succeed");
    assert_eq!(result.content_hash(), "QmGalaxy");
    assert_eq!(result.reported_name(), "galaxy.jpg");
    assert_eq!(result.reported_size(), &12);

    let add = node
        .requests()
        .into_iter()
        .find(|r| r.path() == ADD_PATH)
        .expect("add endpoint was called");
    assert!(add.query().contains("pin=true"));
    assert!(add.query().contains("cid-version=0"));
    assert!(
        add.header("content-type")
            .is_some_and(|ct| ct.starts_with("multipart/form-data"))
    );
    let body = add.body_text();
    assert!(body.contains(r#"name="file""#));
    assert!(body.contains(r#"filename="galaxy.jpg""#));
    assert!(body.contains("application/octet-stream"));
    assert!(body.contains("galaxy-bytes"));
}

#[test]
fn test_custom_add_options_are_sent() {
    let source = StubServer::builder()
        .route("GET", "/a.jpg", StubResponse::bytes(200, b"a"))
        .start();
    let node = StubServer::builder()
        .route("POST", PEERS_PATH, StubResponse::json(200, PEERS_REPLY))
        .route("POST", ADD_PATH, StubResponse::json(200, ADD_REPLY))
        .start();

    let options = AddOptions::default().with_pin(false).with_cid_version(1);
    let client = IpfsClient::with_add_options(Some(node.base_url()), options);
    assert!(client.upload_from_url(&source.url("/a.jpg")).is_stored());

    let add = node
        .requests()
        .into_iter()
        .find(|r| r.path() == ADD_PATH)
        .unwrap();
    assert!(add.query().contains("pin=false"));
    assert!(add.query().contains("cid-version=1"));
}

#[test]
fn test_failed_source_download_skips_upload() {
    let source = StubServer::builder()
        .route("GET", "/missing.jpg", StubResponse::empty(404))
        .start();
    let node = StubServer::builder()
        .route("POST", PEERS_PATH, StubResponse::json(200, PEERS_REPLY))
        .route("POST", ADD_PATH, StubResponse::json(200, ADD_REPLY))
        .start();

    let client = IpfsClient::new(Some(node.base_url()));
    let err = client
        .try_upload_from_url(&source.url("/missing.jpg"))
        .unwrap_err();

    assert!(matches!(err.kind, ContentStoreErrorKind::Download(_)));
    assert_eq!(node.hits(ADD_PATH), 0);
    assert_eq!(
        client.upload_from_url(&source.url("/missing.jpg")),
        UploadOutcome::Failed
    );
}

#[test]
fn test_store_error_status_is_failed() {
    let source = StubServer::builder()
        .route("GET", "/a.jpg", StubResponse::bytes(200, b"a"))
        .start();
    let node = StubServer::builder()
        .route("POST", PEERS_PATH, StubResponse::json(200, PEERS_REPLY))
        .route("POST", ADD_PATH, StubResponse::json(500, r#"{"Message":"repo locked"}"#))
        .start();

    let client = IpfsClient::new(Some(node.base_url()));
    let err = client.try_upload_from_url(&source.url("/a.jpg")).unwrap_err();
    assert!(matches!(err.kind, ContentStoreErrorKind::Status { status: 500, .. }));
    assert!(!client.upload_from_url(&source.url("/a.jpg")).is_stored());
}

#[test]
fn test_upload_local_file() {
    let node = StubServer::builder()
        .route("POST", PEERS_PATH, StubResponse::json(200, PEERS_REPLY))
        .route(
            "POST",
            ADD_PATH,
            StubResponse::json(200, r#"{"Name":"NasaAPOD.html","Hash":"QmPage","Size":"20"}"#),
        )
        .start();

    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("NasaAPOD.html");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(b"<HTML></HTML>").unwrap();

    let client = IpfsClient::new(Some(node.base_url()));
    let result = client.upload_local_file(&path).stored().unwrap();
    assert_eq!(result.content_hash(), "QmPage");

    let add = node
        .requests()
        .into_iter()
        .find(|r| r.path() == ADD_PATH)
        .unwrap();
    assert!(add.body_text().contains(r#"filename="NasaAPOD.html""#));
    assert!(add.body_text().contains("<HTML></HTML>"));
}

#[test]
fn test_missing_local_file_is_failed() {
    let node = StubServer::builder()
        .route("POST", PEERS_PATH, StubResponse::json(200, PEERS_REPLY))
        .start();
    let dir = tempfile::TempDir::new().unwrap();

    let client = IpfsClient::new(Some(node.base_url()));
    let err = client
        .try_upload_local_file(&dir.path().join("absent.html"))
        .unwrap_err();
    assert!(matches!(err.kind, ContentStoreErrorKind::FileRead(_)));
    assert_eq!(node.hits(ADD_PATH), 0);
}

#[test]
fn test_wrapped_upload_links_the_file_not_the_directory() {
    let source = StubServer::builder()
        .route("GET", "/image/nebula.jpg", StubResponse::bytes(200, b"nebula"))
        .start();
    let node = StubServer::builder()
        .route("POST", PEERS_PATH, StubResponse::json(200, PEERS_REPLY))
        .route(
            "POST",
            ADD_PATH,
            StubResponse::json(
                200,
                "{\"Name\":\"nebula.jpg\",\"Hash\":\"QmFile\",\"Size\":\"6\"}\n{\"Name\":\"\",\"Hash\":\"QmWrapDir\",\"Size\":\"60\"}\n",
            ),
        )
        .start();

    let options: AddOptions = serde_json::from_str(r#"{"wrap-with-directory": true}"#).unwrap();
    let client = IpfsClient::with_add_options(Some(node.base_url()), options);

    let stored = client
        .upload_from_url(&source.url("/image/nebula.jpg"))
        .stored()
        .unwrap();
    assert_eq!(stored.content_hash(), "QmFile");
    assert_eq!(stored.reported_name(), "nebula.jpg");

    let add = node
        .requests()
        .into_iter()
        .find(|r| r.path() == ADD_PATH)
        .unwrap();
    assert!(add.query().contains("wrap-with-directory=true"));
}
