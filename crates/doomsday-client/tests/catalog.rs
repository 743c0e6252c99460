use doomsday_client::{IpswCatalog, IpswClient, RateLimitConfig};
use doomsday_core::{Catalog, Device, DoomsdayError};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> IpswClient {
    IpswClient::builder()
        .base_url(server.uri())
        .rate_limit(RateLimitConfig::new().requests_per_second(1000).burst_size(100))
        .build()
        .unwrap()
}

fn firmware(identifier: &str, version: &str, build: &str, signed: bool) -> serde_json::Value {
    json!({
        "identifier": identifier,
        "version": version,
        "buildid": build,
        "url": format!("http://updates.example.com/{identifier}_{version}_{build}_Restore.ipsw"),
        "filesize": 1024,
        "releasedate": "2019-09-30T17:05:38Z",
        "uploaddate": null,
        "signed": signed
    })
}

#[tokio::test]
async fn lists_devices() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "iPhone 11 Pro", "identifier": "iPhone12,3", "boardconfig": "d421ap"},
            {"name": "iPad Air", "identifier": "iPad4,1"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let devices = client_for(&server).devices().list().await.unwrap();
    assert_eq!(devices.len(), 2);
    assert_eq!(devices[0].identifier, "iPhone12,3");
    assert_eq!(devices[1].name, "iPad Air");
}

#[tokio::test]
async fn device_information_requests_ipsw_type() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/device/iPhone12,3"))
        .and(query_param("type", "ipsw"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "iPhone 11 Pro",
            "identifier": "iPhone12,3",
            "firmwares": [firmware("iPhone12,3", "13.1.2", "17A860", false)]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let info = client_for(&server)
        .devices()
        .information("iPhone12,3")
        .await
        .unwrap();
    assert_eq!(info.firmwares.len(), 1);
    assert_eq!(info.firmwares[0].build_id, "17A860");
}

#[tokio::test]
async fn device_list_failure_is_catalog_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/devices"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let catalog = IpswCatalog::new(client_for(&server));
    let err = catalog.list_devices().await.unwrap_err();
    assert!(matches!(err, DoomsdayError::CatalogUnavailable(_)));
    assert!(err.is_fatal());
    assert!(err.to_string().contains("maintenance"));
}

#[tokio::test]
async fn firmware_lookup_failure_names_device() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/device/iPod1,1"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let catalog = IpswCatalog::new(client_for(&server));
    let err = catalog
        .list_firmwares(&Device::new("iPod1,1"))
        .await
        .unwrap_err();
    match err {
        DoomsdayError::DeviceLookupFailed { device, reason } => {
            assert_eq!(device, "iPod1,1");
            assert!(reason.contains("not found"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn malformed_json_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>nope</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).devices().list().await.unwrap_err();
    assert!(matches!(err, DoomsdayError::Json(_)));
}

#[tokio::test]
async fn rate_limit_response_is_mapped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/devices"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "7"))
        .mount(&server)
        .await;

    let err = client_for(&server).devices().list().await.unwrap_err();
    assert!(matches!(
        err,
        DoomsdayError::RateLimited {
            retry_after: Some(7)
        }
    ));
}

#[tokio::test]
async fn signed_only_filters_firmwares() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/device/iPhone12,3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "iPhone 11 Pro",
            "identifier": "iPhone12,3",
            "firmwares": [
                firmware("iPhone12,3", "17.0", "21A329", true),
                firmware("iPhone12,3", "13.1.2", "17A860", false)
            ]
        })))
        .mount(&server)
        .await;

    let device = Device::new("iPhone12,3");

    let all = IpswCatalog::new(client_for(&server))
        .list_firmwares(&device)
        .await
        .unwrap();
    assert_eq!(all.len(), 2);

    let signed = IpswCatalog::new(client_for(&server))
        .signed_only(true)
        .list_firmwares(&device)
        .await
        .unwrap();
    assert_eq!(signed.len(), 1);
    assert_eq!(signed[0].build_identifier, "21A329");
}
