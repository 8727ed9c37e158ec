//! Integration tests for the traversal
//!
//! These tests use wiremock to serve index and detail pages and run the full
//! fetch, collect, extract cycle end-to-end.

use rental_harvest::config::{Config, SourceConfig};
use rental_harvest::crawler::{Coordinator, Termination};
use rental_harvest::model::{CharacteristicValue, ListingType, RentPeriod};
use rental_harvest::output::{JsonFileSink, ResultSink, SinkOutcome};
use rental_harvest::{Announcement, RequestError, TraversalState};
use std::time::{Duration, Instant};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const INDEX_PATH: &str = "/en/properties~for-rent";

/// Creates a test configuration pointing at the mock server
fn create_test_config(base_url: &str, target_count: usize) -> Config {
    let mut config = Config::default();
    config.source = SourceConfig {
        base_url: format!("{}{}", base_url, INDEX_PATH),
        origin: base_url.to_string(),
        query: vec![("view".to_string(), "Thumbnail".to_string())],
        page_param: "page".to_string(),
    };
    config.http.user_agent = "HarvestTest/1.0".to_string();
    config.traversal.target_count = target_count;
    config.traversal.page_delay_ms = 0;
    config
}

/// Index page listing the given detail ids
fn index_page(ids: &[u32]) -> String {
    let cards: String = ids
        .iter()
        .map(|id| {
            format!(
                r#"<div class="property-thumbnail-item">
                    <div class="property-thumbnail-feature">
                        <a class="property-thumbnail-summary-link" href="/en/listing/{}">Listing {}</a>
                    </div>
                </div>"#,
                id, id
            )
        })
        .collect();

    format!(
        r#"<html><head><title>Rentals</title></head><body><div class="results">{}</div></body></html>"#,
        cards
    )
}

/// Detail page for listing `id`
fn detail_page(id: u32) -> String {
    format!(
        r#"<html>
<head><meta itemprop="price" content="{price}.00"></head>
<body>
  <span id="ListingDisplayId">{id}</span>
  <span data-id="PageTitle">Apartment for rent</span>
  <h2 class="pt-1">{id} Rue Notre-Dame, Montréal, Québec</h2>
  <div class="price-container">${price}/month</div>
  <div itemprop="description">Listing number {id}</div>
  <div class="col-lg-3 col-sm-6 cac">{id} bedrooms</div>
  <div class="col-lg-3 col-sm-6 sdb">1 bathroom</div>
  <div class="carac-title">Floor Area</div><div class="carac-value">1,0{id}0 sq. ft.</div>
  <div class="carac-title">Parking Spaces</div><div class="carac-value">{id}</div>
  <h1 class="broker-info__broker-title">Agent {id}</h1>
  <a itemprop="telephone">514-555-010{id}</a>
  <span id="PropertyLat">45.50{id}</span>
  <span id="PropertyLng">-73.56{id}</span>
  <script>window.MosaicPhotoUrls = ["https://img.example.com/{id}/1.jpg","https://img.example.com/{id}/2.jpg"];</script>
</body>
</html>"#,
        id = id,
        price = 1000 + id * 100
    )
}

async fn mount_index(server: &MockServer, page: u32, body: String, expected: u64) {
    Mock::given(method("GET"))
        .and(path(INDEX_PATH))
        .and(query_param("view", "Thumbnail"))
        .and(query_param("page", page.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(expected)
        .mount(server)
        .await;
}

async fn mount_detail(server: &MockServer, id: u32, expected: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/en/listing/{}", id)))
        .respond_with(ResponseTemplate::new(200).set_body_string(detail_page(id)))
        .expect(expected)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_stops_mid_page_when_target_reached() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_index(&mock_server, 1, index_page(&[1, 2, 3]), 1).await;
    mount_index(&mock_server, 2, index_page(&[4]), 0).await;
    mount_detail(&mock_server, 1, 1).await;
    mount_detail(&mock_server, 2, 1).await;
    mount_detail(&mock_server, 3, 0).await;

    let config = create_test_config(&base_url, 2);
    let mut coordinator = Coordinator::new(&config).expect("Failed to create coordinator");
    let report = coordinator.run().await.expect("Traversal failed");

    assert!(matches!(report.termination, Termination::TargetReached));
    assert_eq!(report.pages_visited, 1);
    assert_eq!(report.announcements.len(), 2);
    assert_eq!(coordinator.state(), TraversalState::Done);

    let links: Vec<&str> = report.announcements.iter().map(|a| a.link.as_str()).collect();
    assert_eq!(
        links,
        vec![
            format!("{}/en/listing/1", base_url),
            format!("{}/en/listing/2", base_url),
        ]
    );
}

#[tokio::test]
async fn test_index_failure_keeps_collected_announcements() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_index(&mock_server, 1, index_page(&[1, 2, 3, 4, 5]), 1).await;
    for id in 1..=5 {
        mount_detail(&mock_server, id, 1).await;
    }

    Mock::given(method("GET"))
        .and(path(INDEX_PATH))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    mount_index(&mock_server, 3, index_page(&[6]), 0).await;

    let config = create_test_config(&base_url, 10);
    let mut coordinator = Coordinator::new(&config).expect("Failed to create coordinator");
    let report = coordinator.run().await.expect("Traversal should not raise");

    assert_eq!(report.announcements.len(), 5);
    assert_eq!(report.pages_visited, 2);
    assert_eq!(coordinator.state(), TraversalState::Aborted);

    match &report.termination {
        Termination::Aborted { page, error } => {
            assert_eq!(*page, 2);
            assert!(matches!(error, RequestError::Status { status: 500, .. }));
            assert!(error.url().contains("page=2"));
        }
        other => panic!("expected abort, got {:?}", other),
    }
}

#[tokio::test]
async fn test_detail_failure_aborts_run() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_index(&mock_server, 1, index_page(&[1, 2, 3]), 1).await;
    mount_detail(&mock_server, 1, 1).await;
    Mock::given(method("GET"))
        .and(path("/en/listing/2"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_detail(&mock_server, 3, 0).await;
    mount_index(&mock_server, 2, index_page(&[4]), 0).await;

    let config = create_test_config(&base_url, 10);
    let mut coordinator = Coordinator::new(&config).expect("Failed to create coordinator");
    let report = coordinator.run().await.expect("Traversal should not raise");

    assert_eq!(report.announcements.len(), 1);
    assert_eq!(report.announcements[0].reference.as_deref(), Some("1"));
    assert!(matches!(
        report.termination,
        Termination::Aborted {
            page: 1,
            error: RequestError::Status { status: 404, .. }
        }
    ));
}

#[tokio::test]
async fn test_empty_index_page_ends_run() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_index(&mock_server, 1, index_page(&[1, 2]), 1).await;
    mount_index(&mock_server, 2, index_page(&[]), 1).await;
    mount_index(&mock_server, 3, index_page(&[3]), 0).await;
    mount_detail(&mock_server, 1, 1).await;
    mount_detail(&mock_server, 2, 1).await;

    let config = create_test_config(&base_url, 60);
    let mut coordinator = Coordinator::new(&config).expect("Failed to create coordinator");
    let report = coordinator.run().await.expect("Traversal failed");

    assert_eq!(report.announcements.len(), 2);
    assert_eq!(report.pages_visited, 2);
    assert!(matches!(
        report.termination,
        Termination::SourceExhausted { page: 2 }
    ));
    assert_eq!(coordinator.state(), TraversalState::Done);
}

#[tokio::test]
async fn test_walks_pages_in_order_until_target() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_index(&mock_server, 1, index_page(&[1, 2]), 1).await;
    mount_index(&mock_server, 2, index_page(&[3, 4]), 1).await;
    mount_index(&mock_server, 3, index_page(&[5, 6]), 1).await;
    for id in 1..=5 {
        mount_detail(&mock_server, id, 1).await;
    }
    mount_detail(&mock_server, 6, 0).await;

    let config = create_test_config(&base_url, 5);
    let mut coordinator = Coordinator::new(&config).expect("Failed to create coordinator");
    let report = coordinator.run().await.expect("Traversal failed");

    let refs: Vec<Option<&str>> = report
        .announcements
        .iter()
        .map(|a| a.reference.as_deref())
        .collect();
    assert_eq!(
        refs,
        vec![Some("1"), Some("2"), Some("3"), Some("4"), Some("5")]
    );
    assert_eq!(report.pages_visited, 3);
}

#[tokio::test]
async fn test_extracts_all_fields_from_detail_page() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_index(&mock_server, 1, index_page(&[7]), 1).await;
    mount_detail(&mock_server, 7, 1).await;

    let config = create_test_config(&base_url, 1);
    let mut coordinator = Coordinator::new(&config).expect("Failed to create coordinator");
    let report = coordinator.run().await.expect("Traversal failed");

    let a: &Announcement = &report.announcements[0];
    assert_eq!(a.link, format!("{}/en/listing/7", base_url));
    assert_eq!(a.reference.as_deref(), Some("7"));
    assert_eq!(a.rent_period, Some(RentPeriod::Month));
    assert_eq!(a.listing_type, Some(ListingType::Rent));
    assert_eq!(a.title.as_deref(), Some("Apartment for rent"));
    assert_eq!(a.address.as_deref(), Some("7 Rue Notre-Dame, Montréal, Québec"));
    assert_eq!(a.region.as_deref(), Some("Montréal, Québec"));
    assert_eq!(a.description.as_deref(), Some("Listing number 7"));
    assert_eq!(
        a.images,
        vec!["https://img.example.com/7/1.jpg", "https://img.example.com/7/2.jpg"]
    );
    assert_eq!(a.price.as_deref(), Some("1700.00"));
    assert_eq!(a.bedrooms, Some(7));
    assert_eq!(a.bathrooms, Some(1));
    assert_eq!(a.floor_area, Some(1070));
    assert_eq!(a.parking_spaces, Some(CharacteristicValue::Integer(7)));
    assert_eq!(a.additional_features, None);
    assert_eq!(a.realtor.as_deref(), Some("Agent 7"));
    assert_eq!(a.phone.as_deref(), Some("514-555-0107"));
    assert_eq!(a.latitude.as_deref(), Some("45.507"));
    assert_eq!(a.longitude.as_deref(), Some("-73.567"));
}

#[tokio::test]
async fn test_requests_carry_configured_user_agent() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path(INDEX_PATH))
        .and(header("user-agent", "HarvestTest/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(index_page(&[1])))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/en/listing/1"))
        .and(header("user-agent", "HarvestTest/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(detail_page(1)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&base_url, 1);
    let mut coordinator = Coordinator::new(&config).expect("Failed to create coordinator");
    let report = coordinator.run().await.expect("Traversal failed");

    assert_eq!(report.announcements.len(), 1);
}

#[tokio::test]
async fn test_politeness_delay_between_index_pages() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_index(&mock_server, 1, index_page(&[1]), 1).await;
    mount_index(&mock_server, 2, index_page(&[2]), 1).await;
    mount_index(&mock_server, 3, index_page(&[]), 1).await;
    mount_detail(&mock_server, 1, 1).await;
    mount_detail(&mock_server, 2, 1).await;

    let mut config = create_test_config(&base_url, 10);
    config.traversal.page_delay_ms = 60;

    let started = Instant::now();
    let mut coordinator = Coordinator::new(&config).expect("Failed to create coordinator");
    let report = coordinator.run().await.expect("Traversal failed");

    // Two pauses: after page 1 and after page 2
    assert!(started.elapsed() >= Duration::from_millis(120));
    assert_eq!(report.announcements.len(), 2);
    assert_eq!(report.pauses, 2);
    assert!(report.waited >= Duration::from_millis(120));
}

#[tokio::test]
async fn test_unreachable_source_returns_empty_report() {
    // Bind and drop a listener so nothing is serving on the port
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let base_url = format!("http://127.0.0.1:{}", port);

    let config = create_test_config(&base_url, 5);
    let mut coordinator = Coordinator::new(&config).expect("Failed to create coordinator");
    let report = coordinator.run().await.expect("Traversal should not raise");

    assert!(report.announcements.is_empty());
    assert!(matches!(
        report.termination,
        Termination::Aborted {
            page: 1,
            error: RequestError::Transport { .. }
        }
    ));
}

#[tokio::test]
async fn test_report_written_as_json_array() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_index(&mock_server, 1, index_page(&[1, 2]), 1).await;
    mount_detail(&mock_server, 1, 1).await;
    mount_detail(&mock_server, 2, 1).await;

    let config = create_test_config(&base_url, 2);
    let mut coordinator = Coordinator::new(&config).expect("Failed to create coordinator");
    let report = coordinator.run().await.expect("Traversal failed");

    let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let json_path = dir.path().join("announcements.json");
    let sink = JsonFileSink::new(&json_path, 2);

    let outcome = sink.write(&report.announcements).expect("Write failed");
    assert_eq!(
        outcome,
        SinkOutcome::Written {
            path: json_path.clone(),
            count: 2
        }
    );

    let content = std::fs::read_to_string(&json_path).expect("Failed to read output");
    let value: serde_json::Value = serde_json::from_str(&content).expect("Invalid JSON");
    let array = value.as_array().expect("Expected a JSON array");

    assert_eq!(array.len(), 2);
    assert_eq!(array[0]["ref"], "1");
    assert_eq!(array[0]["type"], "rent");
    assert_eq!(array[1]["parking_spaces"], 2);
    assert_eq!(array[1]["additional_features"], serde_json::Value::Null);
}
