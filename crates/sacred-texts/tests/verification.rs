//! Resource verifier integration tests against mock HTTP servers.

use chrono::{Duration, Utc};
use sacred_texts::*;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ─────────────────────── helpers ───────────────────────

async fn mount_head(server: &MockServer, route: &str, status: u16, expected_calls: u64) {
    Mock::given(method("HEAD"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status))
        .expect(expected_calls)
        .mount(server)
        .await;
}

fn catalog_of(resource_urls: &[String], content_urls: &[String]) -> ResourceCatalog {
    let resources = resource_urls
        .iter()
        .map(|url| Resource {
            title: url.clone(),
            url: url.clone(),
            category: None,
            description: None,
        })
        .collect();
    let texts = vec![SacredText {
        title: "Test Text".to_string(),
        tradition: "Test".to_string(),
        content: content_urls
            .iter()
            .map(|url| ContentItem {
                title: url.clone(),
                url: url.clone(),
                format: None,
            })
            .collect(),
    }];
    ResourceCatalog::new(resources, texts)
}

fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}/gone")
}

// ─────────────────────── single resource ───────────────────────

#[tokio::test]
async fn ok_head_is_verified_for_a_week() {
    let server = MockServer::start().await;
    mount_head(&server, "/ok", 200, 1).await;

    let before = Utc::now();
    let status = ResourceVerifier::new(ResourceCatalog::default())
        .verify_resource(&format!("{}/ok", server.uri()))
        .await;
    let after = Utc::now();

    assert_eq!(status.status, VerificationState::Verified);
    assert_eq!(status.notes, "Resource available");
    assert_eq!(status.checked_by, "system");
    assert!(status.last_checked >= before && status.last_checked <= after);
    assert_eq!(status.next_check - status.last_checked, Duration::days(7));
}

#[tokio::test]
async fn not_found_is_failed_for_a_day() {
    let server = MockServer::start().await;
    mount_head(&server, "/missing", 404, 1).await;

    let status = ResourceVerifier::new(ResourceCatalog::default())
        .verify_resource(&format!("{}/missing", server.uri()))
        .await;

    assert_eq!(status.status, VerificationState::Failed);
    assert_eq!(status.notes, "Failed with status: 404");
    assert_eq!(status.next_check - status.last_checked, Duration::days(1));
}

#[tokio::test]
async fn server_error_is_failed() {
    let server = MockServer::start().await;
    mount_head(&server, "/broken", 503, 1).await;

    let status = ResourceVerifier::default()
        .verify_resource(&format!("{}/broken", server.uri()))
        .await;
    assert_eq!(status.notes, "Failed with status: 503");
}

#[tokio::test]
async fn redirect_to_live_page_is_verified() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/old"))
        .respond_with(
            ResponseTemplate::new(301).insert_header("Location", format!("{}/new", server.uri())),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_head(&server, "/new", 200, 1).await;

    let status = ResourceVerifier::default()
        .verify_resource(&format!("{}/old", server.uri()))
        .await;
    assert_eq!(status.status, VerificationState::Verified);
}

#[tokio::test]
async fn connection_refused_is_recorded_not_raised() {
    let status = ResourceVerifier::default()
        .verify_resource(&closed_port_url())
        .await;

    assert_eq!(status.status, VerificationState::Failed);
    assert!(status.notes.starts_with("Error: "), "{}", status.notes);
    assert!(status.notes.len() > "Error: ".len());
    assert_eq!(status.next_check - status.last_checked, Duration::days(1));
}

#[tokio::test]
async fn unparseable_url_is_recorded_not_raised() {
    let status = ResourceVerifier::default().verify_resource("not a url").await;
    assert_eq!(status.status, VerificationState::Failed);
    assert!(status.notes.starts_with("Error: "));
}

// ─────────────────────── batches ───────────────────────

#[tokio::test]
async fn batch_checks_every_url_once() {
    let server = MockServer::start().await;
    mount_head(&server, "/a", 200, 1).await;
    mount_head(&server, "/b", 404, 1).await;
    mount_head(&server, "/c", 200, 1).await;
    mount_head(&server, "/d", 500, 1).await;

    let url = |p: &str| format!("{}{p}", server.uri());
    let catalog = catalog_of(&[url("/a"), url("/b")], &[url("/c"), url("/d")]);

    let verifier = ResourceVerifier::new(catalog);
    let results = verifier.verify_all_resources().await;

    assert_eq!(results.len(), 4);
    assert!(results[&url("/a")].is_verified());
    assert_eq!(results[&url("/b")].notes, "Failed with status: 404");
    assert!(results[&url("/c")].is_verified());
    assert_eq!(results[&url("/d")].status, VerificationState::Failed);

    let summary = VerificationSummary::from_results(&results);
    assert_eq!(summary.verified, 2);
    assert_eq!(summary.failed, 2);
}

#[tokio::test]
async fn one_dead_host_does_not_stop_the_batch() {
    let server = MockServer::start().await;
    mount_head(&server, "/after", 200, 1).await;

    let after = format!("{}/after", server.uri());
    let dead = closed_port_url();
    let catalog = catalog_of(&[dead.clone()], &[after.clone()]);

    let results = ResourceVerifier::default().verify_catalog(&catalog).await;
    assert_eq!(results.len(), 2);
    assert_eq!(results[&dead].status, VerificationState::Failed);
    assert!(results[&after].is_verified());
}

#[tokio::test]
async fn duplicate_url_keeps_the_last_check() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/dup"))
        .respond_with(ResponseTemplate::new(404))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    mount_head(&server, "/dup", 200, 1).await;

    let dup = format!("{}/dup", server.uri());
    let catalog = catalog_of(&[dup.clone()], &[dup.clone()]);

    let results = ResourceVerifier::new(catalog).verify_all_resources().await;
    assert_eq!(results.len(), 1);
    assert_eq!(results[&dup].status, VerificationState::Verified);
    assert_eq!(results[&dup].notes, "Resource available");
}

#[tokio::test]
async fn resources_are_checked_before_text_content() {
    let server = MockServer::start().await;
    mount_head(&server, "/zz-resource", 200, 1).await;
    mount_head(&server, "/aa-content", 200, 1).await;
    Mock::given(method("HEAD"))
        .and(path("/shared"))
        .respond_with(ResponseTemplate::new(404))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    mount_head(&server, "/shared", 200, 1).await;

    let url = |p: &str| format!("{}{p}", server.uri());
    let catalog = catalog_of(
        &[url("/zz-resource"), url("/shared")],
        &[url("/aa-content"), url("/shared")],
    );

    let results = ResourceVerifier::new(catalog).verify_all_resources().await;
    let order: Vec<String> = results.keys().cloned().collect();
    assert_eq!(order, [url("/zz-resource"), url("/shared"), url("/aa-content")]);

    // The content list's check of /shared ran second and got the 200.
    assert!(results[&url("/shared")].is_verified());
}

#[tokio::test]
async fn empty_catalog_yields_empty_map() {
    let results = ResourceVerifier::new(ResourceCatalog::default())
        .verify_all_resources()
        .await;
    assert!(results.is_empty());
}
