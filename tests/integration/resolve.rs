//! Version resolution against a live HTTP server.

use axum::http::Method;
use ui5rt_cli::constants::EULA_COOKIE;
use ui5rt_cli::core::RuntimeError;
use ui5rt_cli::http::build_client;
use ui5rt_cli::resolver::VersionResolver;
use ui5rt_cli::test_utils::{init_test_logging, manifest_json};

use crate::common::TestServer;

fn resolver_for(server: &TestServer) -> VersionResolver {
    VersionResolver::new(build_client(None).unwrap(), server.endpoints())
}

fn zip_names(versions: &[&str]) -> Vec<String> {
    versions.iter().map(|v| format!("sapui5-rt-{v}.zip")).collect()
}

#[tokio::test]
async fn test_candidates_probed_newest_first_until_exhausted() {
    init_test_logging(None);
    let server = TestServer::start().await;
    server.set_manifest(manifest_json("v4", &["v1", "v2", "v3"]));

    let error = resolver_for(&server).resolve(None).await.unwrap_err();

    assert_eq!(server.archive_requests(Method::HEAD), zip_names(&["v4", "v3", "v2", "v1"]));
    match error {
        RuntimeError::Resolution {
            manifest_url,
            tried,
            ..
        } => {
            assert_eq!(manifest_url, server.manifest_url());
            let urls: Vec<String> = tried.iter().map(|t| t.url.clone()).collect();
            assert_eq!(
                urls,
                vec![
                    server.archive_url("v4"),
                    server.archive_url("v3"),
                    server.archive_url("v2"),
                    server.archive_url("v1"),
                ]
            );
            assert!(tried.iter().all(|t| t.reason.contains("404")));
        }
        other => panic!("expected Resolution error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_first_reachable_candidate_wins() {
    let server = TestServer::start().await;
    server.set_manifest(manifest_json("1.120.4", &["1.120.1", "1.120.2", "1.120.3"]));
    server.add_archive("1.120.3", vec![1, 2, 3]);
    server.add_archive("1.120.2", vec![4, 5, 6]);

    let target = resolver_for(&server).resolve(None).await.unwrap();

    assert_eq!(target.version, "1.120.3");
    assert_eq!(target.url, server.archive_url("1.120.3"));
    assert_eq!(server.archive_requests(Method::HEAD), zip_names(&["1.120.4", "1.120.3"]));
}

#[tokio::test]
async fn test_current_version_listed_in_history_is_probed_once() {
    let server = TestServer::start().await;
    server.set_manifest(manifest_json("1.60.1", &["1.60.0", "1.60.1"]));

    let error = resolver_for(&server).resolve(None).await.unwrap_err();

    assert_eq!(server.archive_requests(Method::HEAD), zip_names(&["1.60.1", "1.60.0"]));
    match error {
        RuntimeError::Resolution {
            tried,
            ..
        } => assert_eq!(tried.len(), 2),
        other => panic!("expected Resolution error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_pinned_version_makes_no_requests() {
    let server = TestServer::start().await;
    server.set_manifest(manifest_json("1.120.4", &["1.120.3"]));

    let target = resolver_for(&server).resolve(Some("1.71.60")).await.unwrap();

    assert_eq!(target.version, "1.71.60");
    assert_eq!(target.url, server.archive_url("1.71.60"));
    assert_eq!(server.request_count(), 0);
}

#[tokio::test]
async fn test_get_fallback_when_head_is_rejected() {
    let server = TestServer::start().await;
    server.set_manifest(manifest_json("2.0.0", &["1.0.0"]));
    server.add_archive("1.0.0", vec![0; 16]);
    server.reject_head();

    let target = resolver_for(&server).resolve(None).await.unwrap();

    assert_eq!(target.version, "1.0.0");
    assert_eq!(server.archive_requests(Method::HEAD), zip_names(&["2.0.0", "1.0.0"]));
    assert_eq!(server.archive_requests(Method::GET), zip_names(&["2.0.0", "1.0.0"]));
}

#[tokio::test]
async fn test_manifest_failures_are_distinct_from_exhaustion() {
    let server = TestServer::start().await;
    let resolver = resolver_for(&server);

    // Not served at all
    let error = resolver.resolve(None).await.unwrap_err();
    match error {
        RuntimeError::ManifestUnavailable {
            endpoint,
            reason,
        } => {
            assert_eq!(endpoint, server.manifest_url());
            assert!(reason.contains("503"));
        }
        other => panic!("expected ManifestUnavailable, got {other:?}"),
    }

    // Served, but without a patch history
    server.set_manifest(r#"{ "version": "1.120.4", "libraries": [] }"#);
    let error = resolver.resolve(None).await.unwrap_err();
    assert!(matches!(error, RuntimeError::ManifestUnavailable { .. }));

    // Not JSON
    server.set_manifest("<html>down for maintenance</html>");
    let error = resolver.resolve(None).await.unwrap_err();
    assert!(matches!(error, RuntimeError::ManifestUnavailable { .. }));

    assert_eq!(server.archive_requests(Method::HEAD), Vec::<String>::new());
}

#[tokio::test]
async fn test_every_request_carries_eula_cookie() {
    let server = TestServer::start().await;
    server.set_manifest(manifest_json("1.1.0", &["1.0.0"]));
    server.add_archive("1.0.0", vec![1]);

    resolver_for(&server).resolve(None).await.unwrap();

    let requests = server.requests();
    assert_eq!(requests.len(), 3);
    assert!(requests.iter().all(|r| r.cookie.as_deref() == Some(EULA_COOKIE)));
}
