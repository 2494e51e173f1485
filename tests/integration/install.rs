//! Full install runs: resolve, check, download, extract and clean.

use axum::http::Method;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use ui5rt_cli::config::{Endpoints, RuntimeConfig};
use ui5rt_cli::core::RuntimeError;
use ui5rt_cli::installer::{InstallOrchestrator, InstallOutcome, InstallState, InstalledMarker};
use ui5rt_cli::test_utils::{manifest_json, marker_json, runtime_zip, zip_archive};
use ui5rt_cli::utils::progress::{Phase, ProgressReporter};

use crate::common::{TestServer, serve_truncated};

fn config_for(server: &TestServer, root: &Path) -> RuntimeConfig {
    RuntimeConfig::new(root.join("lib")).with_endpoints(server.endpoints())
}

async fn run(config: &RuntimeConfig) -> (Result<InstallOutcome, RuntimeError>, Vec<InstallState>) {
    let mut orchestrator = InstallOrchestrator::new(config.clone()).unwrap();
    let result = orchestrator.run().await;
    (result, orchestrator.history().to_vec())
}

#[tokio::test]
async fn test_install_latest_reachable_release() {
    let temp = TempDir::new().unwrap();
    let server = TestServer::start().await;
    server.set_manifest(manifest_json("1.120.5", &["1.120.3", "1.120.4"]));
    server.add_archive("1.120.4", runtime_zip("1.120.4"));
    let config = config_for(&server, temp.path());

    let (result, history) = run(&config).await;

    assert_eq!(
        result.unwrap(),
        InstallOutcome::Installed {
            version: "1.120.4".to_string(),
            url: server.archive_url("1.120.4"),
        }
    );
    assert_eq!(history.last(), Some(&InstallState::Done));
    assert_eq!(InstalledMarker::read(&config).await.as_deref(), Some("1.120.4"));
    assert!(config.resources_dir().join("sap-ui-core.js").is_file());
    assert!(config.resources_dir().join("sap/m/library.js").is_file());
    assert!(!config.scratch_dir.exists());
}

#[tokio::test]
async fn test_second_run_is_up_to_date_and_touches_nothing() {
    let temp = TempDir::new().unwrap();
    let server = TestServer::start().await;
    server.set_manifest(manifest_json("1.120.4", &["1.120.3"]));
    server.add_archive("1.120.4", runtime_zip("1.120.4"));
    let config = config_for(&server, temp.path());

    let (first, _) = run(&config).await;
    assert!(matches!(first.unwrap(), InstallOutcome::Installed { .. }));
    fs::write(config.destination_dir.join("local-notes.txt"), "mine").unwrap();

    let (second, history) = run(&config).await;

    assert_eq!(
        second.unwrap(),
        InstallOutcome::UpToDate {
            version: "1.120.4".to_string()
        }
    );
    assert!(history.contains(&InstallState::UpToDate));
    assert!(!history.contains(&InstallState::Installing));
    assert_eq!(fs::read_to_string(config.destination_dir.join("local-notes.txt")).unwrap(), "mine");
    assert_eq!(server.archive_requests(Method::GET), vec!["sapui5-rt-1.120.4.zip".to_string()]);
    assert!(!config.scratch_dir.exists());
}

#[tokio::test]
async fn test_newer_release_replaces_stale_install() {
    let temp = TempDir::new().unwrap();
    let server = TestServer::start().await;
    let config = config_for(&server, temp.path());

    fs::create_dir_all(config.resources_dir().join("sap/m")).unwrap();
    fs::write(config.resources_dir().join("sap-ui-version.json"), marker_json("1.96.0")).unwrap();
    fs::write(config.resources_dir().join("sap-ui-core.js"), "x".repeat(4096)).unwrap();
    fs::write(config.resources_dir().join("sap/m/obsolete.js"), "gone").unwrap();

    let entries = [
        ("resources/sap-ui-version.json", marker_json("1.120.4")),
        ("resources/sap-ui-core.js", "core".to_string()),
        ("resources/sap/m/library.js", "library".repeat(10)),
    ];
    let borrowed: Vec<(&str, &str)> = entries.iter().map(|(p, c)| (*p, c.as_str())).collect();
    server.set_manifest(manifest_json("1.120.4", &["1.96.0"]));
    server.add_archive("1.120.4", zip_archive(&borrowed));

    let (result, _) = run(&config).await;
    result.unwrap();

    for (path, contents) in &entries {
        let on_disk = config.destination_dir.join(path);
        assert_eq!(fs::metadata(&on_disk).unwrap().len(), contents.len() as u64, "{path}");
    }
    assert!(!config.resources_dir().join("sap/m/obsolete.js").exists());
}

#[tokio::test]
async fn test_failed_download_leaves_no_directories() {
    let temp = TempDir::new().unwrap();
    let server = TestServer::start().await;
    let config = config_for(&server, temp.path()).with_pinned_version(Some("1.120.9".to_string()));
    fs::create_dir_all(config.resources_dir()).unwrap();
    fs::write(config.resources_dir().join("sap-ui-version.json"), marker_json("1.96.0")).unwrap();

    let (result, history) = run(&config).await;

    match result {
        Err(RuntimeError::Download {
            url,
            reason,
        }) => {
            assert_eq!(url, server.archive_url("1.120.9"));
            assert!(reason.contains("404"));
        }
        other => panic!("expected Download error, got {other:?}"),
    }
    assert_eq!(history.last(), Some(&InstallState::Failed));
    assert!(history.contains(&InstallState::Cleaning));
    assert!(!config.destination_dir.exists());
    assert!(!config.scratch_dir.exists());
}

#[tokio::test]
async fn test_interrupted_download_leaves_no_directories() {
    let temp = TempDir::new().unwrap();
    let base = serve_truncated(vec![0u8; 64], 1 << 20).await;
    let config = RuntimeConfig::new(temp.path().join("lib"))
        .with_endpoints(Endpoints::new(format!("{base}unused.json"), base))
        .with_pinned_version(Some("1.120.4".to_string()));

    let (result, history) = run(&config).await;

    assert!(matches!(result, Err(RuntimeError::Download { .. })));
    assert_eq!(history.last(), Some(&InstallState::Failed));
    assert!(!config.destination_dir.exists());
    assert!(!config.scratch_dir.exists());
}

#[tokio::test]
async fn test_corrupt_archive_leaves_no_directories() {
    let temp = TempDir::new().unwrap();
    let server = TestServer::start().await;
    server.add_archive("1.120.4", b"PK but not really a zip archive".to_vec());
    let config = config_for(&server, temp.path()).with_pinned_version(Some("1.120.4".to_string()));

    let (result, history) = run(&config).await;

    assert!(matches!(result, Err(RuntimeError::Extract { .. })));
    assert_eq!(history.last(), Some(&InstallState::Failed));
    assert!(!config.destination_dir.exists());
    assert!(!config.scratch_dir.exists());
}

#[tokio::test]
async fn test_archive_with_wrong_marker_is_reinstalled_next_time() {
    let temp = TempDir::new().unwrap();
    let server = TestServer::start().await;
    server.add_archive("1.120.4", runtime_zip("1.120.3"));
    let config = config_for(&server, temp.path()).with_pinned_version(Some("1.120.4".to_string()));

    let (first, _) = run(&config).await;
    assert!(matches!(first.unwrap(), InstallOutcome::Installed { .. }));

    let (second, _) = run(&config).await;
    assert!(matches!(second.unwrap(), InstallOutcome::Installed { .. }));
    assert_eq!(server.archive_requests(Method::GET).len(), 2);
}

#[tokio::test]
async fn test_custom_scratch_dir_is_removed() {
    let temp = TempDir::new().unwrap();
    let server = TestServer::start().await;
    server.add_archive("1.120.4", runtime_zip("1.120.4"));
    let config = config_for(&server, temp.path())
        .with_pinned_version(Some("1.120.4".to_string()))
        .with_scratch_dir(temp.path().join("downloads"));

    let (result, _) = run(&config).await;

    result.unwrap();
    assert!(!temp.path().join("downloads").exists());
    assert!(!temp.path().join(".ui5rt-tmp").exists());
}

#[derive(Default)]
struct RecordingProgress {
    events: Mutex<Vec<String>>,
}

impl ProgressReporter for RecordingProgress {
    fn start(&self, phase: Phase, total: Option<u64>) {
        self.events.lock().unwrap().push(format!("start {phase} {total:?}"));
    }

    fn advance(&self, phase: Phase, position: u64) {
        self.events.lock().unwrap().push(format!("advance {phase} {position}"));
    }

    fn finish(&self, phase: Phase, success: bool) {
        self.events.lock().unwrap().push(format!("finish {phase} {success}"));
    }
}

#[tokio::test]
async fn test_progress_for_download_and_extraction() {
    let temp = TempDir::new().unwrap();
    let server = TestServer::start().await;
    let archive = runtime_zip("1.120.4");
    let archive_len = archive.len();
    server.add_archive("1.120.4", archive);
    let config = config_for(&server, temp.path()).with_pinned_version(Some("1.120.4".to_string()));

    let progress = Arc::new(RecordingProgress::default());
    let mut orchestrator = InstallOrchestrator::new(config).unwrap().with_progress(progress.clone());
    orchestrator.run().await.unwrap();

    let events = progress.events.lock().unwrap().clone();
    let download: Vec<&String> = events.iter().filter(|e| e.contains("Downloading")).collect();
    assert_eq!(download.first().unwrap().as_str(), format!("start Downloading Some({archive_len})"));
    assert_eq!(download[download.len() - 2].as_str(), format!("advance Downloading {archive_len}"));
    assert_eq!(download.last().unwrap().as_str(), "finish Downloading true");

    // runtime_zip holds one directory and four files
    let extract: Vec<&String> = events.iter().filter(|e| e.contains("Extracting")).collect();
    assert_eq!(extract.first().unwrap().as_str(), "start Extracting Some(5)");
    assert_eq!(extract.len(), 1 + 5 + 1);
    assert_eq!(extract.last().unwrap().as_str(), "finish Extracting true");
}
