// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::helpers::{
    mount_detail, mount_listing, settings_for, start_root_zone_server, SharedBuffer, TldFixture,
};
use std::collections::HashSet;
use std::sync::Arc;
use tldwhois::engines::reqwest_engine::ReqwestEngine;
use tldwhois::utils::errors::{LoaderError, PipelineError, WorkerError};
use tldwhois::workers::WorkerManager;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ROOT_ZONE: &[TldFixture<'static>] = &[
    ("com", "generic", Some("whois.verisign-grs.com")),
    ("fr", "country-code", Some("whois.nic.fr")),
    ("xyz", "generic", None),
];

fn engine() -> Arc<ReqwestEngine> {
    Arc::new(ReqwestEngine::new("tldwhois-integration-test").unwrap())
}

#[tokio::test]
async fn test_end_to_end_discovers_published_servers() {
    let server = start_root_zone_server(ROOT_ZONE).await;
    let dir = tempfile::tempdir().unwrap();
    let progress = SharedBuffer::default();

    let report = WorkerManager::new(settings_for(&server.uri(), dir.path()), engine())
        .with_progress(Box::new(progress.clone()))
        .run()
        .await
        .expect("pipeline should complete");

    assert_eq!(report.domains, 3);
    assert_eq!(report.persisted, 2);

    let file_name = report.output_path.file_name().unwrap().to_string_lossy().to_string();
    assert!(file_name.starts_with("WHOIS_"));
    assert!(file_name.ends_with(".txt"));
    assert_eq!(file_name.len(), "WHOIS_".len() + 14 + ".txt".len());

    let contents = std::fs::read_to_string(&report.output_path).unwrap();
    let lines: HashSet<&str> = contents.lines().collect();
    assert_eq!(contents.lines().count(), 2);
    assert!(lines.contains("com: whois.verisign-grs.com"));
    assert!(lines.contains("fr: whois.nic.fr"));

    let progress_lines = progress.lines();
    assert_eq!(progress_lines.len(), 2);
    assert!(progress_lines[0].starts_with("|000001| "));
    assert!(progress_lines[1].starts_with("|000002| "));

    // Progress lines follow the same order as the file.
    let file_order: Vec<&str> = contents.lines().collect();
    for (progress_line, file_line) in progress_lines.iter().zip(file_order) {
        let (domain, server) = file_line.split_once(": ").unwrap();
        assert_eq!(&progress_line[9..], format!("{} | {}", domain, server));
    }
}

#[tokio::test]
async fn test_directory_failure_stops_before_output_file() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/domains/root/db"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();

    let result = WorkerManager::new(settings_for(&server.uri(), dir.path()), engine())
        .with_progress(Box::new(tokio::io::sink()))
        .run()
        .await;

    assert!(matches!(
        result,
        Err(PipelineError::Loader(LoaderError::Fetch(_)))
    ));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);

    // Only the directory page was requested; no worker ever ran.
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
}

#[tokio::test]
async fn test_unreachable_host_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let host = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let result = WorkerManager::new(settings_for(&host, dir.path()), engine())
        .with_progress(Box::new(tokio::io::sink()))
        .run()
        .await;

    assert!(matches!(result, Err(PipelineError::Loader(_))));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_detail_failure_aborts_the_run() {
    let server = MockServer::start().await;
    mount_listing(
        &server,
        &[
            ("com", "generic", Some("whois.verisign-grs.com")),
            ("net", "generic", Some("whois.verisign-grs.com")),
        ],
    )
    .await;
    mount_detail(&server, "com", Some("whois.verisign-grs.com")).await;
    Mock::given(method("GET"))
        .and(path("/domains/root/db/net.html"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();

    let result = WorkerManager::new(settings_for(&server.uri(), dir.path()), engine())
        .with_progress(Box::new(tokio::io::sink()))
        .run()
        .await;

    match result {
        Err(PipelineError::Worker(WorkerError::Fetch { domain, .. })) => assert_eq!(domain, "net"),
        other => panic!("expected a fatal fetch error, got {:?}", other),
    }
}
