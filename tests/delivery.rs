//! Delivery tests against a stub ntfy server.

mod common;

use std::time::Duration;

use common::StubRelay;
use ntfy_watch::{
    AppError, EventFilter, FileEvent, FileEventKind, FolderWatcher, Notifier, NtfyClient,
    NtfyMessage, WatchConfig,
};
use tempfile::TempDir;

fn watch_config(server_url: &str, root: &std::path::Path, extensions: Option<&str>) -> WatchConfig {
    WatchConfig::new(
        root.to_path_buf(),
        "file-alerts".to_string(),
        server_url.to_string(),
        extensions,
        false,
        false,
    )
}

#[tokio::test]
async fn test_created_event_payload() {
    let relay = StubRelay::start(vec![200]);
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("report.pdf");
    std::fs::write(&file, "content").unwrap();

    let config = watch_config(&relay.url, temp_dir.path(), Some(".pdf"));
    let notifier = Notifier::new(&config).unwrap();
    let filter = EventFilter::new(&config);

    let event = FileEvent::new(FileEventKind::Created, &file, false);
    assert!(filter.should_process(&event));
    notifier.notify_event(&event).await;

    let body = relay.requests.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(body["topic"], "file-alerts");
    assert_eq!(body["title"], "File Created");
    assert_eq!(body["priority"], 3);
    let tags = body["tags"][0].as_str().unwrap();
    assert!(tags.contains("file_folder"));
    assert!(tags.contains("new"));
    let message = body["message"].as_str().unwrap();
    assert!(message.starts_with("File created: report.pdf"));
    assert!(message.contains("Size: "));
}

#[tokio::test]
async fn test_server_error_does_not_stop_processing() {
    let relay = StubRelay::start(vec![500, 200]);
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("notes.txt");
    std::fs::write(&file, "first").unwrap();

    let config = watch_config(&relay.url, temp_dir.path(), None);
    let notifier = Notifier::new(&config).unwrap();

    // First delivery is rejected by the server; the second must still go out.
    notifier
        .notify_event(&FileEvent::new(FileEventKind::Created, &file, false))
        .await;
    notifier
        .notify_event(&FileEvent::new(FileEventKind::Modified, &file, false))
        .await;

    let first = relay.requests.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(first["title"], "File Created");
    let second = relay.requests.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(second["title"], "File Modified");
}

#[tokio::test]
async fn test_non_200_status_is_a_delivery_failure() {
    let relay = StubRelay::start(vec![202]);
    let client = NtfyClient::new(&relay.url, None).unwrap();
    let message = NtfyMessage {
        topic: "file-alerts".to_string(),
        message: "File created: report.pdf".to_string(),
        title: Some("File Created".to_string()),
        priority: None,
        tags: None,
        click: None,
        attach: None,
        actions: None,
    };

    // Only a plain 200 counts as delivered.
    let err = client.publish(&message).await.unwrap_err();
    assert!(matches!(err, AppError::NotificationFailed { status: 202 }));
}

#[tokio::test]
async fn test_start_and_stop_notifications() {
    let relay = StubRelay::start(vec![200, 200]);
    let temp_dir = TempDir::new().unwrap();

    let config = watch_config(&relay.url, temp_dir.path(), None);
    let notifier = Notifier::new(&config).unwrap();

    notifier.notify_started().await;
    notifier.notify_stopped().await;

    let started = relay.requests.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(started["title"], "Folder Monitoring Started");
    assert_eq!(started["message"], "Started monitoring folder for changes");
    assert_eq!(started["tags"][0], "rocket");

    let stopped = relay.requests.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(stopped["title"], "Monitoring Stopped");
    assert_eq!(stopped["message"], "Folder monitoring stopped by user");
    assert_eq!(stopped["tags"][0], "stop_sign");
}

#[tokio::test]
async fn test_watch_pipeline_end_to_end() {
    let relay = StubRelay::start(vec![200]);
    let temp_dir = TempDir::new().unwrap();

    let config = watch_config(&relay.url, temp_dir.path(), Some(".pdf"));
    let notifier = Notifier::new(&config).unwrap();
    let filter = EventFilter::new(&config);
    let (mut watcher, events) = FolderWatcher::start(&config.path, config.recursive).unwrap();

    std::fs::write(temp_dir.path().join("ignored.tmp"), "tmp").unwrap();
    std::fs::write(temp_dir.path().join("summary.pdf"), "pdf bytes").unwrap();

    // Scan the stream until the created .pdf clears the filter; other
    // events (the .tmp file, modify noise) are expected and skipped.
    let deadline = std::time::Instant::now() + Duration::from_secs(5);
    let mut delivered = false;
    while let Some(remaining) = deadline.checked_duration_since(std::time::Instant::now()) {
        let event = match events.recv_timeout(remaining) {
            Ok(event) => event,
            Err(_) => break,
        };
        if event.kind == FileEventKind::Created
            && event.path.file_name().is_some_and(|name| name == "summary.pdf")
            && filter.should_process(&event)
        {
            notifier.notify_event(&event).await;
            delivered = true;
            break;
        }
    }
    assert!(delivered, "no created event for summary.pdf arrived");

    let body = relay.requests.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(body["topic"], "file-alerts");
    assert_eq!(body["title"], "File Created");
    assert!(body["message"].as_str().unwrap().contains("summary.pdf"));

    watcher.stop();
}

#[cfg(target_os = "linux")]
#[tokio::test]
async fn test_rename_sends_single_notification() {
    let relay = StubRelay::start(vec![200, 200]);
    let temp_dir = TempDir::new().unwrap();
    let src = temp_dir.path().join("draft.txt");
    std::fs::write(&src, "v1").unwrap();

    let config = watch_config(&relay.url, temp_dir.path(), Some(".txt"));
    let notifier = Notifier::new(&config).unwrap();
    let filter = EventFilter::new(&config);
    let (mut watcher, events) = FolderWatcher::start(&config.path, config.recursive).unwrap();

    let dest = temp_dir.path().join("final.txt");
    std::fs::rename(&src, &dest).unwrap();

    // Deliver everything the rename produced before the stream goes quiet.
    while let Ok(event) = events.recv_timeout(Duration::from_secs(2)) {
        if filter.should_process(&event) {
            notifier.notify_event(&event).await;
        }
    }

    let body = relay.requests.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(body["title"], "File Renamed: draft.txt → final.txt");
    assert!(relay.requests.recv_timeout(Duration::from_millis(300)).is_err());

    watcher.stop();
}
