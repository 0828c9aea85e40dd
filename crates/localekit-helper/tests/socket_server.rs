// crates/localekit-helper/tests/socket_server.rs
// ============================================================================
// Module: Helper Server Tests
// Description: Exercises the Unix-socket front end over real connections.
// Purpose: Validate framing, queue bounds, injection defense, and watchdog.
// Dependencies: localekit-core, localekit-helper, serde_json, tempfile, tokio
// ============================================================================

//! ## Overview
//! Spins the helper server on a temporary socket with stub seams and drives
//! it as a real client: request/reply/event framing, busy rejection when the
//! queue is full, wholesale rejection of injection attempts, and voluntary
//! exit once the idle watchdog elapses.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions use unwrap/expect for clarity."
)]

mod common;

use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::time::Duration;

use localekit_core::HelperEvent;
use localekit_core::HelperReply;
use localekit_core::HelperRequest;
use localekit_core::NoopEvents;
use localekit_helper::AuthorizationResult;
use localekit_helper::HelperConfig;
use localekit_helper::HelperServer;
use localekit_helper::StaticAuthority;
use tokio::io::AsyncBufReadExt;
use tokio::io::AsyncWriteExt;
use tokio::io::BufReader;
use tokio::net::UnixStream;

use common::FIXTURE;
use common::RecordingCompiler;
use common::write_definition_file;

/// Builds a server configuration over temporary paths.
fn test_config(dir: &Path, definition_file: PathBuf, idle: Duration, depth: usize) -> HelperConfig {
    HelperConfig {
        socket_path: dir.join("helper.sock"),
        definition_file,
        compiler: PathBuf::from("/bin/true"),
        pkcheck: PathBuf::from("/bin/true"),
        idle_timeout: idle,
        queue_depth: depth,
    }
}

/// Connects to the socket, retrying until the server has bound it.
async fn connect(socket: &Path) -> UnixStream {
    for _ in 0..100 {
        if let Ok(stream) = UnixStream::connect(socket).await {
            return stream;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("helper socket never became connectable");
}

/// Sends one request and returns the reply and optional completion event.
async fn call(socket: &Path, locales: &[&str]) -> (bool, Option<bool>) {
    let stream = connect(socket).await;
    let (read_half, mut write_half) = stream.into_split();
    let request = HelperRequest::EnableLocales {
        locales: locales.iter().map(ToString::to_string).collect(),
    };
    let mut frame = serde_json::to_vec(&request).expect("serialize request");
    frame.push(b'\n');
    write_half.write_all(&frame).await.expect("send request");

    let mut reader = BufReader::new(read_half);
    let mut line = String::new();
    reader.read_line(&mut line).await.expect("read reply");
    let reply: HelperReply = serde_json::from_str(&line).expect("parse reply");
    if !reply.accepted {
        return (false, None);
    }
    line.clear();
    reader.read_line(&mut line).await.expect("read event");
    let HelperEvent::Completed {
        success,
    } = serde_json::from_str(&line).expect("parse event");
    (true, Some(success))
}

#[tokio::test]
async fn enable_request_round_trips_and_edits_the_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let definition_file = write_definition_file(dir.path(), FIXTURE);
    let calls = Arc::new(AtomicUsize::new(0));
    let config = test_config(dir.path(), definition_file.clone(), Duration::from_secs(5), 4);
    let socket = config.socket_path.clone();
    let server = HelperServer::new(config).expect("server config");
    let handle = tokio::spawn(server.run(
        Arc::new(StaticAuthority::new(AuthorizationResult::Allowed)),
        Arc::new(RecordingCompiler::new(Arc::clone(&calls))),
        Arc::new(NoopEvents),
    ));

    let (accepted, completed) = call(&socket, &["de_DE.UTF-8"]).await;
    assert!(accepted);
    assert_eq!(completed, Some(true));
    let content = std::fs::read_to_string(&definition_file).expect("read fixture");
    assert!(content.contains("\nde_DE.UTF-8 UTF-8\n"));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    handle.abort();
}

#[tokio::test]
async fn injection_attempt_fails_without_touching_the_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let definition_file = write_definition_file(dir.path(), FIXTURE);
    let calls = Arc::new(AtomicUsize::new(0));
    let config = test_config(dir.path(), definition_file.clone(), Duration::from_secs(5), 4);
    let socket = config.socket_path.clone();
    let server = HelperServer::new(config).expect("server config");
    let handle = tokio::spawn(server.run(
        Arc::new(StaticAuthority::new(AuthorizationResult::Allowed)),
        Arc::new(RecordingCompiler::new(Arc::clone(&calls))),
        Arc::new(NoopEvents),
    ));

    let (accepted, completed) = call(&socket, &["de_DE.UTF-8", "; rm -rf /"]).await;
    assert!(accepted);
    assert_eq!(completed, Some(false));
    assert_eq!(std::fs::read_to_string(&definition_file).expect("read fixture"), FIXTURE);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    handle.abort();
}

#[tokio::test]
async fn malformed_frame_is_refused_without_an_event() {
    let dir = tempfile::tempdir().expect("tempdir");
    let definition_file = write_definition_file(dir.path(), FIXTURE);
    let config = test_config(dir.path(), definition_file, Duration::from_secs(5), 4);
    let socket = config.socket_path.clone();
    let server = HelperServer::new(config).expect("server config");
    let handle = tokio::spawn(server.run(
        Arc::new(StaticAuthority::new(AuthorizationResult::Allowed)),
        Arc::new(RecordingCompiler::new(Arc::new(AtomicUsize::new(0)))),
        Arc::new(NoopEvents),
    ));

    let stream = connect(&socket).await;
    let (read_half, mut write_half) = stream.into_split();
    write_half.write_all(b"{\"op\":\"unknown\"}\n").await.expect("send frame");
    let mut reader = BufReader::new(read_half);
    let mut line = String::new();
    reader.read_line(&mut line).await.expect("read reply");
    let reply: HelperReply = serde_json::from_str(&line).expect("parse reply");
    assert!(!reply.accepted);
    line.clear();
    let read = reader.read_line(&mut line).await.expect("read eof");
    assert_eq!(read, 0);
    handle.abort();
}

#[tokio::test]
async fn full_queue_refuses_with_busy_reply() {
    let dir = tempfile::tempdir().expect("tempdir");
    let definition_file = write_definition_file(dir.path(), FIXTURE);
    let calls = Arc::new(AtomicUsize::new(0));
    let mut slow = RecordingCompiler::new(Arc::clone(&calls));
    slow.delay = Duration::from_millis(500);
    let config = test_config(dir.path(), definition_file, Duration::from_secs(5), 1);
    let socket = config.socket_path.clone();
    let server = HelperServer::new(config).expect("server config");
    let handle = tokio::spawn(server.run(
        Arc::new(StaticAuthority::new(AuthorizationResult::Allowed)),
        Arc::new(slow),
        Arc::new(NoopEvents),
    ));

    // First request occupies the worker; second fills the queue.
    let first = tokio::spawn({
        let socket = socket.clone();
        async move { call(&socket, &["de_DE.UTF-8"]).await }
    });
    tokio::time::sleep(Duration::from_millis(100)).await;
    let second = tokio::spawn({
        let socket = socket.clone();
        async move { call(&socket, &["fr_FR.UTF-8"]).await }
    });
    tokio::time::sleep(Duration::from_millis(100)).await;

    let (accepted, completed) = call(&socket, &["sr@latin"]).await;
    assert!(!accepted);
    assert_eq!(completed, None);

    let (first_accepted, first_completed) = first.await.expect("first call");
    assert!(first_accepted);
    assert_eq!(first_completed, Some(true));
    let (second_accepted, second_completed) = second.await.expect("second call");
    assert!(second_accepted);
    assert_eq!(second_completed, Some(true));
    handle.abort();
}

#[tokio::test]
async fn idle_watchdog_terminates_the_server() {
    let dir = tempfile::tempdir().expect("tempdir");
    let definition_file = write_definition_file(dir.path(), FIXTURE);
    let config = test_config(dir.path(), definition_file, Duration::from_millis(200), 4);
    let socket = config.socket_path.clone();
    let server = HelperServer::new(config).expect("server config");
    let handle = tokio::spawn(server.run(
        Arc::new(StaticAuthority::new(AuthorizationResult::Allowed)),
        Arc::new(RecordingCompiler::new(Arc::new(AtomicUsize::new(0)))),
        Arc::new(NoopEvents),
    ));

    let result = tokio::time::timeout(Duration::from_secs(2), handle)
        .await
        .expect("watchdog should fire")
        .expect("server task should join");
    assert!(result.is_ok());
    assert!(!socket.exists());
}

#[tokio::test]
async fn requests_arriving_during_work_extend_the_lifetime() {
    let dir = tempfile::tempdir().expect("tempdir");
    let definition_file = write_definition_file(dir.path(), FIXTURE);
    let calls = Arc::new(AtomicUsize::new(0));
    let mut slow = RecordingCompiler::new(Arc::clone(&calls));
    slow.delay = Duration::from_millis(400);
    let config = test_config(dir.path(), definition_file, Duration::from_millis(250), 4);
    let socket = config.socket_path.clone();
    let server = HelperServer::new(config).expect("server config");
    let handle = tokio::spawn(server.run(
        Arc::new(StaticAuthority::new(AuthorizationResult::Allowed)),
        Arc::new(slow),
        Arc::new(NoopEvents),
    ));

    // The compile outlives the idle period; expiry must wait for it.
    let (accepted, completed) = call(&socket, &["de_DE.UTF-8"]).await;
    assert!(accepted);
    assert_eq!(completed, Some(true));

    let result = tokio::time::timeout(Duration::from_secs(2), handle)
        .await
        .expect("watchdog should fire after completion")
        .expect("server task should join");
    assert!(result.is_ok());
}
