// crates/localekit-helper/src/server.rs
// ============================================================================
// Module: Helper Socket Server
// Description: Unix-socket front end and bounded-lifetime event loop.
// Purpose: Queue requests in arrival order and exit after idle timeout.
// Dependencies: localekit-core, serde_json, tokio, crate::service
// ============================================================================

//! ## Overview
//! The server accepts connections on a Unix-domain socket. Each connection
//! carries one request frame; accepted requests are queued on a bounded
//! channel and drained by a single worker, so the definition file never has
//! concurrent writers and requests complete in arrival order. A watchdog
//! re-armed on every arrival and completion terminates the process after a
//! bounded idle period, keeping the privileged listener short-lived.
//!
//! Security posture: caller identity comes from socket peer credentials,
//! never from frame content; oversized or malformed frames are refused
//! without touching the service.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use localekit_core::HelperEvent;
use localekit_core::HelperReply;
use localekit_core::HelperRequest;
use localekit_core::ProvisionEvents;
use localekit_core::proto::MAX_FRAME_BYTES;
use serde::Serialize;
use tokio::io::AsyncBufReadExt;
use tokio::io::AsyncReadExt;
use tokio::io::AsyncWriteExt;
use tokio::io::BufReader;
use tokio::net::UnixListener;
use tokio::net::UnixStream;
use tokio::net::unix::OwnedWriteHalf;
use tokio::sync::Notify;
use tokio::sync::mpsc;
use tokio::sync::oneshot;
use tokio::time::Duration;
use tokio::time::Instant;

use crate::authority::PeerIdentity;
use crate::authority::PolicyAuthority;
use crate::compiler::LocaleCompiler;
use crate::config::HelperConfig;
use crate::error::HelperError;
use crate::service::EnableService;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Time a connection gets to deliver its request frame.
const REQUEST_READ_TIMEOUT: Duration = Duration::from_secs(10);

// ============================================================================
// SECTION: Queued Requests
// ============================================================================

/// One accepted request waiting for the worker.
struct QueuedRequest {
    /// Raw locale strings from the wire, still unvalidated.
    locales: Vec<String>,
    /// Caller identity from peer credentials.
    peer: PeerIdentity,
    /// Channel resolving to the collapsed result.
    done: oneshot::Sender<bool>,
}

// ============================================================================
// SECTION: Watchdog
// ============================================================================

/// Idle-lifetime watchdog for the privileged process.
///
/// # Invariants
/// - The deadline only moves forward while requests arrive or complete.
/// - Expiry never fires while a request is queued or in flight.
struct Watchdog {
    /// Idle period granted after each activity.
    idle_timeout: Duration,
    /// Current expiry deadline.
    deadline: Mutex<Instant>,
    /// Requests queued or in flight.
    active: AtomicUsize,
    /// Signal fired whenever the deadline or active count changes.
    changed: Notify,
}

impl Watchdog {
    /// Creates a watchdog armed from now.
    fn new(idle_timeout: Duration) -> Self {
        Self {
            idle_timeout,
            deadline: Mutex::new(Instant::now() + idle_timeout),
            active: AtomicUsize::new(0),
            changed: Notify::new(),
        }
    }

    /// Returns the current deadline.
    fn deadline(&self) -> Instant {
        self.deadline.lock().map_or_else(|err| *err.into_inner(), |guard| *guard)
    }

    /// Pushes the deadline one idle period into the future.
    fn rearm(&self) {
        let next = Instant::now() + self.idle_timeout;
        match self.deadline.lock() {
            Ok(mut guard) => *guard = next,
            Err(err) => *err.into_inner() = next,
        }
        self.changed.notify_waiters();
    }

    /// Marks a request as queued.
    fn begin(&self) {
        self.active.fetch_add(1, Ordering::SeqCst);
        self.rearm();
    }

    /// Marks a request as finished.
    fn finish(&self) {
        self.active.fetch_sub(1, Ordering::SeqCst);
        self.rearm();
    }

    /// Resolves once the helper has been idle for a full period.
    async fn expired(&self) {
        loop {
            let notified = self.changed.notified();
            let deadline = self.deadline();
            if Instant::now() >= deadline {
                if self.active.load(Ordering::SeqCst) == 0 {
                    return;
                }
                notified.await;
                continue;
            }
            tokio::select! {
                () = tokio::time::sleep_until(deadline) => {},
                () = notified => {},
            }
        }
    }
}

// ============================================================================
// SECTION: Helper Server
// ============================================================================

/// Bounded-lifetime socket server for the provisioning helper.
///
/// # Invariants
/// - Exactly one worker mutates the definition file.
pub struct HelperServer {
    /// Validated runtime configuration.
    config: HelperConfig,
}

impl HelperServer {
    /// Creates a server from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HelperError::Config`] when the configuration bounds are
    /// invalid.
    pub fn new(config: HelperConfig) -> Result<Self, HelperError> {
        config.validate()?;
        Ok(Self {
            config,
        })
    }

    /// Runs the accept loop until the idle watchdog expires.
    ///
    /// # Errors
    ///
    /// Returns [`HelperError::Io`] when the socket cannot be bound.
    pub async fn run(
        self,
        authority: Arc<dyn PolicyAuthority>,
        compiler: Arc<dyn LocaleCompiler>,
        events: Arc<dyn ProvisionEvents>,
    ) -> Result<(), HelperError> {
        if let Some(parent) = self.config.socket_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        if self.config.socket_path.exists() {
            std::fs::remove_file(&self.config.socket_path)?;
        }
        let listener = UnixListener::bind(&self.config.socket_path)?;

        let (tx, rx) = mpsc::channel::<QueuedRequest>(self.config.queue_depth);
        let watchdog = Arc::new(Watchdog::new(self.config.idle_timeout));
        let service = EnableService::new(
            self.config.definition_file.clone(),
            authority,
            compiler,
            events,
        );
        let worker = tokio::spawn(drain_requests(service, rx, Arc::clone(&watchdog)));

        loop {
            tokio::select! {
                accepted = listener.accept() => {
                    let Ok((stream, _addr)) = accepted else {
                        continue;
                    };
                    watchdog.rearm();
                    tokio::spawn(handle_connection(stream, tx.clone(), Arc::clone(&watchdog)));
                }
                () = watchdog.expired() => {
                    break;
                }
            }
        }

        drop(tx);
        let _ = worker.await;
        let _ = std::fs::remove_file(&self.config.socket_path);
        Ok(())
    }
}

// ============================================================================
// SECTION: Worker
// ============================================================================

/// Drains queued requests one at a time in arrival order.
async fn drain_requests(
    mut service: EnableService,
    mut rx: mpsc::Receiver<QueuedRequest>,
    watchdog: Arc<Watchdog>,
) {
    while let Some(request) = rx.recv().await {
        let success = service.enable_locales(&request.locales, &request.peer).await;
        let _ = request.done.send(success);
        watchdog.finish();
    }
}

// ============================================================================
// SECTION: Connection Handling
// ============================================================================

/// Services one connection carrying one request frame.
async fn handle_connection(
    stream: UnixStream,
    tx: mpsc::Sender<QueuedRequest>,
    watchdog: Arc<Watchdog>,
) {
    let Ok(credentials) = stream.peer_cred() else {
        return;
    };
    let peer = PeerIdentity {
        pid: credentials.pid(),
        uid: credentials.uid(),
    };
    let (read_half, mut write_half) = stream.into_split();

    let mut reader = BufReader::new(read_half.take(MAX_FRAME_BYTES as u64));
    let mut line = String::new();
    match tokio::time::timeout(REQUEST_READ_TIMEOUT, reader.read_line(&mut line)).await {
        Ok(Ok(read)) if read > 0 => {}
        Ok(Ok(_) | Err(_)) | Err(_) => return,
    }
    let Ok(HelperRequest::EnableLocales {
        locales,
    }) = serde_json::from_str::<HelperRequest>(&line)
    else {
        let _ = write_frame(&mut write_half, &HelperReply {
            accepted: false,
        })
        .await;
        return;
    };

    let (done_tx, done_rx) = oneshot::channel();
    watchdog.begin();
    let queued = QueuedRequest {
        locales,
        peer,
        done: done_tx,
    };
    if tx.try_send(queued).is_err() {
        // Queue full or shutting down; refuse without disturbing state.
        watchdog.finish();
        let _ = write_frame(&mut write_half, &HelperReply {
            accepted: false,
        })
        .await;
        return;
    }
    if write_frame(&mut write_half, &HelperReply {
        accepted: true,
    })
    .await
    .is_err()
    {
        return;
    }
    let success = done_rx.await.unwrap_or(false);
    let _ = write_frame(&mut write_half, &HelperEvent::Completed {
        success,
    })
    .await;
}

/// Writes one newline-delimited JSON frame.
async fn write_frame<T: Serialize>(
    write_half: &mut OwnedWriteHalf,
    frame: &T,
) -> std::io::Result<()> {
    let mut bytes = serde_json::to_vec(frame)
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err))?;
    bytes.push(b'\n');
    write_half.write_all(&bytes).await?;
    write_half.flush().await
}
