// crates/localekit-generator/src/client.rs
// ============================================================================
// Module: Helper Client
// Description: Unix-socket client for the privileged provisioning helper.
// Purpose: Send one batch and await exactly one terminal signal.
// Dependencies: localekit-core, serde_json, thiserror, tokio
// ============================================================================

//! ## Overview
//! [`HelperClient`] speaks the newline-delimited JSON protocol to the helper
//! socket: one request, one reply, one completion event per connection. Any
//! transport failure surfaces as [`ClientError`]; the generator maps it to a
//! degraded outcome rather than propagating it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;

use localekit_core::HelperEvent;
use localekit_core::HelperReply;
use localekit_core::HelperRequest;
use localekit_core::RequestBatch;
use localekit_core::proto::MAX_FRAME_BYTES;
use thiserror::Error;
use tokio::io::AsyncBufReadExt;
use tokio::io::AsyncReadExt;
use tokio::io::AsyncWriteExt;
use tokio::io::BufReader;
use tokio::net::UnixStream;

// ============================================================================
// SECTION: Client Errors
// ============================================================================

/// Errors raised while talking to the helper.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The socket could not be reached or the stream failed.
    #[error("helper transport failure: {0}")]
    Io(#[from] std::io::Error),
    /// The helper sent a frame outside the protocol.
    #[error("helper protocol violation")]
    Protocol,
}

// ============================================================================
// SECTION: Helper Client
// ============================================================================

/// Client for the helper's enable-locales surface.
///
/// # Invariants
/// - One connection carries exactly one request.
#[derive(Debug, Clone)]
pub struct HelperClient {
    /// Helper socket path.
    socket_path: PathBuf,
}

impl HelperClient {
    /// Creates a client for the given socket path.
    #[must_use]
    pub const fn new(socket_path: PathBuf) -> Self {
        Self {
            socket_path,
        }
    }

    /// Requests enablement of a batch and awaits the terminal signal.
    ///
    /// Returns false when the helper refused the request (busy) or reported
    /// failure; both are non-success to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Io`] when the helper is unreachable and
    /// [`ClientError::Protocol`] on malformed frames.
    pub async fn enable_locales(&self, batch: &RequestBatch) -> Result<bool, ClientError> {
        let stream = UnixStream::connect(&self.socket_path).await?;
        let (read_half, mut write_half) = stream.into_split();

        let request = HelperRequest::EnableLocales {
            locales: batch.to_strings(),
        };
        let mut frame = serde_json::to_vec(&request).map_err(|_| ClientError::Protocol)?;
        frame.push(b'\n');
        write_half.write_all(&frame).await?;
        write_half.flush().await?;

        let mut reader = BufReader::new(read_half.take(MAX_FRAME_BYTES as u64));
        let mut line = String::new();
        if reader.read_line(&mut line).await? == 0 {
            return Err(ClientError::Protocol);
        }
        let reply: HelperReply = serde_json::from_str(&line).map_err(|_| ClientError::Protocol)?;
        if !reply.accepted {
            return Ok(false);
        }

        line.clear();
        if reader.read_line(&mut line).await? == 0 {
            return Err(ClientError::Protocol);
        }
        let HelperEvent::Completed {
            success,
        } = serde_json::from_str(&line).map_err(|_| ClientError::Protocol)?;
        Ok(success)
    }
}
