// crates/localekit-core/src/proto.rs
// ============================================================================
// Module: Helper Wire Protocol
// Description: JSON frames exchanged between generator and helper.
// Purpose: Define the privilege-boundary contract in one place.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The generator and the provisioning helper communicate over a Unix-domain
//! socket carrying newline-delimited JSON frames. One connection carries one
//! [`HelperRequest`], one [`HelperReply`], and one terminal [`HelperEvent`].
//! Caller identity travels out-of-band as socket peer credentials.
//!
//! Security posture: frames cross a privilege boundary. Identifiers are
//! plain strings on the wire and are re-validated by the helper; the helper
//! never returns error detail beyond a single boolean.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default filesystem path of the helper socket.
pub const DEFAULT_SOCKET_PATH: &str = "/run/localekit/helper.sock";

/// Maximum accepted size of a single request frame in bytes.
pub const MAX_FRAME_BYTES: usize = 64 * 1024;

// ============================================================================
// SECTION: Frames
// ============================================================================

/// Request frame sent by the generator.
///
/// # Invariants
/// - `locales` are raw strings; the helper validates every entry before any
///   privileged work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum HelperRequest {
    /// Enable the listed locales in the system definition file.
    EnableLocales {
        /// Requested locale identifiers, unvalidated.
        locales: Vec<String>,
    },
}

/// Immediate reply to a request frame.
///
/// # Invariants
/// - `accepted` is false only when the request was not enqueued (malformed
///   frame or helper busy); it says nothing about eventual success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelperReply {
    /// Whether the helper accepted the request for processing.
    pub accepted: bool,
}

/// Asynchronous completion event.
///
/// # Invariants
/// - Exactly one event is emitted per accepted request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HelperEvent {
    /// Terminal result of an accepted request.
    Completed {
        /// Whether the locales were enabled and compiled.
        success: bool,
    },
}
