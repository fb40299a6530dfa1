//! Protocol-level error taxonomy: phase/packet-id violations.
//!
//! Framing failures don't need their own error type: [`crate::frame::FrameOutcome`]
//! already distinguishes Need-more from Invalid without an error value to carry.

use palisade_utils::ReadingError;
use thiserror::Error;

/// Errors raised while a handler decodes a packet's payload or reacts to an
/// unexpected packet id for the current phase.
#[derive(Debug, Error)]
pub enum PacketError {
    /// The payload was truncated or a contained varint was malformed.
    #[error(transparent)]
    Malformed(#[from] ReadingError),
    /// A packet id arrived that the phase's handler does not recognize.
    #[error("packet id {0:#x} is not valid in phase {1:?}")]
    UnexpectedId(i32, crate::phase::ConnectionPhase),
    /// The handshake declared a protocol version below the supported floor.
    #[error("unsupported protocol version {0} (minimum 575)")]
    UnsupportedProtocolVersion(i32),
}
