//! The Login → Play rendezvous channel.
//!
//! Grounded on `original_source/server/tunnel.go`'s hand-off pattern: a
//! single channel, one message per successful login, received by a Play-side
//! task that takes ownership of the session for gameplay traffic.
//!
//! Per spec.md §9 and §4.11, this is deliberately left as the single shared
//! channel the original uses — it does not scale beyond one pending login at
//! a time and a second login can race a receiver meant for the first. This
//! is a known limitation, not silently fixed here.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::session::Session;

/// Sent by Login once per successful authentication; received by Play to
/// begin serving a session's gameplay traffic.
pub struct HandoffMessage {
    /// The authenticated session, ready for Play-phase dispatch.
    pub session: Arc<Session>,
    /// The authenticated player's name.
    pub player_name: String,
    /// The entity id allocated for this player.
    pub entity_id: i32,
}

/// Creates the unbuffered hand-off channel shared between Login (sender)
/// and Play (receiver).
///
/// Unbuffered: Play must have a receive outstanding before Login sends, or
/// Login blocks — matching spec.md §4.11.
#[must_use]
pub fn channel() -> (mpsc::Sender<HandoffMessage>, mpsc::Receiver<HandoffMessage>) {
    mpsc::channel(1)
}
