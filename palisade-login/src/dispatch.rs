//! The dispatcher chain: an ordered list of phase handlers.
//!
//! Grounded on `original_source/net/dispatcher.go`'s `Dispatcher` interface
//! and `listener.go`'s `handleClient` loop (`for _, d := range l.dispatchers { if d.Dispatch(...) { break } }`).

use std::sync::Arc;

use palisade_protocol::Packet;

use crate::session::Session;

/// A phase handler: inspects the session's phase and either consumes the
/// packet (returning `true`, stopping the chain) or declines (`false`).
///
/// Handlers receive the session's owning `Arc` (not a bare reference) since
/// the Login handler must clone it into the hand-off message it sends to
/// Play.
#[async_trait::async_trait]
pub trait Dispatcher: Send + Sync {
    /// Attempts to handle `packet` against `session`. Returns `true` iff
    /// this handler consumed the packet.
    async fn dispatch(&self, session: &Arc<Session>, packet: &Packet) -> bool;
}

/// An ordered, immutable list of handlers, traversed in registration order
/// (Handshake, Login, Play) for every packet a session produces.
///
/// Retained as a flat list rather than a per-phase table for extensibility —
/// e.g. a future middleware that observes all packets regardless of phase.
pub struct DispatcherChain {
    handlers: Vec<Box<dyn Dispatcher>>,
}

impl DispatcherChain {
    /// Builds a chain from handlers in registration order.
    #[must_use]
    pub fn new(handlers: Vec<Box<dyn Dispatcher>>) -> Self {
        Self { handlers }
    }

    /// Dispatches `packet` to the first handler in the chain that consumes
    /// it. If none do, the packet is silently dropped (logged).
    pub async fn dispatch(&self, session: &Arc<Session>, packet: Packet) {
        for handler in &self.handlers {
            if handler.dispatch(session, &packet).await {
                return;
            }
        }
        log::debug!(
            "packet id {:#x} in phase {:?} from {} matched no handler, dropping",
            packet.id(),
            session.phase(),
            session.peer_addr()
        );
    }
}
