//! The connection's protocol phase, driving dispatch.

/// Where a session sits in the Handshake → Login → Play progression.
///
/// The wire protocol's Status sub-phase is collapsed into `Handshake` here:
/// a handshake that requests Status is rejected by the protocol-version
/// check rather than served, since server-list ping is out of scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionPhase {
    /// Awaiting the initial Handshake packet.
    Handshake,
    /// Running the encryption/authentication handshake.
    Login,
    /// Authenticated and handed off to gameplay traffic.
    Play,
}

impl ConnectionPhase {
    /// Whether `next` is a legal forward transition from `self`.
    ///
    /// Transitions are strictly monotonic: Handshake → Login → Play. Any
    /// other request (including staying put, or going backwards) is not a
    /// valid advance and callers should normalize to `Handshake` instead.
    #[must_use]
    pub fn can_advance_to(self, next: ConnectionPhase) -> bool {
        matches!(
            (self, next),
            (ConnectionPhase::Handshake, ConnectionPhase::Login)
                | (ConnectionPhase::Login, ConnectionPhase::Play)
        )
    }
}
