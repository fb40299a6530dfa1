//! Login-phase error taxonomy: identity-service failures.

use thiserror::Error;

/// Errors from the identity-service lookup (`hasJoined`).
#[derive(Debug, Error)]
pub enum AuthError {
    /// The HTTP request itself failed (network error, non-2xx status).
    #[error("identity service request failed: {0}")]
    RequestFailed(String),
    /// The response body did not parse as the expected JSON shape.
    #[error("failed to parse identity service response")]
    FailedParse,
    /// The response parsed but the player is not verified (client never
    /// actually joined, or server-id hash mismatch) — Mojang's `id` field
    /// length must be exactly 32 hex characters; anything else means "no".
    #[error("player not authenticated")]
    Unverified,
}
