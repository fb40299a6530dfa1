//! The online-authentication identity lookup.
//!
//! Grounded on `steel/src/network/mojang_authentication.rs`, abstracted
//! behind a trait so the login handler's tests can substitute a fake
//! implementation — the example pack carries no HTTP-mocking crate.

use serde::Deserialize;
use uuid::Uuid;

use crate::error::AuthError;

const MOJANG_AUTH_URL: &str = "https://sessionserver.mojang.com/session/minecraft/hasJoined";

/// An authenticated player identity returned by a successful identity
/// lookup. Trimmed to the two fields this core's Login Success packet
/// needs — no textures/properties, since signed chat and skins are out of
/// scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedProfile {
    /// The player's Mojang account UUID.
    pub id: Uuid,
    /// The player's current name.
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct HasJoinedResponse {
    id: String,
    name: String,
}

/// Abstraction over the `hasJoined` online-authentication check, so login
/// handling can run against a real identity service or a test double.
#[async_trait::async_trait]
pub trait IdentityClient: Send + Sync {
    /// Verifies that `username` completed the client-side join handshake
    /// against the identity service using `server_hash`.
    async fn verify(&self, username: &str, server_hash: &str) -> Result<AuthenticatedProfile, AuthError>;
}

/// The production identity client: a blocking-from-the-caller's-perspective
/// HTTPS GET against Mojang's session server.
#[derive(Debug, Default, Clone, Copy)]
pub struct MojangIdentityClient;

#[async_trait::async_trait]
impl IdentityClient for MojangIdentityClient {
    async fn verify(&self, username: &str, server_hash: &str) -> Result<AuthenticatedProfile, AuthError> {
        let response = reqwest::get(format!(
            "{MOJANG_AUTH_URL}?username={username}&serverId={server_hash}"
        ))
        .await
        .map_err(|e| AuthError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AuthError::Unverified);
        }

        let body: HasJoinedResponse = response
            .json()
            .await
            .map_err(|_| AuthError::FailedParse)?;

        parse_hasjoined(body.id, body.name)
    }
}

fn parse_hasjoined(id: String, name: String) -> Result<AuthenticatedProfile, AuthError> {
    if id.len() != 32 {
        return Err(AuthError::Unverified);
    }
    let dashed = insert_uuid_dashes(&id);
    let id = Uuid::parse_str(&dashed).map_err(|_| AuthError::FailedParse)?;
    Ok(AuthenticatedProfile { id, name })
}

/// Reformats a 32-hex-char UUID string by inserting dashes at positions
/// 8/12/16/20, producing the canonical `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx`
/// form.
#[must_use]
pub fn insert_uuid_dashes(hex32: &str) -> String {
    format!(
        "{}-{}-{}-{}-{}",
        &hex32[0..8],
        &hex32[8..12],
        &hex32[12..16],
        &hex32[16..20],
        &hex32[20..32]
    )
}

/// A fixed-response test double, for exercising the login handler without a
/// network dependency.
#[cfg(test)]
pub struct FakeIdentityClient {
    /// The canned result returned for every `verify` call.
    pub result: Result<AuthenticatedProfile, AuthError>,
}

#[cfg(test)]
impl Clone for FakeIdentityClient {
    fn clone(&self) -> Self {
        Self {
            result: match &self.result {
                Ok(profile) => Ok(profile.clone()),
                Err(e) => Err(AuthError::RequestFailed(e.to_string())),
            },
        }
    }
}

#[cfg(test)]
#[async_trait::async_trait]
impl IdentityClient for FakeIdentityClient {
    async fn verify(&self, _username: &str, _server_hash: &str) -> Result<AuthenticatedProfile, AuthError> {
        self.result.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inserts_dashes_at_canonical_positions() {
        let hex32 = "11111111222233334444555555555555";
        assert_eq!(
            insert_uuid_dashes(hex32),
            "11111111-2222-3333-4444-555555555555"
        );
    }

    #[test]
    fn rejects_wrong_length_id() {
        let result = parse_hasjoined("tooshort".to_string(), "Notch".to_string());
        assert!(matches!(result, Err(AuthError::Unverified)));
    }
}
