//! The Login-phase dispatcher: encryption handshake, online authentication,
//! cipher installation, and the login→play hand-off.
//!
//! Grounded on `original_source/server/login.go`'s `LoginServer` (the
//! `sessMap`-keyed per-session context, the `requestEncryption`/
//! `authenticate`/`loginSuccess`/`joinGame` sequence), adapted to generate a
//! fresh RSA key pair per login (spec.md §3/§4.8) rather than reuse a
//! server-wide key store.

use std::collections::HashMap;
use std::sync::Arc;

use palisade_crypto::EphemeralKeyPair;
use palisade_protocol::packets::login::{
    self, EncryptionRequest, EncryptionResponse, JoinGame, LoginStart, LoginSuccess,
};
use palisade_protocol::{ConnectionPhase, Packet};
use parking_lot::Mutex;
use rand::RngCore;
use tokio::sync::mpsc;

use crate::dispatch::Dispatcher;
use crate::entity_id::EntityIdAllocator;
use crate::handoff::HandoffMessage;
use crate::identity::IdentityClient;
use crate::session::Session;

/// Server-id string sent in the Encryption Request and hashed into the
/// server-id digest. Always empty in this core (no server-list ping / no
/// distinct server identity to advertise).
const SERVER_ID: &str = "";

/// Per-session login state: the ephemeral RSA key pair, claimed name, and
/// verify token. Dropped (and with it the private key) once login completes
/// or fails — spec.md's "destroyed/zeroed immediately after encryption
/// enablement".
struct LoginContext {
    key_pair: EphemeralKeyPair,
    player_name: String,
    verify_token: [u8; 4],
}

/// Handles packet ids 0 (Login Start) and 1 (Encryption Response) in the
/// Login phase.
pub struct LoginHandler<I: IdentityClient + 'static> {
    identity_client: Arc<I>,
    entity_ids: Arc<EntityIdAllocator>,
    handoff_tx: mpsc::Sender<HandoffMessage>,
    contexts: Mutex<HashMap<usize, LoginContext>>,
}

impl<I: IdentityClient + 'static> LoginHandler<I> {
    /// Builds a handler sharing `entity_ids` and `handoff_tx` with the rest
    /// of the server.
    #[must_use]
    pub fn new(
        identity_client: Arc<I>,
        entity_ids: Arc<EntityIdAllocator>,
        handoff_tx: mpsc::Sender<HandoffMessage>,
    ) -> Self {
        Self {
            identity_client,
            entity_ids,
            handoff_tx,
            contexts: Mutex::new(HashMap::new()),
        }
    }

    fn session_key(session: &Arc<Session>) -> usize {
        Arc::as_ptr(session) as usize
    }

    async fn handle_login_start(&self, session: &Arc<Session>, packet: &Packet) {
        let login_start = match LoginStart::decode(packet) {
            Ok(p) => p,
            Err(e) => {
                log::warn!("malformed Login Start from {}: {e}", session.peer_addr());
                session.close().await;
                return;
            }
        };

        let key_pair = match EphemeralKeyPair::generate() {
            Ok(kp) => kp,
            Err(e) => {
                log::warn!("RSA key generation failed for {}: {e}", session.peer_addr());
                session.close().await;
                return;
            }
        };

        let mut verify_token = [0u8; 4];
        rand::rng().fill_bytes(&mut verify_token);

        let request = EncryptionRequest {
            server_id: SERVER_ID.to_string(),
            public_key_der: key_pair.public_key_der().to_vec(),
            verify_token: verify_token.to_vec(),
        };

        self.contexts.lock().insert(
            Self::session_key(session),
            LoginContext {
                key_pair,
                player_name: login_start.player_name,
                verify_token,
            },
        );

        match request.encode() {
            Ok(packet) => {
                if let Err(e) = session.send_packet(&packet).await {
                    log::debug!("failed to send Encryption Request to {}: {e}", session.peer_addr());
                    session.mark_eof();
                }
            }
            Err(e) => {
                log::warn!("failed to encode Encryption Request: {e}");
                session.close().await;
            }
        }
    }

    async fn handle_encryption_response(&self, session: &Arc<Session>, packet: &Packet) {
        let response = match EncryptionResponse::decode(packet) {
            Ok(r) => r,
            Err(e) => {
                log::warn!("malformed Encryption Response from {}: {e}", session.peer_addr());
                session.close().await;
                return;
            }
        };

        let Some(context) = self.contexts.lock().remove(&Self::session_key(session)) else {
            log::warn!(
                "Encryption Response from {} with no pending Login Start, closing",
                session.peer_addr()
            );
            session.close().await;
            return;
        };

        let shared_secret = match context
            .key_pair
            .decrypt_shared_secret(&response.encrypted_shared_secret)
        {
            Ok(secret) => secret,
            Err(e) => {
                log::warn!("failed to decrypt shared secret from {}: {e}", session.peer_addr());
                session.close().await;
                return;
            }
        };

        // The verify token is decrypted here but, per spec.md §9, never
        // compared against `context.verify_token` — a known authentication
        // weakness in the protocol this core implements. Not silently fixed.
        let _ = context
            .key_pair
            .decrypt(&response.encrypted_verify_token);

        let server_hash = palisade_crypto::compute_server_hash(
            SERVER_ID,
            &shared_secret,
            context.key_pair.public_key_der(),
        );

        let profile = match self
            .identity_client
            .verify(&context.player_name, &server_hash)
            .await
        {
            Ok(profile) => profile,
            Err(e) => {
                log::info!(
                    "identity check failed for {} ({}): {e}",
                    context.player_name,
                    session.peer_addr()
                );
                session.close().await;
                return;
            }
        };
        // `context.key_pair` is dropped here, releasing the RSA private key
        // now that encryption no longer needs it.
        drop(context);

        session.set_cipher(&shared_secret);

        let login_success = LoginSuccess {
            uuid_with_dashes: profile.id.hyphenated().to_string(),
            player_name: profile.name.clone(),
        };
        let Ok(success_packet) = login_success.encode() else {
            log::warn!("failed to encode Login Success for {}", profile.name);
            session.close().await;
            return;
        };
        if let Err(e) = session.send_packet(&success_packet).await {
            log::debug!("failed to send Login Success to {}: {e}", session.peer_addr());
            session.mark_eof();
            return;
        }

        let entity_id = self.entity_ids.allocate();

        // Hand-off is a best-effort notification to Play; a full receiver
        // queue here would mean Play has fallen behind an unrelated login,
        // which spec.md §9 calls out as a known coupling point, not
        // something this dispatch should block or fail on indefinitely.
        if self
            .handoff_tx
            .send(HandoffMessage {
                session: Arc::clone(session),
                player_name: profile.name,
                entity_id,
            })
            .await
            .is_err()
        {
            log::warn!("no Play receiver ready for hand-off of {}", session.peer_addr());
        }

        let Ok(join_game) = (JoinGame {
            entity_id,
            hashed_seed: 0,
        })
        .encode() else {
            session.close().await;
            return;
        };
        if let Err(e) = session.send_packet(&join_game).await {
            log::debug!("failed to send Join Game to {}: {e}", session.peer_addr());
            session.mark_eof();
            return;
        }

        session.set_state(ConnectionPhase::Play);
    }
}

#[async_trait::async_trait]
impl<I: IdentityClient + 'static> Dispatcher for LoginHandler<I> {
    async fn dispatch(&self, session: &Arc<Session>, packet: &Packet) -> bool {
        if session.phase() != ConnectionPhase::Login {
            return false;
        }

        match packet.id() {
            login::LOGIN_START_ID => self.handle_login_start(session, packet).await,
            login::ENCRYPTION_ID => self.handle_encryption_response(session, packet).await,
            other => log::debug!(
                "unknown Login packet id {other:#x} from {}, ignoring",
                session.peer_addr()
            ),
        }
        true
    }
}
