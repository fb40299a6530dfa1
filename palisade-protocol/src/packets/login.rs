//! Login-phase packets.

use palisade_utils::{PacketWriter, ReadingError, WritingError};

use crate::game_constants;
use crate::packet::Packet;

/// Inbound id 0: Login Start.
pub const LOGIN_START_ID: i32 = 0x00;
/// Inbound id 1 / outbound id 1: Encryption Response / Encryption Request.
pub const ENCRYPTION_ID: i32 = 0x01;
/// Outbound id 2: Login Success.
pub const LOGIN_SUCCESS_ID: i32 = 0x02;
/// Outbound id 0x26: Join Game.
pub const JOIN_GAME_ID: i32 = 0x26;

/// `string player_name`.
#[derive(Debug, Clone)]
pub struct LoginStart {
    /// The name the client claims.
    pub player_name: String,
}

impl LoginStart {
    /// Decodes a Login Start packet's payload.
    pub fn decode(packet: &Packet) -> Result<Self, ReadingError> {
        let mut r = packet.reader();
        Ok(Self {
            player_name: r.read_string()?,
        })
    }
}

/// `string server_id, varint pk_len, bytes public_key_pkix_der, varint t_len, bytes verify_token`.
#[derive(Debug, Clone)]
pub struct EncryptionRequest {
    /// Always the empty string in this core.
    pub server_id: String,
    /// X.509 SubjectPublicKeyInfo DER encoding of the session's RSA public key.
    pub public_key_der: Vec<u8>,
    /// The 4 random verify-token bytes generated for this login.
    pub verify_token: Vec<u8>,
}

impl EncryptionRequest {
    /// Encodes this packet.
    ///
    /// # Errors
    /// Returns [`WritingError`] if `server_id` is implausibly long.
    pub fn encode(&self) -> Result<Packet, WritingError> {
        let mut w = PacketWriter::new();
        w.write_string(&self.server_id)?;
        w.write_varint(self.public_key_der.len() as i32);
        w.write_raw(&self.public_key_der);
        w.write_varint(self.verify_token.len() as i32);
        w.write_raw(&self.verify_token);
        Ok(Packet::from_writer(ENCRYPTION_ID, w))
    }
}

/// `varint sec_len, bytes encrypted_shared_secret, varint tok_len, bytes encrypted_verify_token`.
#[derive(Debug, Clone)]
pub struct EncryptionResponse {
    /// RSA-PKCS#1v1.5-encrypted 16-byte shared secret.
    pub encrypted_shared_secret: Vec<u8>,
    /// RSA-PKCS#1v1.5-encrypted echo of the verify token.
    pub encrypted_verify_token: Vec<u8>,
}

impl EncryptionResponse {
    /// Decodes an Encryption Response packet's payload.
    pub fn decode(packet: &Packet) -> Result<Self, ReadingError> {
        let mut r = packet.reader();
        let sec_len = r.read_varint()?;
        let encrypted_shared_secret = r.read_raw(sec_len.max(0) as usize)?.to_vec();
        let tok_len = r.read_varint()?;
        let encrypted_verify_token = r.read_raw(tok_len.max(0) as usize)?.to_vec();
        Ok(Self {
            encrypted_shared_secret,
            encrypted_verify_token,
        })
    }
}

/// `string uuid_with_dashes, string player_name` — the first packet written
/// under encryption.
#[derive(Debug, Clone)]
pub struct LoginSuccess {
    /// The authenticated player's canonical, dashed UUID string.
    pub uuid_with_dashes: String,
    /// The authenticated player's name.
    pub player_name: String,
}

impl LoginSuccess {
    /// Encodes this packet.
    ///
    /// # Errors
    /// Returns [`WritingError`] if either string is implausibly long.
    pub fn encode(&self) -> Result<Packet, WritingError> {
        let mut w = PacketWriter::new();
        w.write_string(&self.uuid_with_dashes)?;
        w.write_string(&self.player_name)?;
        Ok(Packet::from_writer(LOGIN_SUCCESS_ID, w))
    }
}

/// `int32 entity_id, uint8 gamemode, int32 dimension, int64 hashed_seed,
/// uint8 max_players, string level_type, varint view_distance,
/// bool reduced_debug, bool enable_respawn_screen`.
#[derive(Debug, Clone)]
pub struct JoinGame {
    /// The entity id freshly allocated for this player.
    pub entity_id: i32,
    /// World seed hash; this core has no world, so it is always 0.
    pub hashed_seed: i64,
}

impl JoinGame {
    /// Encodes this packet using the fixed [`game_constants`] field values.
    ///
    /// # Errors
    /// Returns [`WritingError`] if the level-type constant somehow exceeds
    /// the string-length encoding range (it never does).
    pub fn encode(&self) -> Result<Packet, WritingError> {
        let mut w = PacketWriter::new();
        w.write_i32(self.entity_id);
        w.write_u8(game_constants::GAMEMODE_CREATIVE);
        w.write_i32(game_constants::DIMENSION_OVERWORLD);
        w.write_i64(self.hashed_seed);
        w.write_u8(game_constants::MAX_PLAYERS_UNUSED);
        w.write_string(game_constants::LEVEL_TYPE_DEFAULT)?;
        w.write_varint(game_constants::VIEW_DISTANCE);
        w.write_bool(game_constants::REDUCED_DEBUG_INFO);
        w.write_bool(game_constants::ENABLE_RESPAWN_SCREEN);
        Ok(Packet::from_writer(JOIN_GAME_ID, w))
    }
}
