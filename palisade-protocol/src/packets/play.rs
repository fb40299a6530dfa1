//! Play-phase packets handled by this core's minimal scope.

use palisade_utils::{PacketWriter, ReadingError, WritingError};

use crate::packet::Packet;

/// Inbound id 0x05: Client Settings.
pub const CLIENT_SETTINGS_ID: i32 = 0x05;
/// Inbound id 0x0B: Plugin Message (serverbound).
pub const PLUGIN_MESSAGE_SERVERBOUND_ID: i32 = 0x0B;
/// Outbound id 0x19: Plugin Message (clientbound).
pub const PLUGIN_MESSAGE_CLIENTBOUND_ID: i32 = 0x19;

/// The channel used for the brand handshake that every vanilla-compatible
/// client and server perform on entering Play.
pub const BRAND_CHANNEL: &str = "minecraft:brand";

/// `string locale, int8 view_distance, varint chat_mode, bool chat_colors,
/// uint8 displayed_skin_parts, varint main_hand`.
///
/// Parsed and logged only; no game-state mutation happens in this core.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// The client's selected locale, e.g. `"en_US"`.
    pub locale: String,
    /// Requested render/view distance in chunks.
    pub view_distance: i8,
    /// Chat visibility mode (enabled/commands-only/hidden).
    pub chat_mode: i32,
    /// Whether the client renders colored chat.
    pub chat_colors: bool,
    /// Bitmask of which skin layers the client displays.
    pub displayed_skin_parts: u8,
    /// 0 = left, 1 = right.
    pub main_hand: i32,
}

impl ClientSettings {
    /// Decodes a Client Settings packet's payload.
    pub fn decode(packet: &Packet) -> Result<Self, ReadingError> {
        let mut r = packet.reader();
        Ok(Self {
            locale: r.read_string()?,
            view_distance: r.read_i8()?,
            chat_mode: r.read_varint()?,
            chat_colors: r.read_bool()?,
            displayed_skin_parts: r.read_u8()?,
            main_hand: r.read_varint()?,
        })
    }
}

/// `string channel, bytes remainder`.
#[derive(Debug, Clone)]
pub struct PluginMessageIn {
    /// The plugin-message channel name.
    pub channel: String,
    /// The remainder of the payload, uninterpreted.
    pub data: Vec<u8>,
}

impl PluginMessageIn {
    /// Decodes a serverbound Plugin Message packet's payload.
    pub fn decode(packet: &Packet) -> Result<Self, ReadingError> {
        let mut r = packet.reader();
        let channel = r.read_string()?;
        let data = r.read_remaining().to_vec();
        Ok(Self { channel, data })
    }
}

/// `string channel, string payload` — this core only ever sends the brand
/// string as the payload.
#[derive(Debug, Clone)]
pub struct PluginMessageOut {
    /// The plugin-message channel name.
    pub channel: String,
    /// The brand string advertised to the client.
    pub brand: String,
}

impl PluginMessageOut {
    /// Builds the `minecraft:brand` reply packet.
    #[must_use]
    pub fn brand(brand: &str) -> Self {
        Self {
            channel: BRAND_CHANNEL.to_string(),
            brand: brand.to_string(),
        }
    }

    /// Encodes this packet.
    ///
    /// # Errors
    /// Returns [`WritingError`] if either string is implausibly long.
    pub fn encode(&self) -> Result<Packet, WritingError> {
        let mut w = PacketWriter::new();
        w.write_string(&self.channel)?;
        w.write_string(&self.brand)?;
        Ok(Packet::from_writer(PLUGIN_MESSAGE_CLIENTBOUND_ID, w))
    }
}
