//! Handshake-phase packets.

use palisade_utils::ReadingError;

use crate::packet::Packet;

/// Handshake packet id 0, the only packet this phase accepts.
pub const ID: i32 = 0x00;

/// `varint protocol_version, string server_address, uint16 port, varint next_state`.
#[derive(Debug, Clone)]
pub struct Handshake {
    /// The client's declared protocol version.
    pub protocol_version: i32,
    /// The address the client connected to, as it typed it.
    pub server_address: String,
    /// The port the client connected to.
    pub server_port: u16,
    /// 1 = Status, 2 = Login. Observed but not acted on; see module docs.
    pub next_state: i32,
}

impl Handshake {
    /// Decodes a Handshake packet's payload.
    pub fn decode(packet: &Packet) -> Result<Self, ReadingError> {
        let mut r = packet.reader();
        Ok(Self {
            protocol_version: r.read_varint()?,
            server_address: r.read_string()?,
            server_port: r.read_u16()?,
            next_state: r.read_varint()?,
        })
    }
}
