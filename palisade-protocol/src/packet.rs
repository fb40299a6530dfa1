//! The `Packet`: an immutable `(id, payload)` pair, and its framing.

use palisade_utils::{PacketReader, PacketWriter};

/// A parsed or to-be-sent packet: a non-negative id plus its raw payload.
///
/// Immutable after construction. Created by [`crate::frame::parse_frame`] on
/// receipt, or by a handler for emission, and dropped once dispatched or
/// sent.
#[derive(Debug, Clone)]
pub struct Packet {
    id: i32,
    payload: Vec<u8>,
}

impl Packet {
    /// Builds a packet from an id and a pre-encoded payload.
    #[must_use]
    pub fn new(id: i32, payload: Vec<u8>) -> Self {
        Self { id, payload }
    }

    /// Builds a packet from an id and a [`PacketWriter`]'s assembled bytes.
    #[must_use]
    pub fn from_writer(id: i32, writer: PacketWriter) -> Self {
        Self::new(id, writer.into_bytes())
    }

    /// The packet id.
    #[must_use]
    pub fn id(&self) -> i32 {
        self.id
    }

    /// The raw payload bytes.
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// A [`PacketReader`] positioned at the start of the payload.
    #[must_use]
    pub fn reader(&self) -> PacketReader<'_> {
        PacketReader::new(&self.payload)
    }

    /// Encodes this packet as a complete wire frame:
    /// `varint(length) || varint(id) || payload`, where `length` is the byte
    /// count of `varint(id) || payload`.
    #[must_use]
    pub fn encode_frame(&self) -> Vec<u8> {
        let mut id_and_payload = Vec::with_capacity(5 + self.payload.len());
        palisade_utils::encode_var_i32(self.id, &mut id_and_payload);
        id_and_payload.extend_from_slice(&self.payload);

        let mut frame = Vec::with_capacity(5 + id_and_payload.len());
        palisade_utils::encode_var_i32(id_and_payload.len() as i32, &mut frame);
        frame.extend_from_slice(&id_and_payload);
        frame
    }
}
