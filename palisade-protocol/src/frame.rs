//! Splits length-prefixed frames off the front of a byte stream.
//!
//! A frame is `varint(length) || varint(packet_id) || payload`, where
//! `length` counts the bytes of `varint(packet_id) || payload`. Grounded on
//! `original_source/net/packet/packet.go`'s `ParsePacket`, generalized to
//! return a distinct "need more" from "invalid" signal (that source conflates
//! them behind sentinel return counts of 0 and -1).

use palisade_utils::varint::{self, VarIntError};

use crate::packet::Packet;

/// The result of attempting to parse one frame off the front of a buffer.
#[derive(Debug)]
pub enum FrameOutcome {
    /// Not enough bytes are buffered yet to know the frame is complete.
    /// Nothing was consumed; the caller should wait for more input.
    NeedMore,
    /// The buffered bytes can never form a valid frame (overlong length
    /// varint, or a packet-id varint that doesn't fit within the declared
    /// frame length). The caller should close the connection.
    Invalid,
    /// A complete frame was parsed. `usize` is the number of bytes (from the
    /// start of the buffer) the frame occupied and that the caller must
    /// advance past.
    Ok(Packet, usize),
}

/// Attempts to parse one frame from the head of `buf`.
///
/// `buf` is not mutated; on [`FrameOutcome::Ok`] the caller is responsible
/// for draining the returned byte count from its own buffer.
#[must_use]
pub fn parse_frame(buf: &[u8]) -> FrameOutcome {
    let (length, length_bytes) = match varint::decode_var_i32(buf) {
        Ok(v) => v,
        Err(VarIntError::Incomplete) => return FrameOutcome::NeedMore,
        Err(VarIntError::Overlong) => return FrameOutcome::Invalid,
    };

    if length < 0 {
        return FrameOutcome::Invalid;
    }
    let length = length as usize;

    let remaining = buf.len() - length_bytes;
    if remaining < length {
        return FrameOutcome::NeedMore;
    }

    let frame_body = &buf[length_bytes..length_bytes + length];
    let (id, id_bytes) = match varint::decode_var_i32(frame_body) {
        Ok(v) => v,
        Err(VarIntError::Incomplete) => return FrameOutcome::Invalid,
        Err(VarIntError::Overlong) => return FrameOutcome::Invalid,
    };

    let payload = frame_body[id_bytes..].to_vec();
    let total_consumed = length_bytes + length;
    FrameOutcome::Ok(Packet::new(id, payload), total_consumed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_frame(id: i32, payload: &[u8]) -> Vec<u8> {
        Packet::new(id, payload.to_vec()).encode_frame()
    }

    #[test]
    fn parses_single_complete_frame() {
        let frame = sample_frame(5, b"hello");
        match parse_frame(&frame) {
            FrameOutcome::Ok(packet, consumed) => {
                assert_eq!(packet.id(), 5);
                assert_eq!(packet.payload(), b"hello");
                assert_eq!(consumed, frame.len());
            }
            other => panic!("expected Ok, got {other:?}"),
        }
    }

    #[test]
    fn need_more_on_truncated_length_varint() {
        assert!(matches!(parse_frame(&[0x80]), FrameOutcome::NeedMore));
        assert!(matches!(parse_frame(&[]), FrameOutcome::NeedMore));
    }

    #[test]
    fn need_more_when_payload_not_fully_buffered() {
        let frame = sample_frame(0, b"hello world");
        assert!(matches!(
            parse_frame(&frame[..frame.len() - 3]),
            FrameOutcome::NeedMore
        ));
    }

    #[test]
    fn invalid_on_overlong_length_varint() {
        let buf = [0xFF, 0xFF, 0xFF, 0xFF, 0xFF];
        assert!(matches!(parse_frame(&buf), FrameOutcome::Invalid));
    }

    #[test]
    fn fragmentation_resilience_across_split_points() {
        let mut stream = Vec::new();
        stream.extend(sample_frame(0, b"first"));
        stream.extend(sample_frame(1, b"second-packet"));
        stream.extend(sample_frame(2, b""));

        let mut recovered = Vec::new();
        // Feed the stream one byte at a time, simulating arbitrary TCP
        // fragmentation; every call before a frame completes must be
        // NeedMore, never Invalid.
        for split in 1..=stream.len() {
            let mut buf = &stream[..split.min(stream.len())];
            let mut consumed_total = 0;
            loop {
                match parse_frame(&buf[consumed_total..]) {
                    FrameOutcome::Ok(packet, n) => {
                        consumed_total += n;
                        if recovered.len() < 3 {
                            recovered.push((packet.id(), packet.payload().to_vec()));
                        }
                    }
                    FrameOutcome::NeedMore => break,
                    FrameOutcome::Invalid => panic!("unexpected invalid frame at split {split}"),
                }
            }
            buf = &stream[..split];
            let _ = buf;
        }

        assert_eq!(recovered.len(), 3);
        assert_eq!(recovered[0], (0, b"first".to_vec()));
        assert_eq!(recovered[1], (1, b"second-packet".to_vec()));
        assert_eq!(recovered[2], (2, Vec::new()));
    }
}
