//! # Palisade Protocol
//!
//! Wire-level types for the handshake/login/early-play phases: the `Packet`
//! type, the length-prefixed frame codec, the connection-phase enum, the
//! fixed Join Game field values, and the hand-written packet structs.

pub mod error;
pub mod frame;
pub mod game_constants;
pub mod packet;
pub mod packets;
pub mod phase;

pub use error::PacketError;
pub use frame::{FrameOutcome, parse_frame};
pub use packet::Packet;
pub use phase::ConnectionPhase;
