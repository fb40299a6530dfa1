//! # Palisade Utils
//!
//! Low-level, protocol-agnostic building blocks shared by the rest of the
//! workspace: the varint codec and the big-endian packet buffer.

pub mod buffer;
pub mod error;
pub mod varint;

pub use buffer::{PacketReader, PacketWriter};
pub use error::{ReadingError, WritingError};
pub use varint::{VarIntError, decode_var_i32, decode_var_i64, encode_var_i32, encode_var_i64};
