//! Per-phase packet structs: hand-written rather than macro-derived, since
//! the fixed small set of packets this core handles doesn't justify a
//! derive macro.

pub mod handshake;
pub mod login;
pub mod play;
