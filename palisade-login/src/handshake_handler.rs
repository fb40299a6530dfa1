//! The Handshake-phase dispatcher: validates protocol version and advances
//! to Login.
//!
//! Grounded on `original_source/server/handshake.go`'s accept/reject policy.

use std::sync::Arc;

use palisade_protocol::packets::handshake::{self, Handshake};
use palisade_protocol::{ConnectionPhase, Packet};

use crate::dispatch::Dispatcher;
use crate::session::Session;

/// Minimum supported client protocol version.
pub const MIN_PROTOCOL_VERSION: i32 = 575;

/// Handles the single Handshake packet every connection starts with.
#[derive(Debug, Default)]
pub struct HandshakeHandler;

#[async_trait::async_trait]
impl Dispatcher for HandshakeHandler {
    async fn dispatch(&self, session: &Arc<Session>, packet: &Packet) -> bool {
        if session.phase() != ConnectionPhase::Handshake {
            return false;
        }

        if packet.id() != handshake::ID {
            log::warn!(
                "unexpected packet id {:#x} in Handshake phase from {}, closing",
                packet.id(),
                session.peer_addr()
            );
            session.close().await;
            return true;
        }

        let hello = match Handshake::decode(packet) {
            Ok(h) => h,
            Err(e) => {
                log::warn!("malformed handshake from {}: {e}", session.peer_addr());
                session.close().await;
                return true;
            }
        };

        if hello.protocol_version < MIN_PROTOCOL_VERSION {
            log::info!(
                "{} offered unsupported protocol version {}, closing",
                session.peer_addr(),
                hello.protocol_version
            );
            session.close().await;
            return true;
        }

        // `next_state` (Status vs Login) is observed but not acted on: the
        // Status sub-phase is out of scope, so every accepted handshake
        // advances straight to Login.
        session.set_state(ConnectionPhase::Login);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use palisade_utils::PacketWriter;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    async fn loopback_pair() -> (TcpStream, TcpStream) {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let connect = TcpStream::connect(addr);
        let accept = listener.accept();
        let (client, (server, _)) = tokio::join!(connect, accept);
        (client.unwrap(), server)
    }

    fn handshake_packet(protocol_version: i32, next_state: i32) -> Packet {
        let mut w = PacketWriter::new();
        w.write_varint(protocol_version);
        w.write_string("localhost").unwrap();
        w.write_u16(25565);
        w.write_varint(next_state);
        Packet::from_writer(handshake::ID, w)
    }

    #[tokio::test]
    async fn accepts_supported_protocol_version_and_advances_to_login() {
        let (_client, server) = loopback_pair().await;
        let (session, _read_half) = Session::new(server);

        let handled = HandshakeHandler
            .dispatch(&session, &handshake_packet(MIN_PROTOCOL_VERSION, 2))
            .await;

        assert!(handled);
        assert_eq!(session.phase(), ConnectionPhase::Login);
        assert!(!session.is_eof());
    }

    #[tokio::test]
    async fn rejects_protocol_version_below_minimum_and_closes() {
        let (mut client, server) = loopback_pair().await;
        let (session, _read_half) = Session::new(server);

        let handled = HandshakeHandler
            .dispatch(&session, &handshake_packet(MIN_PROTOCOL_VERSION - 1, 2))
            .await;

        assert!(handled);
        assert!(session.is_eof());

        let mut buf = [0u8; 1];
        let n = client.read(&mut buf).await.unwrap();
        assert_eq!(n, 0, "server must close the connection on rejection");
    }

    #[tokio::test]
    async fn declines_when_not_in_handshake_phase() {
        let (_client, server) = loopback_pair().await;
        let (session, _read_half) = Session::new(server);
        session.set_state(ConnectionPhase::Login);

        let handled = HandshakeHandler
            .dispatch(&session, &handshake_packet(MIN_PROTOCOL_VERSION, 2))
            .await;

        assert!(!handled);
    }
}
