//! The minimal Play-phase dispatcher this core implements: client settings
//! (parsed and logged only) and the `minecraft:brand` plugin-message
//! handshake.

use std::sync::Arc;

use palisade_protocol::packets::play::{self, ClientSettings, PluginMessageIn, PluginMessageOut};
use palisade_protocol::{ConnectionPhase, Packet};

use crate::dispatch::Dispatcher;
use crate::session::Session;

/// Handles packet ids 0x05 (Client Settings) and 0x0B (Plugin Message) in
/// the Play phase. All other gameplay logic is out of scope for this core.
#[derive(Debug, Default)]
pub struct PlayHandler;

#[async_trait::async_trait]
impl Dispatcher for PlayHandler {
    async fn dispatch(&self, session: &Arc<Session>, packet: &Packet) -> bool {
        if session.phase() != ConnectionPhase::Play {
            return false;
        }

        match packet.id() {
            play::CLIENT_SETTINGS_ID => {
                match ClientSettings::decode(packet) {
                    Ok(settings) => log::debug!(
                        "{} client settings: locale={} view_distance={}",
                        session.peer_addr(),
                        settings.locale,
                        settings.view_distance
                    ),
                    Err(e) => log::warn!("malformed client settings from {}: {e}", session.peer_addr()),
                }
                true
            }
            play::PLUGIN_MESSAGE_SERVERBOUND_ID => {
                let Ok(message) = PluginMessageIn::decode(packet) else {
                    log::warn!("malformed plugin message from {}", session.peer_addr());
                    return true;
                };

                if message.channel == play::BRAND_CHANNEL {
                    let reply = PluginMessageOut::brand(palisade_protocol::game_constants::SERVER_BRAND);
                    if let Ok(reply_packet) = reply.encode() {
                        if let Err(e) = session.send_packet(&reply_packet).await {
                            log::debug!("failed to send brand reply to {}: {e}", session.peer_addr());
                            session.mark_eof();
                        }
                    }
                }
                true
            }
            _ => false,
        }
    }
}
