//! # Palisade Login
//!
//! The per-connection session, dispatcher chain, and phase handlers that
//! carry a client through handshake, login, and hand-off to play.

pub mod dispatch;
pub mod entity_id;
pub mod error;
pub mod handoff;
pub mod handshake_handler;
pub mod identity;
pub mod login_handler;
pub mod play_handler;
pub mod session;

pub use dispatch::{Dispatcher, DispatcherChain};
pub use entity_id::EntityIdAllocator;
pub use error::AuthError;
pub use handoff::HandoffMessage;
pub use handshake_handler::HandshakeHandler;
pub use identity::{AuthenticatedProfile, IdentityClient, MojangIdentityClient};
pub use login_handler::LoginHandler;
pub use play_handler::PlayHandler;
pub use session::Session;
