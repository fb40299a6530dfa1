//! Fixed Join Game field values, named rather than scattered as magic
//! numbers through the login handler. Grounded on
//! `original_source/server/gamemode.go`'s `GameMode*`/`GameDimension*`/
//! `GameLevel*` constants.

/// Gamemode id sent in Join Game (1 = creative).
pub const GAMEMODE_CREATIVE: u8 = 1;
/// Dimension id sent in Join Game (0 = overworld).
pub const DIMENSION_OVERWORLD: i32 = 0;
/// `max_players` field; unused by this core so sent as 0.
pub const MAX_PLAYERS_UNUSED: u8 = 0;
/// Level type string sent in Join Game.
pub const LEVEL_TYPE_DEFAULT: &str = "default";
/// View distance, in chunks, sent in Join Game.
pub const VIEW_DISTANCE: i32 = 32;
/// Whether the reduced-debug-info flag is sent as set.
pub const REDUCED_DEBUG_INFO: bool = false;
/// Whether the respawn-screen flag is sent as enabled.
pub const ENABLE_RESPAWN_SCREEN: bool = true;

/// The brand string this server advertises over the `minecraft:brand`
/// plugin-message channel.
pub const SERVER_BRAND: &str = "go-mine";
