//! Pixel Portfolio - a portfolio you play as a 2D platformer
//!
//! Core modules:
//! - `sim`: Platformer session (movement, collisions, lives, level progression)
//! - `levels`: Level geometry and its JSON loader
//! - `content`: Portfolio data looked up by block payload
//! - `input`: Keyboard mapping to game intents
//! - `presentation`: HUD text, display cards, camera projection
//! - `renderer`: DOM renderer (wasm only)
//! - `audio`: Procedural sound effects
//! - `settings`: Player preferences

pub mod audio;
pub mod content;
pub mod input;
pub mod levels;
pub mod presentation;
#[cfg(target_arch = "wasm32")]
pub mod renderer;
pub mod settings;
pub mod sim;

pub use content::Catalog;
pub use levels::{Level, LevelError, LevelSet};
pub use settings::Settings;
pub use sim::{Session, SessionConfig};

/// Game configuration constants
///
/// Movement values are per simulation tick, distances in CSS pixels.
pub mod consts {
    /// Fixed simulation timestep (one tick per 60 Hz frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Downward acceleration added to vertical velocity every tick
    pub const GRAVITY: f32 = 0.8;
    /// Vertical velocity set by a jump (negative is up)
    pub const JUMP_IMPULSE: f32 = -15.0;
    /// Horizontal distance per tick while a direction is held
    pub const MOVE_SPEED: f32 = 5.0;

    /// World width of every level
    pub const LEVEL_WIDTH: f32 = 1500.0;
    /// Reaching `LEVEL_WIDTH - EXIT_MARGIN` completes the level
    pub const EXIT_MARGIN: f32 = 100.0;
    /// Default viewport height, below which the player loses a life
    pub const VIEWPORT_HEIGHT: f32 = 720.0;
    /// Viewports this narrow or narrower get the small player sprite
    pub const MOBILE_BREAKPOINT: f32 = 768.0;

    /// Player sprite
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 60.0;
    pub const PLAYER_WIDTH_MOBILE: f32 = 30.0;
    pub const PLAYER_HEIGHT_MOBILE: f32 = 45.0;

    /// Band below a platform top in which a falling player still lands
    pub const LAND_TOLERANCE: f32 = 10.0;
    /// Horizontal reach for Enter-key interaction with question blocks
    pub const INTERACT_REACH: f32 = 50.0;

    /// Score per coin
    pub const COLLECTIBLE_VALUE: u32 = 10;
    pub const COIN_SIZE: f32 = 30.0;

    pub const MAX_LEVEL: u8 = 5;
    pub const STARTING_LIVES: u8 = 3;
    /// Every level spawns the player at this x
    pub const SPAWN_X: f32 = 100.0;
}
