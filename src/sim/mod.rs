//! Deterministic platformer simulation
//!
//! All gameplay logic lives here. This module must stay headless:
//! - Fixed per-tick constants only
//! - Stable iteration order (level order for platforms, coins and blocks)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod config;
pub mod geometry;
pub mod session;
pub mod state;
pub mod tick;

pub use autopilot::autopilot_intents;
pub use collision::{Landing, find_landing, overlapping, within_reach};
pub use config::SessionConfig;
pub use geometry::Rect;
pub use session::Session;
pub use state::{
    ActiveLevel, Facing, GameEvent, Intent, ScreenState, SessionState, Snapshot,
};
