//! Tunable session parameters
//!
//! Defaults come from [`crate::consts`]. Only the viewport-derived values
//! (player size, fall-death line) differ between hosts.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Parameters the simulation reads every tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub gravity: f32,
    pub jump_impulse: f32,
    pub move_speed: f32,
    pub level_width: f32,
    pub exit_margin: f32,
    pub player_width: f32,
    pub player_height: f32,
    pub land_tolerance: f32,
    pub interact_reach: f32,
    pub collectible_value: u32,
    /// Falling past this y costs a life, unless the level's platforms
    /// reach further down
    pub viewport_height: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            move_speed: MOVE_SPEED,
            level_width: LEVEL_WIDTH,
            exit_margin: EXIT_MARGIN,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            land_tolerance: LAND_TOLERANCE,
            interact_reach: INTERACT_REACH,
            collectible_value: COLLECTIBLE_VALUE,
            viewport_height: VIEWPORT_HEIGHT,
        }
    }
}

impl SessionConfig {
    /// Config for a browser viewport, shrinking the sprite on narrow screens
    pub fn for_viewport(width: f32, height: f32) -> Self {
        let mut config = Self::default();
        config.apply_viewport(width, height);
        config
    }

    /// Replace only the viewport-derived values, keeping gameplay tunables
    pub fn apply_viewport(&mut self, width: f32, height: f32) {
        let (player_width, player_height) = if width <= MOBILE_BREAKPOINT {
            (PLAYER_WIDTH_MOBILE, PLAYER_HEIGHT_MOBILE)
        } else {
            (PLAYER_WIDTH, PLAYER_HEIGHT)
        };
        self.player_width = player_width;
        self.player_height = player_height;
        self.viewport_height = height;
    }

    pub fn player_size(&self) -> Vec2 {
        Vec2::new(self.player_width, self.player_height)
    }

    /// Largest x the player's anchor may take
    pub fn max_x(&self) -> f32 {
        self.level_width - self.player_width
    }

    /// Crossing this x completes the level
    pub fn exit_x(&self) -> f32 {
        self.level_width - self.exit_margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_viewport_desktop() {
        let config = SessionConfig::for_viewport(1280.0, 800.0);
        assert_eq!(config.player_size(), Vec2::new(40.0, 60.0));
        assert_eq!(config.viewport_height, 800.0);
        assert_eq!(config.gravity, GRAVITY);
    }

    #[test]
    fn test_for_viewport_mobile() {
        let config = SessionConfig::for_viewport(768.0, 640.0);
        assert_eq!(config.player_size(), Vec2::new(30.0, 45.0));
        assert_eq!(config.max_x(), LEVEL_WIDTH - 30.0);
    }

    #[test]
    fn test_apply_viewport_keeps_tunables() {
        let mut config = SessionConfig {
            gravity: 1.2,
            ..SessionConfig::default()
        };
        config.apply_viewport(600.0, 500.0);
        assert_eq!(config.player_size(), Vec2::new(30.0, 45.0));
        assert_eq!(config.viewport_height, 500.0);
        assert_eq!(config.gravity, 1.2);

        config.apply_viewport(1280.0, 800.0);
        assert_eq!(config.player_size(), Vec2::new(40.0, 60.0));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: SessionConfig = serde_json::from_str(r#"{"viewport_height": 900.0}"#).unwrap();
        assert_eq!(config.viewport_height, 900.0);
        assert_eq!(config.exit_x(), 1400.0);
    }
}
