//! Session state and the types the session exchanges with its host
//!
//! `SessionState` is the single mutable record of a playthrough. Everything
//! per-level that changes (coins taken, "?" blocks hit) lives in
//! `ActiveLevel` and is rebuilt whenever a level is entered.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::levels::{BlockKind, InteractiveBlock, Level};

/// Coarse UI mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScreenState {
    /// Title screen, before the first start
    #[default]
    Start,
    Playing,
    /// Out of lives
    GameOver,
    /// Finished the last level
    Won,
}

/// Direction the sprite faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// Intents posted by the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Press (`true`) or release (`false`) of move-left
    MoveLeft(bool),
    /// Press (`true`) or release (`false`) of move-right
    MoveRight(bool),
    Jump,
    Interact,
}

/// Discrete events for the announcer (sound, logs)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped,
    Collected { value: u32 },
    /// A "?" block was hit for the first time this visit
    BlockHit { id: u32 },
    /// A skill, project or trophy card was opened
    Revealed { id: u32 },
    LevelAdvanced { level: u8 },
    LifeLost { lives: u8 },
    GameOver,
    Won { score: u32 },
}

/// Complete mutable state of a playthrough
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub screen: ScreenState,
    /// Current level, 1..=MAX_LEVEL
    pub level: u8,
    pub score: u32,
    pub lives: u8,
    /// Lower-left anchor: `y` is the player's bottom edge (y-down world)
    pub position: Vec2,
    /// Only `y` is integrated; horizontal movement is a per-tick delta
    pub velocity: Vec2,
    /// Set when the last collision pass found a platform underneath
    pub grounded: bool,
    /// Set by a jump, cleared on landing
    pub jumping: bool,
    pub move_left_held: bool,
    pub move_right_held: bool,
    pub facing: Facing,
    /// Block whose card is currently shown
    pub open_block: Option<u32>,
}

impl SessionState {
    /// Fresh state for a new playthrough, standing at `spawn`
    pub fn new(spawn: Vec2) -> Self {
        Self {
            screen: ScreenState::Start,
            level: 1,
            score: 0,
            lives: STARTING_LIVES,
            position: spawn,
            velocity: Vec2::ZERO,
            grounded: false,
            jumping: false,
            move_left_held: false,
            move_right_held: false,
            facing: Facing::Right,
            open_block: None,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.screen == ScreenState::Playing
    }

    /// Put the player back at a spawn point, at rest
    pub fn respawn(&mut self, spawn: Vec2) {
        self.position = spawn;
        self.velocity = Vec2::ZERO;
        self.grounded = false;
        self.jumping = false;
    }
}

/// Runtime flags of the level being played
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveLevel {
    pub geometry: Level,
    /// Parallel to `geometry.collectibles`
    pub collected: Vec<bool>,
    /// Parallel to `geometry.blocks`; only meaningful for question blocks
    pub hit: Vec<bool>,
}

impl ActiveLevel {
    pub fn new(geometry: Level) -> Self {
        let collected = vec![false; geometry.collectibles.len()];
        let hit = vec![false; geometry.blocks.len()];
        Self {
            geometry,
            collected,
            hit,
        }
    }

    pub fn remaining_collectibles(&self) -> usize {
        self.collected.iter().filter(|c| !**c).count()
    }

    /// Question blocks in level order, with their index
    pub fn question_blocks(&self) -> impl Iterator<Item = (usize, &InteractiveBlock)> {
        self.geometry
            .blocks
            .iter()
            .enumerate()
            .filter(|(_, b)| b.kind == BlockKind::Question)
    }
}

/// Read-only view handed to the renderer once per frame
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub position: Vec2,
    pub score: u32,
    pub lives: u8,
    pub level: u8,
    pub level_name: String,
    pub playing: bool,
    pub screen: ScreenState,
    pub facing: Facing,
    pub grounded: bool,
    pub jumping: bool,
    pub open_block: Option<u32>,
}
