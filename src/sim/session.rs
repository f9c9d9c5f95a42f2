//! Platformer session: lifecycle and discrete operations
//!
//! The session exclusively owns [`SessionState`]. Hosts post intents, call
//! [`Session::tick`] once per simulation step, read [`Snapshot`]s and drain
//! [`GameEvent`]s. Requests that make no sense in the current state (jumping
//! mid-air, interacting on the title screen) are ignored, never reported.

use crate::consts::MAX_LEVEL;
use crate::levels::{BlockKind, InteractiveBlock, LevelSet};

use super::collision::within_reach;
use super::config::SessionConfig;
use super::geometry::Rect;
use super::state::{ActiveLevel, GameEvent, Intent, ScreenState, SessionState, Snapshot};

pub struct Session {
    pub(super) config: SessionConfig,
    pub(super) levels: LevelSet,
    pub(super) state: SessionState,
    pub(super) level: ActiveLevel,
    pub(super) events: Vec<GameEvent>,
}

impl Session {
    /// Create a session on the title screen
    pub fn new(levels: LevelSet, config: SessionConfig) -> Self {
        let first = levels.level(1).clone();
        Self {
            state: SessionState::new(first.spawn),
            level: ActiveLevel::new(first),
            config,
            levels,
            events: Vec::new(),
        }
    }

    /// Begin a new playthrough from level 1
    pub fn start(&mut self) {
        let first = self.levels.level(1).clone();
        self.state = SessionState::new(first.spawn);
        self.state.screen = ScreenState::Playing;
        self.level = ActiveLevel::new(first);
        self.events.clear();
        log::info!("Session started: {}", self.level.geometry.name);
    }

    /// Same as [`Session::start`], from any screen
    pub fn restart(&mut self) {
        self.start();
    }

    /// Apply a jump impulse if standing on a platform
    pub fn jump(&mut self) {
        if !self.state.is_playing() || !self.state.grounded {
            return;
        }
        self.state.velocity.y = self.config.jump_impulse;
        self.state.grounded = false;
        self.state.jumping = true;
        self.events.push(GameEvent::Jumped);
        log::debug!("Jump at x={:.0}", self.state.position.x);
    }

    /// Lose a life, respawning or ending the run
    pub fn lose_life(&mut self) {
        if !self.state.is_playing() {
            return;
        }
        self.state.lives = self.state.lives.saturating_sub(1);
        self.events.push(GameEvent::LifeLost {
            lives: self.state.lives,
        });
        log::debug!("Life lost, {} left", self.state.lives);

        if self.state.lives == 0 {
            self.state.screen = ScreenState::GameOver;
            self.events.push(GameEvent::GameOver);
            log::info!(
                "Game over on level {} with score {}",
                self.state.level,
                self.state.score
            );
        } else {
            let spawn = self.level.geometry.spawn;
            self.state.respawn(spawn);
        }
    }

    /// Move on to the next level, or win after the last one
    pub fn advance_level(&mut self) {
        if !self.state.is_playing() {
            return;
        }
        if self.state.level >= MAX_LEVEL {
            self.state.screen = ScreenState::Won;
            self.events.push(GameEvent::Won {
                score: self.state.score,
            });
            log::info!("Portfolio complete! Final score: {}", self.state.score);
            return;
        }

        self.state.level += 1;
        self.enter_level(self.state.level);
        self.events.push(GameEvent::LevelAdvanced {
            level: self.state.level,
        });
        log::info!("Entered {}", self.level.geometry.name);
    }

    /// Route an input intent
    pub fn apply_intent(&mut self, intent: Intent) {
        match intent {
            // Releases always clear the latch, even off-screen
            Intent::MoveLeft(false) => self.state.move_left_held = false,
            Intent::MoveRight(false) => self.state.move_right_held = false,
            _ if !self.state.is_playing() => {}
            Intent::MoveLeft(true) => self.state.move_left_held = true,
            Intent::MoveRight(true) => self.state.move_right_held = true,
            Intent::Jump => self.jump(),
            Intent::Interact => self.interact(),
        }
    }

    /// Close the open card, or hit the first "?" block within reach
    pub fn interact(&mut self) {
        if !self.state.is_playing() {
            return;
        }
        if self.state.open_block.take().is_some() {
            return;
        }

        let player = self.player_rect();
        let reach = self.config.interact_reach;
        let target = self
            .level
            .question_blocks()
            .find(|(_, b)| within_reach(&player, &b.rect, reach))
            .map(|(_, b)| b.id);

        if let Some(id) = target {
            self.hit_block(id);
        }
    }

    /// Hit or click an interactive block
    pub fn hit_block(&mut self, id: u32) {
        if !self.state.is_playing() {
            return;
        }
        let Some(index) = self.level.geometry.blocks.iter().position(|b| b.id == id) else {
            return;
        };

        if self.level.geometry.blocks[index].kind == BlockKind::Question {
            if self.level.hit[index] {
                return;
            }
            self.level.hit[index] = true;
            self.events.push(GameEvent::BlockHit { id });
            log::debug!("Question block {} hit", id);
        } else {
            self.events.push(GameEvent::Revealed { id });
        }
        self.state.open_block = Some(id);
    }

    /// Dismiss the open card
    pub fn close_card(&mut self) {
        self.state.open_block = None;
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            position: self.state.position,
            score: self.state.score,
            lives: self.state.lives,
            level: self.state.level,
            level_name: self.level.geometry.name.clone(),
            playing: self.state.is_playing(),
            screen: self.state.screen,
            facing: self.state.facing,
            grounded: self.state.grounded,
            jumping: self.state.jumping,
            open_block: self.state.open_block,
        }
    }

    /// Take all events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn active_level(&self) -> &ActiveLevel {
        &self.level
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Block whose card is open, if any
    pub fn open_block(&self) -> Option<&InteractiveBlock> {
        self.state
            .open_block
            .and_then(|id| self.level.geometry.block(id))
    }

    /// Follow a resized viewport: new sprite size and death line
    ///
    /// The lower-left anchor stays put, so the player keeps standing on
    /// whatever it stood on.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.config.apply_viewport(width, height);
        let max_x = self.config.max_x();
        self.state.position.x = self.state.position.x.clamp(0.0, max_x);
        log::debug!(
            "Viewport {}x{}: player {:?}",
            width,
            height,
            self.config.player_size()
        );
    }

    /// Falling past this y costs a life
    ///
    /// A short viewport never moves the line above the level's own floor.
    pub fn fall_line(&self) -> f32 {
        self.config
            .viewport_height
            .max(self.level.geometry.lowest_bottom())
    }

    /// Player bounding box in world space
    pub fn player_rect(&self) -> Rect {
        Rect::from_bottom_left(self.state.position, self.config.player_size())
    }

    /// Load a level fresh (flags reset, card closed) and respawn
    fn enter_level(&mut self, number: u8) {
        self.level = ActiveLevel::new(self.levels.level(number).clone());
        self.state.open_block = None;
        let spawn = self.level.geometry.spawn;
        self.state.respawn(spawn);
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut SessionState {
        &mut self.state
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(LevelSet::builtin(), SessionConfig::default())
    }
}
