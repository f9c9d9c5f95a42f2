//! Presentation helpers shared by the DOM renderer
//!
//! Everything here is plain data so it can be tested without a browser.

use crate::content::Content;
use crate::levels::BlockKind;
use crate::sim::{Facing, ScreenState, Snapshot};

/// What a revealed block shows, with placeholders filled in
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayCard {
    /// Dialogue box text
    Dialogue { text: String },
    /// Skill panel with a progress bar
    Skill {
        title: String,
        details: String,
        progress: u8,
    },
    /// Project modal
    Project {
        title: String,
        description: String,
        github: String,
        live: String,
    },
    /// Achievement modal
    Achievement { title: String, details: String },
}

impl DisplayCard {
    pub fn resolve(content: Content<'_>) -> Self {
        match content {
            Content::Fact(text) => Self::Dialogue {
                text: text.to_string(),
            },
            Content::Skill { name, info } => Self::Skill {
                title: name.to_string(),
                details: info.description.clone(),
                progress: info.level.min(100),
            },
            Content::Project(p) => Self::Project {
                title: p.title.clone(),
                description: p.description.clone(),
                github: p.github.clone(),
                live: p.live.clone(),
            },
            Content::Achievement(a) => Self::Achievement {
                title: a.title.clone(),
                details: a.description.clone(),
            },
            Content::Missing { kind, payload } => Self::placeholder(kind, payload),
        }
    }

    fn placeholder(kind: BlockKind, payload: &str) -> Self {
        match kind {
            BlockKind::Question => Self::Dialogue {
                text: "...".to_string(),
            },
            // The skill name is the payload itself, so it is still worth showing
            BlockKind::Skill => Self::Skill {
                title: payload.to_string(),
                details: "Skill details coming soon!".to_string(),
                progress: 50,
            },
            BlockKind::Project => Self::Project {
                title: "Project Title".to_string(),
                description: "Project description coming soon.".to_string(),
                github: "#".to_string(),
                live: "#".to_string(),
            },
            BlockKind::Trophy => Self::Achievement {
                title: "Achievement".to_string(),
                details: "Achievement details coming soon.".to_string(),
            },
        }
    }

    /// DOM id of the panel this card is shown in
    pub fn panel_id(&self) -> &'static str {
        match self {
            Self::Dialogue { .. } => "dialogue-box",
            Self::Skill { .. } => "skill-info",
            Self::Project { .. } => "project-modal",
            Self::Achievement { .. } => "achievement-modal",
        }
    }
}

/// Every panel a card can occupy
pub const CARD_PANEL_IDS: [&str; 4] = [
    "dialogue-box",
    "skill-info",
    "project-modal",
    "achievement-modal",
];

/// Top-level view for a screen state
pub fn screen_element_id(screen: ScreenState) -> &'static str {
    match screen {
        ScreenState::Start => "start-screen",
        ScreenState::Playing => "game-container",
        ScreenState::GameOver => "game-over-screen",
        ScreenState::Won => "win-screen",
    }
}

/// Every top-level view, for hiding the inactive ones
pub const SCREEN_IDS: [&str; 4] = [
    "start-screen",
    "game-container",
    "game-over-screen",
    "win-screen",
];

/// Attribute carrying a block's id on its DOM element
pub const BLOCK_ID_ATTR: &str = "data-block-id";

/// CSS class and label text of a block element
pub fn block_style(kind: BlockKind, payload: &str) -> (&'static str, &str) {
    match kind {
        BlockKind::Question => ("question-block", "?"),
        BlockKind::Skill => ("skill-block", payload),
        BlockKind::Project => ("project-platform", ""),
        BlockKind::Trophy => ("trophy", ""),
    }
}

/// HUD strings for one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudText {
    pub score: String,
    pub lives: String,
    pub level: String,
}

impl HudText {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self {
            score: snapshot.score.to_string(),
            lives: snapshot.lives.to_string(),
            level: snapshot.level_name.clone(),
        }
    }
}

/// Horizontal scroll keeping the player centered, clamped to the level
pub fn camera_offset(player_x: f32, viewport_width: f32, level_width: f32) -> f32 {
    let max_offset = (level_width - viewport_width).max(0.0);
    (player_x - viewport_width / 2.0).clamp(0.0, max_offset)
}

/// Upward shift keeping the level's floor on screen in a short viewport
pub fn vertical_offset(viewport_height: f32, world_bottom: f32) -> f32 {
    (viewport_height - world_bottom).min(0.0)
}

/// CSS transform flipping the sprite to face its direction
pub fn facing_transform(facing: Facing) -> &'static str {
    match facing {
        Facing::Left => "scaleX(-1)",
        Facing::Right => "scaleX(1)",
    }
}
