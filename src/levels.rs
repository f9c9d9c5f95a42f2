//! Level geometry
//!
//! Each level is a static set of rectangles: platforms the player can stand
//! on, coins, and interactive blocks that reveal portfolio content. Levels
//! ship built in, or load from JSON with validation.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::Rect;

/// Interactive block types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    /// "?" block: hit once per visit, shows a short fact
    Question,
    /// Shows a skill with its proficiency
    Skill,
    /// Project platform, shows a project card
    Project,
    /// Trophy, shows an achievement
    Trophy,
}

/// A block the player can hit or click
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractiveBlock {
    /// Unique within its level
    pub id: u32,
    pub kind: BlockKind,
    pub rect: Rect,
    /// Catalog key for the content this block reveals
    pub payload: String,
}

/// Geometry of one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    /// Label shown in the HUD
    pub name: String,
    /// Player's lower-left anchor on entry and after losing a life
    pub spawn: Vec2,
    pub platforms: Vec<Rect>,
    #[serde(default)]
    pub collectibles: Vec<Rect>,
    #[serde(default)]
    pub blocks: Vec<InteractiveBlock>,
}

impl Level {
    pub fn block(&self, id: u32) -> Option<&InteractiveBlock> {
        self.blocks.iter().find(|b| b.id == id)
    }

    /// Largest platform bottom; the world never ends above it
    pub fn lowest_bottom(&self) -> f32 {
        self.platforms
            .iter()
            .map(Rect::bottom)
            .fold(f32::NEG_INFINITY, f32::max)
    }
}

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("invalid level JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("expected {expected} levels, found {found}")]
    WrongLevelCount { expected: usize, found: usize },
    #[error("level {level} has no platforms")]
    NoPlatforms { level: u8 },
    #[error("level {level} spawn ({x}, {y}) is outside the playable area")]
    SpawnOutOfBounds { level: u8, x: f32, y: f32 },
    #[error("level {level} reuses block id {id}")]
    DuplicateBlockId { level: u8, id: u32 },
}

/// The full, validated run of levels (always `MAX_LEVEL` long)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelSet {
    levels: Vec<Level>,
}

impl LevelSet {
    /// Validate and wrap a list of levels
    pub fn new(levels: Vec<Level>) -> Result<Self, LevelError> {
        let expected = usize::from(MAX_LEVEL);
        if levels.len() != expected {
            return Err(LevelError::WrongLevelCount {
                expected,
                found: levels.len(),
            });
        }

        for (level, number) in levels.iter().zip(1u8..) {
            if level.platforms.is_empty() {
                return Err(LevelError::NoPlatforms { level: number });
            }

            let spawn = level.spawn;
            let x_ok = spawn.x >= 0.0 && spawn.x <= LEVEL_WIDTH - PLAYER_WIDTH;
            // Checked against the level itself so it holds for any viewport
            let y_ok = spawn.y.is_finite() && spawn.y <= level.lowest_bottom();
            if !x_ok || !y_ok {
                return Err(LevelError::SpawnOutOfBounds {
                    level: number,
                    x: spawn.x,
                    y: spawn.y,
                });
            }

            let mut seen = Vec::with_capacity(level.blocks.len());
            for block in &level.blocks {
                if seen.contains(&block.id) {
                    return Err(LevelError::DuplicateBlockId {
                        level: number,
                        id: block.id,
                    });
                }
                seen.push(block.id);
            }
        }

        Ok(Self { levels })
    }

    /// Parse a JSON array of levels
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let levels: Vec<Level> = serde_json::from_str(json)?;
        let set = Self::new(levels)?;
        log::info!("Loaded {} levels from JSON", set.levels.len());
        Ok(set)
    }

    /// The stock portfolio levels
    pub fn builtin() -> Self {
        Self {
            levels: builtin_levels(),
        }
    }

    /// Level by 1-based number (clamped to the valid range)
    pub fn level(&self, number: u8) -> &Level {
        let index = usize::from(number.clamp(1, MAX_LEVEL)) - 1;
        &self.levels[index]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Level> {
        self.levels.iter()
    }
}

impl Default for LevelSet {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Top of the main floor in the stock levels
const GROUND_TOP: f32 = 560.0;
const GROUND_DEPTH: f32 = 80.0;
/// Ledges sit within a jump's slow apex so landings on them are reliable
const LEDGE_TOP: f32 = GROUND_TOP - 100.0;
/// Coin rows the player walks through
const COIN_ROW: f32 = GROUND_TOP - 45.0;
const COIN_ARC: f32 = GROUND_TOP - 130.0;

/// Floor spans `[start, end)`; gaps between spans are pits
fn ground(spans: &[(f32, f32)]) -> Vec<Rect> {
    spans
        .iter()
        .map(|&(start, end)| Rect::new(start, GROUND_TOP, end - start, GROUND_DEPTH))
        .collect()
}

fn ledge(x: f32, width: f32) -> Rect {
    Rect::new(x, LEDGE_TOP, width, 20.0)
}

fn coins(spots: &[(f32, f32)]) -> Vec<Rect> {
    spots
        .iter()
        .map(|&(x, y)| Rect::new(x, y, COIN_SIZE, COIN_SIZE))
        .collect()
}

fn blocks(kind: BlockKind, size: Vec2, entries: &[(f32, f32, &str)]) -> Vec<InteractiveBlock> {
    entries
        .iter()
        .zip(1u32..)
        .map(|(&(x, y, payload), id)| InteractiveBlock {
            id,
            kind,
            rect: Rect::new(x, y, size.x, size.y),
            payload: payload.to_string(),
        })
        .collect()
}

fn spawn() -> Vec2 {
    // Short drop onto the floor
    Vec2::new(SPAWN_X, GROUND_TOP - 40.0)
}

fn builtin_levels() -> Vec<Level> {
    let block = Vec2::new(40.0, 40.0);

    let about = Level {
        name: "Level 1: About Me".into(),
        spawn: spawn(),
        platforms: [ground(&[(0.0, 650.0), (750.0, 1500.0)]), vec![ledge(300.0, 160.0)]]
            .concat(),
        collectibles: coins(&[
            (200.0, COIN_ROW),
            (300.0, COIN_ROW),
            (400.0, COIN_ROW),
            (685.0, COIN_ARC),
            (900.0, COIN_ROW),
            (1000.0, COIN_ROW),
            (1100.0, COIN_ROW),
            (1200.0, COIN_ROW),
            (1300.0, COIN_ROW),
        ]),
        blocks: blocks(
            BlockKind::Question,
            block,
            &[
                (250.0, 380.0, "intro"),
                (550.0, 380.0, "education"),
                (1000.0, 380.0, "interests"),
            ],
        ),
    };

    let skills = Level {
        name: "Level 2: Skills".into(),
        spawn: spawn(),
        platforms: [
            ground(&[(0.0, 450.0), (560.0, 1000.0), (1100.0, 1500.0)]),
            vec![ledge(600.0, 150.0), ledge(1150.0, 150.0)],
        ]
        .concat(),
        collectibles: coins(&[
            (250.0, COIN_ROW),
            (350.0, COIN_ROW),
            (490.0, COIN_ARC),
            (700.0, COIN_ROW),
            (850.0, COIN_ROW),
            (1035.0, COIN_ARC),
            (1250.0, COIN_ROW),
        ]),
        blocks: blocks(
            BlockKind::Skill,
            block,
            &[
                (200.0, 380.0, "Python"),
                (330.0, 380.0, "JavaScript"),
                (650.0, 360.0, "CSS"),
                (780.0, 380.0, "HTML"),
                (1200.0, 360.0, "Web Dev"),
                (1330.0, 380.0, "Security"),
            ],
        ),
    };

    let projects = Level {
        name: "Level 3: Projects".into(),
        spawn: spawn(),
        platforms: [
            ground(&[(0.0, 500.0), (600.0, 1050.0), (1150.0, 1500.0)]),
            vec![ledge(850.0, 120.0)],
        ]
        .concat(),
        collectibles: coins(&[
            (200.0, COIN_ROW),
            (350.0, COIN_ROW),
            (535.0, COIN_ARC),
            (750.0, COIN_ROW),
            (1085.0, COIN_ARC),
            (1300.0, COIN_ROW),
        ]),
        blocks: blocks(
            BlockKind::Project,
            Vec2::new(120.0, 20.0),
            &[
                (250.0, 420.0, "project1"),
                (700.0, 420.0, "project2"),
                (1200.0, 420.0, "project3"),
            ],
        ),
    };

    let achievements = Level {
        name: "Level 4: Achievements".into(),
        spawn: spawn(),
        platforms: [
            ground(&[(0.0, 700.0), (800.0, 1500.0)]),
            vec![ledge(400.0, 140.0), ledge(1000.0, 140.0)],
        ]
        .concat(),
        collectibles: coins(&[
            (250.0, COIN_ROW),
            (450.0, COIN_ROW),
            (735.0, COIN_ARC),
            (950.0, COIN_ROW),
            (1150.0, COIN_ROW),
            (1300.0, COIN_ROW),
        ]),
        blocks: blocks(
            BlockKind::Trophy,
            Vec2::new(40.0, 50.0),
            &[
                (300.0, GROUND_TOP - 50.0, "iit-cert"),
                (900.0, GROUND_TOP - 50.0, "coding-badge"),
                (1250.0, GROUND_TOP - 50.0, "web-dev"),
            ],
        ),
    };

    let contact = Level {
        name: "Level 5: Contact".into(),
        spawn: spawn(),
        platforms: [
            ground(&[(0.0, 1500.0)]),
            vec![ledge(350.0, 150.0), ledge(800.0, 150.0)],
        ]
        .concat(),
        collectibles: coins(&[
            (200.0, COIN_ROW),
            (400.0, COIN_ROW),
            (600.0, COIN_ROW),
            (850.0, COIN_ROW),
            (1100.0, COIN_ROW),
            (1250.0, COIN_ROW),
        ]),
        blocks: Vec::new(),
    };

    vec![about, skills, projects, achievements, contact]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_levels_validate() {
        let levels = LevelSet::new(builtin_levels()).unwrap();
        assert_eq!(levels.iter().count(), usize::from(MAX_LEVEL));
        for level in levels.iter() {
            assert_eq!(level.spawn.x, SPAWN_X);
        }
    }

    #[test]
    fn test_level_lookup_is_one_based_and_clamped() {
        let levels = LevelSet::builtin();
        assert_eq!(levels.level(1).name, "Level 1: About Me");
        assert_eq!(levels.level(5).name, "Level 5: Contact");
        assert_eq!(levels.level(0).name, "Level 1: About Me");
        assert_eq!(levels.level(9).name, "Level 5: Contact");
    }

    #[test]
    fn test_json_roundtrip_of_builtin() {
        let json = serde_json::to_string(&builtin_levels()).unwrap();
        let levels = LevelSet::from_json(&json).unwrap();
        assert_eq!(levels, LevelSet::builtin());
    }

    #[test]
    fn test_json_wrong_count() {
        let json = serde_json::to_string(&builtin_levels()[..2]).unwrap();
        let err = LevelSet::from_json(&json).unwrap_err();
        assert!(matches!(
            err,
            LevelError::WrongLevelCount {
                expected: 5,
                found: 2
            }
        ));
    }

    #[test]
    fn test_json_parse_error() {
        let err = LevelSet::from_json("[{\"name\": 3}]").unwrap_err();
        assert!(matches!(err, LevelError::Parse(_)));
    }

    #[test]
    fn test_no_platforms_rejected() {
        let mut levels = builtin_levels();
        levels[2].platforms.clear();
        let err = LevelSet::new(levels).unwrap_err();
        assert!(matches!(err, LevelError::NoPlatforms { level: 3 }));
    }

    #[test]
    fn test_spawn_out_of_bounds_rejected() {
        let mut levels = builtin_levels();
        levels[0].spawn = Vec2::new(-5.0, 100.0);
        assert!(matches!(
            LevelSet::new(levels).unwrap_err(),
            LevelError::SpawnOutOfBounds { level: 1, .. }
        ));
    }

    #[test]
    fn test_spawn_below_world_rejected() {
        let mut levels = builtin_levels();
        let floor_bottom = levels[3].lowest_bottom();
        assert_eq!(floor_bottom, GROUND_TOP + GROUND_DEPTH);
        levels[3].spawn = Vec2::new(SPAWN_X, floor_bottom + 1.0);
        assert!(matches!(
            LevelSet::new(levels).unwrap_err(),
            LevelError::SpawnOutOfBounds { level: 4, .. }
        ));
    }

    #[test]
    fn test_duplicate_block_id_rejected() {
        let mut levels = builtin_levels();
        let dup = levels[1].blocks[0].clone();
        levels[1].blocks.push(dup);
        assert!(matches!(
            LevelSet::new(levels).unwrap_err(),
            LevelError::DuplicateBlockId { level: 2, id: 1 }
        ));
    }

    #[test]
    fn test_minimal_json_level_defaults() {
        let one = r#"{"name": "L", "spawn": [100.0, 500.0], "platforms": [{"pos": [0.0, 560.0], "size": [1500.0, 80.0]}]}"#;
        let json = format!("[{one},{one},{one},{one},{one}]");
        let levels = LevelSet::from_json(&json).unwrap();
        assert!(levels.level(3).collectibles.is_empty());
        assert!(levels.level(3).blocks.is_empty());
    }
}
