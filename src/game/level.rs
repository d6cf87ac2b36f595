//! Level Geometry and Loading
//!
//! Levels arrive from a [`LevelSource`] as plain descriptors (spawns plus
//! two rectangle layers) and are validated into a [`LevelContext`] before
//! the simulation ever sees them. A level that fails validation never
//! starts.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::rect::Rect;
use crate::core::vec2::Vec2;
use crate::game::actor::WallMode;

/// Level loading errors. All are fatal before the first tick.
#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    /// Index past the end of the catalog.
    #[error("Level {index} out of range (catalog has {count})")]
    OutOfRange {
        /// Requested index
        index: usize,
        /// Levels available
        count: usize,
    },

    /// Catalog with no levels.
    #[error("Level catalog is empty")]
    EmptyCatalog,

    /// A rectangle with negative or non-finite extents.
    #[error("Level {level}: malformed {layer} rectangle #{index}: {rect:?}")]
    MalformedRect {
        /// Level index
        level: usize,
        /// Layer name
        layer: &'static str,
        /// Position in the layer
        index: usize,
        /// The rectangle
        rect: Rect,
    },

    /// Spawn point with non-finite coordinates.
    #[error("Level {level}: invalid spawn point {what}")]
    InvalidSpawn {
        /// Level index
        level: usize,
        /// Which spawn
        what: String,
    },

    /// Level declares more hostiles than it lists.
    #[error("Level {level}: expected {expected} hostile spawns, found {found}")]
    MissingHostileSpawns {
        /// Level index
        level: usize,
        /// Declared count
        expected: usize,
        /// Listed count
        found: usize,
    },

    /// No goal zones, so the level cannot be completed.
    #[error("Level {level}: goal layer is empty")]
    NoGoals {
        /// Level index
        level: usize,
    },

    /// Catalog file could not be read.
    #[error("Failed to read level catalog: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog file is not valid JSON.
    #[error("Failed to parse level catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

// =============================================================================
// DESCRIPTORS
// =============================================================================

/// One hostile spawn entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HostileSpawn {
    /// Spawn position (top-left of the bounding box)
    pub position: Vec2,
    /// Wall behaviour override
    #[serde(default)]
    pub wall_mode: Option<WallMode>,
    /// Chase speed override
    #[serde(default)]
    pub speed: Option<f32>,
}

impl HostileSpawn {
    /// Spawn with config defaults.
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            wall_mode: None,
            speed: None,
        }
    }
}

/// Raw level data as the map collaborator provides it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelDescriptor {
    /// Map resource identifier (for the renderer)
    pub map_file: String,
    /// Player spawn
    pub player_spawn: Vec2,
    /// Declared number of hostiles, checked against `hostile_spawns`
    #[serde(default)]
    pub expected_hostiles: Option<usize>,
    /// Hostile spawns, in spawn order
    pub hostile_spawns: Vec<HostileSpawn>,
    /// Wall layer
    pub walls: Vec<Rect>,
    /// Goal layer
    pub goals: Vec<Rect>,
}

/// Immutable rectangle layers of a level.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StaticGeometry {
    /// Impassable walls
    pub walls: Vec<Rect>,
    /// Goal zones
    pub goals: Vec<Rect>,
}

/// A validated, ready-to-simulate level.
#[derive(Clone, Debug, PartialEq)]
pub struct LevelContext {
    /// This level's index
    pub index: usize,
    /// Index of the last level; reaching its goal wins the game
    pub final_index: usize,
    /// Map resource identifier
    pub map_file: String,
    /// Player spawn
    pub player_spawn: Vec2,
    /// Hostile spawns, in spawn order
    pub hostile_spawns: Vec<HostileSpawn>,
    /// Wall and goal layers
    pub geometry: StaticGeometry,
}

impl LevelContext {
    /// Validate a descriptor.
    pub fn from_descriptor(index: usize, final_index: usize, desc: LevelDescriptor) -> Result<Self, LevelError> {
        if !desc.player_spawn.is_finite() {
            return Err(LevelError::InvalidSpawn { level: index, what: "player".to_string() });
        }

        for (i, spawn) in desc.hostile_spawns.iter().enumerate() {
            let speed_ok = spawn.speed.map_or(true, |s| s.is_finite() && s >= 0.0);
            if !spawn.position.is_finite() || !speed_ok {
                return Err(LevelError::InvalidSpawn { level: index, what: format!("hostile #{i}") });
            }
        }

        if let Some(expected) = desc.expected_hostiles {
            if desc.hostile_spawns.len() < expected {
                return Err(LevelError::MissingHostileSpawns {
                    level: index,
                    expected,
                    found: desc.hostile_spawns.len(),
                });
            }
        }

        check_layer(index, "wall", &desc.walls)?;
        check_layer(index, "goal", &desc.goals)?;

        if desc.goals.is_empty() {
            return Err(LevelError::NoGoals { level: index });
        }

        Ok(Self {
            index,
            final_index,
            map_file: desc.map_file,
            player_spawn: desc.player_spawn,
            hostile_spawns: desc.hostile_spawns,
            geometry: StaticGeometry {
                walls: desc.walls,
                goals: desc.goals,
            },
        })
    }

    /// Is this the last level?
    #[inline]
    pub fn is_final(&self) -> bool {
        self.index >= self.final_index
    }
}

fn check_layer(level: usize, layer: &'static str, rects: &[Rect]) -> Result<(), LevelError> {
    match rects.iter().position(|r| !r.is_well_formed()) {
        Some(index) => Err(LevelError::MalformedRect {
            level,
            layer,
            index,
            rect: rects[index],
        }),
        None => Ok(()),
    }
}

// =============================================================================
// LEVEL SOURCES
// =============================================================================

/// Map collaborator: hands out level descriptors by index.
pub trait LevelSource {
    /// Number of levels.
    fn level_count(&self) -> usize;

    /// Descriptor for one level.
    fn descriptor(&self, index: usize) -> Result<LevelDescriptor, LevelError>;

    /// Validate every level up front so no bad level is found mid-game.
    fn validate(&self) -> Result<(), LevelError> {
        let count = self.level_count();
        if count == 0 {
            return Err(LevelError::EmptyCatalog);
        }
        for index in 0..count {
            LevelContext::from_descriptor(index, count - 1, self.descriptor(index)?)?;
        }
        Ok(())
    }

    /// Load and validate one level.
    fn load(&self, index: usize) -> Result<LevelContext, LevelError> {
        let count = self.level_count();
        if count == 0 {
            return Err(LevelError::EmptyCatalog);
        }
        if index >= count {
            return Err(LevelError::OutOfRange { index, count });
        }

        let desc = self.descriptor(index)?;
        let level = LevelContext::from_descriptor(index, count - 1, desc)?;
        info!(
            level = index,
            map = %level.map_file,
            walls = level.geometry.walls.len(),
            hostiles = level.hostile_spawns.len(),
            "level loaded"
        );
        Ok(level)
    }
}

/// In-memory catalog of levels, loadable from JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelCatalog {
    /// Levels in play order
    pub levels: Vec<LevelDescriptor>,
}

impl LevelCatalog {
    /// Parse a catalog and validate every level.
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let catalog: LevelCatalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Read a catalog file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// The five built-in levels.
    pub fn builtin() -> Self {
        let levels = (0..5).map(builtin_level).collect();
        Self { levels }
    }
}

impl LevelSource for LevelCatalog {
    fn level_count(&self) -> usize {
        self.levels.len()
    }

    fn descriptor(&self, index: usize) -> Result<LevelDescriptor, LevelError> {
        self.levels.get(index).cloned().ok_or(LevelError::OutOfRange {
            index,
            count: self.levels.len(),
        })
    }
}

const ARENA_WIDTH: f32 = 640.0;
const ARENA_HEIGHT: f32 = 480.0;
const WALL_THICKNESS: f32 = 16.0;

/// Outer boundary walls of the arena.
fn boundary_walls() -> Vec<Rect> {
    vec![
        Rect::new(0.0, 0.0, ARENA_WIDTH, WALL_THICKNESS),
        Rect::new(0.0, ARENA_HEIGHT - WALL_THICKNESS, ARENA_WIDTH, WALL_THICKNESS),
        Rect::new(0.0, 0.0, WALL_THICKNESS, ARENA_HEIGHT),
        Rect::new(ARENA_WIDTH - WALL_THICKNESS, 0.0, WALL_THICKNESS, ARENA_HEIGHT),
    ]
}

fn builtin_level(index: usize) -> LevelDescriptor {
    let mut walls = boundary_walls();

    // Alternating baffles; one more pair per level
    for i in 0..=index {
        let x = 120.0 + i as f32 * 90.0;
        if i % 2 == 0 {
            walls.push(Rect::new(x, WALL_THICKNESS, WALL_THICKNESS, 320.0));
        } else {
            walls.push(Rect::new(x, ARENA_HEIGHT - WALL_THICKNESS - 320.0, WALL_THICKNESS, 320.0));
        }
    }

    let hostile_spawns: Vec<HostileSpawn> = (0..=index.min(3))
        .map(|i| HostileSpawn::at(520.0 + (i % 2) as f32 * 40.0, 60.0 + i as f32 * 100.0))
        .collect();

    LevelDescriptor {
        map_file: format!("maps/level{}.tmx", index + 1),
        player_spawn: Vec2::new(40.0, 420.0),
        expected_hostiles: Some(hostile_spawns.len()),
        hostile_spawns,
        walls,
        goals: vec![Rect::new(ARENA_WIDTH - 64.0, ARENA_HEIGHT - 64.0, 40.0, 40.0)],
    }
}
