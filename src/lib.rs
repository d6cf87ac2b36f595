//! # Night Shift Core
//!
//! Simulation core for a top-down chase game: the player walks a walled
//! level toward a goal while hostiles pursue.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    NIGHT SHIFT CORE                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Primitives                                │
//! │  ├── vec2.rs     - 2D float vector                           │
//! │  ├── rect.rs     - Axis-aligned boxes                        │
//! │  └── hash.rs     - State hashing for verification            │
//! │                                                              │
//! │  game/           - Simulation                                │
//! │  ├── actor.rs    - Player, hostiles, facing                  │
//! │  ├── physics.rs  - Integration and fixed timestep            │
//! │  ├── walls.rs    - Directional wall probes                   │
//! │  ├── collision.rs- Contact and goal detection                │
//! │  ├── health.rs   - Lives and invulnerability                 │
//! │  ├── chase.rs    - Hostile pursuit                           │
//! │  ├── level.rs    - Level catalog                             │
//! │  ├── tick.rs     - Per-tick pipeline                         │
//! │  └── session.rs  - Frame loop and progression                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Tick Order
//!
//! input → chase → walls → integrate → goal → contact → health.
//! A tick that reaches a goal skips contact, and a level that has left
//! `Playing` no longer ticks.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;

// Re-export commonly used types
pub use crate::core::rect::Rect;
pub use crate::core::vec2::Vec2;
pub use game::config::SimConfig;
pub use game::input::InputFrame;
pub use game::level::{LevelCatalog, LevelSource};
pub use game::session::{Simulation, SimulationError};
pub use game::state::{SimPhase, SimState};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Simulation tick rate (Hz)
pub const TICK_RATE: u32 = 60;

/// Lives at the start of a game
pub const MAX_LIVES: u8 = 3;
