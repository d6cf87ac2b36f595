//! Game Logic Module
//!
//! All simulation code. Deterministic for identical inputs and config.
//!
//! ## Module Structure
//!
//! - `actor`: Actors, facing, player and hostiles
//! - `physics`: Velocity integration and the frame-time stepper
//! - `walls`: Directional wall probes and per-axis resolution
//! - `collision`: Player/hostile contact and goal detection
//! - `health`: Lives and the invulnerability window
//! - `chase`: Hostile pursuit steering
//! - `level`: Level descriptors, catalog and validation
//! - `state`: Level instance state and snapshots
//! - `tick`: Ordered per-tick pipeline
//! - `session`: Frame loop, level progression and restart
//! - `presenter`: Presentation boundary
//! - `events`: Game events for replay/verification

pub mod actor;
pub mod chase;
pub mod collision;
pub mod config;
pub mod events;
pub mod health;
pub mod input;
pub mod level;
pub mod physics;
pub mod presenter;
pub mod session;
pub mod state;
pub mod tick;
pub mod walls;

// Re-export key types
pub use actor::{Direction, Hostile, Mover, Player, WallMode};
pub use config::{ConfigError, SimConfig, TimeStepMode};
pub use events::{GameEvent, GameEventData};
pub use health::{HealthPhase, HealthState};
pub use input::InputFrame;
pub use level::{LevelCatalog, LevelContext, LevelError, LevelSource};
pub use presenter::Presenter;
pub use session::{Simulation, SimulationError};
pub use state::{SimPhase, SimState, Snapshot};
pub use tick::TickResult;
