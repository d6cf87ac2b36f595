//! Simulation State
//!
//! Everything one level instance needs between ticks: the level itself,
//! the player, the hostiles in spawn order, and the pending event buffer.

use serde::{Deserialize, Serialize};

use crate::core::hash::{compute_state_hash, StateHash};
use crate::core::vec2::Vec2;
use crate::game::actor::{Direction, Hostile, Player};
use crate::game::config::SimConfig;
use crate::game::events::GameEvent;
use crate::game::health::{HealthPhase, HealthState};
use crate::game::level::LevelContext;

// =============================================================================
// PHASE
// =============================================================================

/// Lifecycle of a level instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SimPhase {
    /// Ticking normally
    #[default]
    Playing,
    /// Goal reached; the host should load `next_level`
    LevelComplete {
        /// Level to load
        next_level: usize,
    },
    /// Goal of the final level reached
    Victory,
    /// Out of lives
    GameOver,
}

impl SimPhase {
    /// Is the level still running?
    #[inline]
    pub fn is_playing(self) -> bool {
        self == SimPhase::Playing
    }

    fn tag(self) -> u8 {
        match self {
            SimPhase::Playing => 0,
            SimPhase::LevelComplete { .. } => 1,
            SimPhase::Victory => 2,
            SimPhase::GameOver => 3,
        }
    }
}

// =============================================================================
// SNAPSHOTS
// =============================================================================

/// Final position of one actor after a tick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActorSnapshot {
    /// `None` for the player, spawn index for hostiles
    pub hostile_id: Option<u32>,
    /// Top-left corner
    pub position: Vec2,
    /// Facing direction
    pub facing: Direction,
    /// Bounding box size
    pub size: Vec2,
}

/// Read-only view handed to the presenter once per tick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Tick number
    pub tick: u32,
    /// Level index
    pub level_index: usize,
    /// Level phase
    pub phase: SimPhase,
    /// Lives left (hearts on the life bar)
    pub lives: u8,
    /// Health phase
    pub health: HealthPhase,
    /// Player
    pub player: ActorSnapshot,
    /// Hostiles in spawn order
    pub hostiles: Vec<ActorSnapshot>,
}

// =============================================================================
// SIM STATE
// =============================================================================

/// Mutable state of one level instance.
#[derive(Clone, Debug)]
pub struct SimState {
    /// Ticks run in this level instance
    pub tick: u32,
    /// Lifecycle phase
    pub phase: SimPhase,
    /// The level being played
    pub level: LevelContext,
    /// The player
    pub player: Player,
    /// Hostiles in spawn order
    pub hostiles: Vec<Hostile>,
    /// Events generated this tick (drained by tick())
    events: Vec<GameEvent>,
}

impl SimState {
    /// Fresh level instance with full health.
    pub fn new(level: LevelContext, config: &SimConfig) -> Self {
        Self::with_health(level, config, HealthState::new(config.max_lives))
    }

    /// Level instance that keeps the given health (lives carry across levels).
    pub fn with_health(level: LevelContext, config: &SimConfig, mut health: HealthState) -> Self {
        health.clear_invulnerability();
        let player = Player::new(level.player_spawn, config.player_size, health);

        let hostiles = level
            .hostile_spawns
            .iter()
            .enumerate()
            .map(|(i, spawn)| {
                Hostile::new(
                    i as u32,
                    spawn.position,
                    config.hostile_size,
                    spawn.speed.unwrap_or(config.hostile_speed),
                    spawn.wall_mode.unwrap_or(config.hostile_wall_mode),
                )
            })
            .collect();

        Self {
            tick: 0,
            phase: SimPhase::Playing,
            level,
            player,
            hostiles,
            events: Vec::new(),
        }
    }

    /// Queue an event for this tick.
    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Drain the events queued so far.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Read-only view for presentation.
    pub fn snapshot(&self) -> Snapshot {
        let player = &self.player.actor;
        Snapshot {
            tick: self.tick,
            level_index: self.level.index,
            phase: self.phase,
            lives: self.player.health.lives(),
            health: self.player.health.phase(),
            player: ActorSnapshot {
                hostile_id: None,
                position: player.position,
                facing: player.facing,
                size: player.size,
            },
            hostiles: self
                .hostiles
                .iter()
                .map(|h| ActorSnapshot {
                    hostile_id: Some(h.id),
                    position: h.actor.position,
                    facing: h.actor.facing,
                    size: h.actor.size,
                })
                .collect(),
        }
    }

    /// Hash of the full simulation state.
    pub fn compute_hash(&self) -> StateHash {
        compute_state_hash(self.tick, self.level.index, |hasher| {
            hasher.update_u8(self.phase.tag());
            if let SimPhase::LevelComplete { next_level } = self.phase {
                hasher.update_u64(next_level as u64);
            }
            self.player.actor.hash_into(hasher);
            self.player.health.hash_into(hasher);
            hasher.update_u32(self.hostiles.len() as u32);
            for hostile in &self.hostiles {
                hasher.update_u32(hostile.id);
                hasher.update_f32(hostile.speed);
                hostile.actor.hash_into(hasher);
            }
        })
    }
}
