//! Health & Invulnerability
//!
//! Lives counter plus a timed invulnerability window.
//!
//! ```text
//!   Vulnerable ──contact──▶ Invulnerable ──timer ≤ 0──▶ Vulnerable
//!        │                       │
//!        └─contact, last life──▶ Dead (terminal)     contact ignored
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::hash::StateHasher;

/// Remaining time below this counts as expired. Absorbs f32 drift from
/// subtracting a non-representable quantum (1/60) many times.
pub const TIMER_EPSILON: f32 = 1e-5;

/// Health phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum HealthPhase {
    /// Contact costs a life
    #[default]
    Vulnerable = 0,
    /// Contact is ignored until the timer runs out
    Invulnerable = 1,
    /// No lives left
    Dead = 2,
}

/// Observable result of a health transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HealthTransition {
    /// A life was lost and the player survived
    Damaged {
        /// Lives left after the hit
        lives_remaining: u8,
    },
    /// The last life was lost
    Died,
    /// The invulnerability window closed
    Recovered,
}

/// Lives and invulnerability timer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HealthState {
    lives: u8,
    max_lives: u8,
    invulnerability_timer: f32,
    phase: HealthPhase,
}

impl HealthState {
    /// Full health, vulnerable.
    pub fn new(max_lives: u8) -> Self {
        Self {
            lives: max_lives,
            max_lives,
            invulnerability_timer: 0.0,
            phase: HealthPhase::Vulnerable,
        }
    }

    /// Lives remaining.
    #[inline]
    pub fn lives(&self) -> u8 {
        self.lives
    }

    /// Maximum lives.
    #[inline]
    pub fn max_lives(&self) -> u8 {
        self.max_lives
    }

    /// Seconds of invulnerability left.
    #[inline]
    pub fn invulnerability_timer(&self) -> f32 {
        self.invulnerability_timer
    }

    /// Current phase.
    #[inline]
    pub fn phase(&self) -> HealthPhase {
        self.phase
    }

    /// Terminal?
    #[inline]
    pub fn is_dead(&self) -> bool {
        self.phase == HealthPhase::Dead
    }

    /// Run down the invulnerability timer by `dt` seconds.
    pub fn advance(&mut self, dt: f32) -> Option<HealthTransition> {
        if self.phase != HealthPhase::Invulnerable {
            return None;
        }

        self.invulnerability_timer -= dt;
        let transition = if self.invulnerability_timer <= TIMER_EPSILON {
            self.invulnerability_timer = 0.0;
            self.phase = HealthPhase::Vulnerable;
            Some(HealthTransition::Recovered)
        } else {
            None
        };

        self.enforce_invariants();
        transition
    }

    /// Apply a contact event.
    ///
    /// Only a vulnerable player is affected; at most one life is lost per call.
    pub fn on_contact(&mut self, invulnerability_duration: f32) -> Option<HealthTransition> {
        if self.phase != HealthPhase::Vulnerable {
            return None;
        }

        self.lives = self.lives.saturating_sub(1);
        let transition = if self.lives == 0 {
            self.phase = HealthPhase::Dead;
            self.invulnerability_timer = 0.0;
            HealthTransition::Died
        } else {
            self.phase = HealthPhase::Invulnerable;
            self.invulnerability_timer = invulnerability_duration;
            HealthTransition::Damaged { lives_remaining: self.lives }
        };
        debug!(lives = self.lives, phase = ?self.phase, "contact damage");

        self.enforce_invariants();
        Some(transition)
    }

    /// Back to a fresh vulnerable state with the timer cleared.
    ///
    /// Lives are kept; used when a new level starts mid-game.
    pub fn clear_invulnerability(&mut self) {
        if self.phase == HealthPhase::Invulnerable {
            self.phase = HealthPhase::Vulnerable;
        }
        self.invulnerability_timer = 0.0;
    }

    /// Hash for verification.
    pub fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.update_u8(self.lives);
        hasher.update_u8(self.max_lives);
        hasher.update_f32(self.invulnerability_timer);
        hasher.update_u8(self.phase as u8);
    }

    fn enforce_invariants(&mut self) {
        if self.lives > self.max_lives {
            warn!(lives = self.lives, max = self.max_lives, "lives above maximum, clamping");
            self.lives = self.max_lives;
        }
        if !(self.invulnerability_timer >= 0.0) {
            warn!(timer = self.invulnerability_timer, "invulnerability timer invalid, clamping");
            self.invulnerability_timer = 0.0;
        }
    }
}
