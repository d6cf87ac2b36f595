//! Integration and Time Stepping
//!
//! The integrator always advances by one constant quantum. How many quanta
//! a rendered frame gets is decided by [`FixedTimestep`].

use tracing::debug;

use crate::game::actor::Actor;
use crate::game::config::{SimConfig, TimeStepMode};

/// Advance one actor by `quantum` seconds at its current velocity.
#[inline]
pub fn integrate(actor: &mut Actor, quantum: f32) {
    actor.position = actor.position.add(actor.velocity.scale(quantum));
}

/// Converts real frame time into a count of fixed steps.
#[derive(Clone, Debug)]
pub struct FixedTimestep {
    quantum: f32,
    mode: TimeStepMode,
    max_steps: u32,
    accumulator: f32,
}

impl FixedTimestep {
    /// Create a stepper.
    pub fn new(quantum: f32, mode: TimeStepMode, max_steps: u32) -> Self {
        Self {
            quantum,
            mode,
            max_steps: max_steps.max(1),
            accumulator: 0.0,
        }
    }

    /// Create a stepper from configuration.
    pub fn from_config(config: &SimConfig) -> Self {
        Self::new(config.quantum, config.time_step, config.max_steps_per_frame)
    }

    /// Real time carried into the next frame.
    #[inline]
    pub fn remainder(&self) -> f32 {
        self.accumulator
    }

    /// Feed one frame's real elapsed time; returns how many steps to run.
    ///
    /// Non-finite or negative frame times count as zero.
    pub fn accumulate(&mut self, dt_real: f32) -> u32 {
        if self.mode == TimeStepMode::FrameLocked {
            return 1;
        }

        let dt = if dt_real.is_finite() && dt_real > 0.0 { dt_real } else { 0.0 };
        self.accumulator += dt;

        let mut steps = 0;
        while self.accumulator >= self.quantum && steps < self.max_steps {
            self.accumulator -= self.quantum;
            steps += 1;
        }

        if self.accumulator >= self.quantum {
            debug!(dropped = self.accumulator, "frame too long, dropping simulation time");
            self.accumulator %= self.quantum;
        }

        steps
    }

    /// Forget any carried time.
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
