//! Game Session Host
//!
//! Owns the level source, the current level instance and the frame-time
//! stepper. The host calls [`Simulation::frame`] once per rendered frame;
//! the session runs as many fixed ticks as that frame is worth, dispatches
//! events to the presenter after each tick, and swaps in the next level
//! when a goal is reached.

use tracing::info;

use crate::game::config::{ConfigError, SimConfig};
use crate::game::events::GameEvent;
use crate::game::input::InputFrame;
use crate::game::level::{LevelError, LevelSource};
use crate::game::physics::FixedTimestep;
use crate::game::presenter::{dispatch_events, Presenter};
use crate::game::state::{SimPhase, SimState, Snapshot};
use crate::game::tick::tick;

/// Session errors. Both are load-time failures; ticks never fail.
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    /// Invalid tuning values.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A level could not be loaded.
    #[error("Level error: {0}")]
    Level(#[from] LevelError),
}

/// What happened during one frame.
#[derive(Debug, Default)]
pub struct FrameReport {
    /// Fixed ticks run
    pub steps: u32,
    /// Events from those ticks, in order
    pub events: Vec<GameEvent>,
}

/// A running game: current level plus progression.
pub struct Simulation<S: LevelSource> {
    source: S,
    config: SimConfig,
    stepper: FixedTimestep,
    state: SimState,
}

impl<S: LevelSource> Simulation<S> {
    /// Validate the config and load the first level.
    pub fn new(source: S, config: SimConfig) -> Result<Self, SimulationError> {
        Self::start_at(source, config, 0)
    }

    /// Validate the config and every level, then start at a given level.
    pub fn start_at(source: S, config: SimConfig, level_index: usize) -> Result<Self, SimulationError> {
        config.validate()?;
        validate_source(&source, &config)?;
        let level = source.load(level_index)?;
        let state = SimState::new(level, &config);
        let stepper = FixedTimestep::from_config(&config);

        info!(level = level_index, levels = source.level_count(), "session started");
        Ok(Self {
            source,
            config,
            stepper,
            state,
        })
    }

    /// Advance by one rendered frame of `dt_real` seconds.
    ///
    /// The same input is applied to every tick run for this frame.
    pub fn frame<P: Presenter + ?Sized>(
        &mut self,
        dt_real: f32,
        input: &InputFrame,
        presenter: &mut P,
    ) -> Result<FrameReport, SimulationError> {
        let mut report = FrameReport::default();
        let steps = self.stepper.accumulate(dt_real);

        for _ in 0..steps {
            if self.is_finished() {
                break;
            }

            let result = tick(&mut self.state, input, &self.config);
            report.steps += 1;

            presenter.sync(&self.state.snapshot());
            dispatch_events(&result.events, presenter);
            report.events.extend(result.events);

            if let SimPhase::LevelComplete { next_level } = self.state.phase {
                self.load_level(next_level)?;
            }
        }

        Ok(report)
    }

    /// Back to the first level with full lives.
    pub fn restart(&mut self) -> Result<(), SimulationError> {
        let level = self.source.load(0)?;
        self.state = SimState::new(level, &self.config);
        self.stepper.reset();
        info!("session restarted");
        Ok(())
    }

    /// Replace the level instance, carrying lives over.
    fn load_level(&mut self, index: usize) -> Result<(), SimulationError> {
        let health = self.state.player.health.clone();
        let level = self.source.load(index)?;
        self.state = SimState::with_health(level, &self.config, health);
        info!(level = index, lives = self.state.player.health.lives(), "advanced to next level");
        Ok(())
    }

    /// Victory or game over?
    pub fn is_finished(&self) -> bool {
        matches!(self.state.phase, SimPhase::Victory | SimPhase::GameOver)
    }

    /// Current level instance.
    pub fn state(&self) -> &SimState {
        &self.state
    }

    /// Current phase.
    pub fn phase(&self) -> SimPhase {
        self.state.phase
    }

    /// Current level index.
    pub fn level_index(&self) -> usize {
        self.state.level.index
    }

    /// Read-only view for rendering.
    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    /// Active configuration.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }
}

/// Every level must load, and every per-spawn speed must fit the probe.
fn validate_source<S: LevelSource>(source: &S, config: &SimConfig) -> Result<(), SimulationError> {
    source.validate()?;
    for index in 0..source.level_count() {
        for spawn in source.descriptor(index)?.hostile_spawns {
            if let Some(speed) = spawn.speed {
                config.check_step("hostile spawn speed", speed)?;
            }
        }
    }
    Ok(())
}
