//! Night Shift Simulator
//!
//! Headless driver for the simulation core. Plays a scripted run through
//! a level catalog and checks that replaying the same inputs reproduces
//! the same state hash.
//!
//! Usage: `night-shift-sim [levels.json] [config.json]`

use anyhow::{Context, Result};
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use night_shift::{
    game::{
        actor::Direction,
        events::GameEventData,
        input::InputFrame,
        level::{LevelCatalog, LevelSource},
        presenter::Presenter,
        state::{SimState, Snapshot},
        tick::{replay_level, tick},
    },
    SimConfig, Simulation, MAX_LIVES, TICK_RATE, VERSION,
};

/// Longest scripted run (two minutes of frames).
const MAX_FRAMES: u32 = TICK_RATE * 120;

/// Ticks replayed for the determinism check.
const REPLAY_TICKS: u32 = 600;

fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set tracing subscriber")?;

    info!("Night Shift Simulator v{}", VERSION);
    info!("Tick Rate: {} Hz, Lives: {}", TICK_RATE, MAX_LIVES);

    let mut args = std::env::args().skip(1);
    let catalog = match args.next() {
        Some(path) => LevelCatalog::from_file(&path).with_context(|| format!("loading levels from {path}"))?,
        None => LevelCatalog::builtin(),
    };
    let config = match args.next() {
        Some(path) => SimConfig::from_file(&path).with_context(|| format!("loading config from {path}"))?,
        None => SimConfig::default(),
    };

    demo_run(catalog.clone(), config.clone())?;
    verify_determinism(&catalog, &config)
}

/// Presenter that narrates to the log.
struct LogPresenter {
    last_tick: u32,
}

impl Presenter for LogPresenter {
    fn sync(&mut self, snapshot: &Snapshot) {
        self.last_tick = snapshot.tick;
        if snapshot.tick % TICK_RATE == 0 {
            debug!(
                level = snapshot.level_index,
                tick = snapshot.tick,
                x = snapshot.player.position.x,
                y = snapshot.player.position.y,
                lives = snapshot.lives,
                "player"
            );
        }
    }

    fn play_damage_effect(&mut self) {
        info!(tick = self.last_tick, "ouch");
    }

    fn show_success(&mut self) {
        info!("all levels cleared");
    }

    fn advance_screen(&mut self, level_index: usize) {
        info!(level = level_index, "next level");
    }

    fn end_game(&mut self) {
        info!("game over");
    }
}

/// Deterministic input script: sweep right while weaving vertically.
fn scripted_input(t: u32) -> InputFrame {
    const PATTERN: [Direction; 4] = [Direction::Right, Direction::Up, Direction::Right, Direction::Down];
    InputFrame::toward(PATTERN[(t / 45) as usize % PATTERN.len()])
}

/// Play the catalog with the input script.
fn demo_run(catalog: LevelCatalog, config: SimConfig) -> Result<()> {
    info!("=== Starting Demo Run ({} levels) ===", catalog.level_count());

    let mut sim = Simulation::new(catalog, config)?;
    let dt = sim.config().quantum;
    let mut presenter = LogPresenter { last_tick: 0 };
    let mut total_events = 0;
    let mut frames = 0;

    while frames < MAX_FRAMES && !sim.is_finished() {
        let report = sim.frame(dt, &scripted_input(frames), &mut presenter)?;
        total_events += report.events.len();

        for event in &report.events {
            if let GameEventData::DamageTaken { hostile_id, lives_remaining } = event.data {
                info!("Hostile {} caught the player ({} lives left)", hostile_id, lives_remaining);
            }
        }
        frames += 1;
    }

    info!("=== Run Results ===");
    info!("Frames: {}, phase: {:?}, level: {}", frames, sim.phase(), sim.level_index());
    info!("Lives left: {}", sim.state().player.health.lives());
    info!("Total events: {}", total_events);
    info!("Final State Hash: {}", hex::encode(sim.state().compute_hash()));

    if !sim.is_finished() {
        warn!("script ran out of frames before the game ended");
    }
    Ok(())
}

/// Run the first level tick by tick, then replay it, and compare hashes.
fn verify_determinism(catalog: &LevelCatalog, config: &SimConfig) -> Result<()> {
    info!("=== Verifying Determinism ===");

    let inputs: Vec<InputFrame> = (0..REPLAY_TICKS).map(scripted_input).collect();

    let mut state = SimState::new(catalog.load(0)?, config);
    for input in &inputs {
        tick(&mut state, input, config);
    }
    let hash = state.compute_hash();

    let (replay_final, _) = replay_level(catalog.load(0)?, config, &inputs);
    let replay_hash = replay_final.compute_hash();

    info!("Live State Hash:   {}", hex::encode(hash));
    info!("Replay State Hash: {}", hex::encode(replay_hash));

    if hash == replay_hash {
        info!("DETERMINISM VERIFIED: Hashes match!");
        Ok(())
    } else {
        anyhow::bail!("DETERMINISM FAILURE: Hashes differ")
    }
}
