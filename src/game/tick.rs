//! Simulation Tick
//!
//! One tick is one pass through a fixed stage order:
//!
//! 1. Input → player velocity
//! 2. Chase → hostile velocities
//! 3. Walls → cancel blocked components
//! 4. Integrate
//! 5. Goal check
//! 6. Contact check → health, on this tick's final positions
//! 7. Velocity reset

use tracing::debug;

use crate::core::vec2::Vec2;
use crate::game::actor::Actor;
use crate::game::chase::steer_hostiles;
use crate::game::collision::{check_goal, detect_player_hostile_contact, GoalOutcome};
use crate::game::config::SimConfig;
use crate::game::events::GameEvent;
use crate::game::health::HealthTransition;
use crate::game::input::InputFrame;
use crate::game::level::LevelContext;
use crate::game::physics::integrate;
use crate::game::state::{SimPhase, SimState};
use crate::game::walls::{constrain, ProbeShape};

/// Result of a tick.
#[derive(Debug, Default)]
pub struct TickResult {
    /// Events generated this tick
    pub events: Vec<GameEvent>,
    /// Hostile that touched the player this tick, if any
    pub contact: Option<u32>,
    /// Goal check result (`None` when not evaluated)
    pub goal: Option<GoalOutcome>,
    /// Whether the level instance is over
    pub level_ended: bool,
}

/// Run one simulation tick.
///
/// Total over well-formed state: no stage can fail. Once the level leaves
/// [`SimPhase::Playing`] further calls are no-ops.
pub fn tick(state: &mut SimState, input: &InputFrame, config: &SimConfig) -> TickResult {
    let mut result = TickResult::default();

    if !state.phase.is_playing() {
        result.level_ended = true;
        return result;
    }

    // 0. Advance tick counter
    state.tick += 1;

    // 1. Translate input
    let velocity = input.player_velocity(config.player_speed);
    state.player.actor.steer(velocity);

    // 2. Re-target hostiles at the player's current position
    steer_hostiles(&mut state.hostiles, state.player.actor.position);

    // 3. Cancel motion into walls
    apply_walls(state, &ProbeShape::from_config(config));

    // 4. Integrate
    update_physics(state, config.quantum);

    // 5. Goal check
    let goal = process_goal(state);
    result.goal = Some(goal);

    // 6. Contact and health; a completed level takes no damage
    if state.phase.is_playing() {
        result.contact = process_health(state, config);
    }

    #[cfg(feature = "debug-tracing")]
    tracing::trace!(
        tick = state.tick,
        player = %state.player.actor.position,
        lives = state.player.health.lives(),
        "tick"
    );

    // 7. Fresh velocities next tick
    reset_velocities(state);

    result.events = state.take_events();
    result.events.sort();
    result.level_ended = !state.phase.is_playing();
    result
}

/// Wall resolver for the player and every wall-constrained hostile.
fn apply_walls(state: &mut SimState, shape: &ProbeShape) {
    let walls = &state.level.geometry.walls;

    constrain(&mut state.player, walls, shape);
    for hostile in state.hostiles.iter_mut() {
        constrain(hostile, walls, shape);
    }
}

/// Advance every actor by one quantum.
fn update_physics(state: &mut SimState, quantum: f32) {
    integrate(&mut state.player.actor, quantum);
    for hostile in state.hostiles.iter_mut() {
        integrate(&mut hostile.actor, quantum);
    }
}

/// Goal check; at most one transition per level instance.
fn process_goal(state: &mut SimState) -> GoalOutcome {
    let outcome = check_goal(&state.player.actor.bounds(), &state.level);

    match outcome {
        GoalOutcome::None => {}
        GoalOutcome::Advance { next_level } => {
            debug!(tick = state.tick, from = state.level.index, to = next_level, "goal reached");
            state.phase = SimPhase::LevelComplete { next_level };
            state.push_event(GameEvent::level_advance(state.tick, state.level.index, next_level));
        }
        GoalOutcome::Victory => {
            debug!(tick = state.tick, level = state.level.index, "final goal reached");
            state.phase = SimPhase::Victory;
            state.push_event(GameEvent::victory(state.tick, state.level.index));
        }
    }

    outcome
}

/// Run the invulnerability timer, then apply at most one contact.
fn process_health(state: &mut SimState, config: &SimConfig) -> Option<u32> {
    if let Some(HealthTransition::Recovered) = state.player.health.advance(config.quantum) {
        state.push_event(GameEvent::invulnerability_ended(state.tick));
    }

    let index = detect_player_hostile_contact(&state.player, &state.hostiles)?;
    let hostile_id = state.hostiles[index].id;

    match state.player.health.on_contact(config.invulnerability_duration) {
        Some(HealthTransition::Damaged { lives_remaining }) => {
            state.push_event(GameEvent::damage_taken(state.tick, hostile_id, lives_remaining));
        }
        Some(HealthTransition::Died) => {
            debug!(tick = state.tick, hostile = hostile_id, "player died");
            state.push_event(GameEvent::damage_taken(state.tick, hostile_id, 0));
            state.push_event(GameEvent::game_over(state.tick));
            state.phase = SimPhase::GameOver;
        }
        Some(HealthTransition::Recovered) | None => {}
    }

    Some(hostile_id)
}

fn reset_velocities(state: &mut SimState) {
    stop(&mut state.player.actor);
    for hostile in state.hostiles.iter_mut() {
        stop(&mut hostile.actor);
    }
}

#[inline]
fn stop(actor: &mut Actor) {
    actor.velocity = Vec2::ZERO;
}

/// Replay a level from recorded inputs.
///
/// Stops early when the level ends. Returns final state and all events.
pub fn replay_level(level: LevelContext, config: &SimConfig, inputs: &[InputFrame]) -> (SimState, Vec<GameEvent>) {
    let mut state = SimState::new(level, config);
    let mut all_events = Vec::new();

    for input in inputs {
        let result = tick(&mut state, input, config);
        all_events.extend(result.events);

        if result.level_ended {
            break;
        }
    }

    (state, all_events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rect::Rect;
    use crate::game::actor::{Direction, WallMode};
    use crate::game::events::GameEventData;
    use crate::game::health::HealthPhase;
    use crate::game::level::{HostileSpawn, LevelCatalog, LevelDescriptor, LevelSource};
    use proptest::prelude::*;

    const FAR_GOAL: Rect = Rect::new(900.0, 900.0, 10.0, 10.0);

    fn level(index: usize, final_index: usize, walls: Vec<Rect>, goals: Vec<Rect>, hostiles: Vec<HostileSpawn>) -> LevelContext {
        let desc = LevelDescriptor {
            map_file: "maps/test.tmx".to_string(),
            player_spawn: Vec2::new(100.0, 100.0),
            expected_hostiles: None,
            hostile_spawns: hostiles,
            walls,
            goals,
        };
        LevelContext::from_descriptor(index, final_index, desc).unwrap()
    }

    fn still_hostile(x: f32, y: f32) -> HostileSpawn {
        HostileSpawn {
            position: Vec2::new(x, y),
            wall_mode: None,
            speed: Some(0.0),
        }
    }

    fn idle() -> InputFrame {
        InputFrame::new()
    }

    #[test]
    fn test_damage_then_window_expires() {
        let config = SimConfig::default();
        let d = config.invulnerability_duration;
        let mut state = SimState::new(level(0, 4, vec![], vec![FAR_GOAL], vec![still_hostile(105.0, 105.0)]), &config);

        // Tick T: contact
        let result = tick(&mut state, &idle(), &config);
        assert_eq!(result.contact, Some(0));
        assert_eq!(state.player.health.lives(), 2);
        assert_eq!(state.player.health.phase(), HealthPhase::Invulnerable);
        assert_eq!(state.player.health.invulnerability_timer(), d);

        // Move the hostile out of reach
        state.hostiles[0].actor.position = Vec2::new(600.0, 600.0);

        let ticks_in_window = (d / config.quantum).round() as u32;
        for _ in 1..ticks_in_window {
            let result = tick(&mut state, &idle(), &config);
            assert!(result.events.is_empty());
            assert_eq!(state.player.health.phase(), HealthPhase::Invulnerable);
        }

        let result = tick(&mut state, &idle(), &config);
        assert_eq!(state.player.health.phase(), HealthPhase::Vulnerable);
        assert_eq!(state.player.health.invulnerability_timer(), 0.0);
        assert_eq!(result.events.len(), 1);
        assert_eq!(result.events[0].data, GameEventData::InvulnerabilityEnded);
        assert_eq!(state.player.health.lives(), 2);
    }

    #[test]
    fn test_lingering_contact_costs_one_life_per_window() {
        let config = SimConfig::default();
        let mut state = SimState::new(level(0, 4, vec![], vec![FAR_GOAL], vec![still_hostile(100.0, 100.0)]), &config);

        for _ in 0..60 {
            tick(&mut state, &idle(), &config);
        }
        assert_eq!(state.player.health.lives(), 2);
    }

    #[test]
    fn test_last_life_game_over_once() {
        let config = SimConfig { max_lives: 1, ..SimConfig::default() };
        let mut state = SimState::new(level(0, 4, vec![], vec![FAR_GOAL], vec![still_hostile(100.0, 100.0)]), &config);

        let result = tick(&mut state, &idle(), &config);
        assert!(result.level_ended);
        assert_eq!(state.phase, SimPhase::GameOver);
        assert_eq!(state.player.health.lives(), 0);
        assert!(!state.player.alive());

        let game_overs = result.events.iter().filter(|e| e.data == GameEventData::GameOver).count();
        assert_eq!(game_overs, 1);

        // Terminal: nothing more happens
        for _ in 0..10 {
            let result = tick(&mut state, &idle(), &config);
            assert!(result.events.is_empty());
            assert!(result.level_ended);
        }
        assert_eq!(state.tick, 1);
    }

    #[test]
    fn test_many_overlapping_hostiles_cost_one_life() {
        let config = SimConfig::default();
        let hostiles = vec![still_hostile(100.0, 100.0), still_hostile(105.0, 100.0), still_hostile(100.0, 110.0)];
        let mut state = SimState::new(level(0, 4, vec![], vec![FAR_GOAL], hostiles), &config);

        let result = tick(&mut state, &idle(), &config);
        assert_eq!(state.player.health.lives(), 2);
        assert_eq!(result.contact, Some(0));

        let damage: Vec<_> = result
            .events
            .iter()
            .filter(|e| matches!(e.data, GameEventData::DamageTaken { .. }))
            .collect();
        assert_eq!(damage.len(), 1);
        assert_eq!(damage[0].data, GameEventData::DamageTaken { hostile_id: 0, lives_remaining: 2 });
    }

    #[test]
    fn test_wall_ahead_blocks_rightward_move() {
        let config = SimConfig::default();
        let walls = vec![Rect::new(115.0, 100.0, 50.0, 50.0)];
        let mut state = SimState::new(level(0, 4, walls, vec![FAR_GOAL], vec![]), &config);

        tick(&mut state, &InputFrame::toward(Direction::Right), &config);
        assert_eq!(state.player.actor.position, Vec2::new(100.0, 100.0));
        assert_eq!(state.player.actor.facing, Direction::Right);
    }

    #[test]
    fn test_blocked_down_slides_sideways() {
        let config = SimConfig::default();
        let walls = vec![Rect::new(0.0, 125.0, 800.0, 10.0)];
        let mut state = SimState::new(level(0, 4, walls, vec![FAR_GOAL], vec![]), &config);

        tick(&mut state, &InputFrame::with_movement(127, 127), &config);
        let pos = state.player.actor.position;
        assert_eq!(pos.y, 100.0);
        assert!(pos.x > 100.0);
    }

    #[test]
    fn test_goal_on_final_level_is_victory() {
        let config = SimConfig::default();
        let goal = Rect::new(110.0, 110.0, 40.0, 40.0);
        let mut state = SimState::new(level(4, 4, vec![], vec![goal], vec![]), &config);

        let result = tick(&mut state, &idle(), &config);
        assert_eq!(result.goal, Some(GoalOutcome::Victory));
        assert_eq!(state.phase, SimPhase::Victory);
        assert_eq!(result.events.len(), 1);
        assert_eq!(result.events[0].data, GameEventData::Victory { level: 4 });
    }

    #[test]
    fn test_goal_on_middle_level_advances_once() {
        let config = SimConfig::default();
        let goal = Rect::new(110.0, 110.0, 40.0, 40.0);
        let mut state = SimState::new(level(1, 4, vec![], vec![goal], vec![]), &config);

        let result = tick(&mut state, &idle(), &config);
        assert_eq!(result.goal, Some(GoalOutcome::Advance { next_level: 2 }));
        assert_eq!(state.phase, SimPhase::LevelComplete { next_level: 2 });
        assert_eq!(result.events[0].data, GameEventData::LevelAdvance { from: 1, to: 2 });

        // Lingering in the goal doesn't signal again
        let again = tick(&mut state, &idle(), &config);
        assert!(again.events.is_empty());
        assert_eq!(again.goal, None);
    }

    #[test]
    fn test_goal_tick_takes_no_damage() {
        let config = SimConfig::default();
        let goal = Rect::new(110.0, 110.0, 40.0, 40.0);
        let mut state = SimState::new(level(1, 4, vec![], vec![goal], vec![still_hostile(100.0, 100.0)]), &config);

        let result = tick(&mut state, &idle(), &config);
        assert_eq!(result.contact, None);
        assert_eq!(state.player.health.lives(), 3);
    }

    #[test]
    fn test_hostiles_move_this_tick_then_stop() {
        let config = SimConfig::default();
        let mut state = SimState::new(
            level(0, 4, vec![], vec![FAR_GOAL], vec![HostileSpawn::at(400.0, 100.0)]),
            &config,
        );

        tick(&mut state, &idle(), &config);
        let hostile = &state.hostiles[0].actor;
        assert!(hostile.position.x < 400.0);
        assert_eq!(hostile.facing, Direction::Left);
        assert_eq!(hostile.velocity, Vec2::ZERO);
        assert_eq!(state.player.actor.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_ghost_passes_walls_constrained_does_not() {
        let config = SimConfig::default();
        let wall = Rect::new(200.0, 0.0, 16.0, 400.0);
        let goal = Rect::new(600.0, 600.0, 10.0, 10.0);

        let mut desc_spawns = vec![HostileSpawn::at(170.0, 300.0), HostileSpawn::at(170.0, 300.0)];
        desc_spawns[0].wall_mode = Some(WallMode::Ghost);
        desc_spawns[1].wall_mode = Some(WallMode::Constrained);

        let mut lvl = level(0, 4, vec![wall], vec![goal], desc_spawns);
        lvl.player_spawn = Vec2::new(400.0, 300.0);
        let mut state = SimState::new(lvl, &config);

        for _ in 0..100 {
            tick(&mut state, &idle(), &config);
        }

        assert!(state.hostiles[0].actor.position.x > 216.0);
        assert!(state.hostiles[1].actor.position.x < 181.0);
    }

    #[test]
    fn test_tick_determinism() {
        let config = SimConfig::default();
        let catalog = LevelCatalog::builtin();
        let mut state1 = SimState::new(catalog.load(3).unwrap(), &config);
        let mut state2 = SimState::new(catalog.load(3).unwrap(), &config);

        for t in 0..300i32 {
            let input = InputFrame::with_movement(((t * 7) % 255 - 127) as i8, ((t * 13) % 255 - 127) as i8);
            tick(&mut state1, &input, &config);
            tick(&mut state2, &input, &config);
        }

        assert_eq!(state1.tick, state2.tick);
        assert_eq!(state1.compute_hash(), state2.compute_hash());
    }

    #[test]
    fn test_replay_determinism() {
        let config = SimConfig::default();
        let catalog = LevelCatalog::builtin();
        let inputs: Vec<InputFrame> = (0..400)
            .map(|t| InputFrame::toward(if (t / 50) % 2 == 0 { Direction::Right } else { Direction::Up }))
            .collect();

        let (final1, events1) = replay_level(catalog.load(2).unwrap(), &config, &inputs);
        let (final2, events2) = replay_level(catalog.load(2).unwrap(), &config, &inputs);

        assert_eq!(final1.compute_hash(), final2.compute_hash());
        assert_eq!(events1, events2);
    }

    #[test]
    fn test_fastest_valid_player_never_enters_wall() {
        let config = SimConfig { player_speed: 200.0, ..SimConfig::default() };
        assert!(config.validate().is_ok());

        // Wall's right edge sits 4.5 units left of the player
        let wall = Rect::new(0.0, 80.0, 100.0, 60.0);
        let mut lvl = level(0, 4, vec![wall], vec![FAR_GOAL], vec![]);
        lvl.player_spawn = Vec2::new(104.5, 100.0);
        let mut state = SimState::new(lvl, &config);

        for _ in 0..5 {
            tick(&mut state, &InputFrame::toward(Direction::Left), &config);
            assert!(!state.player.actor.bounds().overlaps(&wall));
        }
        assert!(state.player.actor.position.x >= 100.0);

        for _ in 0..30 {
            tick(&mut state, &InputFrame::toward(Direction::Right), &config);
        }
        assert!(state.player.actor.position.x > 104.5);
    }

    fn input() -> impl Strategy<Value = InputFrame> {
        (any::<i8>(), any::<i8>()).prop_map(|(x, y)| InputFrame::with_movement(x, y))
    }

    proptest! {
        #[test]
        fn prop_health_bounds_hold_through_ticks(inputs in prop::collection::vec(input(), 1..300)) {
            let config = SimConfig::default();
            let hostiles = vec![HostileSpawn::at(140.0, 100.0), HostileSpawn::at(60.0, 160.0)];
            let walls = vec![Rect::new(0.0, 0.0, 16.0, 480.0), Rect::new(200.0, 60.0, 16.0, 120.0)];
            let mut state = SimState::new(level(0, 4, walls, vec![FAR_GOAL], hostiles), &config);

            for input in &inputs {
                let health = &state.player.health;
                prop_assert!(health.lives() <= config.max_lives);
                prop_assert!(health.invulnerability_timer() >= 0.0);

                let result = tick(&mut state, input, &config);

                let health = &state.player.health;
                prop_assert!(health.lives() <= config.max_lives);
                prop_assert!(health.invulnerability_timer() >= 0.0);
                prop_assert!(health.invulnerability_timer() <= config.invulnerability_duration);
                prop_assert_eq!(health.is_dead(), health.lives() == 0);
                prop_assert!(result.events.windows(2).all(|w| w[0] <= w[1]));
            }
        }
    }
}
