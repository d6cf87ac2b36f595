//! Game Events
//!
//! Discrete results of a tick. The simulation never calls presentation code
//! directly; it records events and the host dispatches them afterwards.

use serde::{Deserialize, Serialize};

/// Priority for event processing order.
///
/// Lower value = processed first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum EventPriority {
    /// Damage and death first
    Health = 0,
    /// Then level completion
    Progression = 1,
}

/// Game event data.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GameEventData {
    /// Invulnerability window closed
    InvulnerabilityEnded,

    /// Player lost a life
    DamageTaken {
        /// Spawn index of the hostile that made contact
        hostile_id: u32,
        /// Lives left after the hit
        lives_remaining: u8,
    },

    /// Player ran out of lives
    GameOver,

    /// Goal reached on a non-final level
    LevelAdvance {
        /// Level just completed
        from: usize,
        /// Level to load
        to: usize,
    },

    /// Goal reached on the final level
    Victory {
        /// Final level index
        level: usize,
    },
}

/// A game event with timing and priority.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    /// Tick when event occurred
    pub tick: u32,

    /// Processing priority
    pub priority: EventPriority,

    /// Event data
    pub data: GameEventData,
}

impl GameEvent {
    /// Create a new event.
    pub fn new(tick: u32, priority: EventPriority, data: GameEventData) -> Self {
        Self { tick, priority, data }
    }

    /// Create damage taken event.
    pub fn damage_taken(tick: u32, hostile_id: u32, lives_remaining: u8) -> Self {
        Self::new(
            tick,
            EventPriority::Health,
            GameEventData::DamageTaken { hostile_id, lives_remaining },
        )
    }

    /// Create invulnerability ended event.
    pub fn invulnerability_ended(tick: u32) -> Self {
        Self::new(tick, EventPriority::Health, GameEventData::InvulnerabilityEnded)
    }

    /// Create game over event.
    pub fn game_over(tick: u32) -> Self {
        Self::new(tick, EventPriority::Health, GameEventData::GameOver)
    }

    /// Create level advance event.
    pub fn level_advance(tick: u32, from: usize, to: usize) -> Self {
        Self::new(tick, EventPriority::Progression, GameEventData::LevelAdvance { from, to })
    }

    /// Create victory event.
    pub fn victory(tick: u32, level: usize) -> Self {
        Self::new(tick, EventPriority::Progression, GameEventData::Victory { level })
    }
}

impl PartialOrd for GameEvent {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for GameEvent {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Sort by: tick, then priority, then data
        self.tick
            .cmp(&other.tick)
            .then(self.priority.cmp(&other.priority))
            .then_with(|| self.data.cmp(&other.data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_ordering() {
        let damage = GameEvent::damage_taken(10, 0, 2);
        let advance = GameEvent::level_advance(10, 1, 2);
        let later = GameEvent::invulnerability_ended(11);

        // Same tick, health before progression
        assert!(damage < advance);
        assert!(advance < later);
    }

    #[test]
    fn test_same_tick_health_events_in_causal_order() {
        let mut events = vec![
            GameEvent::game_over(7),
            GameEvent::damage_taken(7, 1, 0),
            GameEvent::invulnerability_ended(7),
        ];
        events.sort();

        let data: Vec<_> = events.into_iter().map(|e| e.data).collect();
        assert_eq!(
            data,
            vec![
                GameEventData::InvulnerabilityEnded,
                GameEventData::DamageTaken { hostile_id: 1, lives_remaining: 0 },
                GameEventData::GameOver,
            ]
        );
    }

    #[test]
    fn test_serializes() {
        let event = GameEvent::level_advance(42, 1, 2);
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("LevelAdvance"));
    }
}
