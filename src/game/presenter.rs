//! Presentation Boundary
//!
//! The simulation only produces snapshots and events. A [`Presenter`]
//! turns them into drawing, sounds and screen changes; nothing it does
//! feeds back into the simulation.

use crate::game::events::{GameEvent, GameEventData};
use crate::game::state::Snapshot;

/// Presentation collaborator.
pub trait Presenter {
    /// Final actor positions after a tick.
    fn sync(&mut self, snapshot: &Snapshot);

    /// The player took a hit.
    fn play_damage_effect(&mut self);

    /// The final goal was reached.
    fn show_success(&mut self);

    /// Switch to the screen for `level_index`.
    fn advance_screen(&mut self, level_index: usize);

    /// The player is out of lives.
    fn end_game(&mut self);
}

/// Forward a tick's events to the presenter, in order.
pub fn dispatch_events<P: Presenter + ?Sized>(events: &[GameEvent], presenter: &mut P) {
    for event in events {
        match event.data {
            GameEventData::DamageTaken { .. } => presenter.play_damage_effect(),
            GameEventData::GameOver => presenter.end_game(),
            GameEventData::LevelAdvance { to, .. } => presenter.advance_screen(to),
            GameEventData::Victory { .. } => presenter.show_success(),
            GameEventData::InvulnerabilityEnded => {}
        }
    }
}

/// One call received by a [`RecordingPresenter`].
#[derive(Clone, Debug, PartialEq)]
pub enum PresenterCall {
    /// `sync` with the snapshot's tick
    Sync(u32),
    /// `play_damage_effect`
    DamageEffect,
    /// `show_success`
    Success,
    /// `advance_screen`
    AdvanceScreen(usize),
    /// `end_game`
    EndGame,
}

/// Presenter that records every call, for headless hosts and tests.
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    /// Calls in the order received
    pub calls: Vec<PresenterCall>,
    /// Most recent snapshot
    pub last_snapshot: Option<Snapshot>,
}

impl RecordingPresenter {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count calls matching a predicate.
    pub fn count(&self, pred: impl Fn(&PresenterCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }
}

impl Presenter for RecordingPresenter {
    fn sync(&mut self, snapshot: &Snapshot) {
        self.calls.push(PresenterCall::Sync(snapshot.tick));
        self.last_snapshot = Some(snapshot.clone());
    }

    fn play_damage_effect(&mut self) {
        self.calls.push(PresenterCall::DamageEffect);
    }

    fn show_success(&mut self) {
        self.calls.push(PresenterCall::Success);
    }

    fn advance_screen(&mut self, level_index: usize) {
        self.calls.push(PresenterCall::AdvanceScreen(level_index));
    }

    fn end_game(&mut self) {
        self.calls.push(PresenterCall::EndGame);
    }
}
