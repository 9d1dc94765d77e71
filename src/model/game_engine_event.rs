use std::time::Duration;

use super::{GameResult, PuzzleRecord, SessionState, StatsLedger};
use crate::game::suggestion_engine::Suggestion;

/// How long a wrong-guess row stays shaken before the frontend clears it.
pub const SHAKE_DURATION: Duration = Duration::from_millis(600);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEngineEvent {
    PuzzleLoaded {
        number: usize, // 1-based, as shown to the player
        puzzle: PuzzleRecord,
    },
    SessionUpdated(SessionState),
    HintsUnlocked(Vec<String>),
    RowShake {
        row: usize,
        duration: Duration,
    },
    PuzzleCompleted {
        result: GameResult,
        ledger: StatsLedger,
    },
    StatsShown(StatsLedger),
    SuggestionsUpdated(Vec<Suggestion>),
    ShareTextReady(String),
}
