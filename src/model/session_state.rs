use chrono::NaiveDate;
use log::trace;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};

use super::{GameStatus, Guess};
use crate::helpers::{normalize, Normalize};

pub const MAX_GUESSES: usize = 5;

/// One calendar day's attempt at one puzzle. On the wire this is
/// `{puzzleIndex, gameState, guesses, date}`.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub puzzle_index: usize,
    #[serde(rename = "gameState")]
    pub status: GameStatus,
    pub guesses: Vec<Guess>,
    #[serde_as(as = "DisplayFromStr")]
    pub date: NaiveDate,
}

impl SessionState {
    pub fn new(puzzle_index: usize, date: NaiveDate) -> Self {
        Self {
            puzzle_index,
            status: GameStatus::Playing,
            guesses: Vec::new(),
            date,
        }
    }

    /// Returns the session after guessing `text` against `answer`. Blank
    /// input, or a session that is already over, leaves the state unchanged.
    pub fn submit_guess(&self, text: &str, answer: &str) -> SessionState {
        if self.status != GameStatus::Playing || normalize(text).is_empty() {
            trace!(target: "session", "Ignoring guess {:?} in status {:?}", text, self.status);
            return self.clone();
        }
        let correct = text.matches_normalized(answer);
        self.with_guess(Guess::submitted(text, correct))
    }

    /// Skips count toward the limit but can never win.
    pub fn skip(&self) -> SessionState {
        if self.status != GameStatus::Playing {
            trace!(target: "session", "Ignoring skip in status {:?}", self.status);
            return self.clone();
        }
        self.with_guess(Guess::skipped())
    }

    fn with_guess(&self, guess: Guess) -> SessionState {
        let mut next = self.clone();
        next.guesses.push(guess);
        next.status = status_for(&next.guesses);
        next
    }

    /// No hint before the second attempt, then one more per attempt.
    pub fn hints_unlocked<'a>(&self, hints: &'a [String]) -> &'a [String] {
        let unlocked = self.guesses.len().saturating_sub(1).min(hints.len());
        &hints[..unlocked]
    }

    pub fn attempts_used(&self) -> usize {
        self.guesses.len()
    }

    pub fn attempts_remaining(&self) -> usize {
        MAX_GUESSES.saturating_sub(self.guesses.len())
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_terminal()
    }

    /// A snapshot read back from storage must satisfy the same rules
    /// `submit_guess`/`skip` maintain.
    pub fn is_consistent(&self) -> bool {
        if self.guesses.len() > MAX_GUESSES {
            return false;
        }
        // only the final guess may be correct, and skips are never correct
        let early_correct = self
            .guesses
            .iter()
            .rev()
            .skip(1)
            .any(|guess| guess.correct);
        if early_correct || self.guesses.iter().any(|g| g.correct && g.skipped) {
            return false;
        }
        self.status == status_for(&self.guesses)
    }
}

fn status_for(guesses: &[Guess]) -> GameStatus {
    if guesses.iter().any(|guess| guess.correct) {
        GameStatus::Won
    } else if guesses.len() >= MAX_GUESSES {
        GameStatus::Lost
    } else {
        GameStatus::Playing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    fn hints() -> Vec<String> {
        vec![
            "Horror film".to_string(),
            "High school setting".to_string(),
            "Stephen King adaptation".to_string(),
        ]
    }

    #[test]
    fn test_correct_guess_ignores_case_and_punctuation() {
        let session = SessionState::new(0, today()).submit_guess("  CARRIE!!", "Carrie");
        assert_eq!(session.status, GameStatus::Won);
        assert_eq!(session.guesses, vec![Guess::submitted("  CARRIE!!", true)]);
    }

    #[test]
    fn test_wrong_guess_keeps_playing() {
        let session = SessionState::new(0, today()).submit_guess("Jaws", "Carrie");
        assert_eq!(session.status, GameStatus::Playing);
        assert!(session.guesses[0].is_wrong());
        assert_eq!(session.attempts_remaining(), 4);
    }

    #[test]
    fn test_blank_guess_is_ignored() {
        let session = SessionState::new(0, today());
        assert_eq!(session.submit_guess("", "Carrie"), session);
        assert_eq!(session.submit_guess("   ", "Carrie"), session);
        assert_eq!(session.submit_guess("?!", "Carrie"), session);
    }

    #[test]
    fn test_five_misses_lose() {
        let mut session = SessionState::new(3, today());
        for attempt in 0..MAX_GUESSES {
            assert_eq!(session.status, GameStatus::Playing);
            session = if attempt % 2 == 0 {
                session.submit_guess("Jaws", "Carrie")
            } else {
                session.skip()
            };
        }
        assert_eq!(session.status, GameStatus::Lost);
        assert_eq!(session.guesses.len(), MAX_GUESSES);
    }

    #[test]
    fn test_no_transition_out_of_terminal_status() {
        let won = SessionState::new(0, today()).submit_guess("carrie", "Carrie");
        assert_eq!(won.submit_guess("Jaws", "Carrie"), won);
        assert_eq!(won.skip(), won);

        let mut lost = SessionState::new(0, today());
        for _ in 0..MAX_GUESSES {
            lost = lost.skip();
        }
        assert_eq!(lost.submit_guess("Carrie", "Carrie"), lost);
        assert_eq!(lost.skip().guesses.len(), MAX_GUESSES);
    }

    #[test]
    fn test_skip_records_placeholder_text() {
        let session = SessionState::new(0, today()).skip();
        assert_eq!(session.guesses, vec![Guess::skipped()]);
        assert_eq!(session.guesses[0].text, "Skipped");
    }

    #[test]
    fn test_hints_unlock_from_second_attempt() {
        let hints = hints();
        let mut session = SessionState::new(0, today());
        assert!(session.hints_unlocked(&hints).is_empty());

        session = session.skip();
        assert!(session.hints_unlocked(&hints).is_empty());

        session = session.submit_guess("Jaws", "Carrie");
        assert_eq!(session.hints_unlocked(&hints), &hints[..1]);

        session = session.skip().skip();
        assert_eq!(session.hints_unlocked(&hints), &hints[..3]);

        session = session.skip();
        assert_eq!(session.status, GameStatus::Lost);
        assert_eq!(session.hints_unlocked(&hints).len(), 3);
    }

    #[test]
    fn test_wire_format() {
        let session = SessionState::new(7, today())
            .skip()
            .submit_guess("Heat", "Heat");
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "puzzleIndex": 7,
                "gameState": "won",
                "guesses": [
                    {"text": "Skipped", "correct": false, "skipped": true},
                    {"text": "Heat", "correct": true, "skipped": false}
                ],
                "date": "2025-03-14"
            })
        );
        let restored: SessionState = serde_json::from_value(json).unwrap();
        assert_eq!(restored, session);
    }

    #[test]
    fn test_consistency_checks() {
        let session = SessionState::new(0, today()).skip();
        assert!(session.is_consistent());

        let mut wrong_status = session.clone();
        wrong_status.status = GameStatus::Won;
        assert!(!wrong_status.is_consistent());

        let mut too_many = SessionState::new(0, today());
        too_many.guesses = vec![Guess::skipped(); MAX_GUESSES + 1];
        too_many.status = GameStatus::Lost;
        assert!(!too_many.is_consistent());

        let mut won_then_guessed = SessionState::new(0, today());
        won_then_guessed.guesses = vec![
            Guess::submitted("Carrie", true),
            Guess::submitted("Jaws", false),
        ];
        won_then_guessed.status = GameStatus::Won;
        assert!(!won_then_guessed.is_consistent());
    }
}
