use crate::events::EventHandler;
use crate::model::{GameEngineEvent, SessionState, StatsLedger};

/// Latest view of the session and ledger, rebuilt from engine events.
#[derive(Debug, Default)]
pub struct StatsProjection {
    session: Option<SessionState>,
    ledger: Option<StatsLedger>,
    hints: Vec<String>,
}

impl StatsProjection {
    pub fn session(&self) -> Option<&SessionState> {
        self.session.as_ref()
    }

    pub fn ledger(&self) -> Option<&StatsLedger> {
        self.ledger.as_ref()
    }

    /// Hints are only shown while the round is still being played.
    pub fn visible_hints(&self) -> &[String] {
        match &self.session {
            Some(session) if !session.is_finished() => self.hints.as_slice(),
            _ => &[],
        }
    }
}

impl EventHandler<GameEngineEvent> for StatsProjection {
    fn handle_event(&mut self, event: &GameEngineEvent) {
        match event {
            GameEngineEvent::SessionUpdated(session) => self.session = Some(session.clone()),
            GameEngineEvent::HintsUnlocked(hints) => self.hints = hints.clone(),
            GameEngineEvent::PuzzleCompleted { ledger, .. } | GameEngineEvent::StatsShown(ledger) => {
                self.ledger = Some(ledger.clone())
            }
            _ => (),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GameResult;
    use chrono::NaiveDate;

    #[test]
    fn test_hints_hidden_once_finished() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let mut projection = StatsProjection::default();
        let hints = vec!["Crime thriller".to_string()];

        let playing = SessionState::new(0, date).skip().skip();
        projection.handle_event(&GameEngineEvent::SessionUpdated(playing.clone()));
        projection.handle_event(&GameEngineEvent::HintsUnlocked(hints.clone()));
        assert_eq!(projection.visible_hints(), hints.as_slice());

        let won = playing.submit_guess("Heat", "Heat");
        projection.handle_event(&GameEngineEvent::SessionUpdated(won));
        assert!(projection.visible_hints().is_empty());
    }

    #[test]
    fn test_tracks_latest_ledger() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let mut projection = StatsProjection::default();
        assert!(projection.ledger().is_none());

        let ledger = StatsLedger::default().record_result(GameResult::Lost, 5, date);
        projection.handle_event(&GameEngineEvent::PuzzleCompleted {
            result: GameResult::Lost,
            ledger: ledger.clone(),
        });
        assert_eq!(projection.ledger(), Some(&ledger));
    }
}
