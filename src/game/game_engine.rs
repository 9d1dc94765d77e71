use chrono::NaiveDate;
use log::{debug, info, trace, warn};
use std::cell::RefCell;
use std::rc::Rc;

use super::persistence::Persistence;
use super::settings::Settings;
use super::share::share_text;
use super::suggestion_engine::suggestions;
use crate::events::{EventEmitter, EventObserver, Unsubscriber};
use crate::model::{
    GameEngineCommand, GameEngineEvent, GameStatus, PuzzleCorpus, PuzzleRecord, SessionState,
    StatsLedger, SHAKE_DURATION,
};

/// Owns the day's session and the all-time ledger, applies player commands
/// and publishes the results.
pub struct GameEngine {
    puzzle_index: usize,
    puzzle: PuzzleRecord,
    answers: Vec<String>,
    today: NaiveDate,
    session: SessionState,
    ledger: StatsLedger,
    persistence: Persistence,
    settings: Settings,
    subscription: Option<Unsubscriber<GameEngineCommand>>,
    game_engine_event_emitter: EventEmitter<GameEngineEvent>,
}

impl GameEngine {
    pub fn new(
        corpus: &PuzzleCorpus,
        today: NaiveDate,
        puzzle_override: Option<i64>,
        persistence: Persistence,
        settings: Settings,
        game_engine_command_observer: EventObserver<GameEngineCommand>,
        game_engine_event_emitter: EventEmitter<GameEngineEvent>,
    ) -> Rc<RefCell<Self>> {
        let (puzzle_index, puzzle) = corpus.select(today, puzzle_override);
        let session = persistence
            .load_session(today, puzzle_index)
            .unwrap_or_else(|| {
                debug!(target: "game_engine", "Starting a fresh session for puzzle {}", puzzle_index);
                SessionState::new(puzzle_index, today)
            });
        let ledger = persistence.load_ledger();

        if Settings::is_debug_mode() {
            info!(target: "game_engine", "Puzzle #{} answer: {}", puzzle_index + 1, puzzle.answer);
        }

        let engine = Self {
            puzzle_index,
            puzzle: puzzle.clone(),
            answers: corpus.answers(),
            today,
            session,
            ledger,
            persistence,
            settings,
            subscription: None,
            game_engine_event_emitter,
        };
        let refcell = Rc::new(RefCell::new(engine));
        GameEngine::wire_subscription(refcell.clone(), game_engine_command_observer);
        refcell
    }

    fn wire_subscription(
        engine: Rc<RefCell<Self>>,
        game_engine_command_observer: EventObserver<GameEngineCommand>,
    ) {
        let handler = engine.clone();
        let subscription = game_engine_command_observer.subscribe(move |command| {
            handler.borrow_mut().handle_command(command.clone());
        });
        engine.borrow_mut().subscription = Some(subscription);
    }

    /// Stops listening for commands, releasing the channel's hold on the engine.
    pub fn shutdown(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn ledger(&self) -> &StatsLedger {
        &self.ledger
    }

    pub fn puzzle(&self) -> &PuzzleRecord {
        &self.puzzle
    }

    pub fn puzzle_number(&self) -> usize {
        self.puzzle_index + 1
    }

    fn handle_command(&mut self, command: GameEngineCommand) {
        trace!(target: "game_engine", "Handling command: {:?}", command);
        match command {
            GameEngineCommand::InitDisplay => self.sync_display(),
            GameEngineCommand::SubmitGuess(text) => {
                let next = self.session.submit_guess(&text, &self.puzzle.answer);
                self.apply_transition(next);
            }
            GameEngineCommand::Skip => {
                let next = self.session.skip();
                self.apply_transition(next);
            }
            GameEngineCommand::UpdateQuery(query) => self.update_suggestions(&query),
            GameEngineCommand::ShowStats => self
                .game_engine_event_emitter
                .emit(GameEngineEvent::StatsShown(self.ledger.clone())),
            GameEngineCommand::Share => self.share(),
        }
    }

    fn sync_display(&self) {
        self.game_engine_event_emitter
            .emit(GameEngineEvent::PuzzleLoaded {
                number: self.puzzle_number(),
                puzzle: self.puzzle.clone(),
            });
        self.sync_session();
    }

    fn sync_session(&self) {
        self.game_engine_event_emitter
            .emit(GameEngineEvent::SessionUpdated(self.session.clone()));
        self.game_engine_event_emitter
            .emit(GameEngineEvent::HintsUnlocked(
                self.session.hints_unlocked(&self.puzzle.hints).to_vec(),
            ));
    }

    /// In-memory state first, then the ledger (only when the round just
    /// ended), then the session snapshot. A reload can then never count the
    /// same round twice.
    fn apply_transition(&mut self, next: SessionState) {
        if next == self.session {
            trace!(target: "game_engine", "Command left the session unchanged");
            return;
        }
        let previous_status = self.session.status;
        self.session = next;

        let finished = if previous_status == GameStatus::Playing {
            self.session.status.result()
        } else {
            None
        };

        if let Some(result) = finished {
            self.ledger =
                self.ledger
                    .record_result(result, self.session.guesses.len(), self.today);
            info!(
                target: "game_engine",
                "Puzzle #{} finished: {:?} after {} guesses",
                self.puzzle_number(),
                result,
                self.session.guesses.len()
            );
            if let Err(e) = self.persistence.save_ledger(&self.ledger) {
                warn!(target: "game_engine", "Failed to save stats: {}", e);
            }
        }
        if let Err(e) = self.persistence.save_session(&self.session) {
            warn!(target: "game_engine", "Failed to save session: {}", e);
        }

        self.sync_session();

        match finished {
            Some(result) => {
                self.game_engine_event_emitter
                    .emit(GameEngineEvent::PuzzleCompleted {
                        result,
                        ledger: self.ledger.clone(),
                    })
            }
            None => {
                let row = self.session.guesses.len() - 1;
                if self.session.guesses[row].is_wrong() {
                    self.game_engine_event_emitter
                        .emit(GameEngineEvent::RowShake {
                            row,
                            duration: SHAKE_DURATION,
                        });
                }
            }
        }
    }

    fn update_suggestions(&self, query: &str) {
        let results = if self.settings.suggestions_enabled && !self.session.is_finished() {
            suggestions(query, &self.answers, self.settings.suggestion_limit)
        } else {
            Vec::new()
        };
        self.game_engine_event_emitter
            .emit(GameEngineEvent::SuggestionsUpdated(results));
    }

    fn share(&self) {
        match share_text(self.puzzle_number(), &self.puzzle, &self.session) {
            Some(text) => self
                .game_engine_event_emitter
                .emit(GameEngineEvent::ShareTextReady(text)),
            None => debug!(target: "game_engine", "Nothing to share before the round ends"),
        }
    }
}
