use chrono::NaiveDate;
use itertools::Itertools;
use log::warn;
use std::cell::RefCell;
use std::io::Write;
use std::ops::Range;

use super::stats_view::render_stats;
use crate::events::{EventEmitter, EventHandler};
use crate::game::share::guess_square;
use crate::game::Suggestion;
use crate::model::{
    GameEngineCommand, GameEngineEvent, GameStatus, PuzzleRecord, SessionState, StatsProjection,
    LOSS_BUCKET, MAX_GUESSES,
};

pub const HELP_TEXT: &str = "\
Type a movie title and press Enter to guess.
  ?<text>   suggest titles containing <text>
  /skip     skip this guess
  /stats    show statistics
  /share    print a shareable result
  /quit     leave (progress is saved)
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerInput {
    Guess(String),
    Suggest(String),
    Skip,
    Stats,
    Share,
    Help,
    Quit,
}

pub fn parse_input(line: &str) -> PlayerInput {
    let line = line.trim_end_matches(['\r', '\n']);
    if let Some(query) = line.strip_prefix('?') {
        return PlayerInput::Suggest(query.to_string());
    }
    match line.trim() {
        "/skip" => PlayerInput::Skip,
        "/stats" => PlayerInput::Stats,
        "/share" => PlayerInput::Share,
        "/quit" | "/q" => PlayerInput::Quit,
        command if command.starts_with('/') => PlayerInput::Help,
        _ => PlayerInput::Guess(line.to_string()),
    }
}

/// Routes one line of player input to the engine. Returns `false` once the
/// player quits.
pub fn dispatch_input<W: Write>(
    line: &str,
    commands: &EventEmitter<GameEngineCommand>,
    ui: &RefCell<TerminalUI<W>>,
) -> bool {
    match parse_input(line) {
        PlayerInput::Guess(text) => commands.emit(GameEngineCommand::SubmitGuess(text)),
        PlayerInput::Suggest(query) => commands.emit(GameEngineCommand::UpdateQuery(query)),
        PlayerInput::Skip => commands.emit(GameEngineCommand::Skip),
        PlayerInput::Stats => commands.emit(GameEngineCommand::ShowStats),
        PlayerInput::Share => commands.emit(GameEngineCommand::Share),
        PlayerInput::Help => ui.borrow_mut().write(HELP_TEXT),
        PlayerInput::Quit => return false,
    }

    let open_stats = ui.borrow_mut().take_stats_pending();
    if open_stats {
        commands.emit(GameEngineCommand::ShowStats);
    }
    true
}

pub fn render_header(number: usize, today: NaiveDate) -> String {
    format!(
        "MARQUEE  ·  #{}  ·  {}\n",
        number,
        today.format("%A, %B %-d")
    )
}

fn row_marker(session: &SessionState, row: usize) -> String {
    match session.guesses.get(row) {
        Some(guess) if guess.correct => "✓".to_string(),
        Some(guess) if guess.skipped => "—".to_string(),
        Some(_) => "✕".to_string(),
        None => (row + 1).to_string(),
    }
}

/// Emoji clue, attempt tracker and one line per guess slot.
pub fn render_board(puzzle: &PuzzleRecord, session: &SessionState) -> String {
    let used = session.attempts_used();
    let mut output = format!("\n  GUESS THE MOVIE\n     {}\n\n", puzzle.emojis);
    output.push_str(&format!(
        "  {}{}  {} of {} guesses used\n",
        "●".repeat(used),
        "○".repeat(session.attempts_remaining()),
        used,
        MAX_GUESSES
    ));
    for row in 0..MAX_GUESSES {
        let text = match session.guesses.get(row) {
            Some(guess) => guess.text.as_str(),
            None if row == used && session.status == GameStatus::Playing => "Your answer…",
            None => "",
        };
        output.push_str(format!("  [{}] {}", row_marker(session, row), text).trim_end());
        output.push('\n');
    }
    output
}

pub fn render_hints(hints: &[String]) -> String {
    if hints.is_empty() {
        return String::new();
    }
    let mut output = String::from("\n  HINTS\n");
    for hint in hints {
        output.push_str(&format!("   · {}\n", hint));
    }
    output
}

pub fn render_result(puzzle: &PuzzleRecord, session: &SessionState) -> String {
    let squares = session.guesses.iter().map(guess_square).join(" ");
    let headline = match session.status {
        GameStatus::Playing => return String::new(),
        GameStatus::Won => {
            let count = session.guesses.len();
            format!(
                "🎬 Lights, camera, action!\n  {} in {} {}",
                puzzle.answer,
                count,
                if count == 1 { "guess" } else { "guesses" }
            )
        }
        GameStatus::Lost => format!("🎞️ Cut! Try again tomorrow\n  The film was {}", puzzle.answer),
    };
    format!(
        "\n  {}\n  {}\n\n  /share to share your result, /stats for statistics\n",
        headline, squares
    )
}

/// Wraps the highlighted `char` span in brackets.
pub fn emphasize(text: &str, highlight: Option<&Range<usize>>) -> String {
    let Some(span) = highlight else {
        return text.to_string();
    };
    let chars: Vec<char> = text.chars().collect();
    let end = span.end.min(chars.len());
    let start = span.start.min(end);
    format!(
        "{}[{}]{}",
        chars[..start].iter().collect::<String>(),
        chars[start..end].iter().collect::<String>(),
        chars[end..].iter().collect::<String>()
    )
}

pub fn render_suggestions(suggestions: &[Suggestion]) -> String {
    if suggestions.is_empty() {
        return "  (no suggestions)\n".to_string();
    }
    suggestions
        .iter()
        .map(|s| format!("  › {}\n", emphasize(&s.text, s.highlight.as_ref())))
        .collect()
}

/// Terminal presentation of the engine's events.
pub struct TerminalUI<W: Write> {
    out: W,
    today: NaiveDate,
    puzzle: Option<PuzzleRecord>,
    projection: StatsProjection,
    show_stats_on_finish: bool,
    stats_pending: bool,
}

impl<W: Write> TerminalUI<W> {
    pub fn new(out: W, today: NaiveDate, show_stats_on_finish: bool) -> Self {
        Self {
            out,
            today,
            puzzle: None,
            projection: StatsProjection::default(),
            show_stats_on_finish,
            stats_pending: false,
        }
    }

    /// True once after a round ends, when stats should open by themselves.
    pub fn take_stats_pending(&mut self) -> bool {
        std::mem::take(&mut self.stats_pending)
    }

    pub fn projection(&self) -> &StatsProjection {
        &self.projection
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn write(&mut self, text: &str) {
        if let Err(e) = self.out.write_all(text.as_bytes()).and_then(|_| self.out.flush()) {
            warn!(target: "terminal_ui", "Failed to write to terminal: {}", e);
        }
    }

    // distribution bucket the current round landed in, if it is over
    fn current_bucket(&self) -> Option<usize> {
        let session = self.projection.session()?;
        match session.status {
            GameStatus::Playing => None,
            GameStatus::Won => Some(session.guesses.len()),
            GameStatus::Lost => Some(LOSS_BUCKET),
        }
    }
}

impl<W: Write> EventHandler<GameEngineEvent> for TerminalUI<W> {
    fn handle_event(&mut self, event: &GameEngineEvent) {
        self.projection.handle_event(event);
        match event {
            GameEngineEvent::PuzzleLoaded { number, puzzle } => {
                self.puzzle = Some(puzzle.clone());
                let header = render_header(*number, self.today);
                self.write(&header);
            }
            GameEngineEvent::SessionUpdated(session) => {
                if let Some(puzzle) = self.puzzle.clone() {
                    self.write(&render_board(&puzzle, session));
                    self.write(&render_result(&puzzle, session));
                }
            }
            GameEngineEvent::HintsUnlocked(_) => {
                let hints = render_hints(self.projection.visible_hints());
                self.write(&hints);
            }
            GameEngineEvent::RowShake { row, .. } => {
                self.write(&format!("  ~ ~ guess {} is not it ~ ~\n", row + 1));
            }
            GameEngineEvent::PuzzleCompleted { .. } => {
                self.stats_pending = self.show_stats_on_finish;
            }
            GameEngineEvent::StatsShown(_) => {
                let Some(ledger) = self.projection.ledger() else {
                    return;
                };
                let stats = render_stats(ledger, self.current_bucket());
                self.write(&format!("\n{}", stats));
            }
            GameEngineEvent::SuggestionsUpdated(suggestions) => {
                self.write(&render_suggestions(suggestions));
            }
            GameEngineEvent::ShareTextReady(text) => {
                self.write(&format!("\n{}\n", text));
            }
        }
    }
}
