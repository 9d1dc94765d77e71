use itertools::Itertools;

use crate::model::{Guess, GameStatus, PuzzleRecord, SessionState, MAX_GUESSES};

pub const SHARE_URL: &str = "https://marquee.n0va.tech";

pub fn guess_square(guess: &Guess) -> &'static str {
    if guess.correct {
        "🟩"
    } else if guess.skipped {
        "⬜"
    } else {
        "🟥"
    }
}

/// Spoiler-free summary of a finished round; `None` while still playing.
pub fn share_text(puzzle_number: usize, puzzle: &PuzzleRecord, session: &SessionState) -> Option<String> {
    let attempts = match session.status {
        GameStatus::Playing => return None,
        GameStatus::Won => session.guesses.len().to_string(),
        GameStatus::Lost => "X".to_string(),
    };
    let squares = session.guesses.iter().map(guess_square).join("");
    Some(format!(
        "🎬 Marquee #{}\n{}\n{}/{} {}\n{}",
        puzzle_number, puzzle.emojis, attempts, MAX_GUESSES, squares, SHARE_URL
    ))
}
