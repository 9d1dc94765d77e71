use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

use crate::game::daily_selector::select_index;

const EMBEDDED_CORPUS: &str = include_str!("../../resources/puzzles.json");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleRecord {
    pub emojis: String,
    pub answer: String,
    pub hints: [String; 3],
}

/// Ordered, read-only puzzle list. A record's position is its stable puzzle id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleCorpus {
    puzzles: Vec<PuzzleRecord>,
}

impl PuzzleCorpus {
    /// The corpus compiled into the binary from `resources/puzzles.json`.
    pub fn embedded() -> Self {
        Self::from_json(EMBEDDED_CORPUS).expect("embedded puzzle corpus must be valid")
    }

    pub fn from_json(contents: &str) -> io::Result<Self> {
        let corpus = Self {
            puzzles: serde_json::from_str(contents)?,
        };
        if corpus.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "puzzle corpus is empty",
            ));
        }
        Ok(corpus)
    }

    pub fn from_path(path: &Path) -> io::Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn len(&self) -> usize {
        self.puzzles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.puzzles.is_empty()
    }

    /// The puzzle for `today`, or for the override when one is given.
    pub fn select(&self, today: NaiveDate, puzzle_override: Option<i64>) -> (usize, &PuzzleRecord) {
        let index = select_index(today, self.puzzles.len(), puzzle_override);
        (index, &self.puzzles[index])
    }

    /// Every answer, in corpus order.
    pub fn answers(&self) -> Vec<String> {
        self.puzzles.iter().map(|p| p.answer.clone()).collect()
    }
}
