use serde::{Deserialize, Serialize};

pub const SKIPPED_TEXT: &str = "Skipped";

/// One attempt. Never mutated once appended to a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guess {
    pub text: String,
    pub correct: bool,
    pub skipped: bool,
}

impl Guess {
    pub fn submitted(text: &str, correct: bool) -> Self {
        Self {
            text: text.to_string(),
            correct,
            skipped: false,
        }
    }

    pub fn skipped() -> Self {
        Self {
            text: SKIPPED_TEXT.to_string(),
            correct: false,
            skipped: true,
        }
    }

    pub fn is_wrong(&self) -> bool {
        !self.correct && !self.skipped
    }
}
