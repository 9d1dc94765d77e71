use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    #[default]
    Playing,
    Won,
    Lost,
}

/// Outcome of a finished session, fed to the stats ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameResult {
    Won,
    Lost,
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::Playing)
    }

    pub fn result(&self) -> Option<GameResult> {
        match self {
            GameStatus::Playing => None,
            GameStatus::Won => Some(GameResult::Won),
            GameStatus::Lost => Some(GameResult::Lost),
        }
    }
}

impl From<GameResult> for GameStatus {
    fn from(result: GameResult) -> Self {
        match result {
            GameResult::Won => GameStatus::Won,
            GameResult::Lost => GameStatus::Lost,
        }
    }
}
