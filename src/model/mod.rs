mod game_engine_command;
mod game_engine_event;
mod game_status;
mod guess;
mod puzzle;
mod session_state;
mod stats_ledger;
mod stats_projection;

pub use game_engine_command::GameEngineCommand;
pub use game_engine_event::{GameEngineEvent, SHAKE_DURATION};
pub use game_status::{GameResult, GameStatus};
pub use guess::{Guess, SKIPPED_TEXT};
pub use puzzle::{PuzzleCorpus, PuzzleRecord};
pub use session_state::{SessionState, MAX_GUESSES};
pub use stats_ledger::{StatsLedger, LOSS_BUCKET};
pub use stats_projection::StatsProjection;
