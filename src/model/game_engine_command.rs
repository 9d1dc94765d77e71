/// Player actions, plus the display requests the frontend makes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEngineCommand {
    InitDisplay,
    SubmitGuess(String),
    Skip,
    UpdateQuery(String), // autocomplete input
    ShowStats,
    Share,
}
