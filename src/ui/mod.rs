pub mod stats_view;
pub mod terminal_ui;

pub use terminal_ui::{dispatch_input, parse_input, PlayerInput, TerminalUI, HELP_TEXT};
