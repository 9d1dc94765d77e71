pub mod daily_selector;
pub mod game_engine;
pub mod persistence;
pub mod settings;
pub mod share;
pub mod suggestion_engine;

pub use daily_selector::select_index;
pub use game_engine::GameEngine;
pub use persistence::{FileSlotStore, MemorySlotStore, Persistence, Slot, SlotStore};
pub use suggestion_engine::{suggest, Suggestion};
