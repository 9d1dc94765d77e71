use chrono::NaiveDate;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::model::{SessionState, StatsLedger};

/// The two durable records the game keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Session,
    Ledger,
}

impl Slot {
    pub fn key(&self) -> &'static str {
        match self {
            Slot::Session => "marquee_session",
            Slot::Ledger => "marquee_stats",
        }
    }
}

/// Durable key-value backend for the two slots.
pub trait SlotStore {
    fn read(&self, slot: Slot) -> Option<String>;
    fn write(&self, slot: Slot, contents: &str) -> io::Result<()>;
}

/// One JSON file per slot under a data directory.
#[derive(Debug, Clone)]
pub struct FileSlotStore {
    data_dir: PathBuf,
}

impl FileSlotStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn slot_path(&self, slot: Slot) -> PathBuf {
        self.data_dir.join(format!("{}.json", slot.key()))
    }
}

impl SlotStore for FileSlotStore {
    fn read(&self, slot: Slot) -> Option<String> {
        fs::read_to_string(self.slot_path(slot)).ok()
    }

    fn write(&self, slot: Slot, contents: &str) -> io::Result<()> {
        fs::create_dir_all(&self.data_dir)?;
        fs::write(self.slot_path(slot), contents)
    }
}

/// In-memory store; clones share the same slots.
#[derive(Debug, Clone, Default)]
pub struct MemorySlotStore {
    slots: Rc<RefCell<HashMap<Slot, String>>>,
}

impl MemorySlotStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SlotStore for MemorySlotStore {
    fn read(&self, slot: Slot) -> Option<String> {
        self.slots.borrow().get(&slot).cloned()
    }

    fn write(&self, slot: Slot, contents: &str) -> io::Result<()> {
        self.slots.borrow_mut().insert(slot, contents.to_string());
        Ok(())
    }
}

/// Typed access to the session and ledger slots. Reads never fail: a
/// missing, unparsable or inconsistent record counts as absent.
pub struct Persistence {
    store: Box<dyn SlotStore>,
}

impl Persistence {
    pub fn new(store: impl SlotStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    fn read_json<T: DeserializeOwned>(&self, slot: Slot) -> Option<T> {
        let contents = self.store.read(slot)?;
        match serde_json::from_str(&contents) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(target: "persistence", "Discarding unreadable {}: {}", slot.key(), e);
                None
            }
        }
    }

    /// Only a snapshot for this exact day and puzzle is trusted.
    pub fn load_session(&self, today: NaiveDate, expected_puzzle_index: usize) -> Option<SessionState> {
        let session: SessionState = self.read_json(Slot::Session)?;
        if session.date != today || session.puzzle_index != expected_puzzle_index {
            debug!(
                target: "persistence",
                "Stale session snapshot (date {}, puzzle {}); expected date {}, puzzle {}",
                session.date, session.puzzle_index, today, expected_puzzle_index
            );
            return None;
        }
        if !session.is_consistent() {
            warn!(target: "persistence", "Discarding inconsistent session snapshot: {:?}", session);
            return None;
        }
        Some(session)
    }

    pub fn save_session(&self, session: &SessionState) -> io::Result<()> {
        let contents = serde_json::to_string(session)?;
        self.store.write(Slot::Session, &contents)
    }

    pub fn load_ledger(&self) -> StatsLedger {
        match self.read_json::<StatsLedger>(Slot::Ledger) {
            Some(ledger) if ledger.is_consistent() => ledger,
            Some(ledger) => {
                warn!(target: "persistence", "Resetting inconsistent ledger: {:?}", ledger);
                StatsLedger::default()
            }
            None => StatsLedger::default(),
        }
    }

    pub fn save_ledger(&self, ledger: &StatsLedger) -> io::Result<()> {
        let contents = serde_json::to_string(ledger)?;
        self.store.write(Slot::Ledger, &contents)
    }
}
