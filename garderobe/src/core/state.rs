//! Ticket counter persistence
//!
//! Every number is handed out twice (patron ticket and stub) before the
//! counter advances. The record is written after every advance.
//!
//! Known limitation: if a write fails and the process dies before the
//! next successful write, the previous record is loaded on restart and
//! numbers may be issued again.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use super::config::Config;
use super::error::StateError;

/// Prints per ticket number
pub const PRINTS_PER_NUMBER: u8 = 2;

/// Persisted ticket counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TicketState {
    pub current_number: u64,
    /// Tickets already printed for `current_number` (0 or 1)
    #[serde(rename = "print_count")]
    pub prints_remaining: u8,
}

impl TicketState {
    pub fn fresh(config: &Config) -> Self {
        Self {
            current_number: config.starting_number,
            prints_remaining: 0,
        }
    }

    /// Apply one trigger and return the number to print
    pub fn advance(&mut self) -> u64 {
        let number = self.current_number;
        self.prints_remaining += 1;
        if self.prints_remaining >= PRINTS_PER_NUMBER {
            self.prints_remaining = 0;
            self.current_number += 1;
        }
        number
    }
}

/// File-backed ticket state, owned by the dispatcher
#[derive(Debug)]
pub struct StateStore {
    path: PathBuf,
    state: TicketState,
}

impl StateStore {
    /// Load the persisted record, falling back to the configured start
    pub fn load(path: impl Into<PathBuf>, config: &Config) -> Self {
        let path = path.into();
        let state = match read_state(&path) {
            Ok(Some(state)) => state,
            Ok(None) => TicketState::fresh(config),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Zustand konnte nicht geladen werden");
                TicketState::fresh(config)
            }
        };

        Self { path, state }
    }

    /// Hand out the next number and persist the advance
    ///
    /// A failed write is logged and the in-memory counter still advances.
    pub fn next(&mut self) -> u64 {
        let number = self.state.advance();
        if let Err(e) = self.save() {
            error!(
                error = %e,
                number,
                "Zustand nicht gespeichert - nach einem Neustart können Nummern doppelt vergeben werden"
            );
        }
        number
    }

    /// Write the current record atomically (temp file + rename)
    pub fn save(&self) -> Result<(), StateError> {
        let data = serde_json::to_vec(&self.state)?;
        let tmp = tmp_path(&self.path);

        fs::write(&tmp, &data)
            .and_then(|_| fs::rename(&tmp, &self.path))
            .map_err(|source| StateError::Write {
                path: self.path.clone(),
                source,
            })
    }

    pub fn state(&self) -> TicketState {
        self.state
    }

    pub fn current_number(&self) -> u64 {
        self.state.current_number
    }

    pub fn prints_remaining(&self) -> u8 {
        self.state.prints_remaining
    }
}

/// Record as found on disk, before validation
#[derive(Debug, Deserialize)]
struct StoredState {
    current_number: Option<u64>,
    print_count: Option<i64>,
}

/// `Ok(None)` when no record exists yet
///
/// Only an unreadable record or a missing `current_number` is an error. A
/// missing or out-of-range `print_count` restarts the pair at 0 so the
/// stored number is never lost.
fn read_state(path: &Path) -> Result<Option<TicketState>, StateError> {
    if !path.exists() {
        return Ok(None);
    }

    let data = fs::read(path)?;
    let stored: StoredState = serde_json::from_slice(&data)?;

    let current_number = stored
        .current_number
        .ok_or_else(|| StateError::Corrupt("current_number fehlt".to_string()))?;

    let prints_remaining = match stored
        .print_count
        .and_then(|n| u8::try_from(n).ok())
        .filter(|n| *n < PRINTS_PER_NUMBER)
    {
        Some(n) => n,
        None => {
            warn!(
                path = %path.display(),
                print_count = ?stored.print_count,
                "print_count ungültig, beginne bei 0"
            );
            0
        }
    };

    Ok(Some(TicketState {
        current_number,
        prints_remaining,
    }))
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}
