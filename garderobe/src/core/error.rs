use std::path::PathBuf;

use thiserror::Error;

/// Config file errors
///
/// Loading never fails (every key has a default); only saving reports errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Konfiguration konnte nicht geschrieben werden ({path}): {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Ticket state persistence errors
#[derive(Error, Debug)]
pub enum StateError {
    #[error("Zustand konnte nicht gelesen werden: {0}")]
    Read(#[from] std::io::Error),

    #[error("Zustand ist beschädigt: {0}")]
    Corrupt(String),

    #[error("Zustand konnte nicht gespeichert werden ({path}): {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<serde_json::Error> for StateError {
    fn from(e: serde_json::Error) -> Self {
        StateError::Corrupt(e.to_string())
    }
}

/// Input device errors
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Kein Eingabegerät gefunden")]
    NotFound,

    #[error("Eingabegerät {path} konnte nicht geöffnet werden: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Lesefehler vom Eingabegerät: {0}")]
    Read(#[from] std::io::Error),
}
