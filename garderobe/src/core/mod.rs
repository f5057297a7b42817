//! Core module - configuration, ticket state and error definitions
//!
//! - [`Config`] - dispenser configuration (INI file)
//! - [`StateStore`] - persisted ticket counter
//! - [`ConfigError`] / [`StateError`] / [`InputError`]

pub mod config;
pub mod error;
pub mod state;

pub use config::Config;
pub use error::{ConfigError, InputError, StateError};
pub use state::{StateStore, TicketState};
