//! Garderobe - cloakroom ticket dispenser
//!
//! A key press (foot pedal or keyboard) prints a numbered ticket on a USB
//! receipt printer. Every number is printed twice, one ticket for the
//! patron and one for the hanger, before the counter advances.
//!
//! # Module structure
//!
//! ```text
//! garderobe/src/
//! ├── core/          # config, ticket state, errors
//! ├── input/         # device selection, evdev trigger source
//! ├── printing/      # ticket layout, printer session
//! ├── dispatcher.rs  # event loop
//! ├── utils/         # logging
//! ├── cli.rs         # command line
//! └── app.rs         # subcommand entry points
//! ```

pub mod app;
pub mod cli;
pub mod core;
pub mod dispatcher;
pub mod input;
pub mod printing;
pub mod utils;

pub use cli::{Cli, Commands};
pub use core::{Config, StateStore, TicketState};
pub use dispatcher::{Dispatch, Dispatcher, Shutdown};
pub use printing::{TicketPrinter, TicketRenderer};
pub use utils::init_logger;
