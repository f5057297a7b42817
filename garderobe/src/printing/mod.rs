//! Ticket printing
//!
//! - [`TicketRenderer`] - ticket layout as ESC/POS bytes
//! - [`TicketPrinter`] - printer session handling and reconnects

pub mod renderer;
pub mod ticket_printer;

pub use renderer::TicketRenderer;
pub use ticket_printer::TicketPrinter;
