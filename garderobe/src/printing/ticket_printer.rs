//! Ticket printer adapter
//!
//! Owns the printer session and turns ticket numbers into printed tickets.
//! Failures are logged here and reported as `false`; the session is
//! dropped on any error so the next ticket reconnects.

use chrono::Local;
use garderobe_printer::{Connector, CutMode, Printer};
use tracing::{error, info, instrument};

use super::renderer::TicketRenderer;

/// Printer session state
enum Session<P> {
    Disconnected,
    Connected(P),
}

/// Ticket printer over any [`Connector`]
pub struct TicketPrinter<C: Connector> {
    connector: C,
    session: Session<C::Output>,
    renderer: TicketRenderer,
}

impl<C: Connector> TicketPrinter<C> {
    pub fn new(connector: C, renderer: TicketRenderer) -> Self {
        Self {
            connector,
            session: Session::Disconnected,
            renderer,
        }
    }

    /// Open a fresh session, replacing any existing one
    pub async fn connect(&mut self) -> bool {
        self.session = Session::Disconnected;

        match self.connector.connect().await {
            Ok(printer) => {
                self.session = Session::Connected(printer);
                info!("Drucker verbunden");
                true
            }
            Err(e) => {
                error!(error = %e, "Drucker nicht erreichbar");
                false
            }
        }
    }

    /// Last known session state, no I/O
    pub fn is_connected(&self) -> bool {
        matches!(self.session, Session::Connected(_))
    }

    /// Print one ticket
    ///
    /// Connects first if needed. A failed transfer invalidates the session
    /// and the whole ticket counts as not printed; there is no retry here.
    #[instrument(skip(self))]
    pub async fn print_ticket(&mut self, number: u64, cut_mode: CutMode) -> bool {
        if !self.is_connected() && !self.connect().await {
            return false;
        }

        let Session::Connected(printer) = &self.session else {
            return false;
        };

        let data = self.renderer.render(number, cut_mode, Local::now());

        let result = printer.print(&data).await;
        match result {
            Ok(()) => {
                info!(number, "Ticket gedruckt: {}", number);
                true
            }
            Err(e) => {
                error!(number, error = %e, "Druckfehler");
                self.session = Session::Disconnected;
                false
            }
        }
    }
}
