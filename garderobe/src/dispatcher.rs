//! Dispatcher loop
//!
//! Single loop over the trigger device: every key press that finds a
//! reachable printer consumes one number from the state store and prints
//! it. Nothing is queued while the printer is unreachable.

use std::future::Future;

use garderobe_printer::{Connector, CutMode};
use tracing::{info, warn};

use crate::core::{InputError, StateStore};
use crate::input::{InputSignal, TriggerSource};
use crate::printing::TicketPrinter;

/// What happened to one input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Not a key press
    Ignored,
    /// Printer unreachable, counter untouched
    Dropped,
    Printed(u64),
    /// Number consumed but the ticket did not come out
    PrintFailed(u64),
}

/// Why the loop ended without an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shutdown {
    Interrupted,
}

/// Owns the ticket state and the printer for the process lifetime
pub struct Dispatcher<C: Connector> {
    state: StateStore,
    printer: TicketPrinter<C>,
    cut_mode: CutMode,
}

impl<C: Connector> Dispatcher<C> {
    pub fn new(state: StateStore, printer: TicketPrinter<C>, cut_mode: CutMode) -> Self {
        Self {
            state,
            printer,
            cut_mode,
        }
    }

    pub fn state(&self) -> &StateStore {
        &self.state
    }

    pub fn printer_mut(&mut self) -> &mut TicketPrinter<C> {
        &mut self.printer
    }

    /// Handle one input event
    pub async fn handle(&mut self, signal: InputSignal) -> Dispatch {
        if signal != InputSignal::KeyPress {
            return Dispatch::Ignored;
        }

        if !self.printer.is_connected() && !self.printer.connect().await {
            warn!("Druckauftrag ignoriert - Drucker nicht verbunden");
            return Dispatch::Dropped;
        }

        let number = self.state.next();
        if self.printer.print_ticket(number, self.cut_mode).await {
            Dispatch::Printed(number)
        } else {
            Dispatch::PrintFailed(number)
        }
    }

    /// Run until `shutdown` resolves or the source fails
    ///
    /// Events are handled one at a time; a slow print delays the next read.
    pub async fn run<S, F>(&mut self, source: &mut S, shutdown: F) -> Result<Shutdown, InputError>
    where
        S: TriggerSource,
        F: Future<Output = ()>,
    {
        info!(
            "Bereit. Aktuelle Nummer: {}, Drucke: {}/2",
            self.state.current_number(),
            self.state.prints_remaining()
        );
        info!("Drücken Sie eine beliebige Taste zum Drucken...");

        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                biased;

                _ = &mut shutdown => {
                    info!("System beendet");
                    return Ok(Shutdown::Interrupted);
                }
                signal = source.next_signal() => {
                    self.handle(signal?).await;
                }
            }
        }
    }
}
