//! Process entry points behind the CLI subcommands

use std::path::Path;
use std::process::ExitCode;

use garderobe_printer::UsbConnector;
use tracing::{error, info, warn};

use crate::cli::{Cli, Commands};
use crate::core::{Config, StateStore};
use crate::dispatcher::Dispatcher;
use crate::input::{enumerate_devices, open_trigger_device, select_device};
use crate::printing::{TicketPrinter, TicketRenderer};

/// 80mm paper
pub const PAPER_WIDTH: usize = 48;

pub async fn run(cli: Cli) -> ExitCode {
    match cli.command() {
        Commands::Run => run_dispenser(&cli).await,
        Commands::ListDevices => list_devices(),
        Commands::InitConfig => init_config(&cli.config),
    }
}

async fn run_dispenser(cli: &Cli) -> ExitCode {
    info!("Garderoben-Ticketsystem gestartet");

    let config = Config::load(&cli.config);
    let state = StateStore::load(&cli.state, &config);

    let connector = UsbConnector::new(config.vendor_id, config.product_id).unwrap_or_else(|e| {
        warn!(error = %e, "Ungültige Drucker-ID, verwende Epson TM-T88V");
        UsbConnector::epson_tm_t88v()
    });
    let printer = TicketPrinter::new(
        connector,
        TicketRenderer::new(PAPER_WIDTH, config.header.clone()),
    );

    let mut source = match open_trigger_device(cli.device.as_deref()) {
        Ok(source) => source,
        Err(e) => {
            error!(error = %e, "Start abgebrochen");
            return ExitCode::FAILURE;
        }
    };

    let mut dispatcher = Dispatcher::new(state, printer, config.cut_mode);
    dispatcher.printer_mut().connect().await;

    match dispatcher.run(&mut source, shutdown_signal()).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Unerwarteter Fehler");
            ExitCode::FAILURE
        }
    }
}

fn list_devices() -> ExitCode {
    let devices: Vec<_> = enumerate_devices().into_iter().map(|(d, _)| d).collect();
    let selected = select_device(&devices).ok().map(|d| d.path.clone());

    for d in &devices {
        let marker = if selected.as_ref() == Some(&d.path) { "*" } else { " " };
        let keys = if d.has_keys { "Tasten" } else { "-" };
        println!("{} {}\t{}\t{}", marker, d.path.display(), keys, d.name);
    }

    if selected.is_none() {
        println!("Kein geeignetes Eingabegerät gefunden");
    }
    ExitCode::SUCCESS
}

fn init_config(path: &Path) -> ExitCode {
    let config = Config::load(path);
    match config.save(path) {
        Ok(()) => {
            info!(path = %path.display(), "Konfiguration geschrieben");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Konfiguration nicht geschrieben");
            ExitCode::FAILURE
        }
    }
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Ctrl+C-Handler konnte nicht installiert werden");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "SIGTERM-Handler konnte nicht installiert werden");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Ctrl+C empfangen"),
        _ = terminate => info!("SIGTERM empfangen"),
    }
}
