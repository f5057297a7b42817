use std::process::ExitCode;

use clap::Parser;
use garderobe::{Cli, init_logger};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // .env may provide GARDEROBE_* defaults
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let _guard = match init_logger(&cli.log_level, Some(&cli.log_dir)) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Logging konnte nicht initialisiert werden: {}", e);
            return ExitCode::FAILURE;
        }
    };

    garderobe::app::run(cli).await
}
