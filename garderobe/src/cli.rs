use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "garderobe", version)]
#[command(about = "Garderoben-Ticketsystem: druckt nummerierte Tickets per Tastendruck", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file (INI)
    #[arg(long, env = "GARDEROBE_CONFIG", default_value = "config.ini", global = true)]
    pub config: PathBuf,

    /// Ticket state file (JSON)
    #[arg(long, env = "GARDEROBE_STATE", default_value = "state.json", global = true)]
    pub state: PathBuf,

    /// Directory for the log file
    #[arg(long, env = "GARDEROBE_LOG_DIR", default_value = ".", global = true)]
    pub log_dir: PathBuf,

    /// Log level, overridden by RUST_LOG
    #[arg(long, env = "GARDEROBE_LOG_LEVEL", default_value = "info", global = true)]
    pub log_level: String,

    /// Use this input device instead of picking one automatically
    #[arg(long, env = "GARDEROBE_DEVICE", global = true)]
    pub device: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Dispense tickets (default)
    Run,
    /// List input devices and show which one would be used
    ListDevices,
    /// Write the effective configuration to the config file
    InitConfig,
}

impl Cli {
    pub fn command(&self) -> Commands {
        self.command.unwrap_or(Commands::Run)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["garderobe"]).unwrap();
        assert_eq!(cli.command(), Commands::Run);
        assert_eq!(cli.config, PathBuf::from("config.ini"));
        assert_eq!(cli.state, PathBuf::from("state.json"));
        assert!(cli.device.is_none());
    }

    #[test]
    fn test_subcommand_with_global_paths() {
        let cli = Cli::try_parse_from([
            "garderobe",
            "init-config",
            "--config",
            "/etc/garderobe/config.ini",
        ])
        .unwrap();
        assert_eq!(cli.command(), Commands::InitConfig);
        assert_eq!(cli.config, PathBuf::from("/etc/garderobe/config.ini"));
    }

    #[test]
    fn test_explicit_device() {
        let cli =
            Cli::try_parse_from(["garderobe", "--device", "/dev/input/event4", "run"]).unwrap();
        assert_eq!(cli.device, Some(PathBuf::from("/dev/input/event4")));
    }

    #[test]
    fn test_explicit_device_after_subcommand() {
        let cli =
            Cli::try_parse_from(["garderobe", "run", "--device", "/dev/input/event4"]).unwrap();
        assert_eq!(cli.command(), Commands::Run);
        assert_eq!(cli.device, Some(PathBuf::from("/dev/input/event4")));
    }

    #[test]
    fn test_unknown_subcommand() {
        assert!(Cli::try_parse_from(["garderobe", "reprint"]).is_err());
    }
}
