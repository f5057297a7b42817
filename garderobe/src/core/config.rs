use std::fs;
use std::path::Path;

use garderobe_printer::{CutMode, EPSON_TM_T88V_PRODUCT_ID, EPSON_VENDOR_ID};
use tracing::{info, warn};

use super::error::ConfigError;

/// Default first ticket number for a fresh installation
pub const DEFAULT_STARTING_NUMBER: u64 = 500;
/// Default header text printed on every ticket
pub const DEFAULT_HEADER: &str = "FUNKHAUS";

/// Dispenser configuration
///
/// # Config file (INI)
///
/// | Section | Key | Default | Meaning |
/// |---------|-----|---------|---------|
/// | general | current_number | 500 | first ticket number when no state exists |
/// | general | cut_mode | partial | `partial` or `full` |
/// | printer | header | FUNKHAUS | header line on each ticket |
/// | printer | vendor_id | 0x04b8 | USB vendor id (hex or decimal) |
/// | printer | product_id | 0x0e02 | USB product id (hex or decimal) |
///
/// Every key falls back to its default on its own; a missing or broken
/// file yields the full default configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Ticket number used when the state file is missing or unreadable
    pub starting_number: u64,
    pub cut_mode: CutMode,
    pub header: String,
    pub vendor_id: u16,
    pub product_id: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            starting_number: DEFAULT_STARTING_NUMBER,
            cut_mode: CutMode::Partial,
            header: DEFAULT_HEADER.to_string(),
            vendor_id: EPSON_VENDOR_ID,
            product_id: EPSON_TM_T88V_PRODUCT_ID,
        }
    }
}

impl Config {
    /// Load the configuration from an INI file
    ///
    /// Never fails: problems are logged and the affected values keep
    /// their defaults.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            info!(path = %path.display(), "Keine Konfigurationsdatei, verwende Standardwerte");
            return Self::default();
        }

        let source = ::config::Config::builder()
            .add_source(::config::File::new(
                &path.to_string_lossy(),
                ::config::FileFormat::Ini,
            ))
            .build();

        match source {
            Ok(source) => Self::from_source(&source),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Konfiguration nicht lesbar, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Parse configuration from INI text
    pub fn from_ini_str(content: &str) -> Self {
        let source = ::config::Config::builder()
            .add_source(::config::File::from_str(content, ::config::FileFormat::Ini))
            .build();

        match source {
            Ok(source) => Self::from_source(&source),
            Err(e) => {
                warn!(error = %e, "Konfiguration nicht lesbar, verwende Standardwerte");
                Self::default()
            }
        }
    }

    fn from_source(source: &::config::Config) -> Self {
        let mut config = Self::default();

        if let Some(raw) = read_key(source, "general.current_number") {
            match raw.trim().parse::<u64>() {
                Ok(n) => config.starting_number = n,
                Err(_) => warn!(value = %raw, "Ungültige current_number, verwende {}", DEFAULT_STARTING_NUMBER),
            }
        }

        if let Some(raw) = read_key(source, "general.cut_mode") {
            match raw.parse::<CutMode>() {
                Ok(mode) => config.cut_mode = mode,
                Err(_) => warn!(value = %raw, "Ungültiger cut_mode, verwende partial"),
            }
        }

        if let Some(raw) = read_key(source, "printer.header") {
            let header = raw.trim();
            if !header.is_empty() {
                config.header = header.to_string();
            }
        }

        if let Some(raw) = read_key(source, "printer.vendor_id") {
            match parse_usb_id(&raw) {
                Some(id) => config.vendor_id = id,
                None => warn!(value = %raw, "Ungültige vendor_id, verwende Standardwert"),
            }
        }

        if let Some(raw) = read_key(source, "printer.product_id") {
            match parse_usb_id(&raw) {
                Some(id) => config.product_id = id,
                None => warn!(value = %raw, "Ungültige product_id, verwende Standardwert"),
            }
        }

        config
    }

    /// Write the configuration back, overwriting the file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        fs::write(path, self.to_ini()).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Render the configuration in the same INI layout it is read from
    pub fn to_ini(&self) -> String {
        format!(
            "[general]\ncurrent_number = {}\ncut_mode = {}\n\n[printer]\nheader = {}\nvendor_id = 0x{:04x}\nproduct_id = 0x{:04x}\n",
            self.starting_number, self.cut_mode, self.header, self.vendor_id, self.product_id
        )
    }
}

/// Read a key as a string, treating "not present" as `None`
fn read_key(source: &::config::Config, key: &str) -> Option<String> {
    match source.get_string(key) {
        Ok(value) => Some(value),
        Err(::config::ConfigError::NotFound(_)) => None,
        Err(e) => {
            warn!(key, error = %e, "Konfigurationswert nicht lesbar");
            None
        }
    }
}

/// Parse `0x04b8` or `1208`
fn parse_usb_id(raw: &str) -> Option<u16> {
    let raw = raw.trim();
    match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16).ok(),
        None => raw.parse().ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(&dir.path().join("config.ini"));
        assert_eq!(config, Config::default());
        assert_eq!(config.starting_number, 500);
        assert_eq!(config.cut_mode, CutMode::Partial);
    }

    #[test]
    fn test_reads_general_section() {
        let config = Config::from_ini_str("[general]\ncurrent_number = 1200\ncut_mode = full\n");
        assert_eq!(config.starting_number, 1200);
        assert_eq!(config.cut_mode, CutMode::Full);
        assert_eq!(config.header, DEFAULT_HEADER);
    }

    #[test]
    fn test_missing_keys_fall_back_individually() {
        let config = Config::from_ini_str("[general]\ncut_mode = full\n");
        assert_eq!(config.starting_number, DEFAULT_STARTING_NUMBER);
        assert_eq!(config.cut_mode, CutMode::Full);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config =
            Config::from_ini_str("[general]\ncurrent_number = -3\ncut_mode = sideways\n");
        assert_eq!(config.starting_number, DEFAULT_STARTING_NUMBER);
        assert_eq!(config.cut_mode, CutMode::Partial);
    }

    #[test]
    fn test_other_sections_ignored() {
        let config = Config::from_ini_str("[misc]\ncurrent_number = 9\n");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_printer_section() {
        let config = Config::from_ini_str(
            "[printer]\nheader = Garderobe Süd\nvendor_id = 0x04B8\nproduct_id = 3605\n",
        );
        assert_eq!(config.header, "Garderobe Süd");
        assert_eq!(config.vendor_id, 0x04b8);
        assert_eq!(config.product_id, 3605);
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.ini");
        let config = Config {
            starting_number: 42,
            cut_mode: CutMode::Full,
            header: "Theater".to_string(),
            vendor_id: 0x04b8,
            product_id: 0x0e15,
        };

        config.save(&path).unwrap();
        assert_eq!(Config::load(&path), config);
    }

    #[test]
    fn test_save_to_missing_dir_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope").join("config.ini");
        assert!(matches!(
            Config::default().save(&path),
            Err(ConfigError::Write { .. })
        ));
    }

    #[test]
    fn test_parse_usb_id() {
        assert_eq!(parse_usb_id("0x0e02"), Some(0x0e02));
        assert_eq!(parse_usb_id(" 1208 "), Some(1208));
        assert_eq!(parse_usb_id("0xzz"), None);
        assert_eq!(parse_usb_id("70000"), None);
    }
}
