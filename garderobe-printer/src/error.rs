//! Error types for the printer library

use thiserror::Error;

/// Printer error types
#[derive(Debug, Error)]
pub enum PrintError {
    /// Device could not be opened or claimed
    #[error("Connection failed: {0}")]
    Connection(String),

    /// IO error during printing
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// No device with the configured vendor/product id is attached
    #[error("Printer offline: {0}")]
    Offline(String),

    /// USB bulk transfer failed or was short
    #[error("Transfer failed: {0}")]
    Transfer(String),

    /// Invalid printer configuration
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

/// Result type for printer operations
pub type PrintResult<T> = Result<T, PrintError>;
