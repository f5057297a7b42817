//! ESC/POS command builder
//!
//! Provides a fluent API for building ESC/POS print data.

use std::fmt;
use std::str::FromStr;

use crate::encoding::convert_to_cp1252;
use crate::error::PrintError;

/// Paper cutting behaviour at the end of a ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CutMode {
    /// Leave a small connection so the ticket can be torn off
    #[default]
    Partial,
    /// Separate the ticket completely
    Full,
}

impl CutMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CutMode::Partial => "partial",
            CutMode::Full => "full",
        }
    }
}

impl fmt::Display for CutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CutMode {
    type Err = PrintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "partial" => Ok(CutMode::Partial),
            "full" => Ok(CutMode::Full),
            other => Err(PrintError::InvalidConfig(format!(
                "Unknown cut mode: {}",
                other
            ))),
        }
    }
}

/// ESC/POS command builder
///
/// Builds ESC/POS byte sequences for receipt printers.
/// All text is converted to Windows-1252 on [`build`](Self::build).
pub struct EscPosBuilder {
    buf: Vec<u8>,
    width: usize,
}

impl EscPosBuilder {
    /// Create a new builder with the specified paper width in characters
    ///
    /// Common widths:
    /// - 58mm paper: 32 characters
    /// - 80mm paper: 48 characters
    pub fn new(width: usize) -> Self {
        let mut buf = Vec::with_capacity(256);
        // Initialize printer (ESC @)
        buf.extend_from_slice(&[0x1B, 0x40]);
        Self { buf, width }
    }

    /// Get the configured paper width
    pub fn width(&self) -> usize {
        self.width
    }

    // === Text Output ===

    /// Write raw text (will be re-encoded on build)
    pub fn text(&mut self, s: &str) -> &mut Self {
        self.buf.extend_from_slice(s.as_bytes());
        self
    }

    /// Write text followed by newline
    pub fn line(&mut self, s: &str) -> &mut Self {
        self.text(s);
        self.buf.push(b'\n');
        self
    }

    /// Write empty line
    pub fn newline(&mut self) -> &mut Self {
        self.buf.push(b'\n');
        self
    }

    // === Alignment ===

    /// Align text to center
    pub fn center(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x61, 0x01]);
        self
    }

    // === Text Style ===

    /// Enable bold text
    pub fn bold(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x45, 0x01]);
        self
    }

    /// Disable bold text
    pub fn bold_off(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x45, 0x00]);
        self
    }

    /// Double width and height
    pub fn double_size(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1D, 0x21, 0x11]);
        self
    }

    /// Reset to normal size
    pub fn reset_size(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1D, 0x21, 0x00]);
        self
    }

    // === Paper Control ===

    /// Cut paper (full cut)
    pub fn cut(&mut self) -> &mut Self {
        // GS V 0 - Full cut
        self.buf.extend_from_slice(&[0x1D, 0x56, 0x00]);
        self
    }

    /// Partial cut (leave a small connection)
    pub fn cut_partial(&mut self) -> &mut Self {
        // GS V 1 - Partial cut
        self.buf.extend_from_slice(&[0x1D, 0x56, 0x01]);
        self
    }

    /// Cut according to the configured mode
    pub fn cut_with(&mut self, mode: CutMode) -> &mut Self {
        match mode {
            CutMode::Full => self.cut(),
            CutMode::Partial => self.cut_partial(),
        }
    }

    // === Build ===

    /// Build the final byte buffer with Windows-1252 encoding
    ///
    /// This converts all UTF-8 text while preserving ESC/POS commands.
    pub fn build(self) -> Vec<u8> {
        convert_to_cp1252(&self.buf)
    }
}

impl Default for EscPosBuilder {
    fn default() -> Self {
        Self::new(48)
    }
}
