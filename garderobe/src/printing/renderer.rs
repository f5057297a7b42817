//! Cloakroom ticket renderer
//!
//! Renders one ticket into ESC/POS format for the receipt printer.

use chrono::{DateTime, Local};
use garderobe_printer::{CutMode, EscPosBuilder, truncate_cp1252};

/// Ticket timestamp, e.g. `24.12.2026  18:05`
pub const TIMESTAMP_FORMAT: &str = "%d.%m.%Y  %H:%M";

/// Cloakroom ticket renderer
///
/// Layout: bold double-size header, blank line, timestamp, blank line,
/// bold double-size number, two blank lines, cut.
#[derive(Debug, Clone)]
pub struct TicketRenderer {
    width: usize,
    header: String,
}

impl TicketRenderer {
    /// Create a new renderer with specified paper width and header text
    ///
    /// Common widths:
    /// - 58mm paper: 32 characters
    /// - 80mm paper: 48 characters
    pub fn new(width: usize, header: impl Into<String>) -> Self {
        Self {
            width,
            header: header.into(),
        }
    }

    /// Render a ticket to ESC/POS bytes
    pub fn render(&self, number: u64, cut_mode: CutMode, printed_at: DateTime<Local>) -> Vec<u8> {
        let mut b = EscPosBuilder::new(self.width);
        // Double-size glyphs take two columns
        let large_width = b.width() / 2;

        b.center();

        b.bold().double_size();
        b.line(&truncate_cp1252(&self.header, large_width));
        b.newline();

        b.bold_off().reset_size();
        b.line(&printed_at.format(TIMESTAMP_FORMAT).to_string());
        b.newline();

        b.bold().double_size();
        b.line(&number.to_string());
        b.newline().newline();

        b.bold_off().reset_size();
        b.cut_with(cut_mode);

        b.build()
    }
}

impl Default for TicketRenderer {
    fn default() -> Self {
        Self::new(48, crate::core::config::DEFAULT_HEADER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 3, 7, 9, 5, 0).unwrap()
    }

    fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
        haystack.windows(needle.len()).position(|w| w == needle)
    }

    #[test]
    fn test_layout_order() {
        let data = TicketRenderer::default().render(512, CutMode::Partial, at());

        let header = find(&data, b"FUNKHAUS\n\n").unwrap();
        let stamp = find(&data, b"07.03.2026  09:05\n\n").unwrap();
        let number = find(&data, b"512\n\n\n").unwrap();
        let cut = find(&data, &[0x1D, 0x56, 0x01]).unwrap();

        assert!(header < stamp && stamp < number && number < cut);
        assert!(data.ends_with(&[0x1D, 0x56, 0x01]));
    }

    #[test]
    fn test_full_cut() {
        let data = TicketRenderer::default().render(1, CutMode::Full, at());
        assert!(data.ends_with(&[0x1D, 0x56, 0x00]));
    }

    #[test]
    fn test_number_is_large_and_bold() {
        let data = TicketRenderer::default().render(77, CutMode::Partial, at());
        let number = find(&data, b"77\n").unwrap();
        let style = &data[number - 6..number];
        assert_eq!(style, &[0x1B, 0x45, 0x01, 0x1D, 0x21, 0x11]);
    }

    #[test]
    fn test_header_encoded_and_truncated() {
        let renderer = TicketRenderer::new(32, "Garderobe Süd Eingang");
        let data = renderer.render(3, CutMode::Partial, at());
        assert!(find(&data, b"Garderobe S\xFCd Ei\n").is_some());
        assert!(find(&data, b"Eingang").is_none());
    }
}
