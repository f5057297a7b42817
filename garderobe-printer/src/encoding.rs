//! Windows-1252 encoding utilities for Epson receipt printers
//!
//! Epson printers ship with several single-byte code pages; page 16
//! (WPC1252) covers German umlauts and the Euro sign.
//! This module provides utilities for:
//! - Truncating strings to a column budget
//! - Converting UTF-8 to Windows-1252 while preserving ESC/POS commands

use encoding_rs::WINDOWS_1252;
use tracing::instrument;

/// ESC t 16 - Select character code table WPC1252
pub(crate) const SELECT_CP1252: [u8; 3] = [0x1B, 0x74, 16];

/// Fallback byte for characters outside the code page
const REPLACEMENT: u8 = b'?';

/// Truncate a string to fit within a column width
///
/// Every character is one byte (and one column) in a single-byte code page.
pub fn truncate_cp1252(s: &str, max_width: usize) -> String {
    s.chars().take(max_width).collect()
}

/// Convert mixed UTF-8 content (with ESC/POS commands) to Windows-1252
///
/// ASCII bytes (0x00-0x7F) are kept exactly as is, which protects ESC/POS
/// commands from being corrupted. Only bytes >= 0x80 are treated as UTF-8
/// sequences and re-encoded. Characters the code page cannot express
/// become `?`.
///
/// The code page is selected at the start and again after every INIT
/// command (ESC @), which resets it.
#[instrument(skip(bytes))]
pub fn convert_to_cp1252(bytes: &[u8]) -> Vec<u8> {
    let mut result = Vec::with_capacity(bytes.len() + SELECT_CP1252.len());
    result.extend_from_slice(&SELECT_CP1252);

    let mut buffer = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];

        if b == 0x1B && i + 1 < bytes.len() && bytes[i + 1] == 0x40 {
            flush_buffer(&mut buffer, &mut result);
            result.extend_from_slice(&[0x1B, 0x40]);
            result.extend_from_slice(&SELECT_CP1252);
            i += 2;
            continue;
        }

        if b < 0x80 {
            flush_buffer(&mut buffer, &mut result);
            result.push(b);
        } else {
            buffer.push(b);
        }
        i += 1;
    }

    flush_buffer(&mut buffer, &mut result);
    result
}

/// Flush the non-ASCII buffer, converting UTF-8 to Windows-1252
fn flush_buffer(buffer: &mut Vec<u8>, result: &mut Vec<u8>) {
    if buffer.is_empty() {
        return;
    }

    let s = String::from_utf8_lossy(buffer);
    let mut tmp = [0u8; 4];
    for c in s.chars() {
        let (encoded, _, had_errors) = WINDOWS_1252.encode(c.encode_utf8(&mut tmp));
        if had_errors || encoded.len() != 1 {
            result.push(REPLACEMENT);
        } else {
            result.extend_from_slice(&encoded);
        }
    }
    buffer.clear();
}
