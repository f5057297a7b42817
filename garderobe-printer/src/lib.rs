//! # garderobe-printer
//!
//! ESC/POS receipt printer library - low-level printing capabilities only.
//!
//! ## Scope
//!
//! This crate handles HOW to print:
//! - ESC/POS command building
//! - Windows-1252 encoding for the Epson code page
//! - USB bulk printing (vendor/product identified devices)
//!
//! Business logic (WHAT to print) stays in the `garderobe` application:
//! - Cloakroom ticket rendering
//! - Session handling and reconnects
//!
//! ## Example
//!
//! ```ignore
//! use garderobe_printer::{Connector, CutMode, EscPosBuilder, Printer, UsbConnector};
//!
//! let mut builder = EscPosBuilder::new(48);
//! builder.center();
//! builder.double_size();
//! builder.line("FUNKHAUS");
//! builder.reset_size();
//! builder.cut_with(CutMode::Partial);
//!
//! let printer = UsbConnector::epson_tm_t88v().connect().await?;
//! printer.print(&builder.build()).await?;
//! ```

mod encoding;
mod error;
mod escpos;
mod printer;

// Re-exports
pub use encoding::{convert_to_cp1252, truncate_cp1252};
pub use error::{PrintError, PrintResult};
pub use escpos::{CutMode, EscPosBuilder};
pub use printer::{
    Connector, EPSON_TM_T88V_PRODUCT_ID, EPSON_VENDOR_ID, Printer, UsbConnector, UsbPrinter,
};
