//! Printer adapters for sending ESC/POS data
//!
//! Supports:
//! - USB printers addressed by vendor/product id (bulk OUT transfers)

use crate::error::{PrintError, PrintResult};
use nusb::Interface;
use tracing::{info, instrument};

/// Epson vendor id
pub const EPSON_VENDOR_ID: u16 = 0x04b8;
/// Epson TM-T88V product id
pub const EPSON_TM_T88V_PRODUCT_ID: u16 = 0x0e02;

/// Trait for an open printer session
#[allow(async_fn_in_trait)]
pub trait Printer {
    /// Send raw ESC/POS data to the printer
    async fn print(&self, data: &[u8]) -> PrintResult<()>;
}

/// Trait for opening printer sessions
///
/// A connector is cheap to keep around; each successful [`connect`](Self::connect)
/// yields a fresh session that replaces any earlier one.
#[allow(async_fn_in_trait)]
pub trait Connector {
    type Output: Printer;

    /// Open a new session
    async fn connect(&self) -> PrintResult<Self::Output>;
}

/// USB printer connector
///
/// Finds the device by vendor/product id and claims its printer interface.
#[derive(Debug, Clone)]
pub struct UsbConnector {
    vendor_id: u16,
    product_id: u16,
    interface: u8,
    endpoint: u8,
}

impl UsbConnector {
    /// Create a connector for a specific device
    ///
    /// Uses interface 0 and bulk OUT endpoint 0x01, which is what Epson
    /// TM series printers expose.
    pub fn new(vendor_id: u16, product_id: u16) -> PrintResult<Self> {
        if vendor_id == 0 || product_id == 0 {
            return Err(PrintError::InvalidConfig(format!(
                "Invalid USB id: {:04x}:{:04x}",
                vendor_id, product_id
            )));
        }

        Ok(Self {
            vendor_id,
            product_id,
            interface: 0,
            endpoint: 0x01,
        })
    }

    /// Connector for an Epson TM-T88V
    pub fn epson_tm_t88v() -> Self {
        Self {
            vendor_id: EPSON_VENDOR_ID,
            product_id: EPSON_TM_T88V_PRODUCT_ID,
            interface: 0,
            endpoint: 0x01,
        }
    }

    /// `vendor:product` in lsusb notation
    pub fn id(&self) -> String {
        format!("{:04x}:{:04x}", self.vendor_id, self.product_id)
    }
}

impl Connector for UsbConnector {
    type Output = UsbPrinter;

    #[instrument(skip(self), fields(usb_id = %self.id()))]
    async fn connect(&self) -> PrintResult<UsbPrinter> {
        let device_info = nusb::list_devices()
            .map_err(|e| PrintError::Connection(format!("USB enumeration failed: {}", e)))?
            .find(|d| d.vendor_id() == self.vendor_id && d.product_id() == self.product_id)
            .ok_or_else(|| PrintError::Offline(self.id()))?;

        let device = device_info
            .open()
            .map_err(|e| PrintError::Connection(format!("{}: {}", self.id(), e)))?;

        let interface = device
            .detach_and_claim_interface(self.interface)
            .map_err(|e| {
                PrintError::Connection(format!(
                    "{}: claim interface {} failed: {}",
                    self.id(),
                    self.interface,
                    e
                ))
            })?;

        info!("USB printer interface claimed");

        Ok(UsbPrinter {
            interface,
            endpoint: self.endpoint,
        })
    }
}

/// Open USB printer session
///
/// Dropping the session releases the claimed interface.
pub struct UsbPrinter {
    interface: Interface,
    endpoint: u8,
}

impl Printer for UsbPrinter {
    #[instrument(skip(self, data), fields(endpoint = self.endpoint, data_len = data.len()))]
    async fn print(&self, data: &[u8]) -> PrintResult<()> {
        let completion = self.interface.bulk_out(self.endpoint, data.to_vec()).await;
        let written = completion
            .into_result()
            .map_err(|e| PrintError::Transfer(e.to_string()))?
            .actual_length();

        if written != data.len() {
            return Err(PrintError::Transfer(format!(
                "Incomplete write: {} of {} bytes",
                written,
                data.len()
            )));
        }

        info!("Print job sent successfully");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usb_connector_new() {
        let connector = UsbConnector::new(0x04b8, 0x0e15).unwrap();
        assert_eq!(connector.id(), "04b8:0e15");
    }

    #[test]
    fn test_epson_defaults() {
        let connector = UsbConnector::epson_tm_t88v();
        assert_eq!(connector.id(), "04b8:0e02");
        assert_eq!(connector.endpoint, 0x01);
        assert_eq!(connector.interface, 0);
    }

    #[test]
    fn test_invalid_id() {
        assert!(UsbConnector::new(0, 0x0e02).is_err());
        assert!(UsbConnector::new(0x04b8, 0).is_err());
    }
}
