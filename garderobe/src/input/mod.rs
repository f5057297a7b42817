//! Trigger input
//!
//! - [`selector`] - picks the trigger device from a descriptor list
//! - [`device`] - evdev enumeration, exclusive grab and event stream

pub mod device;
pub mod selector;

pub use device::{EvdevSource, enumerate_devices, open_trigger_device};
pub use selector::{DeviceDescriptor, select_device};

/// Kernel key event values
const KEY_RELEASE: i32 = 0;
const KEY_PRESS: i32 = 1;
const KEY_REPEAT: i32 = 2;

/// One event from the trigger device, reduced to what the dispatcher needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSignal {
    KeyPress,
    KeyRelease,
    KeyRepeat,
    /// Sync, misc, LED and any other non-key events
    Other,
}

impl InputSignal {
    /// Map the value of a key event
    pub fn from_key_value(value: i32) -> Self {
        match value {
            KEY_PRESS => InputSignal::KeyPress,
            KEY_RELEASE => InputSignal::KeyRelease,
            KEY_REPEAT => InputSignal::KeyRepeat,
            _ => InputSignal::Other,
        }
    }
}

/// Source of trigger events
#[allow(async_fn_in_trait)]
pub trait TriggerSource {
    /// Wait for the next event
    ///
    /// An error is unrecoverable and ends the dispatcher loop.
    async fn next_signal(&mut self) -> std::io::Result<InputSignal>;
}
