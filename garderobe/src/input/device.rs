//! evdev trigger device
//!
//! Enumerates `/dev/input/event*`, applies [`select_device`], grabs the
//! chosen device exclusively and exposes its events as a [`TriggerSource`].

use std::io;
use std::path::{Path, PathBuf};

use evdev::{Device, EventStream, EventType};
use tracing::{error, info, warn};

use super::selector::{DeviceDescriptor, select_device};
use super::{InputSignal, TriggerSource};
use crate::core::InputError;

/// All readable input devices with their descriptors
pub fn enumerate_devices() -> Vec<(DeviceDescriptor, Device)> {
    evdev::enumerate()
        .map(|(path, device)| (describe(path, &device), device))
        .collect()
}

fn describe(path: PathBuf, device: &Device) -> DeviceDescriptor {
    DeviceDescriptor::new(
        path,
        device.name().unwrap_or("(unbenannt)"),
        device.supported_events().contains(EventType::KEY),
    )
}

/// Open the trigger device
///
/// With `explicit` set the heuristic is skipped. If exclusive access
/// cannot be obtained the device is used in shared mode.
pub fn open_trigger_device(explicit: Option<&Path>) -> Result<EvdevSource, InputError> {
    let (descriptor, mut device) = match explicit {
        Some(path) => {
            let device = Device::open(path).map_err(|source| InputError::Open {
                path: path.to_path_buf(),
                source,
            })?;
            (describe(path.to_path_buf(), &device), device)
        }
        None => pick_device(enumerate_devices())?,
    };

    info!(
        path = %descriptor.path.display(),
        "Eingabegerät: {}", descriptor.name
    );

    match device.grab() {
        Ok(()) => info!("Gerät exklusiv übernommen"),
        Err(e) => warn!(error = %e, "Konnte Gerät nicht exklusiv übernehmen"),
    }

    let stream = device
        .into_event_stream()
        .map_err(|source| InputError::Open {
            path: descriptor.path.clone(),
            source,
        })?;

    Ok(EvdevSource { stream })
}

/// Take the selected device out of the enumeration
///
/// When nothing qualifies, every enumerated device is logged for diagnosis.
fn pick_device(
    mut devices: Vec<(DeviceDescriptor, Device)>,
) -> Result<(DeviceDescriptor, Device), InputError> {
    let descriptors: Vec<DeviceDescriptor> = devices.iter().map(|(d, _)| d.clone()).collect();

    let selected = match select_device(&descriptors) {
        Ok(d) => d.path.clone(),
        Err(e) => {
            error!("Kein Eingabegerät gefunden! Verfügbare Geräte:");
            for d in &descriptors {
                error!("  {}: {}", d.path.display(), d.name);
            }
            return Err(e);
        }
    };

    let index = devices
        .iter()
        .position(|(d, _)| d.path == selected)
        .ok_or(InputError::NotFound)?;

    Ok(devices.swap_remove(index))
}

/// Grabbed evdev device
///
/// The grab is released when this is dropped.
pub struct EvdevSource {
    stream: EventStream,
}

impl TriggerSource for EvdevSource {
    async fn next_signal(&mut self) -> io::Result<InputSignal> {
        let event = self.stream.next_event().await?;
        if event.event_type() == EventType::KEY {
            Ok(InputSignal::from_key_value(event.value()))
        } else {
            Ok(InputSignal::Other)
        }
    }
}
