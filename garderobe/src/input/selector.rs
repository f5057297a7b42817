//! Input device selection
//!
//! Pure policy over device descriptors, so it runs without hardware.

use std::path::PathBuf;

use crate::core::InputError;

/// Name fragments excluded from the keyboard tier
const KEYBOARD_BLOCKLIST: &[&str] = &["hdmi", "vc4", "foot", "pedal", "consumer", "system"];
/// Name fragments excluded from the fallback tier (foot pedals are allowed here)
const FALLBACK_BLOCKLIST: &[&str] = &["hdmi", "vc4", "consumer", "system"];

/// What the selector needs to know about one input device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDescriptor {
    pub path: PathBuf,
    pub name: String,
    /// Device reports key events
    pub has_keys: bool,
}

impl DeviceDescriptor {
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>, has_keys: bool) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            has_keys,
        }
    }

    fn name_contains_any(&self, needles: &[&str]) -> bool {
        let name = self.name.to_lowercase();
        needles.iter().any(|n| name.contains(n))
    }
}

/// Pick the device that should trigger tickets
///
/// Devices are ordered by path first. Priority:
/// 1. a key-capable device named like a keyboard, not on the blocklist
/// 2. any key-capable device not on the shorter fallback blocklist
pub fn select_device(devices: &[DeviceDescriptor]) -> Result<&DeviceDescriptor, InputError> {
    let mut sorted: Vec<&DeviceDescriptor> = devices.iter().filter(|d| d.has_keys).collect();
    sorted.sort_by(|a, b| a.path.cmp(&b.path));

    let keyboard = sorted.iter().copied().find(|d| {
        !d.name_contains_any(KEYBOARD_BLOCKLIST) && d.name.to_lowercase().contains("keyboard")
    });
    if let Some(device) = keyboard {
        return Ok(device);
    }

    sorted
        .into_iter()
        .find(|d| !d.name_contains_any(FALLBACK_BLOCKLIST))
        .ok_or(InputError::NotFound)
}
