// SPDX-License-Identifier: GPL-3.0-only

//! Device inventory collection
//!
//! Turns the handles returned by a [`DeviceEnumerator`] into [`DeviceItem`]
//! records: each device's descriptors go through the [`adapter`] and are
//! split into video and audio formats. Descriptors of other media kinds are
//! logged and skipped.

pub mod adapter;
pub mod model;

pub use adapter::describe_format;
pub use model::{AudioFormat, DeviceItem, FormatInfo, Inventory, VideoFormat};

use crate::backends::{CaptureDevice, DeviceEnumerator};
use crate::errors::EnumerationResult;
use tracing::{debug, warn};

/// Build the report record for one device
pub fn build_device_item(device: &CaptureDevice) -> DeviceItem {
    let mut video_formats = Vec::new();
    let mut audio_formats = Vec::new();

    for format in &device.formats {
        match describe_format(format) {
            FormatInfo::Video(video) => video_formats.push(video),
            FormatInfo::Audio(audio) => audio_formats.push(audio),
            FormatInfo::Unsupported(kind) => {
                warn!(
                    device = %device.localized_name,
                    media_kind = %kind,
                    "unsupported format detected"
                );
            }
        }
    }

    DeviceItem {
        id: device.model_id.clone(),
        name: device.localized_name.clone(),
        video_formats: Some(video_formats),
        audio_formats: Some(audio_formats),
    }
}

/// Enumerate every device and build its record, keeping platform order
///
/// Only a failure of the enumeration call itself is an error.
pub fn collect_inventory<E: DeviceEnumerator + ?Sized>(
    enumerator: &E,
) -> EnumerationResult<Inventory> {
    let devices = enumerator.devices()?;

    let inventory: Inventory = devices.iter().map(build_device_item).collect();

    debug!(
        backend = enumerator.name(),
        devices = inventory.len(),
        "Collected device inventory"
    );
    Ok(inventory)
}
