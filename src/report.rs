// SPDX-License-Identifier: GPL-3.0-only

//! Name filtering and JSON output of the device inventory

use crate::backends::DeviceEnumerator;
use crate::config::ReportConfig;
use crate::errors::AppResult;
use crate::inventory::{DeviceItem, Inventory, collect_inventory};
use std::io::Write;
use tracing::debug;

/// Collect, filter and write the report; returns the number of devices written
pub fn write_report<E, W>(enumerator: &E, config: &ReportConfig, out: &mut W) -> AppResult<usize>
where
    E: DeviceEnumerator + ?Sized,
    W: Write,
{
    let inventory = collect_inventory(enumerator)?;
    let devices = filter_by_name(inventory, config.name_filter.as_deref());
    emit(out, &devices, config.pretty)?;
    Ok(devices.len())
}

/// Keep the devices whose name equals `name` exactly; all devices when `None`
pub fn filter_by_name(inventory: Inventory, name: Option<&str>) -> Inventory {
    match name {
        Some(name) => {
            let selected: Inventory = inventory
                .into_iter()
                .filter(|item| item.name == name)
                .collect();
            debug!(filter = name, matched = selected.len(), "Applied name filter");
            selected
        }
        None => inventory,
    }
}

/// Encode devices as a JSON array
pub fn render_json(devices: &[DeviceItem], pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(devices)
    } else {
        serde_json::to_string(devices)
    }
}

/// Write the encoded devices followed by a newline
pub fn emit<W: Write>(out: &mut W, devices: &[DeviceItem], pretty: bool) -> AppResult<()> {
    let json = render_json(devices, pretty)?;
    writeln!(out, "{}", json)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::{AudioFormat, VideoFormat};

    fn inventory() -> Inventory {
        vec![
            DeviceItem {
                id: "alsa_input.pci-0000_00_1f.3.analog-stereo".into(),
                name: "Built-in Microphone".into(),
                video_formats: Some(Vec::new()),
                audio_formats: Some(vec![AudioFormat {
                    sample_rate: 48000.0,
                }]),
            },
            DeviceItem {
                id: "v4l2_input.pci-0000_00_14.0-usb-0_6_1.0".into(),
                name: "Integrated Camera".into(),
                video_formats: Some(vec![VideoFormat {
                    width: 1280,
                    height: 720,
                    framerates: vec![30.0],
                }]),
                audio_formats: Some(Vec::new()),
            },
        ]
    }

    #[test]
    fn test_no_filter_keeps_everything() {
        let all = filter_by_name(inventory(), None);
        assert_eq!(all, inventory());
    }

    #[test]
    fn test_filter_exact_match() {
        let selected = filter_by_name(inventory(), Some("Built-in Microphone"));
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].id, "alsa_input.pci-0000_00_1f.3.analog-stereo");
    }

    #[test]
    fn test_filter_is_case_sensitive() {
        assert!(filter_by_name(inventory(), Some("built-in microphone")).is_empty());
        assert!(filter_by_name(inventory(), Some("Built-in")).is_empty());
    }

    #[test]
    fn test_empty_result_renders_as_empty_array() {
        let json = render_json(&[], true).unwrap();
        assert_eq!(json, "[]");
    }

    #[test]
    fn test_emit_pretty_appends_newline() {
        let mut out = Vec::new();
        emit(&mut out, &inventory()[..1], true).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.ends_with("]\n"));
        assert!(text.contains("\n  {\n    \"id\""));
        assert!(text.contains("\"sampleRate\": 48000.0"));
    }

    #[test]
    fn test_emit_compact_is_single_line() {
        let mut out = Vec::new();
        emit(&mut out, &inventory(), false).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 1);
    }
}
