// SPDX-License-Identifier: GPL-3.0-only

//! Capture device enumeration through PipeWire
//!
//! `pw-dump` prints the whole PipeWire object graph as a JSON array. Audio
//! and video source nodes carry their negotiable formats under
//! `info.params.EnumFormat`, one object per format. Values in those objects
//! are either plain (`"size": { "width": 640, "height": 480 }`) or SPA
//! choices (`{ "default": .., "min": .., "max": .. }` for ranges,
//! `{ "default": .., "alt1": .., "alt2": .. }` for enumerations).
//!
//! A video `EnumFormat` whose size is an enumeration yields one descriptor
//! per listed size, all sharing the entry's frame rates.

use super::DeviceEnumerator;
use super::types::{
    CaptureDevice, Dimensions, FormatDescriptor, FrameRateRange, MediaKind, StreamBasicDescription,
};
use crate::constants::pipewire::{CAPTURE_MEDIA_CLASSES, ENUM_FORMAT_PARAM, NODE_TYPE, PW_DUMP};
use crate::errors::{EnumerationError, EnumerationResult};
use serde_json::Value;
use std::process::Command;
use tracing::{debug, warn};

/// Enumerates audio and video sources known to the PipeWire daemon
#[derive(Debug, Clone, Copy, Default)]
pub struct PipeWireEnumerator;

impl PipeWireEnumerator {
    pub fn new() -> Self {
        Self
    }
}

impl DeviceEnumerator for PipeWireEnumerator {
    fn name(&self) -> &'static str {
        "pipewire"
    }

    fn devices(&self) -> EnumerationResult<Vec<CaptureDevice>> {
        let dump = run_pw_dump()?;
        parse_pw_dump(&dump)
    }
}

fn run_pw_dump() -> EnumerationResult<String> {
    debug!(command = PW_DUMP, "Querying PipeWire object graph");

    let output = Command::new(PW_DUMP)
        .output()
        .map_err(|source| EnumerationError::CommandUnavailable {
            command: PW_DUMP,
            source,
        })?;

    if !output.status.success() {
        return Err(EnumerationError::CommandFailed {
            command: PW_DUMP,
            status: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    String::from_utf8(output.stdout)
        .map_err(|e| EnumerationError::InvalidOutput(format!("pw-dump output is not UTF-8: {}", e)))
}

/// Parse `pw-dump` JSON into capture devices, keeping dump order
pub fn parse_pw_dump(json: &str) -> EnumerationResult<Vec<CaptureDevice>> {
    let objects: Vec<Value> = serde_json::from_str(json)
        .map_err(|e| EnumerationError::InvalidOutput(format!("pw-dump JSON: {}", e)))?;

    let devices: Vec<CaptureDevice> = objects.iter().filter_map(node_to_device).collect();

    debug!(count = devices.len(), "Found PipeWire capture nodes");
    Ok(devices)
}

fn node_to_device(object: &Value) -> Option<CaptureDevice> {
    if object.get("type").and_then(Value::as_str) != Some(NODE_TYPE) {
        return None;
    }

    let info = object.get("info")?;
    let props = info.get("props")?;

    let media_class = props.get("media.class").and_then(Value::as_str)?;
    if !CAPTURE_MEDIA_CLASSES.contains(&media_class) {
        return None;
    }

    let model_id = props
        .get("node.name")
        .and_then(Value::as_str)
        .map(str::to_string)
        .or_else(|| props.get("object.serial").and_then(scalar_to_string))
        .or_else(|| object.get("id").and_then(scalar_to_string))
        .unwrap_or_default();

    let localized_name = props
        .get("node.description")
        .or_else(|| props.get("node.nick"))
        .or_else(|| props.get("node.name"))
        .and_then(Value::as_str)
        .unwrap_or("Unknown Device")
        .to_string();

    let formats: Vec<FormatDescriptor> = info
        .get("params")
        .and_then(|params| params.get(ENUM_FORMAT_PARAM))
        .and_then(Value::as_array)
        .map(|params| params.iter().flat_map(parse_enum_format).collect())
        .unwrap_or_default();

    debug!(
        id = %model_id,
        name = %localized_name,
        media_class,
        formats = formats.len(),
        "Found PipeWire capture node"
    );

    Some(CaptureDevice {
        model_id,
        localized_name,
        formats,
    })
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Convert one `EnumFormat` object into descriptors
fn parse_enum_format(param: &Value) -> Vec<FormatDescriptor> {
    let Some(media_type) = param.get("mediaType").and_then(Value::as_str) else {
        warn!(param = %param, "EnumFormat entry without mediaType");
        return Vec::new();
    };

    let media_kind = MediaKind::from_media_type(media_type);
    let media_subtype = param
        .get("mediaSubtype")
        .and_then(Value::as_str)
        .map(str::to_string);

    let mut descriptors = match media_kind {
        MediaKind::Video => {
            let ranges = param
                .get("framerate")
                .map(parse_framerate_ranges)
                .unwrap_or_default();
            let sizes = param.get("size").map(parse_sizes).unwrap_or_default();

            if sizes.is_empty() {
                let mut descriptor = FormatDescriptor::video(Dimensions::default(), ranges);
                descriptor.dimensions = None;
                vec![descriptor]
            } else {
                sizes
                    .into_iter()
                    .map(|size| FormatDescriptor::video(size, ranges.clone()))
                    .collect()
            }
        }
        MediaKind::Audio => vec![FormatDescriptor::audio(parse_stream_description(param))],
        MediaKind::Other(kind) => vec![FormatDescriptor::other(kind)],
    };

    for descriptor in &mut descriptors {
        descriptor.media_subtype = media_subtype.clone();
    }
    descriptors
}

/// The value itself, or the `default` of an SPA choice
fn choice_default(value: &Value) -> &Value {
    value.get("default").unwrap_or(value)
}

/// Alternatives of an SPA enum choice in `alt1, alt2, ..` order
fn choice_alternatives(value: &Value) -> Vec<&Value> {
    let Some(object) = value.as_object() else {
        return Vec::new();
    };

    let mut alternatives: Vec<(u32, &Value)> = object
        .iter()
        .filter_map(|(key, v)| {
            let index = key.strip_prefix("alt")?.parse::<u32>().ok()?;
            Some((index, v))
        })
        .collect();
    alternatives.sort_by_key(|(index, _)| *index);
    alternatives.into_iter().map(|(_, v)| v).collect()
}

/// Every size a `size` value offers
///
/// Plain sizes and range choices give one size (ranges at their maximum),
/// enum choices give each alternative, falling back to the default.
fn parse_sizes(value: &Value) -> Vec<Dimensions> {
    if let Some(size) = parse_size(value) {
        return vec![size];
    }

    if let Some(max) = value.get("max").and_then(parse_size) {
        return vec![max];
    }

    let alternatives: Vec<Dimensions> = choice_alternatives(value)
        .into_iter()
        .filter_map(parse_size)
        .collect();
    if !alternatives.is_empty() {
        return alternatives;
    }

    value.get("default").and_then(parse_size).into_iter().collect()
}

fn parse_size(size: &Value) -> Option<Dimensions> {
    let width = size.get("width").and_then(Value::as_u64)?;
    let height = size.get("height").and_then(Value::as_u64)?;
    Some(Dimensions::new(
        u32::try_from(width).unwrap_or(u32::MAX),
        u32::try_from(height).unwrap_or(u32::MAX),
    ))
}

fn parse_fraction(value: &Value) -> Option<f64> {
    let num = value.get("num").and_then(Value::as_u64)?;
    let denom = value.get("denom").and_then(Value::as_u64)?;
    FrameRateRange::rate_from_fraction(u32::try_from(num).ok()?, u32::try_from(denom).ok()?)
}

fn parse_framerate_ranges(value: &Value) -> Vec<FrameRateRange> {
    // Plain fraction
    if let Some(rate) = parse_fraction(value) {
        return vec![FrameRateRange::discrete(rate)];
    }

    // Range choice
    if let (Some(min), Some(max)) = (value.get("min"), value.get("max")) {
        return match (parse_fraction(min), parse_fraction(max)) {
            (Some(min), Some(max)) => vec![FrameRateRange::new(min, max)],
            (None, Some(max)) => vec![FrameRateRange::new(0.0, max)],
            _ => Vec::new(),
        };
    }

    // Enum choice
    let alternatives = choice_alternatives(value);
    if !alternatives.is_empty() {
        return alternatives
            .into_iter()
            .filter_map(parse_fraction)
            .map(FrameRateRange::discrete)
            .collect();
    }

    value
        .get("default")
        .and_then(parse_fraction)
        .map(FrameRateRange::discrete)
        .into_iter()
        .collect()
}

fn parse_stream_description(param: &Value) -> Option<StreamBasicDescription> {
    let sample_rate = param
        .get("rate")
        .map(choice_default)
        .and_then(Value::as_f64)?;

    let channels = param
        .get("channels")
        .map(choice_default)
        .and_then(Value::as_u64)
        .and_then(|c| u32::try_from(c).ok());

    let sample_format = param
        .get("format")
        .map(choice_default)
        .and_then(Value::as_str)
        .map(str::to_string);

    Some(StreamBasicDescription {
        sample_rate,
        channels,
        sample_format,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_framerate_is_one_range() {
        let ranges = parse_framerate_ranges(&json!({ "num": 30, "denom": 1 }));
        assert_eq!(ranges, vec![FrameRateRange::discrete(30.0)]);
    }

    #[test]
    fn test_range_choice_keeps_min_and_max() {
        let ranges = parse_framerate_ranges(&json!({
            "default": { "num": 25, "denom": 1 },
            "min": { "num": 0, "denom": 1 },
            "max": { "num": 60, "denom": 1 }
        }));
        assert_eq!(ranges, vec![FrameRateRange::new(0.0, 60.0)]);
    }

    #[test]
    fn test_enum_choice_orders_alternatives_numerically() {
        let mut choice = serde_json::Map::new();
        choice.insert("default".into(), json!({ "num": 30, "denom": 1 }));
        for (i, fps) in [30, 25, 20, 15, 10, 9, 8, 7, 6, 5, 1].iter().enumerate() {
            choice.insert(format!("alt{}", i + 1), json!({ "num": fps, "denom": 1 }));
        }

        let rates: Vec<f64> = parse_framerate_ranges(&Value::Object(choice))
            .iter()
            .map(|r| r.max_frame_rate)
            .collect();
        assert_eq!(
            rates,
            vec![30.0, 25.0, 20.0, 15.0, 10.0, 9.0, 8.0, 7.0, 6.0, 5.0, 1.0]
        );
    }

    #[test]
    fn test_zero_denominator_is_ignored() {
        assert!(parse_framerate_ranges(&json!({ "num": 30, "denom": 0 })).is_empty());
    }

    #[test]
    fn test_ntsc_fraction() {
        let ranges = parse_framerate_ranges(&json!({ "num": 30000, "denom": 1001 }));
        assert!((ranges[0].max_frame_rate - 29.97).abs() < 0.01);
    }

    #[test]
    fn test_size_range_reports_maximum() {
        let sizes = parse_sizes(&json!({
            "default": { "width": 1280, "height": 720 },
            "min": { "width": 1, "height": 1 },
            "max": { "width": 4096, "height": 4096 }
        }));
        assert_eq!(sizes, vec![Dimensions::new(4096, 4096)]);
    }

    #[test]
    fn test_size_default_only_choice() {
        let sizes = parse_sizes(&json!({ "default": { "width": 1280, "height": 720 } }));
        assert_eq!(sizes, vec![Dimensions::new(1280, 720)]);
    }

    #[test]
    fn test_size_alternatives_yield_one_format_each() {
        let formats = parse_enum_format(&json!({
            "mediaType": "video",
            "mediaSubtype": "raw",
            "format": "YUY2",
            "size": {
                "default": { "width": 640, "height": 480 },
                "alt3": { "width": 1920, "height": 1080 },
                "alt1": { "width": 640, "height": 480 },
                "alt2": { "width": 1280, "height": 720 }
            },
            "framerate": {
                "default": { "num": 30, "denom": 1 },
                "alt1": { "num": 30, "denom": 1 },
                "alt2": { "num": 15, "denom": 1 }
            }
        }));

        let sizes: Vec<Option<Dimensions>> = formats.iter().map(|f| f.dimensions).collect();
        assert_eq!(
            sizes,
            vec![
                Some(Dimensions::new(640, 480)),
                Some(Dimensions::new(1280, 720)),
                Some(Dimensions::new(1920, 1080)),
            ]
        );
        for format in &formats {
            assert_eq!(format.media_subtype.as_deref(), Some("raw"));
            let rates: Vec<f64> = format
                .frame_rate_ranges
                .iter()
                .map(|r| r.max_frame_rate)
                .collect();
            assert_eq!(rates, vec![30.0, 15.0]);
        }
    }

    #[test]
    fn test_video_without_size_keeps_one_format() {
        let formats = parse_enum_format(&json!({
            "mediaType": "video",
            "mediaSubtype": "raw",
            "framerate": { "num": 30, "denom": 1 }
        }));
        assert_eq!(formats.len(), 1);
        assert!(formats[0].dimensions.is_none());
        assert_eq!(formats[0].frame_rate_ranges.len(), 1);
    }

    #[test]
    fn test_audio_without_rate_has_no_description() {
        let format = parse_enum_format(&json!({
            "mediaType": "audio",
            "mediaSubtype": "raw",
            "format": "S16LE"
        }))
        .remove(0);
        assert_eq!(format.media_kind, MediaKind::Audio);
        assert!(format.stream_description.is_none());
    }

    #[test]
    fn test_audio_rate_choice() {
        let format = parse_enum_format(&json!({
            "mediaType": "audio",
            "mediaSubtype": "raw",
            "format": { "default": "F32P", "alt1": "F32P", "alt2": "S16LE" },
            "rate": { "default": 48000, "min": 1, "max": 384000 },
            "channels": 2
        }))
        .remove(0);
        let desc = format.stream_description.unwrap();
        assert_eq!(desc.sample_rate, 48000.0);
        assert_eq!(desc.channels, Some(2));
        assert_eq!(desc.sample_format.as_deref(), Some("F32P"));
    }

    #[test]
    fn test_missing_media_type_is_dropped() {
        assert!(parse_enum_format(&json!({ "format": "YUY2" })).is_empty());
    }

    #[test]
    fn test_non_capture_nodes_are_ignored() {
        let dump = json!([
            { "id": 0, "type": "PipeWire:Interface:Core", "info": {} },
            {
                "id": 40,
                "type": "PipeWire:Interface:Node",
                "info": { "props": { "media.class": "Audio/Sink", "node.name": "speakers" } }
            }
        ]);
        let devices = parse_pw_dump(&dump.to_string()).unwrap();
        assert!(devices.is_empty());
    }

    #[test]
    fn test_id_falls_back_to_serial() {
        let dump = json!([{
            "id": 61,
            "type": "PipeWire:Interface:Node",
            "info": {
                "props": { "media.class": "Video/Source", "object.serial": 412, "node.nick": "Webcam" }
            }
        }]);
        let devices = parse_pw_dump(&dump.to_string()).unwrap();
        assert_eq!(devices[0].model_id, "412");
        assert_eq!(devices[0].localized_name, "Webcam");
        assert!(devices[0].formats.is_empty());
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(matches!(
            parse_pw_dump("{ not json"),
            Err(EnumerationError::InvalidOutput(_))
        ));
    }
}
