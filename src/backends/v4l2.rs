// SPDX-License-Identifier: GPL-3.0-only

//! Video capture device enumeration through V4L2
//!
//! Every `/dev/video*` node that advertises video capture becomes one device.
//! Each (pixel format, frame size) pair becomes one format descriptor whose
//! frame-rate ranges come from the frame intervals the driver reports for
//! that size. V4L2 has no notion of audio, so all descriptors are video.

use super::DeviceEnumerator;
use super::types::{CaptureDevice, Dimensions, FormatDescriptor, FrameRateRange};
use crate::constants::v4l2::{DEVICE_DIR, DEVICE_PREFIX};
use crate::errors::EnumerationResult;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use v4l::capability::Flags;
use v4l::frameinterval::FrameIntervalEnum;
use v4l::framesize::FrameSizeEnum;
use v4l::prelude::*;
use v4l::video::Capture;

/// Enumerates V4L2 video capture nodes
#[derive(Debug, Clone)]
pub struct V4l2Enumerator {
    device_dir: PathBuf,
}

impl V4l2Enumerator {
    pub fn new() -> Self {
        Self::with_device_dir(DEVICE_DIR)
    }

    /// Scan a different directory for `video*` nodes
    pub fn with_device_dir(device_dir: impl Into<PathBuf>) -> Self {
        Self {
            device_dir: device_dir.into(),
        }
    }
}

impl Default for V4l2Enumerator {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceEnumerator for V4l2Enumerator {
    fn name(&self) -> &'static str {
        "v4l2"
    }

    fn devices(&self) -> EnumerationResult<Vec<CaptureDevice>> {
        let nodes = list_video_nodes(&self.device_dir)?;
        debug!(count = nodes.len(), dir = %self.device_dir.display(), "Scanning V4L2 nodes");

        Ok(nodes.iter().filter_map(|path| query_device(path)).collect())
    }
}

/// `video*` entries of a directory, sorted so that output order is stable
pub fn list_video_nodes(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut nodes: Vec<PathBuf> = std::fs::read_dir(dir)?
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.starts_with(DEVICE_PREFIX))
                .unwrap_or(false)
        })
        .collect();

    // video2 before video10
    nodes.sort_by_key(|path| {
        let index = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| n.strip_prefix(DEVICE_PREFIX))
            .and_then(|n| n.parse::<u32>().ok())
            .unwrap_or(u32::MAX);
        (index, path.clone())
    });

    Ok(nodes)
}

fn query_device(path: &Path) -> Option<CaptureDevice> {
    let dev = match Device::with_path(path) {
        Ok(dev) => dev,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Skipping V4L2 node that cannot be opened");
            return None;
        }
    };

    let caps = match dev.query_caps() {
        Ok(caps) => caps,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Skipping V4L2 node without capabilities");
            return None;
        }
    };

    // Metadata and output nodes share the video* prefix
    if !caps.capabilities.contains(Flags::VIDEO_CAPTURE) {
        debug!(path = %path.display(), card = %caps.card, "Skipping non-capture V4L2 node");
        return None;
    }

    let bus = caps.bus.trim_end_matches('\0').trim();
    let model_id = if bus.is_empty() {
        path.to_string_lossy().to_string()
    } else {
        bus.to_string()
    };
    let localized_name = caps.card.trim_end_matches('\0').trim().to_string();

    let formats = query_formats(&dev, path);

    debug!(
        path = %path.display(),
        id = %model_id,
        name = %localized_name,
        driver = %caps.driver.trim_end_matches('\0'),
        formats = formats.len(),
        "Found V4L2 capture device"
    );

    Some(CaptureDevice {
        model_id,
        localized_name,
        formats,
    })
}

fn query_formats(dev: &Device, path: &Path) -> Vec<FormatDescriptor> {
    let mut formats = Vec::new();

    let descriptions = match dev.enum_formats() {
        Ok(descriptions) => descriptions,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to enumerate pixel formats");
            return formats;
        }
    };

    for description in descriptions {
        let fourcc = description.fourcc;
        let sizes = match dev.enum_framesizes(fourcc) {
            Ok(sizes) => sizes,
            Err(e) => {
                debug!(path = %path.display(), fourcc = %fourcc, error = %e, "No frame sizes");
                continue;
            }
        };

        for size in sizes {
            let dimensions = frame_size_dimensions(&size.size);
            let ranges = match dev.enum_frameintervals(fourcc, dimensions.width, dimensions.height)
            {
                Ok(intervals) => intervals
                    .iter()
                    .filter_map(|interval| interval_to_range(&interval.interval))
                    .collect(),
                Err(e) => {
                    debug!(
                        path = %path.display(),
                        fourcc = %fourcc,
                        size = %dimensions,
                        error = %e,
                        "No frame intervals"
                    );
                    Vec::new()
                }
            };

            formats.push(
                FormatDescriptor::video(dimensions, ranges).with_subtype(fourcc.to_string()),
            );
        }
    }

    formats
}

/// Discrete sizes as reported, stepwise sizes at their maximum
pub fn frame_size_dimensions(size: &FrameSizeEnum) -> Dimensions {
    match size {
        FrameSizeEnum::Discrete(discrete) => Dimensions::new(discrete.width, discrete.height),
        FrameSizeEnum::Stepwise(step) => Dimensions::new(step.max_width, step.max_height),
    }
}

/// Convert a frame interval (seconds per frame) into frames per second
///
/// The shortest interval gives the highest rate.
pub fn interval_to_range(interval: &FrameIntervalEnum) -> Option<FrameRateRange> {
    match interval {
        FrameIntervalEnum::Discrete(frac) => {
            FrameRateRange::rate_from_fraction(frac.denominator, frac.numerator)
                .map(FrameRateRange::discrete)
        }
        FrameIntervalEnum::Stepwise(step) => {
            let max = FrameRateRange::rate_from_fraction(step.min.denominator, step.min.numerator)?;
            let min = FrameRateRange::rate_from_fraction(step.max.denominator, step.max.numerator)
                .unwrap_or(0.0);
            Some(FrameRateRange::new(min, max))
        }
    }
}
