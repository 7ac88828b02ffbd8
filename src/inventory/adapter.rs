// SPDX-License-Identifier: GPL-3.0-only

//! Conversion of platform format descriptors into report records

use super::model::{AudioFormat, FormatInfo, VideoFormat};
use crate::backends::types::{FormatDescriptor, MediaKind};

/// Adapt one descriptor according to its media kind
///
/// Never fails: missing data degrades to zero values.
pub fn describe_format(format: &FormatDescriptor) -> FormatInfo {
    match &format.media_kind {
        MediaKind::Video => FormatInfo::Video(video_format_info(format)),
        MediaKind::Audio => FormatInfo::Audio(audio_format_info(format)),
        MediaKind::Other(kind) => FormatInfo::Unsupported(kind.clone()),
    }
}

/// Dimensions plus the maximum of every frame-rate range, unsorted
pub fn video_format_info(format: &FormatDescriptor) -> VideoFormat {
    let dimensions = format.dimensions.unwrap_or_default();

    let framerates = format
        .frame_rate_ranges
        .iter()
        .map(|range| range.max_frame_rate)
        .collect();

    VideoFormat {
        width: saturating_i32(dimensions.width),
        height: saturating_i32(dimensions.height),
        framerates,
    }
}

/// Sample rate from the stream description, 0.0 without one
pub fn audio_format_info(format: &FormatDescriptor) -> AudioFormat {
    match &format.stream_description {
        Some(description) if description.sample_rate.is_finite() => AudioFormat {
            sample_rate: description.sample_rate.max(0.0),
        },
        _ => AudioFormat::default(),
    }
}

fn saturating_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}
