// SPDX-License-Identifier: GPL-3.0-only

//! Platform-neutral device handles produced by the enumeration backends

use std::fmt;

/// Media kind a format descriptor belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaKind {
    Video,
    Audio,
    /// Anything else the platform reports (muxed, metadata, subtitles...)
    Other(String),
}

impl MediaKind {
    /// Classify a platform media type string such as "video" or "audio"
    pub fn from_media_type(media_type: &str) -> Self {
        match media_type {
            "video" => MediaKind::Video,
            "audio" => MediaKind::Audio,
            other => MediaKind::Other(other.to_string()),
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Video => write!(f, "video"),
            MediaKind::Audio => write!(f, "audio"),
            MediaKind::Other(kind) => write!(f, "{}", kind),
        }
    }
}

/// Pixel dimensions of a video format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Interval of supported frames per second
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameRateRange {
    pub min_frame_rate: f64,
    pub max_frame_rate: f64,
}

impl FrameRateRange {
    pub fn new(min_frame_rate: f64, max_frame_rate: f64) -> Self {
        Self {
            min_frame_rate,
            max_frame_rate,
        }
    }

    /// A range containing a single rate
    pub fn discrete(rate: f64) -> Self {
        Self::new(rate, rate)
    }

    /// Rate of a `num/denom` fraction, `None` for a zero denominator
    pub fn rate_from_fraction(num: u32, denom: u32) -> Option<f64> {
        if denom == 0 {
            None
        } else {
            Some(num as f64 / denom as f64)
        }
    }
}

/// Basic description of an audio stream
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StreamBasicDescription {
    pub sample_rate: f64,
    pub channels: Option<u32>,
    /// Sample encoding as named by the platform (e.g. "S16LE", "F32P")
    pub sample_format: Option<String>,
}

/// One mode a capture device can operate in
#[derive(Debug, Clone, PartialEq)]
pub struct FormatDescriptor {
    pub media_kind: MediaKind,
    /// Encoding within the media kind (e.g. "raw", "mjpg")
    pub media_subtype: Option<String>,
    pub dimensions: Option<Dimensions>,
    /// Supported frame-rate ranges in platform order
    pub frame_rate_ranges: Vec<FrameRateRange>,
    pub stream_description: Option<StreamBasicDescription>,
}

impl FormatDescriptor {
    /// Descriptor for a video mode
    pub fn video(dimensions: Dimensions, frame_rate_ranges: Vec<FrameRateRange>) -> Self {
        Self {
            media_kind: MediaKind::Video,
            media_subtype: None,
            dimensions: Some(dimensions),
            frame_rate_ranges,
            stream_description: None,
        }
    }

    /// Descriptor for an audio mode
    pub fn audio(stream_description: Option<StreamBasicDescription>) -> Self {
        Self {
            media_kind: MediaKind::Audio,
            media_subtype: None,
            dimensions: None,
            frame_rate_ranges: Vec::new(),
            stream_description,
        }
    }

    /// Descriptor of a kind this tool does not report on
    pub fn other(media_type: impl Into<String>) -> Self {
        Self {
            media_kind: MediaKind::Other(media_type.into()),
            media_subtype: None,
            dimensions: None,
            frame_rate_ranges: Vec::new(),
            stream_description: None,
        }
    }

    pub fn with_subtype(mut self, subtype: impl Into<String>) -> Self {
        self.media_subtype = Some(subtype.into());
        self
    }
}

/// A capture device as seen by a backend
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureDevice {
    /// Stable identifier of the device model or node
    pub model_id: String,
    pub localized_name: String,
    /// Format descriptors in platform order
    pub formats: Vec<FormatDescriptor>,
}
