// SPDX-License-Identifier: GPL-3.0-only

//! Serializable device report records
//!
//! Field order here is the JSON key order of the report.

use serde::{Deserialize, Serialize};

/// One video mode of a device
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VideoFormat {
    pub width: i32,
    pub height: i32,
    /// Maximum rate of each supported frame-rate range, in platform order
    pub framerates: Vec<f64>,
}

/// One audio mode of a device
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioFormat {
    /// 0.0 when the platform gave no stream description
    pub sample_rate: f64,
}

/// A capture device and the formats it supports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceItem {
    pub id: String,
    pub name: String,
    pub video_formats: Option<Vec<VideoFormat>>,
    pub audio_formats: Option<Vec<AudioFormat>>,
}

impl Default for DeviceItem {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            video_formats: Some(Vec::new()),
            audio_formats: Some(Vec::new()),
        }
    }
}

impl DeviceItem {
    pub fn video_format_count(&self) -> usize {
        self.video_formats.as_ref().map_or(0, Vec::len)
    }

    pub fn audio_format_count(&self) -> usize {
        self.audio_formats.as_ref().map_or(0, Vec::len)
    }
}

/// Every device found in one enumeration pass, in platform order
pub type Inventory = Vec<DeviceItem>;

/// Result of adapting one format descriptor
#[derive(Debug, Clone, PartialEq)]
pub enum FormatInfo {
    Video(VideoFormat),
    Audio(AudioFormat),
    /// Media kind this report does not cover, carried for diagnostics
    Unsupported(String),
}
