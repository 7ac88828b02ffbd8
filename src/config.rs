// SPDX-License-Identifier: GPL-3.0-only

//! Run configuration

use crate::backends::{DeviceEnumerator, FallbackEnumerator, PipeWireEnumerator, V4l2Enumerator};
use serde::{Deserialize, Serialize};

/// Platform enumeration backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// PipeWire when available, V4L2 otherwise
    #[default]
    Auto,
    /// Audio and video sources from PipeWire (`pw-dump`)
    #[value(name = "pipewire")]
    PipeWire,
    /// Video capture nodes from V4L2 (`/dev/video*`)
    #[value(name = "v4l2")]
    V4l2,
}

impl BackendKind {
    /// Build the enumerator for this backend
    pub fn enumerator(self) -> Box<dyn DeviceEnumerator> {
        match self {
            BackendKind::Auto => Box::new(FallbackEnumerator::new(
                PipeWireEnumerator::new(),
                V4l2Enumerator::new(),
            )),
            BackendKind::PipeWire => Box::new(PipeWireEnumerator::new()),
            BackendKind::V4l2 => Box::new(V4l2Enumerator::new()),
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendKind::Auto => write!(f, "auto"),
            BackendKind::PipeWire => write!(f, "pipewire"),
            BackendKind::V4l2 => write!(f, "v4l2"),
        }
    }
}

/// Everything one report run needs to know
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    /// Exact device name to select; all devices when unset
    pub name_filter: Option<String>,
    pub backend: BackendKind,
    /// Pretty-print the JSON document
    pub pretty: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            name_filter: None,
            backend: BackendKind::default(),
            pretty: true,
        }
    }
}
