// SPDX-License-Identifier: GPL-3.0-only

//! capture-info - report the host's capture devices as JSON
//!
//! Lists audio and video capture devices together with the formats they
//! support (resolution and frame rates for video, sample rate for audio).
//! No media is captured; only capability metadata is read.
//!
//! # Architecture
//!
//! - [`backends`]: platform enumeration behind the [`DeviceEnumerator`] trait
//! - [`inventory`]: descriptor adaptation and per-device record building
//! - [`report`]: name filtering and JSON output
//! - [`config`]: run configuration and backend selection
//!
//! # Example
//!
//! ```no_run
//! use capture_info::{BackendKind, ReportConfig, write_report};
//!
//! let config = ReportConfig::default();
//! let enumerator = BackendKind::Auto.enumerator();
//! write_report(enumerator.as_ref(), &config, &mut std::io::stdout()).unwrap();
//! ```

pub mod backends;
pub mod config;
pub mod constants;
pub mod errors;
pub mod inventory;
pub mod report;

// Re-export commonly used types
pub use backends::{CaptureDevice, DeviceEnumerator, FormatDescriptor};
pub use config::{BackendKind, ReportConfig};
pub use errors::{AppError, AppResult, EnumerationError};
pub use inventory::{AudioFormat, DeviceItem, Inventory, VideoFormat, collect_inventory};
pub use report::{filter_by_name, write_report};
