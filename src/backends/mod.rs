// SPDX-License-Identifier: GPL-3.0-only

//! Backend abstraction layer for capture device enumeration
//!
//! Each backend asks the host for its capture devices and translates the
//! answer into the platform-neutral handles in [`types`]:
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │             Inventory Collector           │
//! └────────────────────┬─────────────────────┘
//!                      │ DeviceEnumerator
//! ┌────────────────────┴─────────────────────┐
//! │  ┌──────────────────┐  ┌──────────────┐  │
//! │  │     PipeWire     │  │     V4L2     │  │
//! │  │ (pw-dump, A + V) │  │ (video only) │  │
//! │  └──────────────────┘  └──────────────┘  │
//! └──────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`pipewire`]: audio and video sources from the PipeWire graph
//! - [`v4l2`]: video capture nodes under `/dev`
//! - [`types`]: device and format descriptor handles

pub mod pipewire;
pub mod types;
pub mod v4l2;

pub use pipewire::PipeWireEnumerator;
pub use types::*;
pub use v4l2::V4l2Enumerator;

use crate::errors::EnumerationResult;
use tracing::info;

/// Source of the host's capture devices
///
/// Implementations return every device the platform knows about, in
/// platform order. Filtering happens after enumeration.
pub trait DeviceEnumerator {
    /// Short backend name used in logs
    fn name(&self) -> &'static str;

    /// List all capture devices with their format descriptors
    fn devices(&self) -> EnumerationResult<Vec<CaptureDevice>>;
}

impl<E: DeviceEnumerator + ?Sized> DeviceEnumerator for Box<E> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn devices(&self) -> EnumerationResult<Vec<CaptureDevice>> {
        (**self).devices()
    }
}

/// Tries a primary backend and falls back to a secondary one when the
/// primary is not available on this host
pub struct FallbackEnumerator<P, S> {
    primary: P,
    secondary: S,
}

impl<P: DeviceEnumerator, S: DeviceEnumerator> FallbackEnumerator<P, S> {
    pub fn new(primary: P, secondary: S) -> Self {
        Self { primary, secondary }
    }
}

impl<P: DeviceEnumerator, S: DeviceEnumerator> DeviceEnumerator for FallbackEnumerator<P, S> {
    fn name(&self) -> &'static str {
        "auto"
    }

    fn devices(&self) -> EnumerationResult<Vec<CaptureDevice>> {
        match self.primary.devices() {
            Err(e) if e.is_unavailable() => {
                info!(
                    primary = self.primary.name(),
                    secondary = self.secondary.name(),
                    error = %e,
                    "Primary backend unavailable, falling back"
                );
                self.secondary.devices()
            }
            result => result,
        }
    }
}
