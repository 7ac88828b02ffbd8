// SPDX-License-Identifier: GPL-3.0-only

//! CLI command for listing capture devices

use capture_info::{AppResult, ReportConfig, write_report};
use tracing::debug;

/// Enumerate devices with the configured backend and print them as JSON
pub fn list_devices(config: &ReportConfig) -> AppResult<()> {
    let enumerator = config.backend.enumerator();
    debug!(backend = enumerator.name(), filter = ?config.name_filter, "Listing capture devices");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let written = write_report(enumerator.as_ref(), config, &mut out)?;

    debug!(devices = written, "Report written");
    Ok(())
}
