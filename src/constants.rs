// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

/// Exit status for malformed command lines (sysexits.h `EX_USAGE`)
pub const EXIT_USAGE: u8 = 64;

/// Exit status for fatal enumeration or output failures
pub const EXIT_FAILURE: u8 = 1;

/// Log filter used when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Environment variable selecting the enumeration backend
pub const BACKEND_ENV: &str = "CAPTURE_INFO_BACKEND";

/// PipeWire constants used when reading `pw-dump` output
pub mod pipewire {
    /// Command that dumps the PipeWire object graph as JSON
    pub const PW_DUMP: &str = "pw-dump";

    /// Object type of PipeWire nodes
    pub const NODE_TYPE: &str = "PipeWire:Interface:Node";

    /// Node media classes reported as capture devices
    pub const CAPTURE_MEDIA_CLASSES: &[&str] = &[
        "Video/Source",
        "Audio/Source",
        "Audio/Source/Virtual",
        "Audio/Duplex",
    ];

    /// Param key holding the formats a node can negotiate
    pub const ENUM_FORMAT_PARAM: &str = "EnumFormat";
}

/// V4L2 constants
pub mod v4l2 {
    /// Directory scanned for video device nodes
    pub const DEVICE_DIR: &str = "/dev";

    /// File name prefix of video device nodes
    pub const DEVICE_PREFIX: &str = "video";
}
