//! Platform capabilities, probed once per process.

use std::sync::OnceLock;

/// Capabilities of the running platform that affect strategy selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Platform {
    /// Whether files can be memory-mapped.
    pub mmap: bool,
}

impl Platform {
    /// Returns the process-wide capability set.
    pub fn current() -> Self {
        static PLATFORM: OnceLock<Platform> = OnceLock::new();

        *PLATFORM.get_or_init(|| {
            let platform = Self {
                mmap: cfg!(any(unix, windows)),
            };
            log::debug!("platform capabilities: {platform:?}");
            platform
        })
    }
}
