//! Configuration for I/O sizing.

use core::fmt::{self, Display, Formatter};
use std::env;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// I/O sizing parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Performance {
    /// Files at or above this many bytes are memory-mapped under `auto`.
    pub mmap_threshold: u64,

    /// Read-ahead buffer size for buffered sources (in bytes).
    pub buffer_size: usize,
}

impl Default for Performance {
    fn default() -> Self {
        Self {
            mmap_threshold: Self::MMAP_THRESHOLD,
            buffer_size: Self::BUFFER_SIZE,
        }
    }
}

impl Performance {
    /// Memory-map files of 16MB and up.
    pub const MMAP_THRESHOLD: u64 = 16 * 1024 * 1024;
    /// Read-ahead buffer is 64KB.
    pub const BUFFER_SIZE: usize = 64 * 1024;
    /// Largest accepted read-ahead buffer, 1GB.
    pub const MAX_BUFFER_SIZE: usize = 1024 * 1024 * 1024;

    // Environment variable names for configuration.
    const ENV_MMAP_THRESHOLD: &str = "LIST_READER_MMAP_THRESHOLD";
    const ENV_BUFFER_SIZE: &str = "LIST_READER_BUFFER_SIZE";

    /// Create performance configuration from environment variables if present.
    pub fn from_env() -> Self {
        // Parse environment variables only once and cache the result
        static CONFIG: OnceLock<Performance> = OnceLock::new();

        *CONFIG.get_or_init(|| Self {
            mmap_threshold: Self::parse_env_var(Self::ENV_MMAP_THRESHOLD, Self::MMAP_THRESHOLD),
            buffer_size: Self::parse_env_var(Self::ENV_BUFFER_SIZE, Self::BUFFER_SIZE),
        })
    }

    /// Set the memory-mapping size threshold.
    #[must_use]
    pub const fn with_mmap_threshold(mut self, threshold: u64) -> Self {
        self.mmap_threshold = threshold;
        self
    }

    /// Set the read-ahead buffer size.
    #[must_use]
    pub const fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    /// Get the memory-mapping size threshold.
    #[must_use]
    pub const fn mmap_threshold(&self) -> u64 {
        self.mmap_threshold
    }

    /// Get the read-ahead buffer size.
    #[must_use]
    pub const fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    /// Parse numeric environment variable with fallback to default value.
    fn parse_env_var<T: FromStr>(name: &str, default: T) -> T {
        env::var(name)
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(default)
    }
}

impl Display for Performance {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Performance {{ mmap_threshold: {}, buffer_size: {} }}",
            self.mmap_threshold, self.buffer_size
        )
    }
}
