//! Configuration system for the decode core.
//!
//! This module defines the configuration structure used to parameterize the
//! core. It provides:
//! 1. **Defaults:** Baseline hardware constants (reset vector, hart id).
//! 2. **Deserialization:** Configuration supplied as JSON from an embedding
//!    harness, or use `Config::default()` directly.

use serde::Deserialize;

/// Default configuration constants for the core.
///
/// These values define the baseline hardware configuration when not
/// explicitly overridden.
mod defaults {
    /// Address forced into the program counter by reset (2 GiB).
    ///
    /// Matches the conventional start of the RAM window on small RISC-V
    /// systems, so instruction streams loaded at the bottom of RAM are
    /// fetched first.
    pub const RESET_VECTOR: u32 = 0x8000_0000;

    /// Hardware thread id reported through the MHARTID CSR.
    pub const HART_ID: u32 = 0;
}

/// Core configuration.
///
/// All fields have defaults; a JSON document may override any subset.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address forced into the program counter by reset.
    pub reset_vector: u32,
    /// Hardware thread id reported through the MHARTID CSR.
    pub hart_id: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reset_vector: defaults::RESET_VECTOR,
            hart_id: defaults::HART_ID,
        }
    }
}

impl Config {
    /// Parses a configuration from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns the underlying deserialization error when the document is
    /// malformed or a field has the wrong type.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
