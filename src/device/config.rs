// src/device/config.rs

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What the session writes into a record when a sensor that passed its probe
/// fails a later read.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ReadFailurePolicy {
    /// Leave the sensor's fields as they were (previous sample, or zero).
    #[default]
    KeepLast,
    /// Zero the sensor's fields for this record.
    ZeroFill,
}

/// Board-side session settings. Nothing here travels on the link.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SessionConfig {
    pub read_failure: ReadFailurePolicy,
}

impl SessionConfig {
    pub const fn new(read_failure: ReadFailurePolicy) -> Self {
        SessionConfig { read_failure }
    }
}
