// src/host/config.rs

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::common::wire::{CalibrationRequest, SampleInterval};

/// Host-side session settings.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HostConfig {
    /// Streaming interval sent to the device.
    pub interval_ms: u32,
    /// Records requested in the calibration burst.
    pub calibration_count: u8,
    /// Whether to request the burst at all.
    pub do_calibration: bool,
    /// Time constant of the inclination filter, in seconds.
    pub time_constant_s: f32,
}

impl Default for HostConfig {
    fn default() -> Self {
        HostConfig {
            interval_ms: 1000,
            calibration_count: 10,
            do_calibration: false,
            time_constant_s: 1.0,
        }
    }
}

impl HostConfig {
    pub fn calibration_request(&self) -> CalibrationRequest {
        CalibrationRequest {
            count: self.calibration_count,
            proceed: self.do_calibration,
        }
    }

    pub fn interval(&self) -> SampleInterval {
        SampleInterval::from_millis(self.interval_ms)
    }
}
