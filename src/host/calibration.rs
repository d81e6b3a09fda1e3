// src/host/calibration.rs

//! Offset/scale correction of converted samples.
//!
//! Gyro offsets come from the mean rate over a stationary burst. Accelerometer
//! offsets and scales come from two captures per axis, one with the axis
//! pointing up and one pointing down.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::convert::{PhysicalSample, Vector3, CHANNELS};

// Channel indices, see PhysicalSample::channels
const ACCEL_FIRST: usize = 1;
const MOTION_ACCEL_FIRST: usize = 4;
const GYRO_FIRST: usize = 7;

/// Offset and scale from the mean readings of an up and a down capture.
pub fn offset_scale(up: f32, down: f32) -> (f32, f32) {
    ((up + down) / 2.0, (up - down) / 2.0)
}

/// Channel-wise mean. `None` for an empty slice.
pub fn mean(samples: &[PhysicalSample]) -> Option<PhysicalSample> {
    if samples.is_empty() {
        return None;
    }
    let n = samples.len() as f32;
    let mut sum = [0f32; CHANNELS];
    for sample in samples {
        for (acc, value) in sum.iter_mut().zip(sample.channels()) {
            *acc += value / n;
        }
    }
    Some(PhysicalSample::from_channels(sum))
}

/// Mean gyro rate over a stationary capture.
pub fn gyro_bias(samples: &[PhysicalSample]) -> Option<Vector3> {
    mean(samples).map(|m| m.gyro)
}

/// Per-channel `(value - offset) / scale`.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Correction {
    pub offsets: [f32; CHANNELS],
    pub scales: [f32; CHANNELS],
}

impl Default for Correction {
    fn default() -> Self {
        Correction {
            offsets: [0.0; CHANNELS],
            scales: [1.0; CHANNELS],
        }
    }
}

impl Correction {
    pub fn apply(&self, sample: &PhysicalSample) -> PhysicalSample {
        let mut ch = sample.channels();
        for ((value, offset), scale) in ch.iter_mut().zip(self.offsets).zip(self.scales) {
            *value = (*value - offset) / scale;
        }
        PhysicalSample::from_channels(ch)
    }

    pub fn with_gyro_bias(mut self, bias: Vector3) -> Self {
        self.offsets[GYRO_FIRST..GYRO_FIRST + 3].copy_from_slice(&[bias.x, bias.y, bias.z]);
        self
    }

    /// Sets offset and scale of one axis (0 = X, 1 = Y, 2 = Z) of both
    /// accelerometers from the mean of an up and a down capture.
    ///
    /// # Panics
    ///
    /// Panics if `axis` is not 0, 1 or 2.
    pub fn with_accel_axis(mut self, axis: usize, up: &PhysicalSample, down: &PhysicalSample) -> Self {
        assert!(axis < 3, "axis must be 0, 1 or 2");
        let (up, down) = (up.channels(), down.channels());
        for first in [ACCEL_FIRST, MOTION_ACCEL_FIRST] {
            let i = first + axis;
            let (offset, scale) = offset_scale(up[i], down[i]);
            self.offsets[i] = offset;
            self.scales[i] = scale;
        }
        self
    }
}
