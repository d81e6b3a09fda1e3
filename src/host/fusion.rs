// src/host/fusion.rs

//! Complementary filter estimating the board's inclination.

use super::convert::PhysicalSample;
use crate::common::wire::SampleInterval;

const RAD_TO_DEG: f32 = 180.0 / core::f32::consts::PI;

/// Inclination angles in degrees.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Inclination {
    /// Rotation in the X/Z plane.
    pub theta: f32,
    /// Rotation in the Y/Z plane.
    pub phi: f32,
}

/// Blends the gyro-integrated angle (short term) with the accelerometer
/// angle (long term).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct InclinationFilter {
    alpha: f32,
    dt_s: f32,
    angles: Inclination,
}

impl InclinationFilter {
    /// `alpha = tau / (tau + dt)` with `dt` the streaming interval.
    pub fn new(time_constant_s: f32, interval: SampleInterval) -> Self {
        let dt_s = interval.as_millis() as f32 / 1000.0;
        let denom = time_constant_s + dt_s;
        let alpha = if denom > 0.0 { time_constant_s / denom } else { 0.0 };
        InclinationFilter {
            alpha,
            dt_s,
            angles: Inclination::default(),
        }
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn angles(&self) -> Inclination {
        self.angles
    }

    /// Accelerometer-only angles, averaging both accelerometers per axis.
    pub fn accel_angles(sample: &PhysicalSample) -> Inclination {
        let ax = (sample.accel.x + sample.motion_accel.x) / 2.0;
        let ay = (sample.accel.y + sample.motion_accel.y) / 2.0;
        let az = (sample.accel.z + sample.motion_accel.z) / 2.0;
        Inclination {
            theta: libm::atan2f(az, ax) * RAD_TO_DEG,
            phi: libm::atan2f(az, ay) * RAD_TO_DEG,
        }
    }

    pub fn update(&mut self, sample: &PhysicalSample) -> Inclination {
        let accel = Self::accel_angles(sample);
        let a = self.alpha;
        self.angles.theta =
            a * self.angles.theta + (1.0 - a) * accel.theta + a * self.dt_s * sample.gyro.y;
        self.angles.phi =
            a * self.angles.phi + (1.0 - a) * accel.phi + a * self.dt_s * sample.gyro.x;
        self.angles
    }
}
