// src/host/convert.rs

//! Raw counts to physical units, using the default full-scale settings of
//! both devices.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::common::wire::{Axes, SampleRecord};

/// Standalone accelerometer sensitivity (±16 g, full resolution).
pub const ACCEL_G_PER_LSB: f32 = 0.0043;
/// Combined device accelerometer sensitivity (±2 g).
pub const MOTION_ACCEL_LSB_PER_G: f32 = 16384.0;
/// Combined device gyroscope sensitivity (±250 °/s).
pub const GYRO_LSB_PER_DPS: f32 = 131.0;
/// Temperature transfer function: `(raw + 521) / 340 + 35` °C.
pub const TEMP_LSB_PER_DEGC: f32 = 340.0;
pub const TEMP_RAW_OFFSET: f32 = 521.0;
pub const TEMP_OFFSET_DEGC: f32 = 35.0;

/// Number of channels in a [`PhysicalSample`], timestamp included.
pub const CHANNELS: usize = 1 + SampleRecord::CHANNELS;

#[derive(Debug, Default, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Vector3 { x, y, z }
    }

    fn scaled(axes: Axes, factor: f32) -> Self {
        Vector3::new(
            axes.x as f32 * factor,
            axes.y as f32 * factor,
            axes.z as f32 * factor,
        )
    }
}

/// A [`SampleRecord`] in seconds, g, °/s and °C.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PhysicalSample {
    pub time_s: f32,
    pub accel: Vector3,
    pub motion_accel: Vector3,
    pub gyro: Vector3,
    pub temperature: f32,
}

impl PhysicalSample {
    pub fn from_raw(record: &SampleRecord) -> Self {
        PhysicalSample {
            time_s: record.timestamp as f32 / 1000.0,
            accel: Vector3::scaled(record.accel, ACCEL_G_PER_LSB),
            motion_accel: Vector3::scaled(record.motion_accel, 1.0 / MOTION_ACCEL_LSB_PER_G),
            gyro: Vector3::scaled(record.gyro, 1.0 / GYRO_LSB_PER_DPS),
            temperature: (record.temperature as f32 + TEMP_RAW_OFFSET) / TEMP_LSB_PER_DEGC
                + TEMP_OFFSET_DEGC,
        }
    }

    /// All channels in wire order, timestamp first.
    pub fn channels(&self) -> [f32; CHANNELS] {
        [
            self.time_s,
            self.accel.x,
            self.accel.y,
            self.accel.z,
            self.motion_accel.x,
            self.motion_accel.y,
            self.motion_accel.z,
            self.gyro.x,
            self.gyro.y,
            self.gyro.z,
            self.temperature,
        ]
    }

    pub fn from_channels(ch: [f32; CHANNELS]) -> Self {
        PhysicalSample {
            time_s: ch[0],
            accel: Vector3::new(ch[1], ch[2], ch[3]),
            motion_accel: Vector3::new(ch[4], ch[5], ch[6]),
            gyro: Vector3::new(ch[7], ch[8], ch[9]),
            temperature: ch[10],
        }
    }
}

impl From<&SampleRecord> for PhysicalSample {
    fn from(record: &SampleRecord) -> Self {
        PhysicalSample::from_raw(record)
    }
}
