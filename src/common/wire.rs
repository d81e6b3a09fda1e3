// src/common/wire.rs

//! Payloads exchanged on the link and their byte-level encoding.
//!
//! Every multi-byte field is little-endian, fields are packed with no padding
//! and nothing frames them: the phase of the session alone determines which
//! payload comes next.
//!
//! | Payload              | Direction     | Size |
//! |----------------------|---------------|------|
//! | [`CapabilityReport`] | device → host | 2    |
//! | [`CalibrationRequest`] | host → device | 2  |
//! | [`SampleInterval`]   | host → device | 4    |
//! | [`SampleRecord`]     | device → host | 24   |

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[inline]
const fn encode_bool(value: bool) -> u8 {
    value as u8
}

#[inline]
const fn decode_bool(byte: u8) -> bool {
    byte != 0
}

/// Raw X/Y/Z counts of one three-axis transducer.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Axes {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

impl Axes {
    pub const fn new(x: i16, y: i16, z: i16) -> Self {
        Axes { x, y, z }
    }

    pub const fn as_array(&self) -> [i16; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[i16; 3]> for Axes {
    fn from([x, y, z]: [i16; 3]) -> Self {
        Axes { x, y, z }
    }
}

/// One transaction's worth of data from the combined motion device.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionReading {
    pub accel: Axes,
    pub gyro: Axes,
    pub temperature: i16,
}

/// Which sensors answered their connection test at startup.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CapabilityReport {
    /// Standalone accelerometer online.
    pub accel: bool,
    /// Combined accelerometer/gyroscope/temperature device online.
    pub gyro: bool,
}

impl CapabilityReport {
    pub const LEN: usize = 2;

    pub const fn new(accel: bool, gyro: bool) -> Self {
        CapabilityReport { accel, gyro }
    }

    /// True if at least one sensor is online.
    pub const fn any(&self) -> bool {
        self.accel || self.gyro
    }

    pub const fn encode(&self) -> [u8; Self::LEN] {
        [encode_bool(self.accel), encode_bool(self.gyro)]
    }

    pub const fn decode(bytes: &[u8; Self::LEN]) -> Self {
        CapabilityReport {
            accel: decode_bool(bytes[0]),
            gyro: decode_bool(bytes[1]),
        }
    }
}

/// Host request for a back-to-back calibration burst.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CalibrationRequest {
    /// Records to burst. Ignored unless `proceed` is set.
    pub count: u8,
    pub proceed: bool,
}

impl CalibrationRequest {
    pub const LEN: usize = 2;

    /// A request that skips the burst.
    pub const SKIP: CalibrationRequest = CalibrationRequest {
        count: 0,
        proceed: false,
    };

    pub const fn burst(count: u8) -> Self {
        CalibrationRequest {
            count,
            proceed: true,
        }
    }

    /// Number of records the device will actually emit for this request.
    pub const fn burst_len(&self) -> u8 {
        if self.proceed {
            self.count
        } else {
            0
        }
    }

    pub const fn encode(&self) -> [u8; Self::LEN] {
        [self.count, encode_bool(self.proceed)]
    }

    pub const fn decode(bytes: &[u8; Self::LEN]) -> Self {
        CalibrationRequest {
            count: bytes[0],
            proceed: decode_bool(bytes[1]),
        }
    }
}

/// Milliseconds between streaming emissions. Zero means unthrottled.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SampleInterval(u32);

impl SampleInterval {
    pub const LEN: usize = 4;

    pub const fn from_millis(ms: u32) -> Self {
        SampleInterval(ms)
    }

    #[inline]
    pub const fn as_millis(&self) -> u32 {
        self.0
    }

    pub const fn encode(&self) -> [u8; Self::LEN] {
        self.0.to_le_bytes()
    }

    pub const fn decode(bytes: &[u8; Self::LEN]) -> Self {
        SampleInterval(u32::from_le_bytes(*bytes))
    }
}

/// One telemetry sample, in wire order.
///
/// Fields belonging to a sensor that is not online are carried on the wire
/// anyway; their content is whatever the record storage last held.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SampleRecord {
    /// Milliseconds since boot at acquisition.
    pub timestamp: u32,
    /// Standalone accelerometer.
    pub accel: Axes,
    /// Accelerometer of the combined device.
    pub motion_accel: Axes,
    /// Gyroscope of the combined device.
    pub gyro: Axes,
    /// Temperature of the combined device.
    pub temperature: i16,
}

impl SampleRecord {
    /// Number of signed 16-bit channels following the timestamp.
    pub const CHANNELS: usize = 10;
    /// `timestamp:u32` followed by ten `i16`.
    pub const LEN: usize = 4 + Self::CHANNELS * 2;

    /// The ten signed channels in wire order.
    pub const fn channels(&self) -> [i16; Self::CHANNELS] {
        [
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

    pub fn encode(&self) -> [u8; Self::LEN] {
        let mut buf = [0u8; Self::LEN];
        buf[..4].copy_from_slice(&self.timestamp.to_le_bytes());
        for (chunk, value) in buf[4..].chunks_exact_mut(2).zip(self.channels()) {
            chunk.copy_from_slice(&value.to_le_bytes());
        }
        buf
    }

    pub fn decode(bytes: &[u8; Self::LEN]) -> Self {
        let timestamp = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        let mut ch = [0i16; Self::CHANNELS];
        for (value, chunk) in ch.iter_mut().zip(bytes[4..].chunks_exact(2)) {
            *value = i16::from_le_bytes([chunk[0], chunk[1]]);
        }
        SampleRecord {
            timestamp,
            accel: Axes::new(ch[0], ch[1], ch[2]),
            motion_accel: Axes::new(ch[3], ch[4], ch[5]),
            gyro: Axes::new(ch[6], ch[7], ch[8]),
            temperature: ch[9],
        }
    }
}
