// src/test_support.rs
//
// Mocks shared by the unit tests of the device and host sessions.

use crate::common::{
    hal_traits::{Accelerometer, LinkClock, LinkSerial, MotionSensor},
    wire::{Axes, MotionReading, SampleRecord},
};
use core::cell::Cell;
use heapless::{Deque, Vec};

/// Empty-buffer polls tolerated before the mock declares the reader stuck.
pub const STARVE_LIMIT: u32 = 10_000;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MockCommError {
    /// The reader kept polling an empty receive buffer; on hardware it would
    /// still be waiting.
    Starved,
    /// Transmit log is full.
    Overflow,
}

#[derive(Default)]
pub struct MockSerial {
    pub rx: Deque<u8, 256>,
    pub tx: Vec<u8, 8192>,
    /// `tx.len()` when the first byte was read, if any was.
    pub tx_len_at_first_read: Option<usize>,
    pub reads: usize,
    empty_polls: u32,
}

impl MockSerial {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input(data: &[u8]) -> Self {
        let mut serial = Self::new();
        serial.stage(data);
        serial
    }

    pub fn stage(&mut self, data: &[u8]) {
        for byte in data {
            self.rx.push_back(*byte).unwrap();
        }
    }

    /// Splits the transmit log after the first `skip` bytes into records.
    pub fn records_after(&self, skip: usize) -> impl Iterator<Item = SampleRecord> + '_ {
        assert_eq!((self.tx.len() - skip) % SampleRecord::LEN, 0, "trailing partial record");
        self.tx[skip..]
            .chunks_exact(SampleRecord::LEN)
            .map(|chunk| SampleRecord::decode(chunk.try_into().unwrap()))
    }
}

impl LinkSerial for MockSerial {
    type Error = MockCommError;

    fn read_byte(&mut self) -> nb::Result<u8, Self::Error> {
        match self.rx.pop_front() {
            Some(byte) => {
                if self.tx_len_at_first_read.is_none() {
                    self.tx_len_at_first_read = Some(self.tx.len());
                }
                self.reads += 1;
                self.empty_polls = 0;
                Ok(byte)
            }
            None => {
                self.empty_polls += 1;
                if self.empty_polls > STARVE_LIMIT {
                    Err(nb::Error::Other(MockCommError::Starved))
                } else {
                    Err(nb::Error::WouldBlock)
                }
            }
        }
    }

    fn write_byte(&mut self, byte: u8) -> nb::Result<(), Self::Error> {
        self.tx
            .push(byte)
            .map_err(|_| nb::Error::Other(MockCommError::Overflow))
    }

    fn flush(&mut self) -> nb::Result<(), Self::Error> {
        Ok(())
    }
}

/// Clock that only moves when delayed, plus an optional step per reading.
pub struct MockClock {
    now: Cell<u32>,
    step_per_read: u32,
    pub delays: Vec<u32, 64>,
}

impl MockClock {
    pub fn new(start_ms: u32) -> Self {
        MockClock {
            now: Cell::new(start_ms),
            step_per_read: 0,
            delays: Vec::new(),
        }
    }

    pub fn with_step(start_ms: u32, step_per_read: u32) -> Self {
        MockClock {
            step_per_read,
            ..Self::new(start_ms)
        }
    }
}

impl LinkClock for MockClock {
    fn now_ms(&self) -> u32 {
        let now = self.now.get();
        self.now.set(now.wrapping_add(self.step_per_read));
        now
    }

    fn delay_ms(&mut self, ms: u32) {
        // Only the first 64 delays are kept for inspection
        let _ = self.delays.push(ms);
        self.now.set(self.now.get().wrapping_add(ms));
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MockSensorError;

/// Accelerometer whose X axis counts its transactions.
pub struct MockAccel {
    pub present: bool,
    pub fail: bool,
    pub calls: u32,
    pub base: Axes,
}

impl MockAccel {
    pub fn new(present: bool) -> Self {
        MockAccel {
            present,
            fail: false,
            calls: 0,
            base: Axes::new(100, -200, 300),
        }
    }
}

impl Accelerometer for MockAccel {
    type Error = MockSensorError;

    fn probe(&mut self) -> bool {
        self.present
    }

    fn read_acceleration(&mut self) -> Result<Axes, Self::Error> {
        self.calls += 1;
        if self.fail {
            return Err(MockSensorError);
        }
        Ok(Axes::new(self.base.x + self.calls as i16, self.base.y, self.base.z))
    }
}

/// Combined device whose gyro X axis counts its transactions.
pub struct MockMotion {
    pub present: bool,
    pub fail: bool,
    pub calls: u32,
}

impl MockMotion {
    pub fn new(present: bool) -> Self {
        MockMotion {
            present,
            fail: false,
            calls: 0,
        }
    }
}

impl MotionSensor for MockMotion {
    type Error = MockSensorError;

    fn probe(&mut self) -> bool {
        self.present
    }

    fn read_motion(&mut self) -> Result<MotionReading, Self::Error> {
        self.calls += 1;
        if self.fail {
            return Err(MockSensorError);
        }
        Ok(MotionReading {
            accel: Axes::new(16384, 0, -16384),
            gyro: Axes::new(self.calls as i16, -131, 262),
            temperature: -1200,
        })
    }
}
