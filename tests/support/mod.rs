// tests/support/mod.rs
//
// Transports, clocks and sensors for the integration tests.

#![allow(dead_code)]

use imulink::common::{
    Accelerometer, Axes, LinkClock, LinkSerial, MotionReading, MotionSensor, SampleRecord,
};
use std::cell::Cell;
use std::collections::VecDeque;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::time::{Duration, Instant};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SerialError {
    /// The other end went away.
    Disconnected,
    /// Nothing arrived for a long stretch of polls.
    Starved,
}

/// One end of an in-process full-duplex byte link.
pub struct ChannelSerial {
    tx: Sender<u8>,
    rx: Receiver<u8>,
}

impl ChannelSerial {
    pub fn pair() -> (ChannelSerial, ChannelSerial) {
        let (a_tx, b_rx) = mpsc::channel();
        let (b_tx, a_rx) = mpsc::channel();
        (
            ChannelSerial { tx: a_tx, rx: a_rx },
            ChannelSerial { tx: b_tx, rx: b_rx },
        )
    }

    /// Discards and counts the bytes already waiting, without blocking.
    pub fn drain_pending(&self) -> usize {
        self.rx.try_iter().count()
    }
}

impl LinkSerial for ChannelSerial {
    type Error = SerialError;

    fn read_byte(&mut self) -> nb::Result<u8, Self::Error> {
        match self.rx.try_recv() {
            Ok(byte) => Ok(byte),
            Err(TryRecvError::Empty) => {
                std::thread::yield_now();
                Err(nb::Error::WouldBlock)
            }
            Err(TryRecvError::Disconnected) => Err(nb::Error::Other(SerialError::Disconnected)),
        }
    }

    fn write_byte(&mut self, byte: u8) -> nb::Result<(), Self::Error> {
        self.tx
            .send(byte)
            .map_err(|_| nb::Error::Other(SerialError::Disconnected))
    }

    fn flush(&mut self) -> nb::Result<(), Self::Error> {
        Ok(())
    }
}

/// Scripted host input, captured device output.
pub struct ScriptSerial {
    pub input: VecDeque<u8>,
    pub output: Vec<u8>,
    pub output_before_first_read: Option<usize>,
    empty_polls: u32,
}

impl ScriptSerial {
    pub fn new(input: &[u8]) -> Self {
        ScriptSerial {
            input: input.iter().copied().collect(),
            output: Vec::new(),
            output_before_first_read: None,
            empty_polls: 0,
        }
    }

    pub fn records_after(&self, skip: usize) -> Vec<SampleRecord> {
        assert_eq!((self.output.len() - skip) % SampleRecord::LEN, 0);
        self.output[skip..]
            .chunks_exact(SampleRecord::LEN)
            .map(|c| SampleRecord::decode(c.try_into().unwrap()))
            .collect()
    }
}

impl LinkSerial for ScriptSerial {
    type Error = SerialError;

    fn read_byte(&mut self) -> nb::Result<u8, Self::Error> {
        match self.input.pop_front() {
            Some(byte) => {
                self.output_before_first_read.get_or_insert(self.output.len());
                self.empty_polls = 0;
                Ok(byte)
            }
            None => {
                self.empty_polls += 1;
                if self.empty_polls > 1_000 {
                    Err(nb::Error::Other(SerialError::Starved))
                } else {
                    Err(nb::Error::WouldBlock)
                }
            }
        }
    }

    fn write_byte(&mut self, byte: u8) -> nb::Result<(), Self::Error> {
        self.output.push(byte);
        Ok(())
    }

    fn flush(&mut self) -> nb::Result<(), Self::Error> {
        Ok(())
    }
}

/// Wall clock backed by `std`.
pub struct StdClock {
    boot: Instant,
}

impl StdClock {
    pub fn new() -> Self {
        StdClock {
            boot: Instant::now(),
        }
    }
}

impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkClock for StdClock {
    fn now_ms(&self) -> u32 {
        self.boot.elapsed().as_millis() as u32
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(Duration::from_millis(ms as u64));
    }
}

/// Simulated clock: each reading advances one millisecond, delays advance
/// by their length.
#[derive(Default)]
pub struct SimClock {
    now: Cell<u32>,
    pub total_delay: u64,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LinkClock for SimClock {
    fn now_ms(&self) -> u32 {
        let now = self.now.get();
        self.now.set(now.wrapping_add(1));
        now
    }

    fn delay_ms(&mut self, ms: u32) {
        self.total_delay += ms as u64;
        self.now.set(self.now.get().wrapping_add(ms));
    }
}

#[derive(Debug)]
pub struct SensorFault;

pub struct FakeAccel(pub bool);

impl Accelerometer for FakeAccel {
    type Error = SensorFault;

    fn probe(&mut self) -> bool {
        self.0
    }

    fn read_acceleration(&mut self) -> Result<Axes, Self::Error> {
        Ok(Axes::new(0, 0, 233))
    }
}

pub struct FakeMotion(pub bool);

impl MotionSensor for FakeMotion {
    type Error = SensorFault;

    fn probe(&mut self) -> bool {
        self.0
    }

    fn read_motion(&mut self) -> Result<MotionReading, Self::Error> {
        Ok(MotionReading {
            accel: Axes::new(0, 0, 16384),
            gyro: Axes::new(-3, 7, 1),
            temperature: -1500,
        })
    }
}
