// src/common/hal_traits.rs

use super::wire::{Axes, MotionReading};
use core::fmt::Debug;

/// Abstraction for the millisecond clock and blocking delay the link needs.
pub trait LinkClock {
    /// Milliseconds elapsed since boot. Wraps after ~49.7 days.
    fn now_ms(&self) -> u32;

    /// Block for at least the specified number of milliseconds.
    fn delay_ms(&mut self, ms: u32);
}

/// Abstraction for the byte-oriented serial link (non-blocking primitives).
///
/// The stream is full-duplex, in order and lossless. Blocking on top of these
/// primitives is done by [`Transport`](super::transport::Transport).
pub trait LinkSerial {
    /// Associated error type for communication errors.
    type Error: Debug;

    /// Attempts to read a single byte from the serial interface.
    ///
    /// Returns `Err(nb::Error::WouldBlock)` if no byte is available yet.
    fn read_byte(&mut self) -> nb::Result<u8, Self::Error>;

    /// Attempts to write a single byte to the serial interface.
    ///
    /// Returns `Err(nb::Error::WouldBlock)` if the write buffer is full.
    fn write_byte(&mut self, byte: u8) -> nb::Result<(), Self::Error>;

    /// Attempts to flush the transmit buffer.
    fn flush(&mut self) -> nb::Result<(), Self::Error>;
}

/// The standalone 3-axis accelerometer.
pub trait Accelerometer {
    type Error: Debug;

    /// Initialises the bus/device and runs its connection test.
    fn probe(&mut self) -> bool;

    /// One raw acceleration transaction.
    fn read_acceleration(&mut self) -> Result<Axes, Self::Error>;
}

/// The combined accelerometer/gyroscope/temperature device.
pub trait MotionSensor {
    type Error: Debug;

    /// Initialises the bus/device and runs its connection test.
    fn probe(&mut self) -> bool;

    /// One raw transaction returning all six axes plus temperature.
    fn read_motion(&mut self) -> Result<MotionReading, Self::Error>;
}

/// Placeholder for a board that is not fitted with one of the two devices.
///
/// Always fails its probe, so it is never sampled.
#[derive(Debug, Default, Copy, Clone)]
pub struct NoSensor;

impl Accelerometer for NoSensor {
    type Error = core::convert::Infallible;

    fn probe(&mut self) -> bool {
        false
    }

    fn read_acceleration(&mut self) -> Result<Axes, Self::Error> {
        Ok(Axes::default())
    }
}

impl MotionSensor for NoSensor {
    type Error = core::convert::Infallible;

    fn probe(&mut self) -> bool {
        false
    }

    fn read_motion(&mut self) -> Result<MotionReading, Self::Error> {
        Ok(MotionReading::default())
    }
}

/// Bundles an `embedded-hal` delay with a millisecond uptime source.
///
/// Requires `embedded-hal` v1.0 traits.
#[cfg(feature = "impl-native")]
pub struct NativeClock<D, F> {
    delay: D,
    uptime_ms: F,
}

#[cfg(feature = "impl-native")]
impl<D, F> NativeClock<D, F>
where
    D: embedded_hal::delay::DelayNs,
    F: Fn() -> u32,
{
    pub fn new(delay: D, uptime_ms: F) -> Self {
        NativeClock { delay, uptime_ms }
    }

    pub fn release(self) -> (D, F) {
        (self.delay, self.uptime_ms)
    }
}

#[cfg(feature = "impl-native")]
impl<D, F> LinkClock for NativeClock<D, F>
where
    D: embedded_hal::delay::DelayNs,
    F: Fn() -> u32,
{
    fn now_ms(&self) -> u32 {
        (self.uptime_ms)()
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}
