// src/common/transport.rs

//! Blocking fixed-length transfers on top of the non-blocking serial traits.
//!
//! Reads have **no timeout**: a silent peer blocks the caller forever. The
//! device has nothing useful to do without its host, so this is the contract,
//! not a missing feature.

use super::{error::LinkError, hal_traits::LinkSerial};

/// Exact-length read/write wrapper around a [`LinkSerial`].
#[derive(Debug)]
pub struct Transport<S>
where
    S: LinkSerial,
{
    serial: S,
}

impl<S> Transport<S>
where
    S: LinkSerial,
{
    pub fn new(serial: S) -> Self {
        Transport { serial }
    }

    pub fn serial(&self) -> &S {
        &self.serial
    }

    pub fn serial_mut(&mut self) -> &mut S {
        &mut self.serial
    }

    pub fn release(self) -> S {
        self.serial
    }

    /// Blocks until `buffer.len()` bytes have arrived and fills `buffer` completely.
    pub fn read_exact(&mut self, buffer: &mut [u8]) -> Result<(), LinkError<S::Error>> {
        for slot in buffer.iter_mut() {
            *slot = nb::block!(self.serial.read_byte()).map_err(LinkError::Io)?;
        }
        Ok(())
    }

    /// Reads exactly `N` bytes into a fresh array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], LinkError<S::Error>> {
        let mut buf = [0u8; N];
        self.read_exact(&mut buf)?;
        Ok(buf)
    }

    /// Writes every byte of `bytes` in order, waiting out backpressure, then flushes.
    pub fn write_all(&mut self, bytes: &[u8]) -> Result<(), LinkError<S::Error>> {
        for byte in bytes {
            nb::block!(self.serial.write_byte(*byte)).map_err(LinkError::Io)?;
        }
        nb::block!(self.serial.flush()).map_err(LinkError::Io)?;
        Ok(())
    }
}
