// src/host/sync_host.rs

use crate::common::{
    error::LinkError,
    hal_traits::{LinkClock, LinkSerial},
    timing,
    transport::Transport,
    wire::{CalibrationRequest, CapabilityReport, SampleInterval, SampleRecord},
};
use crate::host::config::HostConfig;
use arrayvec::ArrayVec;

/// Largest burst the device can be asked for.
pub const MAX_BURST: usize = u8::MAX as usize;

/// Records received during a calibration burst.
pub type Burst = ArrayVec<SampleRecord, MAX_BURST>;

/// Outcome of a completed host handshake.
#[derive(Debug, Clone)]
pub struct Handshake {
    pub report: CapabilityReport,
    pub burst: Burst,
    pub interval: SampleInterval,
}

/// The host end of the link, for SYNCHRONOUS (blocking) operation.
///
/// Mirrors the device session from the other side: read the report, send the
/// calibration request, collect the burst, send the interval, then read
/// records.
#[derive(Debug)]
pub struct SyncHost<S>
where
    S: LinkSerial,
{
    transport: Transport<S>,
}

impl<S> SyncHost<S>
where
    S: LinkSerial,
{
    pub fn new(serial: S) -> Self {
        SyncHost {
            transport: Transport::new(serial),
        }
    }

    pub fn serial(&self) -> &S {
        self.transport.serial()
    }

    pub fn release(self) -> S {
        self.transport.release()
    }

    /// Waits for the board to come out of the reset caused by opening the port.
    pub fn settle<C: LinkClock>(&mut self, clock: &mut C) {
        clock.delay_ms(timing::HOST_SETTLE_DELAY.as_millis() as u32);
    }

    pub fn read_capabilities(&mut self) -> Result<CapabilityReport, LinkError<S::Error>> {
        let bytes = self.transport.read_array::<{ CapabilityReport::LEN }>()?;
        Ok(CapabilityReport::decode(&bytes))
    }

    pub fn request_calibration(
        &mut self,
        request: CalibrationRequest,
    ) -> Result<(), LinkError<S::Error>> {
        self.transport.write_all(&request.encode())
    }

    pub fn configure_interval(&mut self, interval: SampleInterval) -> Result<(), LinkError<S::Error>> {
        self.transport.write_all(&interval.encode())
    }

    pub fn read_record(&mut self) -> Result<SampleRecord, LinkError<S::Error>> {
        let bytes = self.transport.read_array::<{ SampleRecord::LEN }>()?;
        Ok(SampleRecord::decode(&bytes))
    }

    /// Reads `count` burst records into the front of `out`.
    pub fn read_burst<'a>(
        &mut self,
        count: u8,
        out: &'a mut [SampleRecord],
    ) -> Result<&'a [SampleRecord], LinkError<S::Error>> {
        let count = count as usize;
        if out.len() < count {
            return Err(LinkError::BufferOverflow {
                needed: count,
                got: out.len(),
            });
        }
        for slot in out[..count].iter_mut() {
            *slot = self.read_record()?;
        }
        Ok(&out[..count])
    }

    /// Reads the burst announced by `request` into a fresh buffer.
    pub fn collect_burst(&mut self, request: CalibrationRequest) -> Result<Burst, LinkError<S::Error>> {
        let mut burst = Burst::new();
        for _ in 0..request.burst_len() {
            burst.push(self.read_record()?);
        }
        Ok(burst)
    }

    /// Runs the host half of the session up to the first streamed record.
    ///
    /// If the device reports no sensor at all nothing is sent back and
    /// [`LinkError::NoSensors`] is returned; the device then stays waiting for
    /// its calibration request.
    pub fn handshake(&mut self, config: &HostConfig) -> Result<Handshake, LinkError<S::Error>> {
        let report = self.read_capabilities()?;
        debug!("device sensors: accel={} gyro={}", report.accel, report.gyro);
        if !report.any() {
            return Err(LinkError::NoSensors);
        }

        let request = config.calibration_request();
        self.request_calibration(request)?;
        let burst = self.collect_burst(request)?;

        let interval = config.interval();
        self.configure_interval(interval)?;
        Ok(Handshake {
            report,
            burst,
            interval,
        })
    }
}
