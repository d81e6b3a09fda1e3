// src/device/sync_device/mod.rs

mod acquisition;

use crate::common::{
    error::LinkError,
    hal_traits::{Accelerometer, LinkClock, LinkSerial, MotionSensor},
    transport::Transport,
    wire::{CalibrationRequest, CapabilityReport, SampleInterval, SampleRecord},
};
use crate::device::config::SessionConfig;
use core::convert::Infallible;

/// Where the session is in its one-way sequence of phases.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionState {
    /// Constructed, sensors not yet probed.
    Start,
    /// Sensors probed, report not yet sent.
    Probing,
    /// Report sent, waiting for the calibration request.
    Announced,
    /// Calibration request received, no burst owed.
    Calibrating,
    /// Emitting the calibration burst.
    CalibratingBurst,
    /// Waiting for the sampling interval.
    Configuring,
    /// Terminal: one record per interval, forever.
    Streaming,
}

/// The device end of the link, for SYNCHRONOUS (blocking) operation.
///
/// Owns the transport, the clock and both sensor drivers for the lifetime of
/// the session together with the session context: the capability report, the
/// interval and the reusable record storage.
#[derive(Debug)]
pub struct SyncDevice<S, C, A, M>
where
    S: LinkSerial,
    C: LinkClock,
    A: Accelerometer,
    M: MotionSensor,
{
    transport: Transport<S>,
    clock: C,
    accel: A,
    motion: M,
    config: SessionConfig,
    state: SessionState,
    report: CapabilityReport,
    interval: SampleInterval,
    /// Burst records still owed to the host.
    burst_remaining: u8,
    record: SampleRecord,
}

impl<S, C, A, M> SyncDevice<S, C, A, M>
where
    S: LinkSerial,
    C: LinkClock,
    A: Accelerometer,
    M: MotionSensor,
{
    pub fn new(serial: S, clock: C, accel: A, motion: M, config: SessionConfig) -> Self {
        SyncDevice {
            transport: Transport::new(serial),
            clock,
            accel,
            motion,
            config,
            state: SessionState::Start,
            report: CapabilityReport::default(),
            interval: SampleInterval::default(),
            burst_remaining: 0,
            // Fields of absent sensors are never written, so they stay zero.
            record: SampleRecord::default(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Capability report. Meaningful once the session has left `Start`.
    pub fn report(&self) -> CapabilityReport {
        self.report
    }

    /// Configured interval. Meaningful once the session is `Streaming`.
    pub fn interval(&self) -> SampleInterval {
        self.interval
    }

    /// The most recently emitted record.
    pub fn last_record(&self) -> &SampleRecord {
        &self.record
    }

    pub fn serial(&self) -> &S {
        self.transport.serial()
    }

    pub fn serial_mut(&mut self) -> &mut S {
        self.transport.serial_mut()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Tears the session down and hands back its peripherals.
    pub fn release(self) -> (S, C, A, M) {
        (self.transport.release(), self.clock, self.accel, self.motion)
    }

    // --- Public Blocking Methods ---

    /// Runs the whole session, picking up wherever it stands. Only returns if
    /// the transport fails.
    pub fn run(&mut self) -> Result<Infallible, LinkError<S::Error>> {
        if self.state < SessionState::Streaming {
            self.handshake()?;
        }
        loop {
            self.tick()?;
        }
    }

    /// Runs the remaining phases up to and including the interval read,
    /// leaving the session in `Streaming`. Blocks on each host read.
    ///
    /// Phases already completed are never repeated: after a transport error
    /// the next call resumes at the failed phase, and once `Streaming` it
    /// returns the stored interval without touching the link.
    pub fn handshake(&mut self) -> Result<SampleInterval, LinkError<S::Error>> {
        loop {
            match self.state {
                SessionState::Start => self.probe(),
                SessionState::Probing => self.announce()?,
                SessionState::Announced => self.await_calibration_request()?,
                SessionState::Calibrating | SessionState::CalibratingBurst => self.calibrate()?,
                SessionState::Configuring => self.await_interval()?,
                SessionState::Streaming => return Ok(self.interval),
            }
        }
    }

    /// Streams one record per interval until `stop` returns true.
    ///
    /// `stop` is checked before every tick, so `|| false` behaves like the
    /// terminal loop of [`run`](Self::run). Returns the number of records emitted,
    /// which is always zero before the handshake has completed.
    pub fn stream_until<F>(&mut self, mut stop: F) -> Result<u32, LinkError<S::Error>>
    where
        F: FnMut() -> bool,
    {
        if self.state != SessionState::Streaming {
            return Ok(0);
        }
        let mut emitted = 0u32;
        while !stop() {
            self.tick()?;
            emitted = emitted.wrapping_add(1);
        }
        Ok(emitted)
    }

    // --- Phases ---

    fn probe(&mut self) {
        self.report = self.probe_all();
        self.state = SessionState::Probing;
        info!("sensors: accel={} gyro={}", self.report.accel, self.report.gyro);
    }

    fn announce(&mut self) -> Result<(), LinkError<S::Error>> {
        self.transport.write_all(&self.report.encode())?;
        self.state = SessionState::Announced;
        Ok(())
    }

    fn await_calibration_request(&mut self) -> Result<(), LinkError<S::Error>> {
        let bytes = self.transport.read_array::<{ CalibrationRequest::LEN }>()?;
        let request = CalibrationRequest::decode(&bytes);
        self.burst_remaining = request.burst_len();
        self.state = if request.proceed {
            SessionState::CalibratingBurst
        } else {
            SessionState::Calibrating
        };
        debug!("calibration request: count={} proceed={}", request.count, request.proceed);
        Ok(())
    }

    /// Emits what is left of the burst back-to-back: the interval is not known yet.
    fn calibrate(&mut self) -> Result<(), LinkError<S::Error>> {
        if self.burst_remaining > 0 {
            debug!("calibration burst of {} records", self.burst_remaining);
        }
        while self.burst_remaining > 0 {
            self.emit_sample()?;
            self.burst_remaining -= 1;
        }
        self.state = SessionState::Configuring;
        Ok(())
    }

    fn await_interval(&mut self) -> Result<(), LinkError<S::Error>> {
        let bytes = self.transport.read_array::<{ SampleInterval::LEN }>()?;
        self.interval = SampleInterval::decode(&bytes);
        self.state = SessionState::Streaming;
        info!("streaming every {} ms", self.interval.as_millis());
        Ok(())
    }

    /// One streaming period: emit, then wait. The delay follows the emission,
    /// so consecutive emissions start at least one interval apart.
    fn tick(&mut self) -> Result<(), LinkError<S::Error>> {
        self.emit_sample()?;
        let ms = self.interval.as_millis();
        if ms > 0 {
            self.clock.delay_ms(ms);
        }
        Ok(())
    }

    /// Acquires a complete record, then writes it.
    fn emit_sample(&mut self) -> Result<(), LinkError<S::Error>> {
        self.acquire();
        let bytes = self.record.encode();
        trace!("record t={}", self.record.timestamp);
        self.transport.write_all(&bytes)
    }
}
