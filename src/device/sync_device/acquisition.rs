// src/device/sync_device/acquisition.rs

use super::SyncDevice;
use crate::common::{
    hal_traits::{Accelerometer, LinkClock, LinkSerial, MotionSensor},
    wire::{Axes, CapabilityReport},
};
use crate::device::config::ReadFailurePolicy;

// Implementation block for the sensor-facing half of the session
impl<S, C, A, M> SyncDevice<S, C, A, M>
where
    S: LinkSerial,
    C: LinkClock,
    A: Accelerometer,
    M: MotionSensor,
{
    /// Runs each sensor's connection test once. No retries: a sensor that
    /// fails here is absent for the whole session.
    pub(super) fn probe_all(&mut self) -> CapabilityReport {
        CapabilityReport {
            accel: self.accel.probe(),
            gyro: self.motion.probe(),
        }
    }

    /// Fills the session record from one transaction per present sensor.
    ///
    /// Fields of absent sensors are not touched. Raw counts pass through as-is.
    pub(super) fn acquire(&mut self) {
        let zero_on_failure = self.config.read_failure == ReadFailurePolicy::ZeroFill;
        self.record.timestamp = self.clock.now_ms();

        if self.report.accel {
            match self.accel.read_acceleration() {
                Ok(axes) => self.record.accel = axes,
                Err(_) => {
                    warn!("accelerometer read failed");
                    if zero_on_failure {
                        self.record.accel = Axes::default();
                    }
                }
            }
        }

        if self.report.gyro {
            match self.motion.read_motion() {
                Ok(reading) => {
                    self.record.motion_accel = reading.accel;
                    self.record.gyro = reading.gyro;
                    self.record.temperature = reading.temperature;
                }
                Err(_) => {
                    warn!("motion sensor read failed");
                    if zero_on_failure {
                        self.record.motion_accel = Axes::default();
                        self.record.gyro = Axes::default();
                        self.record.temperature = 0;
                    }
                }
            }
        }
    }
}
