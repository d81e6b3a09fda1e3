// src/common/mod.rs

// --- Declare all public modules within common ---
pub mod error;
pub mod hal_traits;
pub mod timing;
pub mod transport;
pub mod wire;

// --- Re-export key types/traits for easier access ---

// From error.rs
pub use error::LinkError;

// From hal_traits.rs
pub use hal_traits::{Accelerometer, LinkClock, LinkSerial, MotionSensor, NoSensor};

// From transport.rs
pub use transport::Transport;

// From wire.rs
pub use wire::{Axes, CalibrationRequest, CapabilityReport, MotionReading, SampleInterval, SampleRecord};

// Native HAL integration (from hal_traits.rs)
#[cfg(feature = "impl-native")]
pub use hal_traits::NativeClock;
