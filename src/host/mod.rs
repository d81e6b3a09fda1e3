// src/host/mod.rs

pub mod calibration;
pub mod config;
pub mod convert;
pub mod fusion;
pub mod sync_host;

pub use calibration::Correction;
pub use config::HostConfig;
pub use convert::{PhysicalSample, Vector3};
pub use fusion::{Inclination, InclinationFilter};
pub use sync_host::{Burst, Handshake, SyncHost};
