// src/device/mod.rs

pub mod config;
pub mod sync_device;

pub use config::{ReadFailurePolicy, SessionConfig};
pub use sync_device::{SessionState, SyncDevice};
