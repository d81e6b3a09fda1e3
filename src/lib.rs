// src/lib.rs

#![no_std] // Specify no_std at the crate root

#[cfg(test)]
extern crate std;

// Must come first so the logging macros are visible everywhere below.
#[macro_use]
mod fmt;

pub mod common;
pub mod device;
pub mod host;

#[cfg(test)]
mod test_support;

// Re-export key types for convenience
pub use common::LinkError;
pub use device::SyncDevice;
pub use host::SyncHost;
