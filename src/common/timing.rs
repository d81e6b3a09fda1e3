// src/common/timing.rs

use core::time::Duration;

/// Fixed link speed (8N1), configured at startup and never renegotiated.
pub const BAUD_RATE: u32 = 38_400;

/// Opening the port resets most boards; the host waits this long before
/// expecting the capability report.
pub const HOST_SETTLE_DELAY: Duration = Duration::from_secs(2);
