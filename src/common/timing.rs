// src/common/timing.rs

use core::time::Duration;

// Defaults for the SHDLC UART interface. Configurable through `Config`;
// the constants here are only the values the device ships with.

/// UART baud rate of the SPS30.
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// Time to wait for a complete response frame.
pub const DEFAULT_RESPONSE_TIMEOUT: Duration = Duration::from_secs(2);

/// Allowance on top of the pure line time when transmitting a frame.
pub const WRITE_MARGIN: Duration = Duration::from_millis(20);

/// Allowance for the transmit buffer to drain.
pub const FLUSH_TIMEOUT: Duration = Duration::from_millis(10);

/// Back-off between polls of a transport that reports `WouldBlock`.
pub const POLL_INTERVAL_US: u32 = 100;

// === Device execution times (datasheet, SHDLC command table) ===

/// Time after a Device Reset before the next command is accepted.
pub const RESET_RECOVERY_TIME: Duration = Duration::from_millis(100);
/// Default auto cleaning interval (one week) in seconds.
pub const DEFAULT_AUTO_CLEANING_INTERVAL_SECS: u32 = 604_800;
