// src/common/hal_traits.rs

use super::config::SerialConfig;
use core::fmt::Debug;
use core::ops::{Add, Sub};
use core::time::Duration;

/// A point in time as seen by the interface clock.
pub trait Sps30Instant: Copy + Ord + Add<Duration, Output = Self> + Sub<Self, Output = Duration> {}

impl<T> Sps30Instant for T where T: Copy + Ord + Add<Duration, Output = T> + Sub<T, Output = Duration> {}

/// Abstraction for timer/delay operations the driver needs for timeouts.
pub trait Sps30Timer {
    type Instant: Sps30Instant;

    /// Current time on a monotonic clock.
    fn now(&self) -> Self::Instant;

    /// Delay for at least the specified number of microseconds.
    fn delay_us(&mut self, us: u32);

    /// Delay for at least the specified number of milliseconds.
    fn delay_ms(&mut self, ms: u32);
}

/// Abstraction for non-blocking byte-oriented serial communication with the sensor.
///
/// Opening the port is the caller's business; the driver only moves bytes.
pub trait Sps30Serial {
    /// Associated error type for communication errors.
    type Error: Debug;

    /// Attempts to read a single byte from the serial interface.
    ///
    /// Returns `Ok(byte)` if a byte was read, or `Err(nb::Error::WouldBlock)`
    /// if no byte is available yet. Other errors are returned as `Err(nb::Error::Other(Self::Error))`.
    fn read_byte(&mut self) -> nb::Result<u8, Self::Error>;

    /// Attempts to write a single byte to the serial interface.
    ///
    /// Returns `Ok(())` if the byte was accepted for transmission, or `Err(nb::Error::WouldBlock)`
    /// if the write buffer is full.
    fn write_byte(&mut self, byte: u8) -> nb::Result<(), Self::Error>;

    /// Attempts to flush the transmit buffer, ensuring all written bytes have been sent.
    fn flush(&mut self) -> nb::Result<(), Self::Error>;

    /// Applies UART line settings (baud rate, data bits, parity, stop bits).
    ///
    /// Interfaces whose line settings are fixed when the port is opened may
    /// simply return `Ok(())`.
    fn set_config(&mut self, config: &SerialConfig) -> Result<(), Self::Error>;
}
