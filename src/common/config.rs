// src/common/config.rs

use super::timing;
use core::time::Duration;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// UART line settings. The SPS30 uses 115200 baud, 8N1.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct SerialConfig {
    pub baud_rate: u32,
    pub data_bits: u8,
    pub parity: Parity,
    pub stop_bits: u8,
}

impl Default for SerialConfig {
    fn default() -> Self {
        SerialConfig {
            baud_rate: timing::DEFAULT_BAUD_RATE,
            data_bits: 8,
            parity: Parity::None,
            stop_bits: 1,
        }
    }
}

impl SerialConfig {
    /// Time one byte occupies on the wire (start bit, data, parity, stop bits).
    pub fn byte_duration(&self) -> Duration {
        let parity_bits = if self.parity == Parity::None { 0 } else { 1 };
        let bits = 1 + self.data_bits as u64 + parity_bits + self.stop_bits as u64;
        Duration::from_nanos(bits * 1_000_000_000 / self.baud_rate.max(1) as u64)
    }
}

/// Driver configuration.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Config {
    pub serial: SerialConfig,
    /// How long to wait for a complete response frame after sending a request.
    pub response_timeout: Duration,
    /// Extra allowance on top of the line time when writing a frame.
    pub write_margin: Duration,
    /// Delay between polls while the transport reports `WouldBlock`.
    pub poll_interval_us: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            serial: SerialConfig::default(),
            response_timeout: timing::DEFAULT_RESPONSE_TIMEOUT,
            write_margin: timing::WRITE_MARGIN,
            poll_interval_us: timing::POLL_INTERVAL_US,
        }
    }
}

impl Config {
    pub fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.serial.baud_rate = baud_rate;
        self
    }

    pub fn with_response_timeout(mut self, timeout: Duration) -> Self {
        self.response_timeout = timeout;
        self
    }

    pub fn with_write_margin(mut self, margin: Duration) -> Self {
        self.write_margin = margin;
        self
    }

    pub fn with_poll_interval_us(mut self, us: u32) -> Self {
        self.poll_interval_us = us;
        self
    }

    /// Deadline for pushing `len` bytes out of the UART.
    pub fn write_timeout(&self, len: usize) -> Duration {
        self.serial.byte_duration() * len as u32 + self.write_margin
    }
}
