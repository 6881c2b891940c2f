// src/common/std_interface.rs

//! Host adapter: drives the SPS30 through any `std::io` port.
//!
//! The port is expected to be opened already (e.g. with a short read
//! timeout) at 115200 8N1. Reads that time out or would block are reported
//! as `nb::Error::WouldBlock`, so the driver's own response timeout decides
//! when to give up.

use super::config::SerialConfig;
use super::hal_traits::{Sps30Serial, Sps30Timer};
use std::io::{self, Read, Write};
use std::time::{Duration, Instant};

/// Monotonic instant backed by `std::time::Instant`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct StdInstant(Instant);

impl core::ops::Add<Duration> for StdInstant {
    type Output = Self;
    fn add(self, rhs: Duration) -> Self {
        StdInstant(self.0 + rhs)
    }
}

impl core::ops::Sub<StdInstant> for StdInstant {
    type Output = Duration;
    fn sub(self, rhs: StdInstant) -> Duration {
        self.0.saturating_duration_since(rhs.0)
    }
}

/// Wraps a `Read + Write` port and the system clock.
#[derive(Debug)]
pub struct StdInterface<P> {
    port: P,
    line: Option<SerialConfig>,
}

impl<P: Read + Write> StdInterface<P> {
    pub fn new(port: P) -> Self {
        StdInterface { port, line: None }
    }

    /// Last line settings requested by the driver.
    pub fn line_config(&self) -> Option<&SerialConfig> {
        self.line.as_ref()
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    pub fn into_inner(self) -> P {
        self.port
    }
}

fn would_block(kind: io::ErrorKind) -> bool {
    matches!(
        kind,
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut | io::ErrorKind::Interrupted
    )
}

impl<P: Read + Write> Sps30Serial for StdInterface<P> {
    type Error = io::Error;

    fn read_byte(&mut self) -> nb::Result<u8, Self::Error> {
        let mut byte = [0u8; 1];
        match self.port.read(&mut byte) {
            Ok(1) => Ok(byte[0]),
            Ok(_) => Err(nb::Error::WouldBlock),
            Err(e) if would_block(e.kind()) => Err(nb::Error::WouldBlock),
            Err(e) => Err(nb::Error::Other(e)),
        }
    }

    fn write_byte(&mut self, byte: u8) -> nb::Result<(), Self::Error> {
        match self.port.write(&[byte]) {
            Ok(1) => Ok(()),
            Ok(_) => Err(nb::Error::WouldBlock),
            Err(e) if would_block(e.kind()) => Err(nb::Error::WouldBlock),
            Err(e) => Err(nb::Error::Other(e)),
        }
    }

    fn flush(&mut self) -> nb::Result<(), Self::Error> {
        match self.port.flush() {
            Ok(()) => Ok(()),
            Err(e) if would_block(e.kind()) => Err(nb::Error::WouldBlock),
            Err(e) => Err(nb::Error::Other(e)),
        }
    }

    fn set_config(&mut self, config: &SerialConfig) -> Result<(), Self::Error> {
        // Line settings of a std port are fixed when it is opened; remember them for inspection.
        if self.line.as_ref() != Some(config) {
            log::debug!("serial line config: {:?}", config);
            self.line = Some(*config);
        }
        Ok(())
    }
}

impl<P> Sps30Timer for StdInterface<P> {
    type Instant = StdInstant;

    fn now(&self) -> Self::Instant {
        StdInstant(Instant::now())
    }

    fn delay_us(&mut self, us: u32) {
        std::thread::sleep(Duration::from_micros(us as u64));
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(Duration::from_millis(ms as u64));
    }
}
