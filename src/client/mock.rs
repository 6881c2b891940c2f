// src/client/mock.rs

// Scripted transport for the client tests: a read queue, a write log and a
// simulated microsecond clock. Optionally a simulated device answers every
// complete request frame written to it.

use crate::common::{
    config::SerialConfig,
    hal_traits::{Sps30Serial, Sps30Timer},
    stuffing::FRAME_MARKER,
};
use crate::sensor::{respond, SimulatedSps30};
use core::time::Duration;
use nb::Result as NbResult;
use std::collections::VecDeque;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MockInstant(pub u64);

impl core::ops::Add<Duration> for MockInstant {
    type Output = Self;
    fn add(self, rhs: Duration) -> Self {
        MockInstant(self.0.saturating_add(rhs.as_micros() as u64))
    }
}

impl core::ops::Sub<MockInstant> for MockInstant {
    type Output = Duration;
    fn sub(self, rhs: MockInstant) -> Duration {
        Duration::from_micros(self.0.saturating_sub(rhs.0))
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MockCommError;

pub struct MockInterface {
    pub current_time_us: u64,
    pub read_queue: VecDeque<u8>,
    pub write_log: Vec<u8>,
    pub config: Option<SerialConfig>,
    pub device: Option<SimulatedSps30>,
    pub fail_writes: bool,
    pub fail_reads: bool,
    pub flush_count: u32,
    pending_request: Vec<u8>,
}

impl MockInterface {
    pub fn new() -> Self {
        MockInterface {
            current_time_us: 0,
            read_queue: VecDeque::new(),
            write_log: Vec::new(),
            config: None,
            device: None,
            fail_writes: false,
            fail_reads: false,
            flush_count: 0,
            pending_request: Vec::new(),
        }
    }

    pub fn with_device(device: SimulatedSps30) -> Self {
        MockInterface { device: Some(device), ..Self::new() }
    }

    pub fn stage_read_data(&mut self, data: &[u8]) {
        self.read_queue.extend(data.iter().copied());
    }

    pub fn advance_time(&mut self, us: u64) {
        self.current_time_us = self.current_time_us.saturating_add(us);
    }

    fn feed_device(&mut self, byte: u8) {
        let Some(device) = self.device.as_mut() else { return };
        if self.pending_request.is_empty() && byte != FRAME_MARKER {
            return;
        }
        self.pending_request.push(byte);
        if byte == FRAME_MARKER && self.pending_request.len() > 1 {
            if let Ok(Some(reply)) = respond(device, &self.pending_request) {
                self.read_queue.extend(reply.as_bytes().iter().copied());
            }
            self.pending_request.clear();
        }
    }
}

impl Sps30Timer for MockInterface {
    type Instant = MockInstant;
    fn now(&self) -> Self::Instant {
        MockInstant(self.current_time_us)
    }
    fn delay_us(&mut self, us: u32) {
        self.advance_time(us as u64);
    }
    fn delay_ms(&mut self, ms: u32) {
        self.advance_time((ms as u64) * 1000);
    }
}

impl Sps30Serial for MockInterface {
    type Error = MockCommError;

    fn read_byte(&mut self) -> NbResult<u8, Self::Error> {
        if self.fail_reads {
            return Err(nb::Error::Other(MockCommError));
        }
        self.read_queue.pop_front().ok_or(nb::Error::WouldBlock)
    }

    fn write_byte(&mut self, byte: u8) -> NbResult<(), Self::Error> {
        if self.fail_writes {
            return Err(nb::Error::Other(MockCommError));
        }
        self.write_log.push(byte);
        self.feed_device(byte);
        Ok(())
    }

    fn flush(&mut self) -> NbResult<(), Self::Error> {
        self.flush_count += 1;
        Ok(())
    }

    fn set_config(&mut self, config: &SerialConfig) -> Result<(), Self::Error> {
        self.config = Some(*config);
        Ok(())
    }
}
