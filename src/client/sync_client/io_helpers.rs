// src/client/sync_client/io_helpers.rs

use super::Sps30;
use crate::common::{
    error::{FrameError, Sps30Error},
    frame::MAX_STUFFED_FRAME_LEN,
    hal_traits::{Sps30Serial, Sps30Timer},
    stuffing::FRAME_MARKER,
    timing,
};
use arrayvec::ArrayVec;
use core::fmt::Debug;
use core::time::Duration;
use nb::Result as NbResult;

/// Receive buffer for one stuffed frame, markers included.
pub(super) type FrameBuffer = ArrayVec<u8, MAX_STUFFED_FRAME_LEN>;

// Implementation block for I/O related helpers
impl<IF> Sps30<IF>
where
    IF: Sps30Serial + Sps30Timer,
    IF::Error: Debug,
{
    /// Executes a non-blocking I/O operation (`f`) repeatedly until it
    /// stops returning `WouldBlock`, or `deadline` passes.
    pub(super) fn execute_blocking_io_until<FN, T>(
        &mut self,
        deadline: IF::Instant,
        mut f: FN,
    ) -> Result<T, Sps30Error<IF::Error>>
    where
        FN: FnMut(&mut IF) -> NbResult<T, IF::Error>,
    {
        loop {
            match f(&mut self.interface) {
                Ok(result) => return Ok(result),
                Err(nb::Error::WouldBlock) => {
                    if self.interface.now() >= deadline {
                        return Err(Sps30Error::Timeout);
                    }
                    // Small back-off so a polling transport does not spin at 100% CPU.
                    self.interface.delay_us(self.config.poll_interval_us);
                }
                Err(nb::Error::Other(e)) => return Err(Sps30Error::Io(e)),
            }
        }
    }

    pub(super) fn execute_blocking_io_with_timeout<FN, T>(
        &mut self,
        timeout: Duration,
        f: FN,
    ) -> Result<T, Sps30Error<IF::Error>>
    where
        FN: FnMut(&mut IF) -> NbResult<T, IF::Error>,
    {
        let deadline = self.interface.now() + timeout;
        self.execute_blocking_io_until(deadline, f)
    }

    /// Applies the line settings and sends an already stuffed frame.
    pub(super) fn send_frame_bytes(&mut self, frame: &[u8]) -> Result<(), Sps30Error<IF::Error>> {
        self.interface
            .set_config(&self.config.serial)
            .map_err(Sps30Error::Io)?;

        let write_timeout = self.config.write_timeout(frame.len());
        let deadline = self.interface.now() + write_timeout;
        for byte in frame {
            self.execute_blocking_io_until(deadline, |iface| iface.write_byte(*byte))?;
        }

        self.execute_blocking_io_with_timeout(timing::FLUSH_TIMEOUT, |iface| iface.flush())?;
        Ok(())
    }

    /// Reads one complete frame (`0x7E ... 0x7E`) into `buffer`.
    ///
    /// Bytes before the first start marker are discarded. Two markers back to
    /// back are treated as a stop marker of stale data followed by a new start.
    pub(super) fn read_frame(&mut self, buffer: &mut FrameBuffer) -> Result<(), Sps30Error<IF::Error>> {
        buffer.clear();
        let deadline = self.interface.now() + self.config.response_timeout;

        loop {
            let byte = match self.execute_blocking_io_until(deadline, |iface| iface.read_byte()) {
                Ok(byte) => byte,
                Err(Sps30Error::Timeout) if !buffer.is_empty() => {
                    // Received some bytes but the stop marker never came
                    return Err(FrameError::Incomplete { received: buffer.len() }.into());
                }
                Err(e) => return Err(e),
            };

            if buffer.is_empty() {
                if byte == FRAME_MARKER {
                    buffer.push(byte);
                } else {
                    log::trace!("discarding {:#04x} outside of a frame", byte);
                }
                continue;
            }

            if byte == FRAME_MARKER && buffer.len() == 1 {
                continue;
            }

            buffer
                .try_push(byte)
                .map_err(|_| FrameError::BufferOverflow { capacity: MAX_STUFFED_FRAME_LEN })?;

            if byte == FRAME_MARKER {
                return Ok(());
            }
        }
    }
}

// --- Unit Tests for IO Helpers ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::{MockCommError, MockInterface};
    use crate::common::config::Config;

    fn sps(iface: MockInterface) -> Sps30<MockInterface> {
        Sps30::with_config(iface, Config::default().with_response_timeout(Duration::from_millis(20)))
    }

    #[test]
    fn test_execute_blocking_io_with_timeout() {
        let mut client = sps(MockInterface::new());

        // Ok after a few WouldBlocks
        let mut calls = 0;
        let result: Result<i32, _> = client.execute_blocking_io_with_timeout(Duration::from_millis(10), |iface| {
            calls += 1;
            iface.advance_time(1_000);
            if calls < 4 { Err(nb::Error::WouldBlock) } else { Ok(123) }
        });
        assert!(matches!(result, Ok(123)));
        assert_eq!(calls, 4);

        // Timeout
        client.interface_mut().current_time_us = 0;
        let result: Result<(), _> = client.execute_blocking_io_with_timeout(Duration::from_millis(5), |iface| {
            iface.advance_time(2_000);
            Err(nb::Error::WouldBlock)
        });
        assert!(matches!(result, Err(Sps30Error::Timeout)));
        assert!(client.interface().current_time_us >= 5_000);

        // I/O error
        let result: Result<(), _> = client.execute_blocking_io_with_timeout(Duration::from_millis(5), |_| {
            Err(nb::Error::Other(MockCommError))
        });
        assert!(matches!(result, Err(Sps30Error::Io(MockCommError))));
    }

    #[test]
    fn test_read_frame_success() {
        let mut iface = MockInterface::new();
        let data = [0x7E, 0x00, 0x01, 0x00, 0x00, 0xFE, 0x7E];
        iface.stage_read_data(&data);
        let mut client = sps(iface);
        let mut buffer = FrameBuffer::new();
        client.read_frame(&mut buffer).unwrap();
        assert_eq!(buffer.as_slice(), &data);
    }

    #[test]
    fn test_read_frame_skips_noise_and_double_markers() {
        let mut iface = MockInterface::new();
        iface.stage_read_data(&[0x00, 0xFF, 0x7E, 0x7E, 0x00, 0x01, 0x00, 0x00, 0xFE, 0x7E, 0xAA]);
        let mut client = sps(iface);
        let mut buffer = FrameBuffer::new();
        client.read_frame(&mut buffer).unwrap();
        assert_eq!(buffer.as_slice(), &[0x7E, 0x00, 0x01, 0x00, 0x00, 0xFE, 0x7E]);
        // Trailing byte stays queued for the next read
        assert_eq!(client.interface().read_queue.len(), 1);
    }

    #[test]
    fn test_read_frame_timeout_no_data() {
        let mut client = sps(MockInterface::new());
        let mut buffer = FrameBuffer::new();
        assert!(matches!(client.read_frame(&mut buffer), Err(Sps30Error::Timeout)));
    }

    #[test]
    fn test_read_frame_timeout_partial_data() {
        let mut iface = MockInterface::new();
        iface.stage_read_data(&[0x7E, 0x00, 0x01]);
        let mut client = sps(iface);
        let mut buffer = FrameBuffer::new();
        assert!(matches!(
            client.read_frame(&mut buffer),
            Err(Sps30Error::Frame(FrameError::Incomplete { received: 3 }))
        ));
    }

    #[test]
    fn test_read_frame_overflow() {
        let mut iface = MockInterface::new();
        iface.stage_read_data(&[0x7E]);
        iface.stage_read_data(&[0x00; MAX_STUFFED_FRAME_LEN]);
        let mut client = sps(iface);
        let mut buffer = FrameBuffer::new();
        assert!(matches!(
            client.read_frame(&mut buffer),
            Err(Sps30Error::Frame(FrameError::BufferOverflow { .. }))
        ));
    }

    #[test]
    fn test_read_frame_io_error() {
        let mut iface = MockInterface::new();
        iface.fail_reads = true;
        let mut client = sps(iface);
        let mut buffer = FrameBuffer::new();
        assert!(matches!(client.read_frame(&mut buffer), Err(Sps30Error::Io(MockCommError))));
    }

    #[test]
    fn test_send_frame_bytes() {
        let mut client = sps(MockInterface::new());
        client.send_frame_bytes(&[0x7E, 0x00, 0x01, 0x00, 0xFE, 0x7E]).unwrap();
        assert_eq!(client.interface().write_log, vec![0x7E, 0x00, 0x01, 0x00, 0xFE, 0x7E]);
        assert_eq!(client.interface().flush_count, 1);
        assert_eq!(client.interface().config, Some(Config::default().serial));
    }
}
