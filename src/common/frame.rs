// src/common/frame.rs

use super::checksum::calculate_checksum;
use super::error::FrameError;
use super::stuffing::{stuff, FRAME_MARKER};
use arrayvec::ArrayVec;

/// Address byte of every frame. SHDLC over UART is point-to-point.
pub const DEVICE_ADDRESS: u8 = 0x00;
/// Largest payload the one-byte length field can describe.
pub const MAX_PAYLOAD_LEN: usize = 255;
/// Address, command, state, length and checksum of a response frame.
pub const RESPONSE_OVERHEAD: usize = 5;
/// Worst case on the wire: two markers plus every interior byte escaped.
pub const MAX_STUFFED_FRAME_LEN: usize = 2 + 2 * (RESPONSE_OVERHEAD + MAX_PAYLOAD_LEN);

/// A request (MOSI) frame before stuffing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame<'a> {
    command: u8,
    payload: &'a [u8],
}

impl<'a> Frame<'a> {
    /// Creates a request frame, rejecting payloads the length byte cannot describe.
    pub fn new(command: u8, payload: &'a [u8]) -> Result<Self, FrameError> {
        if payload.len() > MAX_PAYLOAD_LEN {
            return Err(FrameError::PayloadTooLong { len: payload.len() });
        }
        Ok(Frame { command, payload })
    }

    #[inline]
    pub fn command(&self) -> u8 {
        self.command
    }

    #[inline]
    pub fn payload(&self) -> &'a [u8] {
        self.payload
    }

    #[inline]
    pub const fn address(&self) -> u8 {
        DEVICE_ADDRESS
    }

    /// Length field: payload bytes before stuffing.
    pub fn length(&self) -> Result<u8, FrameError> {
        u8::try_from(self.payload.len()).map_err(|_| FrameError::PayloadTooLong { len: self.payload.len() })
    }

    /// Unstuffed interior: address, command, length, payload and checksum.
    pub fn to_bytes(&self) -> Result<ArrayVec<u8, { 4 + MAX_PAYLOAD_LEN }>, FrameError> {
        let too_long = FrameError::PayloadTooLong { len: self.payload.len() };
        let length = self.length()?;

        let mut raw = ArrayVec::new();
        raw.try_extend_from_slice(&[self.address(), self.command, length])
            .map_err(|_| too_long)?;
        raw.try_extend_from_slice(self.payload).map_err(|_| too_long)?;
        let checksum = calculate_checksum(&raw);
        raw.try_push(checksum).map_err(|_| too_long)?;
        Ok(raw)
    }

    /// Produces the transmittable, byte-stuffed frame.
    pub fn to_stuffed(&self) -> Result<StuffedFrame, FrameError> {
        StuffedFrame::wrap(&self.to_bytes()?)
    }
}

/// A complete frame as it travels over the wire: `0x7E, stuffed interior, 0x7E`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StuffedFrame(ArrayVec<u8, MAX_STUFFED_FRAME_LEN>);

impl StuffedFrame {
    /// Stuffs an unstuffed interior (address through checksum) and adds both markers.
    pub fn wrap(interior: &[u8]) -> Result<Self, FrameError> {
        let mut buf = ArrayVec::new();
        buf.try_push(FRAME_MARKER)
            .map_err(|_| FrameError::BufferOverflow { capacity: MAX_STUFFED_FRAME_LEN })?;
        stuff(interior, &mut buf)?;
        buf.try_push(FRAME_MARKER)
            .map_err(|_| FrameError::BufferOverflow { capacity: MAX_STUFFED_FRAME_LEN })?;
        Ok(StuffedFrame(buf))
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for StuffedFrame {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// Builds the stuffed request frame for `command` carrying `payload`.
///
/// # Errors
///
/// `FrameError::PayloadTooLong` if `payload` exceeds 255 bytes. The length field
/// is a single byte, so longer payloads are refused rather than truncated.
pub fn assemble_frame(command: u8, payload: &[u8]) -> Result<StuffedFrame, FrameError> {
    Frame::new(command, payload)?.to_stuffed()
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::stuffing::unstuff;
    use proptest::prelude::*;

    #[test]
    fn test_start_measurement_frame() {
        let frame = assemble_frame(0x00, &[0x01, 0x03]).unwrap();
        assert_eq!(frame.as_bytes(), &[0x7E, 0x00, 0x00, 0x02, 0x01, 0x03, 0xF9, 0x7E]);
    }

    #[test]
    fn test_empty_payload_frames() {
        // Stop measurement: 7E 00 01 00 FE 7E
        assert_eq!(assemble_frame(0x01, &[]).unwrap().as_bytes(), &[0x7E, 0x00, 0x01, 0x00, 0xFE, 0x7E]);
        // Reset: 7E 00 D3 00 2C 7E
        assert_eq!(assemble_frame(0xD3, &[]).unwrap().as_bytes(), &[0x7E, 0x00, 0xD3, 0x00, 0x2C, 0x7E]);
    }

    #[test]
    fn test_checksum_is_stuffed() {
        // Read device info (serial number): 00 D0 01 03 -> sum 0xD4 -> checksum 0x2B
        assert_eq!(
            assemble_frame(0xD0, &[0x03]).unwrap().as_bytes(),
            &[0x7E, 0x00, 0xD0, 0x01, 0x03, 0x2B, 0x7E]
        );
        // Payload 0x11 (XON) must be escaped; sum 0x00+0x03+0x01+0x11 = 0x15 -> 0xEA
        assert_eq!(
            assemble_frame(0x03, &[0x11]).unwrap().as_bytes(),
            &[0x7E, 0x00, 0x03, 0x01, 0x7D, 0x31, 0xEA, 0x7E]
        );
    }

    #[test]
    fn test_oversized_payload_rejected() {
        let payload = [0u8; MAX_PAYLOAD_LEN + 1];
        assert_eq!(
            assemble_frame(0x03, &payload),
            Err(FrameError::PayloadTooLong { len: MAX_PAYLOAD_LEN + 1 })
        );
    }

    #[test]
    fn test_unchecked_oversized_frame_is_refused() {
        // Bypasses Frame::new
        let payload = [0u8; MAX_PAYLOAD_LEN + 1];
        let frame = Frame { command: 0x03, payload: &payload };
        let too_long = FrameError::PayloadTooLong { len: MAX_PAYLOAD_LEN + 1 };
        assert_eq!(frame.length(), Err(too_long));
        assert_eq!(frame.to_bytes(), Err(too_long));
        assert_eq!(frame.to_stuffed(), Err(too_long));
    }

    #[test]
    fn test_frame_accessors() {
        let frame = Frame::new(0x80, &[0x00]).unwrap();
        assert_eq!(frame.command(), 0x80);
        assert_eq!(frame.payload(), &[0x00]);
        assert_eq!(frame.address(), DEVICE_ADDRESS);
        assert_eq!(frame.length(), Ok(1));
    }

    #[test]
    fn test_max_payload_all_reserved_fits() {
        let payload = [0x7E; MAX_PAYLOAD_LEN];
        let frame = assemble_frame(0x7D, &payload).unwrap();
        // Interior markers never appear unescaped.
        let interior = &frame.as_bytes()[1..frame.len() - 1];
        assert!(!interior.contains(&0x7E));
    }

    proptest! {
        #[test]
        fn prop_length_byte_matches_payload(
            command in any::<u8>(),
            payload in proptest::collection::vec(any::<u8>(), 0..=MAX_PAYLOAD_LEN),
        ) {
            let frame = assemble_frame(command, &payload).unwrap();
            let bytes = frame.as_bytes();
            prop_assert_eq!(bytes[0], 0x7E);
            prop_assert_eq!(bytes[bytes.len() - 1], 0x7E);

            let mut raw = ArrayVec::<u8, 600>::new();
            unstuff(&bytes[1..bytes.len() - 1], &mut raw).unwrap();
            prop_assert_eq!(raw[0], DEVICE_ADDRESS);
            prop_assert_eq!(raw[1], command);
            prop_assert_eq!(raw[2] as usize, payload.len());
            prop_assert_eq!(&raw[3..raw.len() - 1], payload.as_slice());
            prop_assert_eq!(raw[raw.len() - 1], calculate_checksum(&raw[..raw.len() - 1]));
        }
    }
}
