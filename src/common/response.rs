// src/common/response.rs

use super::checksum::verify_checksum;
use super::error::{FrameError, Sps30Error};
use super::frame::{MAX_PAYLOAD_LEN, RESPONSE_OVERHEAD};
use super::status::DeviceStatus;
use super::stuffing::{unstuff, FRAME_MARKER};
use arrayvec::ArrayVec;

/// Payload bytes of a decoded response.
pub type Payload = heapless::Vec<u8, MAX_PAYLOAD_LEN>;

// Field offsets inside the unstuffed interior (markers already removed).
const ADDRESS_IDX: usize = 0;
const COMMAND_IDX: usize = 1;
const STATE_IDX: usize = 2;
const LENGTH_IDX: usize = 3;
const PAYLOAD_IDX: usize = 4;

/// A response (MISO) frame after marker removal, unstuffing and checksum verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub address: u8,
    /// Command byte echoed by the device.
    pub command: u8,
    pub state: DeviceStatus,
    pub payload: Payload,
    pub checksum: u8,
}

impl Response {
    /// Parses one complete frame (`0x7E ... 0x7E`) as read from the transport.
    ///
    /// The state byte is exposed as-is; a nonzero state is *not* an error here.
    /// Use [`decode_response`] or [`Response::into_result`] for that.
    pub fn parse(raw: &[u8]) -> Result<Self, FrameError> {
        // 1. Strip markers
        let interior = match raw {
            [FRAME_MARKER, interior @ .., FRAME_MARKER] => interior,
            _ => return Err(FrameError::MissingFrameMarker),
        };

        // 2. Unstuff
        let mut bytes = ArrayVec::<u8, { RESPONSE_OVERHEAD + MAX_PAYLOAD_LEN }>::new();
        unstuff(interior, &mut bytes)?;

        // 3. Fixed header and trailing checksum must be present
        if bytes.len() < RESPONSE_OVERHEAD {
            return Err(FrameError::TooShort { len: bytes.len() });
        }

        // 4. Length field must account for exactly the bytes between header and checksum
        let declared = bytes[LENGTH_IDX] as usize;
        let actual = bytes.len() - RESPONSE_OVERHEAD;
        if declared != actual {
            return Err(FrameError::LengthMismatch { declared, actual });
        }

        // 5. Integrity
        verify_checksum(&bytes)?;

        let payload_end = PAYLOAD_IDX + declared;
        let payload = Payload::from_slice(&bytes[PAYLOAD_IDX..payload_end])
            .map_err(|_| FrameError::BufferOverflow { capacity: MAX_PAYLOAD_LEN })?;

        Ok(Response {
            address: bytes[ADDRESS_IDX],
            command: bytes[COMMAND_IDX],
            state: DeviceStatus::from_code(bytes[STATE_IDX]),
            payload,
            checksum: bytes[payload_end],
        })
    }

    /// Length field: payload bytes before stuffing.
    #[inline]
    pub fn length(&self) -> u8 {
        self.payload.len() as u8
    }

    #[inline]
    pub fn is_ok(&self) -> bool {
        self.state.is_ok()
    }

    /// Converts a nonzero device state into `Sps30Error::Device`.
    pub fn into_result<E: core::fmt::Debug>(self) -> Result<Self, Sps30Error<E>> {
        if self.state.is_ok() {
            Ok(self)
        } else {
            Err(Sps30Error::Device(self.state))
        }
    }
}

/// Decodes a received frame and rejects responses carrying a nonzero state.
///
/// # Errors
///
/// * `Sps30Error::Frame` for marker, escape, length or checksum problems.
/// * `Sps30Error::Device` when the device reported an error status.
pub fn decode_response<E: core::fmt::Debug>(raw: &[u8]) -> Result<Response, Sps30Error<E>> {
    Response::parse(raw)?.into_result()
}
