// src/common/error.rs

use super::status::DeviceStatus;

/// Errors raised while building or decoding SHDLC frames.
///
/// These never involve the transport, so they carry no I/O error type and can be
/// returned from the pure codec functions directly.
#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum FrameError {
    /// Payload does not fit the one-byte length field.
    #[error("Payload too long: {len} bytes (max 255)")]
    PayloadTooLong { len: usize },

    /// Escape byte (0x7D) was the last byte of the frame.
    #[error("Truncated escape sequence at end of frame")]
    TruncatedEscape,

    /// Escape byte was followed by a byte that does not encode a reserved value.
    #[error("Invalid escape sequence: 0x7D {0:#04x}")]
    InvalidEscape(u8),

    /// Frame is not bounded by 0x7E on both ends.
    #[error("Missing frame start/stop marker")]
    MissingFrameMarker,

    /// Frame is shorter than the fixed header plus checksum.
    #[error("Frame too short: {len} bytes")]
    TooShort { len: usize },

    /// Length field disagrees with the number of payload bytes received.
    #[error("Length mismatch: header declares {declared} bytes, frame carries {actual}")]
    LengthMismatch { declared: usize, actual: usize },

    /// Received checksum does not match the calculated one.
    #[error("Checksum mismatch: expected {expected:#04x}, calculated {calculated:#04x}")]
    ChecksumMismatch { expected: u8, calculated: u8 },

    /// Output buffer was too small.
    #[error("Buffer overflow: capacity {capacity} bytes")]
    BufferOverflow { capacity: usize },

    /// Transport went quiet in the middle of a frame.
    #[error("Incomplete frame: {received} bytes received before timeout")]
    Incomplete { received: usize },
}

/// Coarse classification of [`Sps30Error`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ErrorKind {
    /// Read/write failure or timeout on the serial line.
    Transport,
    /// Malformed frame: markers, escapes, lengths.
    Framing,
    /// Frame arrived intact but its checksum is wrong.
    Checksum,
    /// Device answered with a nonzero status byte or an unexpected echo.
    Protocol,
}

#[derive(Debug, thiserror::Error)]
pub enum Sps30Error<E = ()>
where
    E: core::fmt::Debug, // Needed for the generic Io error format string
{
    /// Underlying I/O error from the transport implementation.
    #[error("I/O error: {0:?}")]
    Io(E),

    /// No response arrived before the response timeout.
    #[error("Operation timed out")]
    Timeout,

    /// Frame could not be built or decoded.
    #[error("Frame error: {0}")]
    Frame(#[from] FrameError),

    /// Device reported a nonzero status byte.
    #[error("Device error {code}: {0}", code = .0.code())]
    Device(DeviceStatus),

    /// Response echoed a different command than the one sent.
    #[error("Unexpected response: sent command {expected:#04x}, got {received:#04x}")]
    UnexpectedCommand { expected: u8, received: u8 },

    /// Response came from an address other than 0.
    #[error("Unexpected device address {0:#04x}")]
    UnexpectedAddress(u8),

    /// Payload shape does not match what the operation expects.
    #[error("Invalid payload for this command")]
    InvalidPayload,
}

impl<E: core::fmt::Debug> Sps30Error<E> {
    /// Classifies the error along the transport/framing/checksum/protocol axis.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Sps30Error::Io(_) | Sps30Error::Timeout => ErrorKind::Transport,
            Sps30Error::Frame(FrameError::ChecksumMismatch { .. }) => ErrorKind::Checksum,
            Sps30Error::Frame(_) | Sps30Error::InvalidPayload => ErrorKind::Framing,
            Sps30Error::Device(_)
            | Sps30Error::UnexpectedCommand { .. }
            | Sps30Error::UnexpectedAddress(_) => ErrorKind::Protocol,
        }
    }

    /// Status reported by the device, if this is a protocol error.
    pub fn device_status(&self) -> Option<DeviceStatus> {
        match self {
            Sps30Error::Device(status) => Some(*status),
            _ => None,
        }
    }
}
