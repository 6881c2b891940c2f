// src/sensor/parser.rs

use crate::common::{
    checksum::verify_checksum,
    command::Command,
    error::FrameError,
    frame::MAX_PAYLOAD_LEN,
    response::Payload,
    stuffing::{unstuff, FRAME_MARKER},
};
use arrayvec::ArrayVec;

/// Address, command, length and checksum of a request frame.
const REQUEST_OVERHEAD: usize = 4;

/// A request (MOSI) frame as seen by the device, after unstuffing and checksum verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub address: u8,
    pub command: u8,
    pub payload: Payload,
}

impl Request {
    /// Interprets the request as one of the supported commands.
    pub fn to_command(&self) -> Option<Command> {
        Command::from_parts(self.command, &self.payload)
    }
}

/// Parses a raw request frame (`0x7E ... 0x7E`) into a [`Request`].
///
/// # Arguments
///
/// * `raw`: A complete stuffed frame including both markers.
///
/// # Returns
///
/// * `Ok(Request)` if the frame is well formed and its checksum matches.
/// * `Err(FrameError)` describing the first structural problem found.
pub fn parse_request(raw: &[u8]) -> Result<Request, FrameError> {
    let interior = match raw {
        [FRAME_MARKER, interior @ .., FRAME_MARKER] => interior,
        _ => return Err(FrameError::MissingFrameMarker),
    };

    let mut bytes = ArrayVec::<u8, { REQUEST_OVERHEAD + MAX_PAYLOAD_LEN }>::new();
    unstuff(interior, &mut bytes)?;

    if bytes.len() < REQUEST_OVERHEAD {
        return Err(FrameError::TooShort { len: bytes.len() });
    }

    let declared = bytes[2] as usize;
    let actual = bytes.len() - REQUEST_OVERHEAD;
    if declared != actual {
        return Err(FrameError::LengthMismatch { declared, actual });
    }

    verify_checksum(&bytes)?;

    let payload = Payload::from_slice(&bytes[3..3 + declared])
        .map_err(|_| FrameError::BufferOverflow { capacity: MAX_PAYLOAD_LEN })?;

    Ok(Request { address: bytes[0], command: bytes[1], payload })
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::command::DeviceInfoType;
    use crate::common::frame::assemble_frame;

    #[test]
    fn test_parse_every_command() {
        let commands = [
            Command::StartMeasurement,
            Command::StopMeasurement,
            Command::ReadMeasuredValues,
            Command::ReadAutoCleaningInterval,
            Command::WriteAutoCleaningInterval { seconds: 100 },
            Command::StartFanCleaning,
            Command::GetDeviceInformation(DeviceInfoType::ArticleCode),
            Command::Reset,
        ];
        for cmd in commands {
            let frame = cmd.to_frame().unwrap();
            let req = parse_request(frame.as_bytes()).unwrap();
            assert_eq!(req.address, 0x00);
            assert_eq!(req.command, cmd.code());
            assert_eq!(req.to_command(), Some(cmd));
        }
    }

    #[test]
    fn test_parse_unknown_command() {
        let frame = assemble_frame(0x42, &[0x01]).unwrap();
        let req = parse_request(frame.as_bytes()).unwrap();
        assert_eq!(req.command, 0x42);
        assert_eq!(req.payload.as_slice(), &[0x01]);
        assert_eq!(req.to_command(), None);
    }

    #[test]
    fn test_parse_invalid_formats() {
        assert_eq!(parse_request(b""), Err(FrameError::MissingFrameMarker));
        assert_eq!(parse_request(&[0x7E, 0x00, 0x01, 0x7E]), Err(FrameError::TooShort { len: 2 }));
        // Checksum off by one
        assert_eq!(
            parse_request(&[0x7E, 0x00, 0x01, 0x00, 0xFD, 0x7E]),
            Err(FrameError::ChecksumMismatch { expected: 0xFD, calculated: 0xFE })
        );
        // Length says 1, no payload
        assert_eq!(
            parse_request(&[0x7E, 0x00, 0x01, 0x01, 0xFD, 0x7E]),
            Err(FrameError::LengthMismatch { declared: 1, actual: 0 })
        );
    }
}
