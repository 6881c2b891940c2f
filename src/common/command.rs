//! SPS30 command definitions.
//!
//! Every operation the driver supports maps to one command byte and a fixed
//! rule for encoding its request payload.

use core::fmt;

use super::error::FrameError;
use super::frame::{assemble_frame, StuffedFrame};

/// Command byte values on the wire.
pub mod code {
    pub const START_MEASUREMENT: u8 = 0x00;
    pub const STOP_MEASUREMENT: u8 = 0x01;
    pub const READ_MEASURED_VALUES: u8 = 0x03;
    pub const AUTO_CLEANING_INTERVAL: u8 = 0x80;
    pub const START_FAN_CLEANING: u8 = 0x56;
    pub const DEVICE_INFORMATION: u8 = 0xD0;
    pub const RESET: u8 = 0xD3;
}

/// Output format selector sent with Start Measurement: big-endian IEEE754 floats.
pub const MEASUREMENT_FORMAT_FLOAT: u8 = 0x03;
/// Sub-command selecting the auto cleaning interval parameter.
pub const AUTO_CLEANING_SUBCOMMAND: u8 = 0x00;

/// Which string Get Device Information returns.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum DeviceInfoType {
    ProductName = 1,
    ArticleCode = 2,
    SerialNumber = 3,
}

impl DeviceInfoType {
    /// Tries to convert a u8 into a DeviceInfoType.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(DeviceInfoType::ProductName),
            2 => Some(DeviceInfoType::ArticleCode),
            3 => Some(DeviceInfoType::SerialNumber),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Represents an SPS30 command together with its request parameters.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Command {
    /// Start Measurement (`0x00`) - enters measurement mode with float output.
    StartMeasurement,

    /// Stop Measurement (`0x01`) - returns to idle mode.
    StopMeasurement,

    /// Read Measured Values (`0x03`) - returns the latest measurement, or nothing if none is new.
    ReadMeasuredValues,

    /// Read Auto Cleaning Interval (`0x80` with sub-command `0x00`).
    ReadAutoCleaningInterval,

    /// Write Auto Cleaning Interval (`0x80` with sub-command `0x00` and a big-endian u32 in seconds).
    WriteAutoCleaningInterval { seconds: u32 },

    /// Start Fan Cleaning (`0x56`) - only valid in measurement mode.
    StartFanCleaning,

    /// Device Information (`0xD0`) - product name, article code or serial number.
    GetDeviceInformation(DeviceInfoType),

    /// Device Reset (`0xD3`) - soft reset, as after power up.
    Reset,
}

/// Maximum encoded request payload across all commands.
pub const MAX_REQUEST_PAYLOAD_LEN: usize = 5;

/// Request payload bytes of a [`Command`], stored inline.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct RequestPayload {
    buf: [u8; MAX_REQUEST_PAYLOAD_LEN],
    len: usize,
}

impl RequestPayload {
    fn from_slice(bytes: &[u8]) -> Self {
        let mut buf = [0u8; MAX_REQUEST_PAYLOAD_LEN];
        buf[..bytes.len()].copy_from_slice(bytes);
        RequestPayload { buf, len: bytes.len() }
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

impl Command {
    /// Command byte placed in the frame header.
    pub const fn code(&self) -> u8 {
        match self {
            Command::StartMeasurement => code::START_MEASUREMENT,
            Command::StopMeasurement => code::STOP_MEASUREMENT,
            Command::ReadMeasuredValues => code::READ_MEASURED_VALUES,
            Command::ReadAutoCleaningInterval | Command::WriteAutoCleaningInterval { .. } => {
                code::AUTO_CLEANING_INTERVAL
            }
            Command::StartFanCleaning => code::START_FAN_CLEANING,
            Command::GetDeviceInformation(_) => code::DEVICE_INFORMATION,
            Command::Reset => code::RESET,
        }
    }

    /// Request payload as sent on the wire (before stuffing).
    pub fn payload(&self) -> RequestPayload {
        match self {
            Command::StartMeasurement => RequestPayload::from_slice(&[0x01, MEASUREMENT_FORMAT_FLOAT]),
            Command::ReadAutoCleaningInterval => RequestPayload::from_slice(&[AUTO_CLEANING_SUBCOMMAND]),
            Command::WriteAutoCleaningInterval { seconds } => {
                let be = seconds.to_be_bytes();
                RequestPayload::from_slice(&[AUTO_CLEANING_SUBCOMMAND, be[0], be[1], be[2], be[3]])
            }
            Command::GetDeviceInformation(info) => RequestPayload::from_slice(&[info.as_u8()]),
            Command::StopMeasurement
            | Command::ReadMeasuredValues
            | Command::StartFanCleaning
            | Command::Reset => RequestPayload::from_slice(&[]),
        }
    }

    /// Whether a successful response carries data the caller wants back.
    pub const fn returns_data(&self) -> bool {
        matches!(
            self,
            Command::ReadMeasuredValues
                | Command::ReadAutoCleaningInterval
                | Command::GetDeviceInformation(_)
        )
    }

    /// Assembles the stuffed request frame for this command.
    pub fn to_frame(&self) -> Result<StuffedFrame, FrameError> {
        assemble_frame(self.code(), self.payload().as_bytes())
    }

    /// Reconstructs a command from a request's command byte and payload.
    ///
    /// Returns `None` for unknown command bytes or payloads that no
    /// supported command produces.
    pub fn from_parts(code: u8, payload: &[u8]) -> Option<Self> {
        match (code, payload) {
            (code::START_MEASUREMENT, [0x01, MEASUREMENT_FORMAT_FLOAT]) => Some(Command::StartMeasurement),
            (code::STOP_MEASUREMENT, []) => Some(Command::StopMeasurement),
            (code::READ_MEASURED_VALUES, []) => Some(Command::ReadMeasuredValues),
            (code::AUTO_CLEANING_INTERVAL, [AUTO_CLEANING_SUBCOMMAND]) => {
                Some(Command::ReadAutoCleaningInterval)
            }
            (code::AUTO_CLEANING_INTERVAL, [AUTO_CLEANING_SUBCOMMAND, a, b, c, d]) => {
                Some(Command::WriteAutoCleaningInterval { seconds: u32::from_be_bytes([*a, *b, *c, *d]) })
            }
            (code::START_FAN_CLEANING, []) => Some(Command::StartFanCleaning),
            (code::DEVICE_INFORMATION, [info]) => {
                DeviceInfoType::from_u8(*info).map(Command::GetDeviceInformation)
            }
            (code::RESET, []) => Some(Command::Reset),
            _ => None,
        }
    }

    /// Short operation name, used in log output.
    pub const fn name(&self) -> &'static str {
        match self {
            Command::StartMeasurement => "StartMeasurement",
            Command::StopMeasurement => "StopMeasurement",
            Command::ReadMeasuredValues => "ReadMeasuredValues",
            Command::ReadAutoCleaningInterval => "ReadAutoCleaningInterval",
            Command::WriteAutoCleaningInterval { .. } => "WriteAutoCleaningInterval",
            Command::StartFanCleaning => "StartFanCleaning",
            Command::GetDeviceInformation(_) => "GetDeviceInformation",
            Command::Reset => "Reset",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:#04x})", self.name(), self.code())
    }
}
