// src/common/status.rs

use core::fmt;

/// Outcome code the device reports in the state byte of every response.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum DeviceStatus {
    NoError,
    /// Wrong data length for this command (too much or little data).
    WrongDataLength,
    UnknownCommand,
    /// No access right for command.
    NoAccessRight,
    /// Illegal command parameter or parameter out of allowed range.
    IllegalParameter,
    /// Internal function argument out of range.
    InternalArgumentOutOfRange,
    /// Command not allowed in current state.
    CommandNotAllowed,
    /// Any code the device documentation does not list.
    Undefined(u8),
}

impl DeviceStatus {
    /// Maps a raw state byte. Total: unknown codes become `Undefined`.
    pub const fn from_code(code: u8) -> Self {
        match code {
            0 => DeviceStatus::NoError,
            1 => DeviceStatus::WrongDataLength,
            2 => DeviceStatus::UnknownCommand,
            3 => DeviceStatus::NoAccessRight,
            4 => DeviceStatus::IllegalParameter,
            40 => DeviceStatus::InternalArgumentOutOfRange,
            67 => DeviceStatus::CommandNotAllowed,
            other => DeviceStatus::Undefined(other),
        }
    }

    pub const fn code(&self) -> u8 {
        match self {
            DeviceStatus::NoError => 0,
            DeviceStatus::WrongDataLength => 1,
            DeviceStatus::UnknownCommand => 2,
            DeviceStatus::NoAccessRight => 3,
            DeviceStatus::IllegalParameter => 4,
            DeviceStatus::InternalArgumentOutOfRange => 40,
            DeviceStatus::CommandNotAllowed => 67,
            DeviceStatus::Undefined(code) => *code,
        }
    }

    #[inline]
    pub const fn is_ok(&self) -> bool {
        matches!(self, DeviceStatus::NoError)
    }

    /// Human-readable description, as listed in the SPS30 datasheet.
    pub const fn description(&self) -> &'static str {
        match self {
            DeviceStatus::NoError => "No error",
            DeviceStatus::WrongDataLength => "Wrong data length",
            DeviceStatus::UnknownCommand => "Unknown command",
            DeviceStatus::NoAccessRight => "No access right",
            DeviceStatus::IllegalParameter => "Illegal parameter or out of range",
            DeviceStatus::InternalArgumentOutOfRange => "Internal argument out of range",
            DeviceStatus::CommandNotAllowed => "Command not allowed in current state",
            DeviceStatus::Undefined(_) => "undefined",
        }
    }
}

impl From<u8> for DeviceStatus {
    fn from(code: u8) -> Self {
        DeviceStatus::from_code(code)
    }
}

impl From<DeviceStatus> for u8 {
    fn from(status: DeviceStatus) -> Self {
        status.code()
    }
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}
