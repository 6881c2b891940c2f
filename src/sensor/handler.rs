// src/sensor/handler.rs

use super::formatter::assemble_response;
use super::parser::parse_request;
use crate::common::{
    command::{Command, DeviceInfoType},
    error::FrameError,
    frame::{StuffedFrame, DEVICE_ADDRESS},
    response::Payload,
    status::DeviceStatus,
    timing,
    types::MeasuredValues,
};

/// Device-side behaviour: turns a decoded command into a payload or an error status.
pub trait CommandHandler {
    fn handle(&mut self, command: Command) -> Result<Payload, DeviceStatus>;
}

/// Answers one raw request frame with a raw response frame.
///
/// Unknown command bytes are answered with `UnknownCommand`; a known command
/// byte with a payload no command produces gets `WrongDataLength`. Requests
/// for another address, or with a broken frame, get no answer (`Ok(None)`
/// resp. the framing error), as a real device stays silent.
pub fn respond<H: CommandHandler>(handler: &mut H, raw_request: &[u8]) -> Result<Option<StuffedFrame>, FrameError> {
    let request = parse_request(raw_request)?;
    if request.address != DEVICE_ADDRESS {
        return Ok(None);
    }

    let outcome = match request.to_command() {
        Some(command) => handler.handle(command),
        None if is_known_code(request.command) => Err(DeviceStatus::WrongDataLength),
        None => Err(DeviceStatus::UnknownCommand),
    };

    let frame = match outcome {
        Ok(payload) => assemble_response(request.command, DeviceStatus::NoError, &payload)?,
        Err(status) => assemble_response(request.command, status, &[])?,
    };
    Ok(Some(frame))
}

fn is_known_code(code: u8) -> bool {
    use crate::common::command::code::*;
    matches!(
        code,
        START_MEASUREMENT
            | STOP_MEASUREMENT
            | READ_MEASURED_VALUES
            | AUTO_CLEANING_INTERVAL
            | START_FAN_CLEANING
            | DEVICE_INFORMATION
            | RESET
    )
}

/// Operating mode of a [`SimulatedSps30`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Mode {
    Idle,
    Measuring,
}

/// A software SPS30 following the datasheet's state rules.
///
/// Start Measurement is only accepted in idle mode; Stop Measurement, Read
/// Measured Values and Start Fan Cleaning only in measurement mode. Anything
/// else is answered with `CommandNotAllowed`.
#[derive(Debug, Clone)]
pub struct SimulatedSps30 {
    mode: Mode,
    auto_cleaning_interval: u32,
    sample: Option<MeasuredValues>,
    product_type: &'static str,
    article_code: &'static str,
    serial_number: &'static str,
    fan_cleanings: u32,
}

impl Default for SimulatedSps30 {
    fn default() -> Self {
        SimulatedSps30 {
            mode: Mode::Idle,
            auto_cleaning_interval: timing::DEFAULT_AUTO_CLEANING_INTERVAL_SECS,
            sample: None,
            product_type: "00080000",
            article_code: "",
            serial_number: "0123456789ABCDEF",
            fan_cleanings: 0,
        }
    }
}

impl SimulatedSps30 {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_serial_number(mut self, serial_number: &'static str) -> Self {
        self.serial_number = serial_number;
        self
    }

    /// Makes `values` available to the next Read Measured Values (measurement mode only).
    pub fn push_sample(&mut self, values: MeasuredValues) {
        self.sample = Some(values);
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn auto_cleaning_interval(&self) -> u32 {
        self.auto_cleaning_interval
    }

    pub fn fan_cleanings(&self) -> u32 {
        self.fan_cleanings
    }

    /// NUL-terminated string payload. Strings of 255 bytes or more do not fit.
    fn string_payload(text: &str) -> Result<Payload, DeviceStatus> {
        let mut payload = Payload::new();
        payload
            .extend_from_slice(text.as_bytes())
            .map_err(|_| DeviceStatus::InternalArgumentOutOfRange)?;
        payload.push(0).map_err(|_| DeviceStatus::InternalArgumentOutOfRange)?;
        Ok(payload)
    }
}

impl CommandHandler for SimulatedSps30 {
    fn handle(&mut self, command: Command) -> Result<Payload, DeviceStatus> {
        match (command, self.mode) {
            (Command::StartMeasurement, Mode::Idle) => {
                self.mode = Mode::Measuring;
                Ok(Payload::new())
            }
            (Command::StopMeasurement, Mode::Measuring) => {
                self.mode = Mode::Idle;
                self.sample = None;
                Ok(Payload::new())
            }
            (Command::ReadMeasuredValues, Mode::Measuring) => {
                // No new sample: empty payload.
                let payload = match self.sample.take() {
                    Some(values) => Payload::from_slice(&values.to_be_bytes()).unwrap_or_default(),
                    None => Payload::new(),
                };
                Ok(payload)
            }
            (Command::StartFanCleaning, Mode::Measuring) => {
                self.fan_cleanings += 1;
                Ok(Payload::new())
            }
            (Command::StartMeasurement, _)
            | (Command::StopMeasurement, _)
            | (Command::ReadMeasuredValues, _)
            | (Command::StartFanCleaning, _) => Err(DeviceStatus::CommandNotAllowed),
            (Command::ReadAutoCleaningInterval, _) => {
                Payload::from_slice(&self.auto_cleaning_interval.to_be_bytes()).map_err(|_| DeviceStatus::InternalArgumentOutOfRange)
            }
            (Command::WriteAutoCleaningInterval { seconds }, _) => {
                self.auto_cleaning_interval = seconds;
                Ok(Payload::new())
            }
            (Command::GetDeviceInformation(info), _) => Self::string_payload(match info {
                DeviceInfoType::ProductName => self.product_type,
                DeviceInfoType::ArticleCode => self.article_code,
                DeviceInfoType::SerialNumber => self.serial_number,
            }),
            (Command::Reset, _) => {
                let serial_number = self.serial_number;
                *self = SimulatedSps30 { serial_number, ..SimulatedSps30::default() };
                Ok(Payload::new())
            }
        }
    }
}
