// src/client/sync_client/mod.rs

mod io_helpers;
mod transaction;

use crate::common::{
    command::{Command, DeviceInfoType},
    config::Config,
    error::Sps30Error,
    hal_traits::{Sps30Serial, Sps30Timer},
    response::Payload,
    status::DeviceStatus,
    timing,
    types::{decode_auto_cleaning_interval, decode_device_info, DeviceInfoString, MeasuredValues},
};
use core::fmt::Debug;

/// An SPS30 attached over UART (SHDLC), driven with blocking request/response exchanges.
///
/// The client owns its interface for its whole lifetime. Exactly one command is
/// in flight at a time: every method sends a request and waits for the matching
/// response or the configured timeout. Nothing is retried.
#[derive(Debug)]
pub struct Sps30<IF>
where
    IF: Sps30Serial + Sps30Timer,
    IF::Error: Debug,
{
    interface: IF,
    config: Config,
    last_status: Option<DeviceStatus>,
}

impl<IF> Sps30<IF>
where
    IF: Sps30Serial + Sps30Timer,
    IF::Error: Debug,
{
    pub fn new(interface: IF) -> Self {
        Self::with_config(interface, Config::default())
    }

    pub fn with_config(interface: IF, config: Config) -> Self {
        Sps30 {
            interface,
            config,
            last_status: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Status byte of the most recent response, if any response was decoded yet.
    pub fn last_status(&self) -> Option<DeviceStatus> {
        self.last_status
    }

    pub fn interface(&self) -> &IF {
        &self.interface
    }

    pub fn interface_mut(&mut self) -> &mut IF {
        &mut self.interface
    }

    /// Gives the interface back.
    pub fn release(self) -> IF {
        self.interface
    }

    // --- Public Blocking Methods ---

    /// Enters measurement mode with big-endian float output.
    pub fn start_measurement(&mut self) -> Result<(), Sps30Error<IF::Error>> {
        self.execute(Command::StartMeasurement).map(|_| ())
    }

    /// Returns to idle mode.
    pub fn stop_measurement(&mut self) -> Result<(), Sps30Error<IF::Error>> {
        self.execute(Command::StopMeasurement).map(|_| ())
    }

    /// Raw payload of Read Measured Values: ten big-endian `f32`, or empty when
    /// no new measurement is available.
    pub fn read_measured_values(&mut self) -> Result<Payload, Sps30Error<IF::Error>> {
        self.execute(Command::ReadMeasuredValues)
    }

    /// Reads and decodes a measurement. `Ok(None)` means no new values yet.
    pub fn read_measured_values_f32(&mut self) -> Result<Option<MeasuredValues>, Sps30Error<IF::Error>> {
        let payload = self.read_measured_values()?;
        if payload.is_empty() {
            return Ok(None);
        }
        MeasuredValues::from_be_bytes(&payload)
            .map(Some)
            .ok_or(Sps30Error::InvalidPayload)
    }

    /// Raw payload of Read Auto Cleaning Interval (4 bytes, big-endian seconds).
    pub fn read_auto_cleaning_interval(&mut self) -> Result<Payload, Sps30Error<IF::Error>> {
        self.execute(Command::ReadAutoCleaningInterval)
    }

    pub fn read_auto_cleaning_interval_secs(&mut self) -> Result<u32, Sps30Error<IF::Error>> {
        let payload = self.read_auto_cleaning_interval()?;
        decode_auto_cleaning_interval(&payload).ok_or(Sps30Error::InvalidPayload)
    }

    /// Sets the auto cleaning interval in seconds (0 disables auto cleaning).
    pub fn write_auto_cleaning_interval(&mut self, seconds: u32) -> Result<(), Sps30Error<IF::Error>> {
        self.execute(Command::WriteAutoCleaningInterval { seconds }).map(|_| ())
    }

    /// Soft reset. Waits for the device to come back before returning.
    pub fn reset(&mut self) -> Result<(), Sps30Error<IF::Error>> {
        self.execute(Command::Reset)?;
        self.interface.delay_ms(timing::RESET_RECOVERY_TIME.as_millis() as u32);
        Ok(())
    }

    /// Starts a manual fan cleaning. The device only accepts it in measurement mode.
    pub fn start_fan_cleaning(&mut self) -> Result<(), Sps30Error<IF::Error>> {
        self.execute(Command::StartFanCleaning).map(|_| ())
    }

    /// Raw payload of Get Device Information (NUL-terminated ASCII).
    pub fn get_device_information(&mut self, info: DeviceInfoType) -> Result<Payload, Sps30Error<IF::Error>> {
        self.execute(Command::GetDeviceInformation(info))
    }

    /// Device information as a string, terminator removed.
    pub fn device_information_str(&mut self, info: DeviceInfoType) -> Result<DeviceInfoString, Sps30Error<IF::Error>> {
        let payload = self.get_device_information(info)?;
        decode_device_info(&payload).ok_or(Sps30Error::InvalidPayload)
    }

    pub fn product_name(&mut self) -> Result<DeviceInfoString, Sps30Error<IF::Error>> {
        self.device_information_str(DeviceInfoType::ProductName)
    }

    pub fn article_code(&mut self) -> Result<DeviceInfoString, Sps30Error<IF::Error>> {
        self.device_information_str(DeviceInfoType::ArticleCode)
    }

    pub fn serial_number(&mut self) -> Result<DeviceInfoString, Sps30Error<IF::Error>> {
        self.device_information_str(DeviceInfoType::SerialNumber)
    }
}
