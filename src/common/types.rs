// src/common/types.rs

use super::frame::MAX_PAYLOAD_LEN;

/// ASCII string returned by Get Device Information.
pub type DeviceInfoString = heapless::String<MAX_PAYLOAD_LEN>;

/// One measurement in big-endian IEEE754 float format (output selector `0x03`).
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct MeasuredValues {
    /// Mass concentration PM1.0 [µg/m³].
    pub mass_pm1_0: f32,
    /// Mass concentration PM2.5 [µg/m³].
    pub mass_pm2_5: f32,
    /// Mass concentration PM4.0 [µg/m³].
    pub mass_pm4_0: f32,
    /// Mass concentration PM10 [µg/m³].
    pub mass_pm10: f32,
    /// Number concentration PM0.5 [#/cm³].
    pub number_pm0_5: f32,
    /// Number concentration PM1.0 [#/cm³].
    pub number_pm1_0: f32,
    /// Number concentration PM2.5 [#/cm³].
    pub number_pm2_5: f32,
    /// Number concentration PM4.0 [#/cm³].
    pub number_pm4_0: f32,
    /// Number concentration PM10 [#/cm³].
    pub number_pm10: f32,
    /// Typical particle size [µm].
    pub typical_particle_size: f32,
}

impl MeasuredValues {
    pub const VALUE_COUNT: usize = 10;
    /// Payload length of a float-format measurement.
    pub const PAYLOAD_LEN: usize = Self::VALUE_COUNT * 4;

    /// Decodes the 40-byte payload of Read Measured Values.
    ///
    /// Returns `None` if the payload is not exactly 40 bytes.
    pub fn from_be_bytes(payload: &[u8]) -> Option<Self> {
        if payload.len() != Self::PAYLOAD_LEN {
            return None;
        }
        let mut values = [0f32; Self::VALUE_COUNT];
        for (value, chunk) in values.iter_mut().zip(payload.chunks_exact(4)) {
            *value = f32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        let [mass_pm1_0, mass_pm2_5, mass_pm4_0, mass_pm10, number_pm0_5, number_pm1_0, number_pm2_5, number_pm4_0, number_pm10, typical_particle_size] =
            values;
        Some(MeasuredValues {
            mass_pm1_0,
            mass_pm2_5,
            mass_pm4_0,
            mass_pm10,
            number_pm0_5,
            number_pm1_0,
            number_pm2_5,
            number_pm4_0,
            number_pm10,
            typical_particle_size,
        })
    }

    /// Encodes the values in the device's wire order.
    pub fn to_be_bytes(&self) -> [u8; Self::PAYLOAD_LEN] {
        let values = [
            self.mass_pm1_0,
            self.mass_pm2_5,
            self.mass_pm4_0,
            self.mass_pm10,
            self.number_pm0_5,
            self.number_pm1_0,
            self.number_pm2_5,
            self.number_pm4_0,
            self.number_pm10,
            self.typical_particle_size,
        ];
        let mut out = [0u8; Self::PAYLOAD_LEN];
        for (chunk, value) in out.chunks_exact_mut(4).zip(values.iter()) {
            chunk.copy_from_slice(&value.to_be_bytes());
        }
        out
    }
}

/// Decodes the 4-byte big-endian auto cleaning interval in seconds.
pub fn decode_auto_cleaning_interval(payload: &[u8]) -> Option<u32> {
    match payload {
        [a, b, c, d] => Some(u32::from_be_bytes([*a, *b, *c, *d])),
        _ => None,
    }
}

/// Decodes a Device Information payload: ASCII, NUL terminated.
///
/// Everything from the first NUL on is dropped. Returns `None` for non-ASCII content.
pub fn decode_device_info(payload: &[u8]) -> Option<DeviceInfoString> {
    let end = payload.iter().position(|b| *b == 0).unwrap_or(payload.len());
    let text = &payload[..end];
    if !text.is_ascii() {
        return None;
    }
    let text = core::str::from_utf8(text).ok()?;
    let mut out = DeviceInfoString::new();
    out.push_str(text).ok()?;
    Some(out)
}
