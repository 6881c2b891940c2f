// src/sensor/formatter.rs

use crate::common::{
    checksum::calculate_checksum,
    error::FrameError,
    frame::{StuffedFrame, DEVICE_ADDRESS, MAX_PAYLOAD_LEN, RESPONSE_OVERHEAD},
    status::DeviceStatus,
};
use arrayvec::ArrayVec;

/// Assembles a response (MISO) frame: address, echoed command, state, length, payload, checksum.
///
/// The checksum covers the state byte as well as address, command, length and payload.
pub fn assemble_response(command: u8, state: DeviceStatus, payload: &[u8]) -> Result<StuffedFrame, FrameError> {
    if payload.len() > MAX_PAYLOAD_LEN {
        return Err(FrameError::PayloadTooLong { len: payload.len() });
    }

    let mut raw = ArrayVec::<u8, { RESPONSE_OVERHEAD + MAX_PAYLOAD_LEN }>::new();
    raw.push(DEVICE_ADDRESS);
    raw.push(command);
    raw.push(state.code());
    raw.push(payload.len() as u8);
    raw.try_extend_from_slice(payload)
        .map_err(|_| FrameError::PayloadTooLong { len: payload.len() })?;
    let checksum = calculate_checksum(&raw);
    raw.push(checksum);

    StuffedFrame::wrap(&raw)
}
