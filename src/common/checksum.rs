// src/common/checksum.rs

use super::error::FrameError;

/// Calculates the SHDLC checksum for the given bytes.
///
/// The checksum is the bitwise inverse of the least significant byte of the sum
/// of all bytes between the start and stop markers, before stuffing. For a
/// request that is address, command, length and payload; for a response the
/// state byte is included as well.
///
/// # Arguments
///
/// * `data`: The unstuffed frame content, excluding the checksum itself.
///
/// # Returns
///
/// The 8-bit checksum.
#[inline]
pub fn calculate_checksum(data: &[u8]) -> u8 {
    !data.iter().fold(0u8, |acc, b| acc.wrapping_add(*b))
}

/// Verifies an unstuffed frame whose last byte is the checksum.
///
/// # Returns
///
/// * `Ok(())` if the checksum is valid.
/// * `Err(FrameError::TooShort)` if the buffer is empty.
/// * `Err(FrameError::ChecksumMismatch)` if the checksums don't match.
pub fn verify_checksum(frame_with_checksum: &[u8]) -> Result<(), FrameError> {
    let (received, data) = frame_with_checksum
        .split_last()
        .ok_or(FrameError::TooShort { len: 0 })?;

    let calculated = calculate_checksum(data);
    if calculated == *received {
        Ok(())
    } else {
        Err(FrameError::ChecksumMismatch { expected: *received, calculated })
    }
}
