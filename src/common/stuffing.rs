// src/common/stuffing.rs

use super::error::FrameError;
use arrayvec::ArrayVec;

/// Start and stop marker of every frame.
pub const FRAME_MARKER: u8 = 0x7E;
/// Escape marker; the next byte is the reserved value XOR [`ESCAPE_XOR`].
pub const ESCAPE: u8 = 0x7D;
/// Software flow control characters, also escaped.
pub const XON: u8 = 0x11;
pub const XOFF: u8 = 0x13;
pub const ESCAPE_XOR: u8 = 0x20;

/// Returns `true` if `byte` must be escaped inside a frame.
#[inline]
pub const fn is_reserved(byte: u8) -> bool {
    matches!(byte, FRAME_MARKER | ESCAPE | XON | XOFF)
}

#[inline]
fn push<const N: usize>(out: &mut ArrayVec<u8, N>, byte: u8) -> Result<(), FrameError> {
    out.try_push(byte)
        .map_err(|_| FrameError::BufferOverflow { capacity: N })
}

/// Byte-stuffs `data` and appends the result to `out`.
///
/// Every reserved byte (0x7E, 0x7D, 0x11, 0x13) is replaced by `0x7D, byte ^ 0x20`.
/// Frame markers are *not* added here; callers wrap the interior themselves.
pub fn stuff<const N: usize>(data: &[u8], out: &mut ArrayVec<u8, N>) -> Result<(), FrameError> {
    for &byte in data {
        if is_reserved(byte) {
            push(out, ESCAPE)?;
            push(out, byte ^ ESCAPE_XOR)?;
        } else {
            push(out, byte)?;
        }
    }
    Ok(())
}

/// Reverses [`stuff`], appending the decoded bytes to `out`.
///
/// # Errors
///
/// * `FrameError::TruncatedEscape` if the input ends with a lone 0x7D.
/// * `FrameError::InvalidEscape` if an escaped byte does not decode to a reserved value.
/// * `FrameError::BufferOverflow` if `out` fills up.
pub fn unstuff<const N: usize>(data: &[u8], out: &mut ArrayVec<u8, N>) -> Result<(), FrameError> {
    let mut bytes = data.iter().copied();
    while let Some(byte) = bytes.next() {
        if byte == ESCAPE {
            let escaped = bytes.next().ok_or(FrameError::TruncatedEscape)?;
            let decoded = escaped ^ ESCAPE_XOR;
            if !is_reserved(decoded) {
                return Err(FrameError::InvalidEscape(escaped));
            }
            push(out, decoded)?;
        } else {
            push(out, byte)?;
        }
    }
    Ok(())
}
