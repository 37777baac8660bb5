//! Copying text into caller-owned byte buffers.
//!
//! Every write into a caller buffer goes through [`copy_terminated`], so truncation behaves the same
//! everywhere: at most `buffer.len() - 1` bytes of the source, followed by a single `0` byte.

/// The terminator written after the copied bytes.
pub const TERMINATOR: u8 = 0;

fn min(a: usize, b: usize) -> usize {
    if a > b {
        b
    } else {
        a
    }
}

/// Copies as much of `source` as fits into `buffer` while leaving room for the terminator, then
/// writes the terminator. Returns the number of bytes copied, terminator excluded.
///
/// An empty `buffer` has no room even for the terminator and is left untouched.
///
/// Truncation is byte-wise; a multi-byte character may be cut.
pub fn copy_terminated(source: &[u8], buffer: &mut [u8]) -> usize {
    let Some(room) = buffer.len().checked_sub(1) else {
        return 0;
    };
    let n = min(source.len(), room);
    buffer[..n].copy_from_slice(&source[..n]);
    buffer[n] = TERMINATOR;
    n
}

/// The bytes of `buffer` before its first terminator (the whole buffer if it has none).
pub fn terminated(buffer: &[u8]) -> &[u8] {
    match buffer.iter().position(|&b| b == TERMINATOR) {
        Some(end) => &buffer[..end],
        None => buffer,
    }
}
