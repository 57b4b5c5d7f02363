//! Little-endian scalar access at explicit byte offsets.
//!
//! The decoder rewrites integer words as floats in the same bytes, and the
//! tessellator packs floats and 16-bit normals side by side. Both go through
//! these helpers rather than viewing one buffer through two typed slices.
//!
//! All functions panic if `offset` leaves no room for the value.

#[inline]
fn word(buf: &[u8], offset: usize) -> [u8; 4] {
    let mut word = [0u8; 4];
    word.copy_from_slice(&buf[offset..offset + 4]);
    word
}

#[inline]
pub(crate) fn read_i32(buf: &[u8], offset: usize) -> i32 {
    i32::from_le_bytes(word(buf, offset))
}

#[inline]
pub(crate) fn read_f32(buf: &[u8], offset: usize) -> f32 {
    f32::from_le_bytes(word(buf, offset))
}

#[inline]
pub(crate) fn write_f32(buf: &mut [u8], offset: usize, value: f32) {
    buf[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

#[inline]
pub(crate) fn read_i16(buf: &[u8], offset: usize) -> i16 {
    i16::from_le_bytes([buf[offset], buf[offset + 1]])
}

#[inline]
pub(crate) fn write_i16(buf: &mut [u8], offset: usize, value: i16) {
    buf[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
}
