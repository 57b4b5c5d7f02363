//! Delta/shuffle point codec.
//!
//! Contour coordinates arrive as a stream of little-endian 32-bit words:
//! per-axis deltas between consecutive points, quantized to integers by a
//! decimation factor, with every run of four words byte-plane transposed
//! (byte 0 of all four words, then byte 1, and so on) to group bytes of
//! equal significance for the upstream compressor.
//!
//! [`decode_in_place`] undoes all three steps and leaves absolute `f32`
//! coordinates in the same bytes. [`encode_points`] is the producer side.

use glam::Vec2;
use polystrip_core::profiling::profile_function;

use crate::bytes;

/// Bytes per encoded word.
pub const WORD_BYTES: usize = 4;

/// Words per transposed block.
pub const BLOCK_WORDS: usize = 4;

/// Bytes per transposed block.
pub const BLOCK_BYTES: usize = WORD_BYTES * BLOCK_WORDS;

/// Undo the byte-plane transpose of one 16-byte block.
///
/// Byte `k` of word `w` is stored at `k * 4 + w`.
pub fn unshuffle_block(block: &[u8; BLOCK_BYTES]) -> [i32; BLOCK_WORDS] {
    let mut words = [0i32; BLOCK_WORDS];
    for (w, word) in words.iter_mut().enumerate() {
        *word = i32::from_le_bytes([
            block[w],
            block[BLOCK_WORDS + w],
            block[2 * BLOCK_WORDS + w],
            block[3 * BLOCK_WORDS + w],
        ]);
    }
    words
}

/// Byte-plane transpose four words into one 16-byte block.
pub fn shuffle_block(words: [i32; BLOCK_WORDS]) -> [u8; BLOCK_BYTES] {
    let mut block = [0u8; BLOCK_BYTES];
    for (w, word) in words.iter().enumerate() {
        for (k, byte) in word.to_le_bytes().into_iter().enumerate() {
            block[k * BLOCK_WORDS + w] = byte;
        }
    }
    block
}

/// Decode a delta/shuffle encoded point buffer in place.
///
/// On return the buffer holds little-endian `f32` pairs `(x, y)` with
/// absolute coordinates. The largest multiple-of-four prefix of words is
/// unshuffled block by block; the remaining words are plain little-endian
/// integers. Every word is multiplied by `1 / decimation_factor`, then the
/// pairs are integrated with one running sum per axis.
///
/// A `decimation_factor` of zero is not rejected: the scale becomes
/// infinite and the output non-finite, which the tessellator tolerates.
/// Trailing bytes that do not form a whole word are left untouched, and an
/// odd final word is dequantized but not integrated.
pub fn decode_in_place(buf: &mut [u8], decimation_factor: i32) {
    profile_function!();

    let word_count = buf.len() / WORD_BYTES;
    if buf.len() % WORD_BYTES != 0 {
        tracing::warn!(
            "Point buffer length {} is not a multiple of {}; ignoring {} trailing bytes",
            buf.len(),
            WORD_BYTES,
            buf.len() % WORD_BYTES
        );
    }

    let scale = 1.0 / decimation_factor as f32;
    let blocked_words = BLOCK_WORDS * (word_count / BLOCK_WORDS);
    let (blocked, tail) = buf[..word_count * WORD_BYTES].split_at_mut(blocked_words * WORD_BYTES);

    for chunk in blocked.chunks_exact_mut(BLOCK_BYTES) {
        let mut block = [0u8; BLOCK_BYTES];
        block.copy_from_slice(chunk);
        for (w, value) in unshuffle_block(&block).into_iter().enumerate() {
            bytes::write_f32(chunk, w * WORD_BYTES, value as f32 * scale);
        }
    }

    for offset in (0..tail.len()).step_by(WORD_BYTES) {
        let value = bytes::read_i32(tail, offset);
        bytes::write_f32(tail, offset, value as f32 * scale);
    }

    let mut last_x = 0.0f32;
    let mut last_y = 0.0f32;
    for pair in buf[..word_count * WORD_BYTES].chunks_exact_mut(2 * WORD_BYTES) {
        last_x += bytes::read_f32(pair, 0);
        last_y += bytes::read_f32(pair, WORD_BYTES);
        bytes::write_f32(pair, 0, last_x);
        bytes::write_f32(pair, WORD_BYTES, last_y);
    }
}

/// Encode absolute points into the format [`decode_in_place`] reads.
///
/// Points are quantized as `round(coordinate * decimation_factor)` before
/// the deltas are taken, so decoding reproduces every point to within
/// `0.5 / decimation_factor` without accumulating drift.
pub fn encode_points(points: &[Vec2], decimation_factor: i32) -> Vec<u8> {
    let factor = decimation_factor as f32;

    let mut words = Vec::with_capacity(points.len() * 2);
    let mut prev = (0i32, 0i32);
    for point in points {
        let quantized = (
            (point.x * factor).round() as i32,
            (point.y * factor).round() as i32,
        );
        words.push(quantized.0.wrapping_sub(prev.0));
        words.push(quantized.1.wrapping_sub(prev.1));
        prev = quantized;
    }

    let mut out = Vec::with_capacity(words.len() * WORD_BYTES);
    let mut blocks = words.chunks_exact(BLOCK_WORDS);
    for block in blocks.by_ref() {
        out.extend_from_slice(&shuffle_block([block[0], block[1], block[2], block[3]]));
    }
    for word in blocks.remainder() {
        out.extend_from_slice(&word.to_le_bytes());
    }
    out
}

/// Number of whole points in a decoded buffer of `byte_len` bytes.
pub fn point_count(byte_len: usize) -> usize {
    byte_len / (2 * WORD_BYTES)
}

/// Read the points of a decoded buffer.
pub fn read_points(buf: &[u8]) -> impl Iterator<Item = Vec2> + '_ {
    buf.chunks_exact(2 * WORD_BYTES)
        .map(|pair| Vec2::new(bytes::read_f32(pair, 0), bytes::read_f32(pair, WORD_BYTES)))
}
