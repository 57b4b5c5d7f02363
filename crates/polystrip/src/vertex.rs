//! Vertex record layout for the triangle-strip buffer.
//!
//! Every source point becomes a *full record*: two mirrored 16-byte
//! vertices, the second with negated arc length and normal. Stitching
//! vertices between polylines are *half records* (one vertex).
//!
//! ```text
//! Offset | Field        | Size
//! -------|--------------|------
//! 0      | x            | 4 bytes (f32)
//! 4      | y            | 4 bytes (f32)
//! 8      | arc length   | 4 bytes (f32)
//! 12     | normal x     | 2 bytes (i16, component * 16384)
//! 14     | normal y     | 2 bytes (i16, component * 16384)
//! Total: 16 bytes (half record), full record = 2 x 16 bytes
//! ```
//!
//! All values are little-endian.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use polystrip_core::math::{PackedI16x2, PackedVec2};
use static_assertions::const_assert_eq;

use crate::bytes;

/// Bytes in one half record (a single strip vertex).
pub const HALF_RECORD_BYTES: usize = 16;

/// Bytes in one full record (a point and its mirror).
pub const FULL_RECORD_BYTES: usize = 2 * HALF_RECORD_BYTES;

/// Fixed-point scale applied to normal components; a unit normal maps to 16384.
pub const NORMAL_SCALE: f32 = 16384.0;

const POSITION_OFFSET: usize = 0;
const LENGTH_OFFSET: usize = 8;
const NORMAL_OFFSET: usize = 12;

/// One strip vertex as laid out in the vertex buffer.
///
/// Hosts on little-endian targets may view a finished buffer as
/// `&[StripVertex]` with [`bytemuck::cast_slice`]; [`read_records`] works
/// everywhere.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct StripVertex {
    /// Source point position
    pub position: PackedVec2,
    /// Signed arc length from the start of the polyline
    pub length: f32,
    /// Joint normal in 1/16384 units
    pub normal: PackedI16x2,
}

const_assert_eq!(std::mem::size_of::<StripVertex>(), HALF_RECORD_BYTES);

impl StripVertex {
    /// Create a vertex from a position, an unscaled normal and an arc length.
    pub fn new(position: Vec2, normal: Vec2, length: f32) -> Self {
        Self {
            position: position.into(),
            length,
            normal: pack_normal(normal),
        }
    }

    pub fn position_vec(&self) -> Vec2 {
        self.position.into()
    }

    /// The normal converted back from fixed point.
    pub fn normal_vec(&self) -> Vec2 {
        Vec2::new(
            self.normal.x as f32 / NORMAL_SCALE,
            self.normal.y as f32 / NORMAL_SCALE,
        )
    }

    /// Write this vertex at `offset`.
    pub fn write(&self, dst: &mut [u8], offset: usize) {
        bytes::write_f32(dst, offset + POSITION_OFFSET, self.position.x);
        bytes::write_f32(dst, offset + POSITION_OFFSET + 4, self.position.y);
        bytes::write_f32(dst, offset + LENGTH_OFFSET, self.length);
        bytes::write_i16(dst, offset + NORMAL_OFFSET, self.normal.x);
        bytes::write_i16(dst, offset + NORMAL_OFFSET + 2, self.normal.y);
    }

    /// Read a vertex from `offset`.
    pub fn read(src: &[u8], offset: usize) -> Self {
        Self {
            position: PackedVec2 {
                x: bytes::read_f32(src, offset + POSITION_OFFSET),
                y: bytes::read_f32(src, offset + POSITION_OFFSET + 4),
            },
            length: bytes::read_f32(src, offset + LENGTH_OFFSET),
            normal: PackedI16x2::new(
                bytes::read_i16(src, offset + NORMAL_OFFSET),
                bytes::read_i16(src, offset + NORMAL_OFFSET + 2),
            ),
        }
    }
}

/// Convert a normal to 16-bit fixed point.
///
/// Components are rounded and saturated. Non-finite components (a fully
/// degenerate polyline, or a joint that reverses exactly) become 0.
pub fn pack_normal(normal: Vec2) -> PackedI16x2 {
    PackedI16x2::new(pack_component(normal.x), pack_component(normal.y))
}

#[inline]
fn pack_component(value: f32) -> i16 {
    if value.is_finite() {
        (value * NORMAL_SCALE).round() as i16
    } else {
        0
    }
}

/// Write one half record at `offset`.
pub fn write_half_record(dst: &mut [u8], offset: usize, point: Vec2, normal: Vec2, length: f32) {
    StripVertex::new(point, normal, length).write(dst, offset);
}

/// Write a full record at `offset`: the vertex, then its mirror with
/// negated length and normal.
pub fn write_full_record(dst: &mut [u8], offset: usize, point: Vec2, normal: Vec2, length: f32) {
    write_half_record(dst, offset, point, normal, length);
    write_half_record(dst, offset + HALF_RECORD_BYTES, point, -normal, -length);
}

/// Iterate over every strip vertex in `buf`.
pub fn read_records(buf: &[u8]) -> impl Iterator<Item = StripVertex> + '_ {
    buf.chunks_exact(HALF_RECORD_BYTES)
        .map(|chunk| StripVertex::read(chunk, 0))
}
