//! Polyline to triangle-strip tessellation.
//!
//! Each source point is written as a full record: the point extruded to both
//! sides along a joint normal. Interior joints are mitered, open ends get
//! flat caps, and closed loops share one mitered normal across the seam.
//! Polylines in a batch are joined with zero-area half records so the whole
//! batch draws as a single triangle strip.
//!
//! The destination is written strictly sequentially. The unchecked
//! functions panic if it is too small; [`try_tessellate_batch`] validates
//! everything up front.

use std::ops::Range;

use glam::Vec2;
use polystrip_core::profiling::profile_function;

use crate::config::TessellationConfig;
use crate::error::{TessellationError, TessellationResult};
use crate::geometry::{direction, distance, dot, is_finite, normalize, perpendicular, scale};
use crate::vertex::{FULL_RECORD_BYTES, HALF_RECORD_BYTES, write_full_record, write_half_record};

/// Whether a polyline is stitched to its neighbors in the strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bridge {
    /// Emit a degenerate vertex before the first point.
    pub from_previous: bool,
    /// Emit a degenerate vertex after the last point.
    pub to_next: bool,
}

impl Bridge {
    /// A polyline drawn on its own.
    pub const NONE: Self = Self {
        from_previous: false,
        to_next: false,
    };

    /// Bridges for polyline `index` of a batch of `count`.
    pub fn for_position(index: usize, count: usize) -> Self {
        Self {
            from_previous: index > 0,
            to_next: index + 1 < count,
        }
    }

    /// Bytes of degenerate vertices this bridge adds.
    pub fn extra_bytes(&self) -> usize {
        (self.from_previous as usize + self.to_next as usize) * HALF_RECORD_BYTES
    }
}

/// Mitered normal for a joint between two unit directions.
///
/// The miter scale `1 / dot(tangent, incoming)` is capped at
/// `miter_limit`. When it is undefined (the directions cancel out) the
/// scale falls back to 1.0; the normal itself is then non-finite and packs
/// to zero.
pub fn miter_normal(incoming: Vec2, outgoing: Vec2, miter_limit: f32) -> Vec2 {
    let tangent = normalize(incoming + outgoing);
    let miter_length = 1.0 / dot(tangent, incoming);
    let miter_length = if miter_length.is_nan() {
        1.0
    } else {
        miter_length.min(miter_limit)
    };
    scale(perpendicular(tangent), miter_length)
}

/// Bytes [`tessellate_polyline`] writes for `point_count` points.
pub fn polyline_bytes(point_count: usize, bridge: Bridge) -> usize {
    if point_count < 2 {
        0
    } else {
        point_count * FULL_RECORD_BYTES + bridge.extra_bytes()
    }
}

/// Tessellate the points in `range` into `dst` starting at byte `cursor`.
///
/// Returns the advanced cursor. Ranges with fewer than two points write
/// nothing and return `cursor` unchanged.
///
/// # Panics
///
/// Panics if `range` lies outside `points` or `dst` cannot hold
/// [`polyline_bytes`] bytes from `cursor`.
pub fn tessellate_polyline(
    points: &[Vec2],
    range: Range<usize>,
    cursor: usize,
    dst: &mut [u8],
    bridge: Bridge,
    config: &TessellationConfig,
) -> usize {
    if range.end.saturating_sub(range.start) < 2 {
        return cursor;
    }

    let line = &points[range.clone()];
    let first_point = line[0];
    let last_point = line[line.len() - 1];

    // Leading duplicates: look further along for the first real direction.
    let mut first_dir = direction(first_point, line[1]);
    if !is_finite(first_dir)
        && let Some(dir) = line[2..]
            .iter()
            .map(|&p| direction(first_point, p))
            .find(|&dir| is_finite(dir))
    {
        first_dir = dir;
    }

    let mut prev_dir = first_dir;
    let mut prev_normal = perpendicular(first_dir);
    let mut cumulative_length = distance(first_point, line[1]);

    // The first vertex is written once the loop closure is known.
    let first_offset = cursor;
    let mut cursor = cursor + FULL_RECORD_BYTES;
    if bridge.from_previous {
        cursor += HALF_RECORD_BYTES;
    }

    for segment in line.windows(2).skip(1) {
        let (current, next) = (segment[0], segment[1]);

        let mut current_dir = direction(current, next);
        if !is_finite(current_dir) {
            current_dir = prev_dir;
        }

        let normal = miter_normal(prev_dir, current_dir, config.miter_limit);
        write_full_record(dst, cursor, current, normal, cumulative_length);

        prev_normal = perpendicular(current_dir);
        prev_dir = current_dir;
        cumulative_length += distance(current, next);
        cursor += FULL_RECORD_BYTES;
    }

    let closed = distance(first_point, last_point) < config.loop_tolerance;
    let (first_normal, last_normal) = if closed {
        let joint = miter_normal(prev_dir, first_dir, config.miter_limit);
        (joint, joint)
    } else {
        (perpendicular(first_dir), prev_normal)
    };

    if bridge.from_previous {
        write_half_record(dst, first_offset, first_point, first_normal, 0.0);
        write_full_record(
            dst,
            first_offset + HALF_RECORD_BYTES,
            first_point,
            first_normal,
            0.0,
        );
    } else {
        write_full_record(dst, first_offset, first_point, first_normal, 0.0);
    }

    write_full_record(dst, cursor, last_point, last_normal, cumulative_length);
    cursor += FULL_RECORD_BYTES;

    if bridge.to_next {
        // Mirrors the second vertex of the last record so the bridging
        // triangle stays degenerate.
        write_half_record(dst, cursor, last_point, -last_normal, cumulative_length);
        cursor += HALF_RECORD_BYTES;
    }

    tracing::trace!(
        "Tessellated polyline {:?} (closed: {}, {:?}) into {} bytes",
        range,
        closed,
        bridge,
        cursor - first_offset
    );

    cursor
}

/// Point index of a polyline start offset (offsets count coordinates).
#[inline]
fn start_index(offset: i32) -> usize {
    (offset.max(0) / 2) as usize
}

/// Point ranges of the polylines starting at `offsets`.
///
/// Offsets count coordinates, so each is halved to get a point index; the
/// last polyline ends at `point_count`.
pub fn polyline_ranges(
    offsets: &[i32],
    point_count: usize,
) -> impl Iterator<Item = Range<usize>> + '_ {
    offsets.iter().enumerate().map(move |(i, &offset)| {
        let end = offsets
            .get(i + 1)
            .map_or(point_count, |&next| start_index(next));
        start_index(offset)..end
    })
}

/// Exact number of bytes [`tessellate_batch`] writes for this batch.
pub fn required_capacity(offsets: &[i32], point_count: usize) -> usize {
    let count = offsets.len();
    polyline_ranges(offsets, point_count)
        .enumerate()
        .map(|(i, range)| {
            polyline_bytes(
                range.end.saturating_sub(range.start),
                Bridge::for_position(i, count),
            )
        })
        .sum()
}

/// Tessellate every polyline of a batch into one contiguous strip.
///
/// Returns the number of bytes written.
///
/// # Panics
///
/// Panics if an offset lies past `points` or `dst` is smaller than
/// [`required_capacity`].
pub fn tessellate_batch(
    points: &[Vec2],
    offsets: &[i32],
    dst: &mut [u8],
    config: &TessellationConfig,
) -> usize {
    profile_function!();

    let count = offsets.len();
    let mut cursor = 0;
    for (i, range) in polyline_ranges(offsets, points.len()).enumerate() {
        cursor = tessellate_polyline(
            points,
            range,
            cursor,
            dst,
            Bridge::for_position(i, count),
            config,
        );
    }

    tracing::debug!(
        "Tessellated {} polylines ({} points) into {} bytes",
        count,
        points.len(),
        cursor
    );

    cursor
}

/// Bounds-checked [`tessellate_batch`].
///
/// Validates the offsets and the destination size before writing anything.
pub fn try_tessellate_batch(
    points: &[Vec2],
    offsets: &[i32],
    dst: &mut [u8],
    config: &TessellationConfig,
) -> TessellationResult<usize> {
    let point_count = points.len();
    let mut previous = 0;
    for (polyline, &offset) in offsets.iter().enumerate() {
        if offset < 0 || start_index(offset) > point_count {
            return Err(TessellationError::InvalidOffset {
                polyline,
                offset,
                point_count,
            });
        }
        if start_index(offset) < previous {
            return Err(TessellationError::UnorderedOffsets { polyline });
        }
        previous = start_index(offset);
    }

    let required = required_capacity(offsets, point_count);
    if required > dst.len() {
        return Err(TessellationError::BufferTooSmall {
            required,
            capacity: dst.len(),
        });
    }

    Ok(tessellate_batch(points, offsets, dst, config))
}

/// View a flat `x, y, x, y, ...` coordinate array as points.
pub fn points_from_coordinates(coordinates: &[f32]) -> TessellationResult<&[Vec2]> {
    bytemuck::try_cast_slice(coordinates)
        .map_err(|_| TessellationError::OddCoordinateCount(coordinates.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vertex::{NORMAL_SCALE, StripVertex, read_records};
    use polystrip_core::math::PackedI16x2;

    fn tessellate(points: &[Vec2], bridge: Bridge) -> Vec<StripVertex> {
        let mut dst = vec![0u8; polyline_bytes(points.len(), bridge)];
        let written = tessellate_polyline(
            points,
            0..points.len(),
            0,
            &mut dst,
            bridge,
            &TessellationConfig::default(),
        );
        assert_eq!(written, dst.len());
        read_records(&dst).collect()
    }

    fn assert_normal_near(vertex: &StripVertex, expected: Vec2) {
        let actual = vertex.normal_vec();
        assert!(
            (actual - expected).length() < 2.0 / NORMAL_SCALE,
            "normal {:?} != {:?}",
            actual,
            expected
        );
    }

    #[test]
    fn test_two_point_polyline() {
        let vertices = tessellate(&[Vec2::new(4.0, 0.0), Vec2::new(4.0, 4.0)], Bridge::NONE);
        assert_eq!(vertices.len(), 4);

        assert_eq!(vertices[0].position_vec(), Vec2::new(4.0, 0.0));
        assert_eq!(vertices[0].length, 0.0);
        assert_eq!(vertices[0].normal, PackedI16x2::new(-16384, 0));
        assert_eq!(vertices[1].length, 0.0);
        assert_eq!(vertices[1].normal, PackedI16x2::new(16384, 0));

        assert_eq!(vertices[2].position_vec(), Vec2::new(4.0, 4.0));
        assert_eq!(vertices[2].length, 4.0);
        assert_eq!(vertices[2].normal, PackedI16x2::new(-16384, 0));
        assert_eq!(vertices[3].length, -4.0);
        assert_eq!(vertices[3].normal, PackedI16x2::new(16384, 0));
    }

    #[test]
    fn test_short_range_writes_nothing() {
        let points = [Vec2::new(1.0, 1.0), Vec2::new(2.0, 2.0)];
        let mut dst = [0xabu8; 64];
        let config = TessellationConfig::default();

        assert_eq!(tessellate_polyline(&points, 0..1, 16, &mut dst, Bridge::NONE, &config), 16);
        assert_eq!(tessellate_polyline(&points, 1..1, 16, &mut dst, Bridge::NONE, &config), 16);
        assert_eq!(tessellate_polyline(&points, 2..1, 16, &mut dst, Bridge::NONE, &config), 16);
        assert!(dst.iter().all(|&b| b == 0xab));
    }

    #[test]
    fn test_straight_polyline_has_unit_normals() {
        let points: Vec<Vec2> = (0..5).map(|i| Vec2::new(i as f32, 0.0)).collect();
        let vertices = tessellate(&points, Bridge::NONE);

        for (i, pair) in vertices.chunks(2).enumerate() {
            assert_eq!(pair[0].normal, PackedI16x2::new(0, 16384));
            assert_eq!(pair[1].normal, PackedI16x2::new(0, -16384));
            assert_eq!(pair[0].length, i as f32);
        }
    }

    #[test]
    fn test_right_angle_miter() {
        let vertices = tessellate(
            &[Vec2::ZERO, Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0)],
            Bridge::NONE,
        );
        // sqrt(2) miter along the bisector.
        assert_normal_near(&vertices[2], Vec2::new(-1.0, 1.0));
        // Open ends are flat caps.
        assert_eq!(vertices[0].normal, PackedI16x2::new(0, 16384));
        assert_eq!(vertices[4].normal, PackedI16x2::new(-16384, 0));
        assert_eq!(vertices[4].length, 2.0);
    }

    #[test]
    fn test_sharp_turn_is_capped() {
        let vertices = tessellate(
            &[Vec2::ZERO, Vec2::new(10.0, 0.0), Vec2::new(0.0, 0.1)],
            Bridge::NONE,
        );
        let length = vertices[2].normal_vec().length();
        assert!(length <= 1.5 + 1.0 / NORMAL_SCALE, "miter {} exceeds cap", length);
        assert!(length > 1.49);
    }

    #[test]
    fn test_configured_miter_limit() {
        let points = [Vec2::ZERO, Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0)];
        let mut dst = vec![0u8; polyline_bytes(3, Bridge::NONE)];
        let config = TessellationConfig::default().with_miter_limit(1.0);
        tessellate_polyline(&points, 0..3, 0, &mut dst, Bridge::NONE, &config);

        let vertices: Vec<StripVertex> = read_records(&dst).collect();
        assert!((vertices[2].normal_vec().length() - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_reversal_falls_back_without_touching_positions() {
        let vertices = tessellate(
            &[Vec2::ZERO, Vec2::new(1.0, 0.0), Vec2::ZERO],
            Bridge::NONE,
        );
        assert_eq!(vertices[2].position_vec(), Vec2::new(1.0, 0.0));
        assert_eq!(vertices[2].length, 1.0);
        assert_eq!(vertices[2].normal, PackedI16x2::new(0, 0));
        assert!(vertices.iter().all(|v| v.position_vec().is_finite() && v.length.is_finite()));
    }

    #[test]
    fn test_miter_normal_fallbacks() {
        assert_eq!(miter_normal(Vec2::X, Vec2::X, 1.5), Vec2::Y);
        assert!(!is_finite(miter_normal(Vec2::X, -Vec2::X, 1.5)));
    }

    #[test]
    fn test_closed_loop_shares_seam_normal() {
        let square = [
            Vec2::ZERO,
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
            Vec2::ZERO,
        ];
        let vertices = tessellate(&square, Bridge::NONE);

        let first = &vertices[0];
        let last = &vertices[vertices.len() - 2];
        assert_eq!(first.normal, last.normal);
        assert_normal_near(first, Vec2::new(1.0, 1.0));
        assert_eq!(last.length, 4.0);
    }

    #[test]
    fn test_loop_tolerance() {
        let almost_closed = [
            Vec2::ZERO,
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 0.01),
        ];
        let vertices = tessellate(&almost_closed, Bridge::NONE);
        assert_ne!(vertices[0].normal, vertices[6].normal);

        let mut dst = vec![0u8; polyline_bytes(4, Bridge::NONE)];
        let config = TessellationConfig::default().with_loop_tolerance(0.1);
        tessellate_polyline(&almost_closed, 0..4, 0, &mut dst, Bridge::NONE, &config);
        let vertices: Vec<StripVertex> = read_records(&dst).collect();
        assert_eq!(vertices[0].normal, vertices[6].normal);
    }

    #[test]
    fn test_leading_duplicates_use_first_real_direction() {
        let vertices = tessellate(
            &[
                Vec2::ZERO,
                Vec2::ZERO,
                Vec2::new(2.0, 0.0),
                Vec2::new(3.0, 0.0),
            ],
            Bridge::NONE,
        );
        for pair in vertices.chunks(2) {
            assert_eq!(pair[0].normal, PackedI16x2::new(0, 16384));
        }
        let lengths: Vec<f32> = vertices.iter().step_by(2).map(|v| v.length).collect();
        assert_eq!(lengths, vec![0.0, 0.0, 2.0, 3.0]);
    }

    #[test]
    fn test_interior_duplicate_reuses_previous_direction() {
        let vertices = tessellate(
            &[
                Vec2::ZERO,
                Vec2::new(1.0, 0.0),
                Vec2::new(1.0, 0.0),
                Vec2::new(2.0, 0.0),
            ],
            Bridge::NONE,
        );
        for pair in vertices.chunks(2) {
            assert_eq!(pair[0].normal, PackedI16x2::new(0, 16384));
        }
        let lengths: Vec<f32> = vertices.iter().step_by(2).map(|v| v.length).collect();
        assert_eq!(lengths, vec![0.0, 1.0, 1.0, 2.0]);
    }

    #[test]
    fn test_coincident_polyline_has_zero_normals() {
        let p = Vec2::new(1.0, 1.0);
        let vertices = tessellate(&[p, p, p], Bridge::NONE);
        for vertex in &vertices {
            assert_eq!(vertex.position_vec(), p);
            assert_eq!(vertex.normal, PackedI16x2::new(0, 0));
            assert_eq!(vertex.length.abs(), 0.0);
        }
    }

    #[test]
    fn test_bridges_add_degenerate_half_records() {
        let points = [Vec2::ZERO, Vec2::new(0.0, 3.0)];
        let bridge = Bridge {
            from_previous: true,
            to_next: true,
        };
        let vertices = tessellate(&points, bridge);
        assert_eq!(vertices.len(), 6);

        // Leading degenerate copies the first + side vertex.
        assert_eq!(vertices[0], vertices[1]);
        assert_eq!(vertices[0].length, 0.0);

        // Trailing degenerate: last point, negated normal, positive length.
        let trailing = vertices[5];
        assert_eq!(trailing.position_vec(), Vec2::new(0.0, 3.0));
        assert_eq!(trailing.length, 3.0);
        assert_eq!(trailing.normal, vertices[4].normal);
        assert_eq!(trailing.normal.x, -vertices[3].normal.x);
    }

    #[test]
    fn test_cursor_threads_through_calls() {
        let points = [
            Vec2::ZERO,
            Vec2::new(1.0, 0.0),
            Vec2::new(5.0, 5.0),
            Vec2::new(6.0, 5.0),
            Vec2::new(7.0, 5.0),
        ];
        let config = TessellationConfig::default();
        let mut dst = vec![0u8; 256];

        let first = Bridge::for_position(0, 2);
        let cursor = tessellate_polyline(&points, 0..2, 0, &mut dst, first, &config);
        assert_eq!(cursor, 2 * FULL_RECORD_BYTES + HALF_RECORD_BYTES);

        let second = Bridge::for_position(1, 2);
        let cursor = tessellate_polyline(&points, 2..5, cursor, &mut dst, second, &config);
        assert_eq!(cursor, 5 * FULL_RECORD_BYTES + 2 * HALF_RECORD_BYTES);
    }

    #[test]
    fn test_polyline_ranges_halve_offsets() {
        let ranges: Vec<Range<usize>> = polyline_ranges(&[0, 6, 10], 8).collect();
        assert_eq!(ranges, vec![0..3, 3..5, 5..8]);
        assert_eq!(polyline_ranges(&[], 8).count(), 0);
    }

    #[test]
    fn test_required_capacity() {
        assert_eq!(required_capacity(&[0], 2), 64);
        // 3 + 2 points, one bridge each way between them.
        assert_eq!(required_capacity(&[0, 6], 5), 5 * 32 + 2 * 16);
        // Single-point polylines contribute nothing.
        assert_eq!(required_capacity(&[0, 6, 8], 7), 3 * 32 + 16 + 3 * 32 + 16);
        assert_eq!(required_capacity(&[], 5), 0);
    }

    #[test]
    fn test_batch_stitches_polylines() {
        let points = [
            Vec2::ZERO,
            Vec2::new(2.0, 0.0),
            Vec2::new(2.0, 2.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 1.0),
        ];
        let offsets = [0, 6];
        let mut dst = vec![0u8; required_capacity(&offsets, points.len())];
        let written = tessellate_batch(&points, &offsets, &mut dst, &TessellationConfig::default());
        assert_eq!(written, dst.len());

        let vertices: Vec<StripVertex> = read_records(&dst).collect();
        assert_eq!(vertices.len(), 3 * 2 + 1 + 1 + 2 * 2);

        let last_of_first = vertices[4];
        let bridge_out = vertices[6];
        assert_eq!(bridge_out.position_vec(), Vec2::new(2.0, 2.0));
        assert_eq!(bridge_out.length, 4.0);
        assert_eq!(bridge_out.normal.x, -last_of_first.normal.x);
        assert_eq!(bridge_out.normal.y, -last_of_first.normal.y);

        let bridge_in = vertices[7];
        assert_eq!(bridge_in.position_vec(), Vec2::new(10.0, 0.0));
        assert_eq!(bridge_in.length, 0.0);
        assert_eq!(bridge_in, vertices[8]);
    }

    #[test]
    fn test_batch_is_repeatable() {
        let points = [Vec2::ZERO, Vec2::new(1.0, 2.0), Vec2::new(3.0, 1.0)];
        let offsets = [0];
        let config = TessellationConfig::default();

        let mut a = vec![0u8; required_capacity(&offsets, 3)];
        let mut b = vec![0xffu8; a.len()];
        tessellate_batch(&points, &offsets, &mut a, &config);
        tessellate_batch(&points, &offsets, &mut b, &config);
        assert_eq!(a, b);
    }

    #[test]
    fn test_try_tessellate_rejects_bad_input() {
        let points = [Vec2::ZERO, Vec2::X, Vec2::Y];
        let config = TessellationConfig::default();
        let mut small = [0u8; 64];

        assert_eq!(
            try_tessellate_batch(&points, &[0], &mut small, &config),
            Err(TessellationError::BufferTooSmall {
                required: 96,
                capacity: 64
            })
        );
        assert!(small.iter().all(|&b| b == 0));

        let mut dst = [0u8; 256];
        assert_eq!(
            try_tessellate_batch(&points, &[0, 8], &mut dst, &config),
            Err(TessellationError::InvalidOffset {
                polyline: 1,
                offset: 8,
                point_count: 3
            })
        );
        assert_eq!(
            try_tessellate_batch(&points, &[-2], &mut dst, &config),
            Err(TessellationError::InvalidOffset {
                polyline: 0,
                offset: -2,
                point_count: 3
            })
        );
        assert_eq!(
            try_tessellate_batch(&points, &[4, 2], &mut dst, &config),
            Err(TessellationError::UnorderedOffsets { polyline: 1 })
        );
        assert_eq!(try_tessellate_batch(&points, &[0], &mut dst, &config), Ok(96));
    }

    #[test]
    fn test_points_from_coordinates() {
        let coordinates = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(
            points_from_coordinates(&coordinates),
            Ok(&[Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0)][..])
        );
        assert_eq!(
            points_from_coordinates(&coordinates[..3]),
            Err(TessellationError::OddCoordinateCount(3))
        );
    }
}
