//! C ABI entry points for hosts that own the buffers (e.g. a WebAssembly
//! module driven from JavaScript).
//!
//! Call order is fixed: decompress (host), then [`decode_array`], then
//! [`generate_vertex_data`] on the decoded coordinates. Neither function
//! returns a value. Arguments that would make the call unsound are logged
//! and the call writes nothing.

use crate::codec::decode_in_place;
use crate::config::TessellationConfig;
use crate::tessellator::{points_from_coordinates, try_tessellate_batch};

/// Decode a delta/shuffle encoded point buffer in place.
///
/// # Safety
///
/// `dst` must be valid for reads and writes of `dst_capacity` bytes and not
/// be accessed concurrently for the duration of the call.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn decode_array(dst: *mut u8, dst_capacity: usize, decimation_factor: i32) {
    if dst_capacity == 0 {
        return;
    }
    if dst.is_null() {
        tracing::error!("decode_array: null buffer with capacity {}", dst_capacity);
        return;
    }

    // SAFETY: the caller guarantees `dst` spans `dst_capacity` bytes.
    let buf = unsafe { std::slice::from_raw_parts_mut(dst, dst_capacity) };
    decode_in_place(buf, decimation_factor);
}

/// Tessellate a batch of polylines into a triangle-strip vertex buffer.
///
/// `src_vertices` holds `num_vertices` points as `x, y` float pairs and
/// `index_offsets` holds `num_polylines` start offsets into that float
/// array. The strip is written from the start of `dst`.
///
/// # Safety
///
/// `dst` must be valid for writes of `dst_capacity` bytes, `src_vertices`
/// for reads of `2 * num_vertices` floats and `index_offsets` for reads of
/// `num_polylines` integers. `dst` must not overlap the inputs.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn generate_vertex_data(
    dst: *mut u8,
    dst_capacity: usize,
    src_vertices: *const f32,
    num_vertices: i32,
    index_offsets: *const i32,
    num_polylines: i32,
) {
    let (Ok(point_count), Ok(polyline_count)) =
        (usize::try_from(num_vertices), usize::try_from(num_polylines))
    else {
        tracing::error!(
            "generate_vertex_data: negative counts ({} vertices, {} polylines)",
            num_vertices,
            num_polylines
        );
        return;
    };

    if polyline_count == 0 {
        return;
    }
    if index_offsets.is_null()
        || (point_count > 0 && src_vertices.is_null())
        || (dst_capacity > 0 && dst.is_null())
    {
        tracing::error!("generate_vertex_data: null buffer");
        return;
    }

    // SAFETY: pointers are non-null and the caller guarantees their extents.
    let coordinates: &[f32] = if point_count == 0 {
        &[]
    } else {
        unsafe { std::slice::from_raw_parts(src_vertices, 2 * point_count) }
    };
    let offsets = unsafe { std::slice::from_raw_parts(index_offsets, polyline_count) };
    let dst: &mut [u8] = if dst_capacity == 0 {
        &mut []
    } else {
        unsafe { std::slice::from_raw_parts_mut(dst, dst_capacity) }
    };

    let result = points_from_coordinates(coordinates).and_then(|points| {
        try_tessellate_batch(points, offsets, dst, &TessellationConfig::default())
    });
    if let Err(err) = result {
        tracing::error!("generate_vertex_data: {}", err);
    }
}
