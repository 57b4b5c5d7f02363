//! Contour Strip Demo - Decode and Tessellate a Contour Batch
//!
//! Walks one batch through both pipeline stages:
//! - Quantizing and encoding contours the way a tile server ships them
//! - Decoding the stream in place
//! - Tessellating the decoded points into a single triangle strip
//!
//! Run with `RUST_LOG=polystrip=trace` to see per-polyline output, or with
//! `--features profiling` to stream scopes to puffin_viewer.

use glam::Vec2;
use polystrip::{
    FULL_RECORD_BYTES, HALF_RECORD_BYTES, TessellationConfig, decode_in_place, encode_points,
    read_points, read_records, required_capacity, try_tessellate_batch,
};
use polystrip_core::{logging, profiling};
use polystrip_test_utils::{BatchBuilder, shapes};

const DECIMATION_FACTOR: i32 = 32;

fn main() {
    logging::init();
    #[cfg(feature = "profiling")]
    profiling::init_profiling(profiling::ProfilingBackend::PuffinHttp);

    let batch = BatchBuilder::new()
        .polyline(shapes::circle(Vec2::new(50.0, 50.0), 20.0, 48))
        .polyline(shapes::zigzag(12, 4.0))
        .polyline(shapes::random_walk(7, 200, 1.5))
        .build();

    let mut stream = encode_points(&batch.points, DECIMATION_FACTOR);
    tracing::info!(
        "Encoded {} points into {} bytes at decimation factor {}",
        batch.points.len(),
        stream.len(),
        DECIMATION_FACTOR
    );

    decode_in_place(&mut stream, DECIMATION_FACTOR);
    let points: Vec<Vec2> = read_points(&stream).collect();

    let max_error = points
        .iter()
        .zip(&batch.points)
        .map(|(decoded, original)| (*decoded - *original).abs().max_element())
        .fold(0.0f32, f32::max);
    tracing::info!("Decoded {} points, max error {:.5}", points.len(), max_error);

    let mut strip = vec![0u8; required_capacity(&batch.offsets, points.len())];
    let config = TessellationConfig::default().with_miter_limit(2.0);
    match try_tessellate_batch(&points, &batch.offsets, &mut strip, &config) {
        Ok(written) => {
            tracing::info!(
                "Wrote {} bytes: {} full records, {} bridge half records",
                written,
                points.len(),
                (written - points.len() * FULL_RECORD_BYTES) / HALF_RECORD_BYTES
            );

            let longest = read_records(&strip[..written])
                .map(|vertex| vertex.length)
                .fold(0.0f32, f32::max);
            tracing::info!("Longest accumulated arc length: {:.3}", longest);
        }
        Err(err) => tracing::error!("Tessellation failed: {}", err),
    }

    profiling::new_frame();
}
