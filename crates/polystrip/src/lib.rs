//! Polystrip - contour decoding and triangle-strip tessellation
//!
//! This crate provides:
//! - Decoding of delta-encoded, byte-shuffled, integer-quantized point
//!   streams into absolute `f32` coordinates, in place
//! - Tessellation of many polylines into one interleaved triangle-strip
//!   vertex buffer with mitered joints, arc length and packed normals
//! - C ABI entry points for hosts that own the buffers
//!
//! Neither stage allocates: both write into caller-provided buffers.
//!
//! # Example
//!
//! ```
//! use polystrip::*;
//!
//! // Two deltas, (4, 0) and (0, 4), quantized at decimation factor 2.
//! let mut buf = shuffle_block([8, 0, 0, 8]).to_vec();
//! decode_in_place(&mut buf, 2);
//! let points: Vec<_> = read_points(&buf).collect();
//!
//! let offsets = [0];
//! let mut strip = vec![0u8; required_capacity(&offsets, points.len())];
//! let written = tessellate_batch(&points, &offsets, &mut strip, &TessellationConfig::default());
//! assert_eq!(written, 2 * FULL_RECORD_BYTES);
//! ```

// Primitives
mod bytes;
mod geometry;

// Pipeline stages
mod codec;
mod tessellator;
mod vertex;

mod config;
mod error;
pub mod ffi;

pub use geometry::*;

pub use codec::*;
pub use tessellator::*;
pub use vertex::*;

pub use config::*;
pub use error::*;
