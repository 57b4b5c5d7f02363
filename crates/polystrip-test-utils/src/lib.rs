//! Test utilities for polystrip.
//!
//! Fixtures for building contour batches the way a host hands them over:
//! one flat point array plus the coordinate offset where each polyline
//! starts.
//!
//! # Example
//!
//! ```rust
//! use polystrip_test_utils::{BatchBuilder, shapes};
//! use glam::Vec2;
//!
//! let batch = BatchBuilder::new()
//!     .polyline(shapes::square_loop(Vec2::ZERO, 2.0))
//!     .polyline(shapes::zigzag(5, 1.0))
//!     .build();
//!
//! assert_eq!(batch.offsets, vec![0, 10]);
//! assert_eq!(batch.points.len(), 10);
//! ```

pub mod shapes;

use glam::Vec2;

/// A batch of polylines packed end to end.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContourBatch {
    /// All points of all polylines
    pub points: Vec<Vec2>,
    /// Start of each polyline, counted in coordinates (twice the point index)
    pub offsets: Vec<i32>,
}

impl ContourBatch {
    /// The points as a flat `x, y, x, y, ...` array.
    pub fn coordinates(&self) -> Vec<f32> {
        self.points.iter().flat_map(|p| [p.x, p.y]).collect()
    }

    pub fn polyline_count(&self) -> usize {
        self.offsets.len()
    }

    /// Points of polyline `index`.
    pub fn polyline(&self, index: usize) -> &[Vec2] {
        let start = self.offsets[index] as usize / 2;
        let end = self
            .offsets
            .get(index + 1)
            .map_or(self.points.len(), |&next| next as usize / 2);
        &self.points[start..end]
    }
}

/// Builder for [`ContourBatch`].
#[derive(Debug, Clone, Default)]
pub struct BatchBuilder {
    batch: ContourBatch,
}

impl BatchBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a polyline.
    pub fn polyline(mut self, points: impl IntoIterator<Item = Vec2>) -> Self {
        self.batch.offsets.push((self.batch.points.len() * 2) as i32);
        self.batch.points.extend(points);
        self
    }

    pub fn build(self) -> ContourBatch {
        self.batch
    }
}

/// Assert two point sequences match to within `tolerance` per coordinate.
#[track_caller]
pub fn assert_points_near(actual: &[Vec2], expected: &[Vec2], tolerance: f32) {
    assert_eq!(actual.len(), expected.len(), "point counts differ");
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        let error = (*a - *e).abs().max_element();
        assert!(
            error <= tolerance,
            "point {} is {:?}, expected {:?} (error {} > {})",
            i,
            a,
            e,
            error,
            tolerance
        );
    }
}
