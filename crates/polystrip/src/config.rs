//! Tessellation settings.

/// Default cap on the miter scale of a joint normal.
pub const MITER_LIMIT: f32 = 1.5;

/// Default distance under which a polyline's first and last points are
/// treated as the same point, closing the loop.
pub const LOOP_TOLERANCE: f32 = 1e-6;

/// Settings for [`tessellate_polyline`](crate::tessellate_polyline) and
/// [`tessellate_batch`](crate::tessellate_batch).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TessellationConfig {
    /// Upper bound on `1 / cos(half joint angle)`; sharper joints are
    /// flattened towards a bevel.
    pub miter_limit: f32,
    /// First/last point distance below which a polyline is closed.
    pub loop_tolerance: f32,
}

impl TessellationConfig {
    pub const fn new() -> Self {
        Self {
            miter_limit: MITER_LIMIT,
            loop_tolerance: LOOP_TOLERANCE,
        }
    }

    /// Set the miter limit (at least 1.0).
    pub fn with_miter_limit(mut self, limit: f32) -> Self {
        self.miter_limit = limit.max(1.0);
        self
    }

    /// Set the loop closing tolerance (at least 0.0).
    pub fn with_loop_tolerance(mut self, tolerance: f32) -> Self {
        self.loop_tolerance = tolerance.max(0.0);
        self
    }
}

impl Default for TessellationConfig {
    fn default() -> Self {
        Self::new()
    }
}
