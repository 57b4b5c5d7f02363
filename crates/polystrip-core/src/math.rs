/// CPU-side vector math, re-exported from [`glam`].
///
/// The pipeline does all direction, normal and miter computation on
/// [`Vec2`]. `glam` keeps `Vec2` as two plain `f32`s (no SIMD padding), so a
/// `&[f32]` coordinate array can be viewed as `&[Vec2]` through `bytemuck`.
///
/// ```
/// use polystrip_core::math::Vec2;
///
/// let dir = (Vec2::new(4.0, 4.0) - Vec2::new(4.0, 0.0)).normalize();
/// assert_eq!(dir, Vec2::Y);
/// assert_eq!(dir.perp(), Vec2::new(-1.0, 0.0));
/// ```
///
/// [`glam`]: https://docs.rs/glam
pub mod fast {
    pub use glam::{Vec2, vec2};
}

/// Packed types for vertex buffer interoperability.
///
/// These are `#[repr(C)]` and [`Pod`](bytemuck::Pod), so a host on a
/// little-endian target can view a finished vertex buffer as a slice of
/// them with [`bytemuck::cast_slice`].
pub mod packed {
    use bytemuck::{Pod, Zeroable};
    use static_assertions::const_assert_eq;

    /// A 2D vector with guaranteed `#[repr(C)]` layout.
    ///
    /// # Memory Layout
    ///
    /// ```text
    /// Offset | Field | Size
    /// -------|-------|------
    /// 0      | x     | 4 bytes (f32)
    /// 4      | y     | 4 bytes (f32)
    /// Total: 8 bytes
    /// ```
    #[repr(C)]
    #[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
    pub struct Vec2 {
        pub x: f32,
        pub y: f32,
    }

    impl From<glam::Vec2> for Vec2 {
        fn from(v: glam::Vec2) -> Self {
            Self { x: v.x, y: v.y }
        }
    }

    impl From<Vec2> for glam::Vec2 {
        fn from(v: Vec2) -> Self {
            glam::Vec2::new(v.x, v.y)
        }
    }

    /// Two signed 16-bit fixed-point components sharing one 32-bit slot.
    ///
    /// # Memory Layout
    ///
    /// ```text
    /// Offset | Field | Size
    /// -------|-------|------
    /// 0      | x     | 2 bytes (i16)
    /// 2      | y     | 2 bytes (i16)
    /// Total: 4 bytes
    /// ```
    #[repr(C)]
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
    pub struct I16x2 {
        pub x: i16,
        pub y: i16,
    }

    impl I16x2 {
        pub const fn new(x: i16, y: i16) -> Self {
            Self { x, y }
        }
    }

    const_assert_eq!(std::mem::size_of::<Vec2>(), 8);
    const_assert_eq!(std::mem::size_of::<I16x2>(), 4);
}

pub use fast::*;
pub use packed::{I16x2 as PackedI16x2, Vec2 as PackedVec2};
