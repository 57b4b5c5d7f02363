//! Point generators for common contour shapes.

use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Closed axis-aligned square, counter-clockwise, first point repeated at the end.
pub fn square_loop(origin: Vec2, size: f32) -> Vec<Vec2> {
    vec![
        origin,
        origin + Vec2::new(size, 0.0),
        origin + Vec2::new(size, size),
        origin + Vec2::new(0.0, size),
        origin,
    ]
}

/// `count` points alternating between `y = 0` and `y = step`.
pub fn zigzag(count: usize, step: f32) -> Vec<Vec2> {
    (0..count)
        .map(|i| Vec2::new(i as f32 * step, (i % 2) as f32 * step))
        .collect()
}

/// `count` collinear points spaced `step` apart along `direction`.
pub fn straight(count: usize, direction: Vec2, step: f32) -> Vec<Vec2> {
    let direction = direction.normalize();
    (0..count).map(|i| direction * (i as f32 * step)).collect()
}

/// Closed circle approximated by `segments` segments.
///
/// The last point is an exact copy of the first.
pub fn circle(center: Vec2, radius: f32, segments: usize) -> Vec<Vec2> {
    let mut points: Vec<Vec2> = (0..segments)
        .map(|i| {
            let angle = i as f32 / segments as f32 * std::f32::consts::TAU;
            center + Vec2::from_angle(angle) * radius
        })
        .collect();
    if let Some(&first) = points.first() {
        points.push(first);
    }
    points
}

/// Seeded random walk of `count` points with steps up to `max_step` per axis.
pub fn random_walk(seed: u64, count: usize, max_step: f32) -> Vec<Vec2> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut position = Vec2::new(
        rng.random_range(-100.0..100.0),
        rng.random_range(-100.0..100.0),
    );
    let mut points = Vec::with_capacity(count);
    for _ in 0..count {
        points.push(position);
        position += Vec2::new(
            rng.random_range(-max_step..=max_step),
            rng.random_range(-max_step..=max_step),
        );
    }
    points
}
