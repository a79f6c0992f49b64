//! World-space bounding boxes of placed vertex sets.

use crate::coords;
use crate::math::{Mat4, Vec3};
use crate::spatial::{Location, AABB};

/// Computes the world-space AABB of `positions` placed by `model`.
///
/// `positions` are local and world-oriented. They go through the same path
/// as a vertex buffer (to render space, model matrix with w = 1); the extremes
/// are tracked in render space and the two corners are converted back and
/// re-sorted, since the basis change flips the sign of two axes.
/// No positions yields [`AABB::EMPTY`].
pub fn world_bounds(positions: &[Location], model: &Mat4) -> AABB {
    if positions.is_empty() {
        return AABB::EMPTY;
    }

    let mut min = Vec3::splat(f32::INFINITY);
    let mut max = Vec3::splat(f32::NEG_INFINITY);
    for position in positions {
        let placed = model.transform_point3(coords::location_to_render(*position));
        min = min.min(placed);
        max = max.max(placed);
    }

    AABB::new(coords::location_to_world(min), coords::location_to_world(max))
}
