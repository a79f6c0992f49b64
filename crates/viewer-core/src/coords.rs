//! Conversion between world space and render space.
//!
//! World space: X left-right, Y back-front, Z up-down.
//! Render space follows the OpenGL convention: X right, Y up, -Z forward.
//!
//! Both directions are signed axis permutations, so converting never
//! rounds: `to_world(to_render(v)) == v` for every finite or infinite input.

use crate::math::{Mat3, Vec3};
use crate::spatial::{Location, Rotation};

/// A signed permutation of the three axes.
///
/// Output component `i` is `signs[i] * input[sources[i]]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Basis {
    sources: [usize; 3],
    signs: [f32; 3],
}

impl Basis {
    pub const fn new(sources: [usize; 3], signs: [f32; 3]) -> Self {
        Self { sources, signs }
    }

    pub fn apply(&self, v: Vec3) -> Vec3 {
        let input = v.to_array();
        Vec3::new(
            self.signs[0] * input[self.sources[0]],
            self.signs[1] * input[self.sources[1]],
            self.signs[2] * input[self.sources[2]],
        )
    }

    pub fn inverse(&self) -> Basis {
        let mut sources = [0; 3];
        let mut signs = [1.0; 3];
        for axis in 0..3 {
            sources[self.sources[axis]] = axis;
            signs[self.sources[axis]] = self.signs[axis];
        }
        Basis { sources, signs }
    }

    /// The equivalent 3x3 matrix
    pub fn matrix(&self) -> Mat3 {
        Mat3::from_cols(
            self.apply(Vec3::X),
            self.apply(Vec3::Y),
            self.apply(Vec3::Z),
        )
    }
}

/// World location -> render position: `(x, y, z) -> (-y, z, -x)`
pub const LOCATION_TO_RENDER: Basis = Basis::new([1, 2, 0], [-1.0, 1.0, -1.0]);

/// World `(roll, pitch, yaw)` -> angles about render `(X, Y, Z)`: `(-pitch, yaw, -roll)`
pub const ROTATION_TO_RENDER: Basis = Basis::new([1, 2, 0], [-1.0, 1.0, -1.0]);

pub fn location_to_render(location: Location) -> Vec3 {
    LOCATION_TO_RENDER.apply(location.to_vec3())
}

pub fn location_to_world(position: Vec3) -> Location {
    Location::from_vec3(LOCATION_TO_RENDER.inverse().apply(position))
}

/// Render angles are in degrees, ordered by the render axis they turn about
pub fn rotation_to_render(rotation: Rotation) -> Vec3 {
    ROTATION_TO_RENDER.apply(rotation.to_vec3())
}

pub fn rotation_to_world(angles: Vec3) -> Rotation {
    Rotation::from_vec3(ROTATION_TO_RENDER.inverse().apply(angles))
}

/// Directions transform like locations
pub fn direction_to_render(direction: Vec3) -> Vec3 {
    LOCATION_TO_RENDER.apply(direction)
}

pub fn direction_to_world(direction: Vec3) -> Vec3 {
    LOCATION_TO_RENDER.inverse().apply(direction)
}
