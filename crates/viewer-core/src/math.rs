//! Shared math types and angle helpers.

pub use glam::{Mat3, Mat4, Quat, Vec2, Vec3, Vec4};

/// Wraps an angle in degrees into the half-open range (-180, 180].
pub fn wrap_degrees(angle: f32) -> f32 {
    angle - 360.0 * ((angle - 180.0) / 360.0).ceil()
}
