use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::coords;
use crate::math::{Mat4, Quat, Vec3};
use crate::spatial::{Location, Rotation};

/// Placement of a mesh in world space
/// Represents location and Euler rotation (degrees)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Transform {
    pub location: Location,
    pub rotation: Rotation,
}

impl Transform {
    /// Create a new Transform with specified values
    pub fn new(location: Location, rotation: Rotation) -> Self {
        Self { location, rotation }
    }

    /// Create an identity transform (origin, no rotation)
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only location
    pub fn from_location(location: Location) -> Self {
        Self {
            location,
            rotation: Rotation::ZERO,
        }
    }

    /// Orientation in render space, composed yaw * pitch * roll
    pub fn render_rotation(&self) -> Quat {
        let angles = coords::rotation_to_render(self.rotation) * (std::f32::consts::PI / 180.0);
        let pitch = Quat::from_axis_angle(Vec3::X, angles.x);
        let yaw = Quat::from_axis_angle(Vec3::Y, angles.y);
        let roll = Quat::from_axis_angle(Vec3::Z, angles.z);
        yaw * pitch * roll
    }

    /// Convert to the render-space model matrix (rotate, then translate)
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(
            self.render_rotation(),
            coords::location_to_render(self.location),
        )
    }
}

/// GPU用モデル行列Uniform
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct ModelUniform {
    pub model: [[f32; 4]; 4],
}

impl ModelUniform {
    pub fn from_transform(transform: &Transform) -> Self {
        Self {
            model: transform.to_matrix().to_cols_array_2d(),
        }
    }
}

impl Default for ModelUniform {
    fn default() -> Self {
        Self {
            model: Mat4::IDENTITY.to_cols_array_2d(),
        }
    }
}
