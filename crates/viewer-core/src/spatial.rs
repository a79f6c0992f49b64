//! World-space value types: points, Euler rotations, sizes and bounding boxes.
//!
//! World convention: X runs left-right, Y back-front and Z up-down.

use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

use crate::math::{wrap_degrees, Vec3};

/// A point in world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Location {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Location {
    pub const ORIGIN: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn from_vec3(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }

    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Distance from the world origin
    pub fn length(self) -> f32 {
        self.to_vec3().length()
    }

    pub fn distance(self, other: Location) -> f32 {
        self.to_vec3().distance(other.to_vec3())
    }

    pub fn is_finite(self) -> bool {
        self.to_vec3().is_finite()
    }
}

impl From<Vec3> for Location {
    fn from(v: Vec3) -> Self {
        Self::from_vec3(v)
    }
}

impl Add for Location {
    type Output = Location;

    fn add(self, rhs: Location) -> Location {
        Location::from_vec3(self.to_vec3() + rhs.to_vec3())
    }
}

impl Add<Vec3> for Location {
    type Output = Location;

    fn add(self, rhs: Vec3) -> Location {
        Location::from_vec3(self.to_vec3() + rhs)
    }
}

impl Sub for Location {
    type Output = Location;

    fn sub(self, rhs: Location) -> Location {
        Location::from_vec3(self.to_vec3() - rhs.to_vec3())
    }
}

impl Mul<f32> for Location {
    type Output = Location;

    fn mul(self, rhs: f32) -> Location {
        Location::from_vec3(self.to_vec3() * rhs)
    }
}

impl Neg for Location {
    type Output = Location;

    fn neg(self) -> Location {
        Location::new(-self.x, -self.y, -self.z)
    }
}

/// Euler rotation in degrees.
///
/// `roll` turns about the world X axis, `pitch` about Y and `yaw` about Z.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rotation {
    pub roll: f32,
    pub pitch: f32,
    pub yaw: f32,
}

impl Rotation {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(roll: f32, pitch: f32, yaw: f32) -> Self {
        Self { roll, pitch, yaw }
    }

    /// Packs the angles as `(roll, pitch, yaw)`
    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.roll, self.pitch, self.yaw)
    }

    pub fn from_vec3(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }

    /// Every component wrapped into (-180, 180]
    pub fn normalized(self) -> Self {
        Self::new(
            wrap_degrees(self.roll),
            wrap_degrees(self.pitch),
            wrap_degrees(self.yaw),
        )
    }

    /// Pitch limited to straight up / straight down
    pub fn with_clamped_pitch(self) -> Self {
        Self {
            pitch: self.pitch.clamp(-90.0, 90.0),
            ..self
        }
    }
}

impl Add for Rotation {
    type Output = Rotation;

    fn add(self, rhs: Rotation) -> Rotation {
        Rotation::from_vec3(self.to_vec3() + rhs.to_vec3())
    }
}

impl Sub for Rotation {
    type Output = Rotation;

    fn sub(self, rhs: Rotation) -> Rotation {
        Rotation::from_vec3(self.to_vec3() - rhs.to_vec3())
    }
}

/// Extent along each world axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Dimensions {
    /// Along X
    pub width: f32,
    /// Along Y
    pub length: f32,
    /// Along Z
    pub height: f32,
}

impl Dimensions {
    pub const fn new(width: f32, length: f32, height: f32) -> Self {
        Self {
            width,
            length,
            height,
        }
    }

    pub const fn cube(size: f32) -> Self {
        Self::new(size, size, size)
    }

    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.width, self.length, self.height)
    }
}

/// Axis-Aligned Bounding Box in world space.
///
/// `min <= max` holds on every axis. The only exception is [`AABB::EMPTY`],
/// which both corners set to +infinity and which no ray ever hits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    min: Location,
    max: Location,
}

impl AABB {
    /// Box of a mesh with no vertices
    pub const EMPTY: Self = Self {
        min: Location::new(f32::INFINITY, f32::INFINITY, f32::INFINITY),
        max: Location::new(f32::INFINITY, f32::INFINITY, f32::INFINITY),
    };

    /// Creates the box spanned by two opposite corners, in any order
    pub fn new(a: Location, b: Location) -> Self {
        let (a, b) = (a.to_vec3(), b.to_vec3());
        Self {
            min: Location::from_vec3(a.min(b)),
            max: Location::from_vec3(a.max(b)),
        }
    }

    /// Creates a box of the given size centered at `center`
    pub fn from_center_size(center: Location, size: Dimensions) -> Self {
        let half = size.to_vec3().abs() * 0.5;
        let center = center.to_vec3();
        Self::new(
            Location::from_vec3(center - half),
            Location::from_vec3(center + half),
        )
    }

    pub fn min(&self) -> Location {
        self.min
    }

    pub fn max(&self) -> Location {
        self.max
    }

    pub fn center(&self) -> Location {
        Location::from_vec3((self.min.to_vec3() + self.max.to_vec3()) * 0.5)
    }

    pub fn size(&self) -> Dimensions {
        let d = self.max.to_vec3() - self.min.to_vec3();
        Dimensions::new(d.x, d.y, d.z)
    }

    /// True for the sentinel box and for any box with a non-finite corner
    pub fn is_empty(&self) -> bool {
        !(self.min.is_finite() && self.max.is_finite())
    }

    /// Check if a point is inside the box, boundary included
    pub fn contains(&self, point: Location) -> bool {
        !self.is_empty()
            && point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }
}

impl Default for AABB {
    fn default() -> Self {
        Self::EMPTY
    }
}
