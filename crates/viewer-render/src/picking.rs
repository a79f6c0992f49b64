//! Picking system for ray-AABB intersection
//!
//! Turns a click into a world-space ray and finds the nearest clickable mesh.

use viewer_core::coords;
use viewer_core::math::{Mat4, Vec2, Vec3, Vec4};
use viewer_core::{Location, MeshId, Scene, AABB};

use crate::camera::{CameraControl, ProjectionKind};
use crate::viewport::ViewportSize;

/// Below this a direction component counts as parallel to the slab
const PARALLEL_EPSILON: f32 = 1e-8;

/// Ray for raycasting, in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Ray origin point
    pub origin: Location,
    /// Unit direction
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray, normalizing the direction.
    /// Returns `None` for a zero-length or non-finite direction.
    pub fn new(origin: Location, direction: Vec3) -> Option<Self> {
        let direction = direction.try_normalize()?;
        Some(Self { origin, direction })
    }

    /// Point at distance `t` along the ray
    pub fn at(&self, t: f32) -> Location {
        self.origin + self.direction * t
    }

    /// Entry and exit distances through the box using the slab method.
    /// The interval may start behind the origin.
    pub fn slab_interval(&self, aabb: &AABB) -> Option<(f32, f32)> {
        if aabb.is_empty() {
            return None;
        }

        let origin = self.origin.to_vec3().to_array();
        let direction = self.direction.to_array();
        let min = aabb.min().to_vec3().to_array();
        let max = aabb.max().to_vec3().to_array();

        let mut t_min = -f32::MAX;
        let mut t_max = f32::MAX;

        for axis in 0..3 {
            if direction[axis].abs() < PARALLEL_EPSILON {
                if origin[axis] < min[axis] || origin[axis] > max[axis] {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / direction[axis];
            let mut t1 = (min[axis] - origin[axis]) * inv;
            let mut t2 = (max[axis] - origin[axis]) * inv;
            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
            }

            t_min = t_min.max(t1);
            t_max = t_max.min(t2);
            if t_min > t_max {
                return None;
            }
        }

        Some((t_min, t_max))
    }

    /// Distance to the box entry point if the box is hit in front of the origin
    pub fn intersect_aabb(&self, aabb: &AABB) -> Option<f32> {
        match self.slab_interval(aabb) {
            Some((t_near, _)) if t_near >= 0.0 => Some(t_near),
            _ => None,
        }
    }
}

/// Outcome of a pick query
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PickResult {
    /// Nearest clickable mesh and its hit distance
    Mesh { id: MeshId, distance: f32 },
    /// Nothing clickable under the pointer
    Void,
}

impl PickResult {
    pub fn mesh(&self) -> Option<MeshId> {
        match self {
            PickResult::Mesh { id, .. } => Some(*id),
            PickResult::Void => None,
        }
    }
}

/// Builds the world-space ray under a control-local screen position.
///
/// Perspective cameras cast from the eye; orthographic cameras cast parallel
/// rays from the near plane along the view direction. Returns `None` for a
/// degenerate viewport or a non-invertible projection/view.
pub fn picking_ray<C>(camera: &C, size: ViewportSize, screen: Vec2) -> Option<Ray>
where
    C: CameraControl + ?Sized,
{
    if size.is_degenerate() {
        log::warn!("picking on a degenerate {}x{} viewport", size.width, size.height);
        return None;
    }

    let (width, height) = (size.width as f32, size.height as f32);
    let ndc = Vec2::new(2.0 * screen.x / width - 1.0, 2.0 * (height - screen.y) / height - 1.0);

    let inv_projection = invert(camera.projection_matrix(size))?;
    let inv_view = invert(camera.view_matrix(size))?;
    let clip = Vec4::new(ndc.x, ndc.y, -1.0, 1.0);

    match camera.projection_kind() {
        ProjectionKind::Perspective => {
            let eye = inv_projection * clip;
            let eye = Vec4::new(eye.x, eye.y, -1.0, 0.0);
            let direction = (inv_view * eye).truncate();
            Ray::new(camera.location(size), coords::direction_to_world(direction))
        }
        ProjectionKind::Orthographic => {
            let near = inv_view * (inv_projection * clip);
            if near.w == 0.0 {
                return None;
            }
            let origin = coords::location_to_world(near.truncate() / near.w);
            let forward = (inv_view * Vec4::new(0.0, 0.0, -1.0, 0.0)).truncate();
            Ray::new(origin, coords::direction_to_world(forward))
        }
    }
}

fn invert(m: Mat4) -> Option<Mat4> {
    let inverse = m.inverse();
    if inverse.is_finite() {
        Some(inverse)
    } else {
        log::warn!("matrix is not invertible, no picking ray");
        None
    }
}

/// Nearest clickable mesh along the ray. Ties go to the mesh added first.
pub fn pick_mesh(scene: &Scene, ray: &Ray) -> PickResult {
    let mut nearest: Option<(MeshId, f32)> = None;

    for (id, mesh) in scene.meshes().filter(|(_, mesh)| mesh.clickable) {
        if let Some(t) = ray.intersect_aabb(&mesh.bounds()) {
            if nearest.is_none_or(|(_, best)| t < best) {
                nearest = Some((id, t));
            }
        }
    }

    match nearest {
        Some((id, distance)) => {
            if let Some(mesh) = scene.mesh(id) {
                log::debug!("picked mesh '{}' at distance {distance}", mesh.name);
            }
            PickResult::Mesh { id, distance }
        }
        None => {
            log::debug!("pick hit nothing");
            PickResult::Void
        }
    }
}

/// Resolves a click to the nearest clickable mesh
pub fn pick<C>(scene: &Scene, camera: &C, size: ViewportSize, screen: Vec2) -> PickResult
where
    C: CameraControl + ?Sized,
{
    match picking_ray(camera, size, screen) {
        Some(ray) => pick_mesh(scene, &ray),
        None => PickResult::Void,
    }
}
