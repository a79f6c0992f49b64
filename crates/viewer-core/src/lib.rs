pub mod math;
pub mod spatial;
pub mod coords;
pub mod components;
pub mod mesh;
pub mod light;
pub mod scene;

// Re-exports
pub use spatial::{Location, Rotation, Dimensions, AABB};
pub use components::{Transform, ModelUniform};
pub use mesh::{Mesh, VertexSource, Cuboid, Grid, Points};
pub use light::PointLight;
pub use scene::{Scene, MeshId, LightId};

// Re-export glam types for consistent version usage
pub use glam;
