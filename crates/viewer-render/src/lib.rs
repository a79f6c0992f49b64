pub mod input;
pub mod viewport;
pub mod camera;
pub mod picking;
pub mod frame;
pub mod config;
pub mod error;
pub mod viewer;

pub use input::{InputEvent, InputState, MouseButton, MouseButtons, MoveKey, MoveKeys};
pub use viewport::{FixedViewport, Viewport, ViewportSize};
pub use camera::{
    Camera, CameraControl, DragState, FreeLookCamera, OrbitalCamera, OrthographicCamera,
    ProjectionKind,
};
pub use picking::{pick, pick_mesh, picking_ray, PickResult, Ray};
pub use frame::{build_frame, CameraUniform, DrawCall, Frame};
pub use config::ViewerConfig;
pub use error::ViewerError;
pub use viewer::{Viewer, ViewerEvent};

// Re-export the core crate for consistent version usage
pub use viewer_core;
