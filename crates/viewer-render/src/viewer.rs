//! Control-side driver: routes input to the camera, picks on click and
//! produces one [`Frame`] per tick.

use viewer_core::math::Vec2;
use viewer_core::{MeshId, Scene};

use crate::camera::{Camera, CameraControl};
use crate::config::ViewerConfig;
use crate::error::ViewerError;
use crate::frame::{build_frame, Frame};
use crate::input::{InputEvent, InputState, MouseButtons};
use crate::picking::{pick, PickResult};
use crate::viewport::{Viewport, ViewportSize};

/// Notifications for the host application
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewerEvent {
    /// A clickable mesh was clicked
    MeshClicked(MeshId),
    /// A click hit no clickable mesh
    VoidClicked,
    /// The camera's view changed
    CameraMoved,
}

/// Scene, camera and input state of one viewport
#[derive(Debug)]
pub struct Viewer {
    pub scene: Scene,
    camera: Option<Camera>,
    input: InputState,
    config: ViewerConfig,
}

impl Viewer {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            scene: Scene::new(),
            camera: config.camera.clone(),
            input: InputState::default(),
            config,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ViewerError> {
        Ok(Self::new(ViewerConfig::from_json(json)?))
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn camera(&self) -> Option<&Camera> {
        self.camera.as_ref()
    }

    pub fn camera_mut(&mut self) -> Option<&mut Camera> {
        self.camera.as_mut()
    }

    pub fn set_camera(&mut self, camera: impl Into<Camera>) {
        let camera = camera.into();
        log::debug!("viewer: {:?} camera set", camera.projection_kind());
        self.camera = Some(camera);
    }

    pub fn take_camera(&mut self) -> Option<Camera> {
        self.camera.take()
    }

    fn require_camera(&mut self) -> Result<&mut Camera, ViewerError> {
        self.camera.as_mut().ok_or(ViewerError::CameraNotSet)
    }

    /// Picks the nearest clickable mesh under a control-local position
    pub fn pick(&self, screen: Vec2, size: ViewportSize) -> Result<PickResult, ViewerError> {
        let camera = self.camera.as_ref().ok_or(ViewerError::CameraNotSet)?;
        Ok(pick(&self.scene, camera, size, screen))
    }

    /// Turns pointer capture of a free-look camera on or off
    pub fn set_mouse_look(&mut self, enabled: bool, viewport: &mut dyn Viewport) -> Result<(), ViewerError> {
        let pointer = self.input.pointer;
        if let Camera::FreeLook(camera) = self.require_camera()? {
            camera.set_mouse_look(enabled, pointer, viewport);
        }
        Ok(())
    }

    pub fn handle_event(
        &mut self,
        event: InputEvent,
        viewport: &mut dyn Viewport,
    ) -> Result<Vec<ViewerEvent>, ViewerError> {
        let size = viewport.size();
        let mut events = Vec::new();

        match event {
            InputEvent::ButtonDown { button, x, y } => {
                let pointer = Vec2::new(x, y);
                if button == self.config.pick_button {
                    events.push(match self.pick(pointer, size)? {
                        PickResult::Mesh { id, .. } => ViewerEvent::MeshClicked(id),
                        PickResult::Void => ViewerEvent::VoidClicked,
                    });
                }
                self.input.pointer = pointer;
                self.input.buttons.set(button, true);
                let camera = self.camera.as_mut().ok_or(ViewerError::CameraNotSet)?;
                camera.button_down(button, pointer, viewport);
                self.input.pointer = camera.drag().pointer();
            }
            InputEvent::ButtonUp { button } => {
                self.input.buttons.set(button, false);
                self.require_camera()?.button_up(button, viewport);
            }
            InputEvent::PointerMoved { x, y } => {
                let camera = self.camera.as_mut().ok_or(ViewerError::CameraNotSet)?;
                let before = camera.view_matrix(size);
                camera.pointer_moved(Vec2::new(x, y), viewport);
                if camera.view_matrix(size) != before {
                    events.push(ViewerEvent::CameraMoved);
                }
                self.input.pointer = camera.drag().pointer();
            }
            InputEvent::Wheel { delta } => {
                let pointer = self.input.pointer;
                self.require_camera()?.wheel(delta, pointer, viewport);
                events.push(ViewerEvent::CameraMoved);
            }
            InputEvent::KeyDown(key) => self.input.keys.set(key, true),
            InputEvent::KeyUp(key) => self.input.keys.set(key, false),
        }

        Ok(events)
    }

    /// Advances one frame.
    ///
    /// `held_now` is the sampled button state; buttons the camera still holds
    /// but that are up now were released outside the viewport.
    pub fn frame(
        &mut self,
        dt: f32,
        held_now: MouseButtons,
        viewport: &mut dyn Viewport,
    ) -> Result<Frame, ViewerError> {
        let size = viewport.size();
        let dt = if dt > self.config.max_frame_delta || dt < 0.0 {
            log::trace!("viewer: frame delta {dt}s ignored");
            0.0
        } else {
            dt
        };
        let keys = self.input.keys;

        let camera = self.require_camera()?;
        camera.release_buttons_not_held(held_now, viewport);
        camera.move_by(dt, keys, size);
        self.input.buttons = held_now;

        build_frame(self.camera.as_ref(), &self.scene, size)
    }
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new(ViewerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::{FreeLookCamera, OrbitalCamera, OrthographicCamera};
    use crate::input::{MouseButton, MoveKey};
    use crate::viewport::FixedViewport;
    use viewer_core::{Cuboid, Location, Mesh, Rotation, Transform};

    fn viewer_with_target() -> (Viewer, MeshId) {
        let mut viewer = Viewer::default();
        let id = viewer.scene.add_mesh(
            Mesh::new("target", Cuboid::default())
                .with_transform(Transform::from_location(Location::new(2.0, 0.0, 0.0)))
                .with_clickable(true),
        );
        viewer.set_camera(OrbitalCamera::new(Rotation::ZERO, 10.0));
        (viewer, id)
    }

    fn click(x: f32, y: f32) -> InputEvent {
        InputEvent::ButtonDown { button: MouseButton::Left, x, y }
    }

    #[test]
    fn test_camera_not_set() {
        let mut viewer = Viewer::default();
        let mut viewport = FixedViewport::new(800, 600);
        assert!(matches!(
            viewer.handle_event(click(1.0, 1.0), &mut viewport),
            Err(ViewerError::CameraNotSet)
        ));
        assert!(matches!(
            viewer.frame(0.016, MouseButtons::NONE, &mut viewport),
            Err(ViewerError::CameraNotSet)
        ));
    }

    #[test]
    fn test_click_reports_mesh_and_void() {
        let (mut viewer, id) = viewer_with_target();
        let mut viewport = FixedViewport::new(800, 600);

        let events = viewer.handle_event(click(400.0, 300.0), &mut viewport).unwrap();
        assert_eq!(events, vec![ViewerEvent::MeshClicked(id)]);
        viewer
            .handle_event(InputEvent::ButtonUp { button: MouseButton::Left }, &mut viewport)
            .unwrap();

        let events = viewer.handle_event(click(0.0, 0.0), &mut viewport).unwrap();
        assert_eq!(events, vec![ViewerEvent::VoidClicked]);
    }

    #[test]
    fn test_drag_reports_camera_moved() {
        let (mut viewer, _) = viewer_with_target();
        let mut viewport = FixedViewport::new(800, 600);
        viewer.handle_event(click(400.0, 300.0), &mut viewport).unwrap();
        let events = viewer
            .handle_event(InputEvent::PointerMoved { x: 450.0, y: 300.0 }, &mut viewport)
            .unwrap();
        assert_eq!(events, vec![ViewerEvent::CameraMoved]);
        // the pointer was warped back to the center
        assert_eq!(viewer.input().pointer, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_hover_does_not_move_camera() {
        let (mut viewer, _) = viewer_with_target();
        let mut viewport = FixedViewport::new(800, 600);
        let events = viewer
            .handle_event(InputEvent::PointerMoved { x: 450.0, y: 300.0 }, &mut viewport)
            .unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn test_release_outside_viewport() {
        let (mut viewer, _) = viewer_with_target();
        let mut viewport = FixedViewport::new(800, 600);
        viewer.handle_event(click(400.0, 300.0), &mut viewport).unwrap();
        viewer.frame(0.016, MouseButtons::NONE, &mut viewport).unwrap();
        let camera = viewer.camera().unwrap();
        assert!(!camera.drag().is_dragging());
        assert!(!viewer.input().buttons.any());
    }

    #[test]
    fn test_pick_click_during_pan_keeps_pan() {
        let mut viewer = Viewer::default();
        let mut viewport = FixedViewport::new(800, 600);
        viewer.set_camera(OrthographicCamera::default());
        let middle_down = InputEvent::ButtonDown { button: MouseButton::Middle, x: 400.0, y: 300.0 };
        viewer.handle_event(middle_down, &mut viewport).unwrap();
        viewer
            .handle_event(InputEvent::PointerMoved { x: 450.0, y: 300.0 }, &mut viewport)
            .unwrap();
        let panned = viewer.camera().unwrap().location(viewport.size);
        assert_ne!(panned, Location::ORIGIN);

        let events = viewer.handle_event(click(450.0, 300.0), &mut viewport).unwrap();
        assert_eq!(events, vec![ViewerEvent::VoidClicked]);
        viewer
            .handle_event(InputEvent::ButtonUp { button: MouseButton::Left }, &mut viewport)
            .unwrap();
        assert_eq!(viewer.camera().unwrap().location(viewport.size), panned);
    }

    #[test]
    fn test_long_frames_do_not_move() {
        let mut viewer = Viewer::default();
        let mut viewport = FixedViewport::new(800, 600);
        viewer.set_camera(FreeLookCamera::default());
        viewer.set_mouse_look(true, &mut viewport).unwrap();
        viewer.handle_event(InputEvent::KeyDown(MoveKey::Forward), &mut viewport).unwrap();

        viewer.frame(0.5, MouseButtons::NONE, &mut viewport).unwrap();
        assert_eq!(viewer.camera().unwrap().location(viewport.size), Location::ORIGIN);

        let frame = viewer.frame(0.02, MouseButtons::NONE, &mut viewport).unwrap();
        assert!((frame.camera_location.x - 0.1).abs() < 1e-5);
    }

    #[test]
    fn test_from_json() {
        let viewer = Viewer::from_json(r#"{"camera": {"kind": "free_look", "move_speed": 12.0}}"#).unwrap();
        match viewer.camera() {
            Some(Camera::FreeLook(camera)) => assert_eq!(camera.move_speed, 12.0),
            other => panic!("unexpected camera {other:?}"),
        }
    }
}
