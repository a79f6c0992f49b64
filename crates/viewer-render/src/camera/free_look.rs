use std::f32::consts::{FRAC_PI_2, SQRT_2};

use serde::{Deserialize, Serialize};
use viewer_core::coords;
use viewer_core::math::{Mat4, Vec2, Vec3};
use viewer_core::{Location, Rotation};

use super::{
    compose_rotation, drag_rotation, perspective_projection, settle_rotation, CameraControl,
    DragState, ProjectionKind, DEFAULT_FAR_PLANE, DEFAULT_FOV, DEFAULT_NEAR_PLANE,
};
use crate::input::{MouseButton, MoveKeys};
use crate::viewport::{Viewport, ViewportSize};

/// 一人称カメラ
/// マウスで見回し、キーボードで移動する
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FreeLookCamera {
    pub rotation: Rotation,
    pub location: Location,
    pub fov: f32,
    pub near_plane: f32,
    pub far_plane: f32,
    pub clamp_vertically: bool,
    /// 移動速度（ワールド単位/秒）
    pub move_speed: f32,
    pub look_button: MouseButton,
    pub recenter_pointer: bool,
    #[serde(skip)]
    drag: DragState,
}

impl FreeLookCamera {
    pub fn new(location: Location, rotation: Rotation) -> Self {
        Self {
            location,
            rotation,
            ..Self::default()
        }
    }

    /// 見回しボタン押下中またはポインタ捕捉中なら見回し中
    pub fn is_looking(&self) -> bool {
        self.drag.is_held(self.look_button) || self.drag.is_captured()
    }

    /// ポインタ捕捉の切り替え（解除時に回転を確定）
    pub fn set_mouse_look(&mut self, enabled: bool, pointer: Vec2, viewport: &mut dyn Viewport) {
        if enabled {
            self.commit(viewport.size());
            self.drag.capture(pointer);
            if self.recenter_pointer {
                self.drag.recenter(viewport);
            }
        } else {
            self.commit(viewport.size());
            self.drag.release_capture();
        }
    }

    pub fn live_rotation(&self, size: ViewportSize) -> Rotation {
        if !self.is_looking() {
            return self.rotation;
        }
        let offset = drag_rotation(self.drag.delta(), self.fov, size);
        settle_rotation(self.rotation - offset, self.clamp_vertically)
    }

    /// 現在の視線方向へ `dt` 秒分移動
    pub fn move_by(&mut self, dt: f32, keys: MoveKeys, size: ViewportSize) {
        let (longitudinal, lateral) = (keys.longitudinal(), keys.lateral());
        if !self.is_looking() || (longitudinal == 0.0 && lateral == 0.0) {
            return;
        }

        let mut distance = self.move_speed * dt;
        if longitudinal.abs() + lateral.abs() > 1.0 {
            distance /= SQRT_2;
        }

        let rotation = self.live_rotation(size);
        let yaw = (-rotation.yaw).to_radians();
        let pitch = rotation.pitch.to_radians();
        let forward = Vec3::new(yaw.cos() * pitch.cos(), yaw.sin() * pitch.cos(), pitch.sin());
        let left = Vec3::new((yaw + FRAC_PI_2).cos(), (yaw + FRAC_PI_2).sin(), 0.0);

        self.location = self.location + (forward * longitudinal + left * lateral) * distance;
    }

    /// 見回し中の回転を確定し、開始点を現在位置へ合わせる
    fn commit(&mut self, size: ViewportSize) {
        if self.is_looking() {
            self.rotation = self.live_rotation(size);
        }
        self.drag.rebase();
        log::trace!("free-look camera: committed rotation {:?}", self.rotation);
    }
}

impl Default for FreeLookCamera {
    fn default() -> Self {
        Self {
            rotation: Rotation::ZERO,
            location: Location::ORIGIN,
            fov: DEFAULT_FOV,
            near_plane: DEFAULT_NEAR_PLANE,
            far_plane: DEFAULT_FAR_PLANE,
            clamp_vertically: false,
            move_speed: 5.0,
            look_button: MouseButton::Middle,
            recenter_pointer: true,
            drag: DragState::default(),
        }
    }
}

impl CameraControl for FreeLookCamera {
    fn projection_kind(&self) -> ProjectionKind {
        ProjectionKind::Perspective
    }

    fn drag(&self) -> &DragState {
        &self.drag
    }

    fn projection_matrix(&self, size: ViewportSize) -> Mat4 {
        perspective_projection(self.fov, self.near_plane, self.far_plane, size)
    }

    fn view_matrix(&self, size: ViewportSize) -> Mat4 {
        let angles = coords::rotation_to_render(self.live_rotation(size));
        Mat4::from_quat(compose_rotation(angles))
            * Mat4::from_translation(-coords::location_to_render(self.location))
    }

    fn location(&self, _size: ViewportSize) -> Location {
        self.location
    }

    fn rotation(&self, size: ViewportSize) -> Rotation {
        self.live_rotation(size)
    }

    fn button_down(&mut self, button: MouseButton, pointer: Vec2, viewport: &mut dyn Viewport) {
        self.commit(viewport.size());
        self.drag.press(button, pointer);
    }

    fn button_up(&mut self, button: MouseButton, viewport: &mut dyn Viewport) {
        self.commit(viewport.size());
        self.drag.release(button);
    }

    fn pointer_moved(&mut self, pointer: Vec2, viewport: &mut dyn Viewport) {
        self.drag.pointer_moved(pointer);
        if self.recenter_pointer && self.is_looking() {
            self.drag.recenter(viewport);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::FixedViewport;

    const SIZE: ViewportSize = ViewportSize::new(800, 600);

    fn looking_camera(viewport: &mut FixedViewport) -> FreeLookCamera {
        let mut camera = FreeLookCamera::default();
        camera.set_mouse_look(true, Vec2::new(400.0, 300.0), viewport);
        camera
    }

    fn approx(a: Location, b: Location) -> bool {
        (a.to_vec3() - b.to_vec3()).length() < 1e-4
    }

    #[test]
    fn test_view_moves_location_to_origin() {
        let camera = FreeLookCamera::new(Location::new(1.0, 2.0, 3.0), Rotation::new(5.0, -20.0, 45.0));
        let eye = coords::location_to_render(camera.location);
        let at = camera.view_matrix(SIZE).transform_point3(eye);
        assert!(at.length() < 1e-5);
    }

    #[test]
    fn test_move_forward() {
        let mut viewport = FixedViewport::new(800, 600);
        let mut camera = looking_camera(&mut viewport);
        let keys = MoveKeys { forward: true, ..MoveKeys::default() };
        camera.move_by(1.0, keys, SIZE);
        assert!(approx(camera.location, Location::new(5.0, 0.0, 0.0)));
    }

    #[test]
    fn test_move_forward_after_yaw() {
        let mut viewport = FixedViewport::new(800, 600);
        let mut camera = looking_camera(&mut viewport);
        camera.rotation = Rotation::new(0.0, 0.0, 90.0);
        let keys = MoveKeys { forward: true, ..MoveKeys::default() };
        camera.move_by(1.0, keys, SIZE);
        assert!(approx(camera.location, Location::new(0.0, -5.0, 0.0)), "{:?}", camera.location);
    }

    #[test]
    fn test_diagonal_move_is_normalized() {
        let mut viewport = FixedViewport::new(800, 600);
        let mut camera = looking_camera(&mut viewport);
        let keys = MoveKeys { forward: true, right: true, ..MoveKeys::default() };
        camera.move_by(2.0, keys, SIZE);
        assert!((camera.location.length() - 10.0).abs() < 1e-4);
        assert!(approx(camera.location, Location::new(10.0 / SQRT_2, -10.0 / SQRT_2, 0.0)));
    }

    #[test]
    fn test_no_move_without_look() {
        let mut camera = FreeLookCamera::default();
        let keys = MoveKeys { forward: true, ..MoveKeys::default() };
        camera.move_by(1.0, keys, SIZE);
        assert_eq!(camera.location, Location::ORIGIN);
    }

    #[test]
    fn test_look_drag_commits_on_release() {
        let mut viewport = FixedViewport::new(800, 600);
        let mut camera = FreeLookCamera::default();
        camera.button_down(MouseButton::Middle, Vec2::new(400.0, 300.0), &mut viewport);
        camera.pointer_moved(Vec2::new(500.0, 300.0), &mut viewport);
        // 右へ100px: ヨーが22.5度増える
        assert_eq!(camera.rotation(SIZE).yaw, 22.5);
        assert_eq!(viewport.last_warp(), Some(Vec2::new(400.0, 300.0)));
        camera.button_up(MouseButton::Middle, &mut viewport);
        assert_eq!(camera.rotation.yaw, 22.5);
        assert!(!camera.is_looking());
    }

    #[test]
    fn test_click_during_look_keeps_rotation() {
        let mut viewport = FixedViewport::new(800, 600);
        let mut camera = FreeLookCamera::default();
        camera.button_down(MouseButton::Middle, Vec2::new(400.0, 300.0), &mut viewport);
        camera.pointer_moved(Vec2::new(500.0, 300.0), &mut viewport);
        camera.button_down(MouseButton::Left, Vec2::new(400.0, 300.0), &mut viewport);
        assert_eq!(camera.rotation(SIZE).yaw, 22.5);
        camera.button_up(MouseButton::Left, &mut viewport);
        assert_eq!(camera.rotation(SIZE).yaw, 22.5);
        assert!(camera.is_looking());

        camera.pointer_moved(Vec2::new(500.0, 300.0), &mut viewport);
        assert_eq!(camera.rotation(SIZE).yaw, 45.0);
    }

    #[test]
    fn test_mouse_look_toggle_commits() {
        let mut viewport = FixedViewport::new(800, 600);
        let mut camera = looking_camera(&mut viewport);
        camera.pointer_moved(Vec2::new(400.0, 360.0), &mut viewport);
        // 下へ60px: ピッチが18度下がる
        assert_eq!(camera.rotation(SIZE).pitch, -18.0);
        camera.set_mouse_look(false, Vec2::new(400.0, 300.0), &mut viewport);
        assert_eq!(camera.rotation.pitch, -18.0);
        assert!(!camera.is_looking());
    }
}
