use serde::{Deserialize, Serialize};
use viewer_core::coords;
use viewer_core::math::{Mat4, Vec2, Vec3};
use viewer_core::{Location, Rotation};

use super::{
    compose_rotation, drag_rotation, orientation, perspective_projection, settle_rotation,
    CameraControl, DragState, ProjectionKind, DEFAULT_FAR_PLANE, DEFAULT_FOV, DEFAULT_NEAR_PLANE,
};
use crate::input::MouseButton;
use crate::viewport::{Viewport, ViewportSize};

/// 原点を中心に回る軌道カメラ
/// 姿勢は回転と原点からの距離で表す
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitalCamera {
    /// 確定済みの回転（度）
    pub rotation: Rotation,
    /// 原点からの距離
    pub distance: f32,
    /// 垂直視野角（度）
    pub fov: f32,
    pub near_plane: f32,
    pub far_plane: f32,
    /// false のときピッチを±90度に制限
    pub clamp_vertically: bool,
    /// ドラッグ中にポインタを画面中央へ戻す
    pub recenter_pointer: bool,
    /// 回転に使うボタン
    pub rotate_button: MouseButton,
    #[serde(skip)]
    drag: DragState,
}

impl OrbitalCamera {
    pub fn new(rotation: Rotation, distance: f32) -> Self {
        Self {
            rotation,
            distance,
            ..Self::default()
        }
    }

    /// ビュー行列から回転と距離を復元
    pub fn from_view_matrix(view: &Mat4) -> Self {
        Self::new(
            orientation::rotation_from_view(view),
            orientation::distance_from_origin(view),
        )
    }

    /// ドラッグ中の回転を反映した回転
    pub fn live_rotation(&self, size: ViewportSize) -> Rotation {
        if !self.drag.is_held(self.rotate_button) {
            return self.rotation;
        }
        let offset = drag_rotation(self.drag.delta(), self.fov, size);
        settle_rotation(self.rotation + offset, self.clamp_vertically)
    }

    /// ドラッグ中の回転を確定し、開始点を現在位置へ合わせる
    fn commit(&mut self, size: ViewportSize) {
        if self.drag.is_held(self.rotate_button) {
            self.rotation = self.live_rotation(size);
            log::trace!("orbital camera: committed rotation {:?}", self.rotation);
        }
        self.drag.rebase();
    }

    /// 回転と距離から求めたワールド位置
    fn orbit_location(&self, rotation: Rotation) -> Location {
        let yaw = (rotation.yaw + 180.0).to_radians();
        let pitch = rotation.pitch.to_radians();
        Location::new(
            self.distance * yaw.cos() * pitch.cos(),
            self.distance * yaw.sin() * pitch.cos(),
            self.distance * pitch.sin(),
        )
    }
}

impl Default for OrbitalCamera {
    fn default() -> Self {
        Self {
            rotation: Rotation::ZERO,
            distance: 4.0,
            fov: DEFAULT_FOV,
            near_plane: DEFAULT_NEAR_PLANE,
            far_plane: DEFAULT_FAR_PLANE,
            clamp_vertically: false,
            recenter_pointer: true,
            rotate_button: MouseButton::Left,
            drag: DragState::default(),
        }
    }
}

impl CameraControl for OrbitalCamera {
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
        let angles = -coords::rotation_to_render(self.live_rotation(size));
        Mat4::from_translation(Vec3::new(0.0, 0.0, -self.distance))
            * Mat4::from_quat(compose_rotation(angles))
    }

    fn location(&self, size: ViewportSize) -> Location {
        self.orbit_location(self.live_rotation(size))
    }

    fn rotation(&self, size: ViewportSize) -> Rotation {
        self.live_rotation(size)
    }

    fn button_down(&mut self, button: MouseButton, pointer: Vec2, viewport: &mut dyn Viewport) {
        self.commit(viewport.size());
        if button == self.rotate_button && self.recenter_pointer {
            let center = viewport.screen_center();
            viewport.warp_pointer(center);
            self.drag.press(button, center);
        } else {
            self.drag.press(button, pointer);
        }
    }

    fn button_up(&mut self, button: MouseButton, viewport: &mut dyn Viewport) {
        self.commit(viewport.size());
        self.drag.release(button);
    }

    fn pointer_moved(&mut self, pointer: Vec2, viewport: &mut dyn Viewport) {
        self.drag.pointer_moved(pointer);
        if self.recenter_pointer && self.drag.is_held(self.rotate_button) {
            self.drag.recenter(viewport);
        }
    }

    fn wheel(&mut self, delta: f32, _pointer: Vec2, _viewport: &mut dyn Viewport) {
        self.distance *= 2f32.powf(-delta / 256.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::MouseButtons;
    use crate::viewport::FixedViewport;

    const SIZE: ViewportSize = ViewportSize::new(800, 600);

    fn approx(a: Location, b: Location) -> bool {
        (a.to_vec3() - b.to_vec3()).length() < 1e-4
    }

    fn drag_to(camera: &mut OrbitalCamera, viewport: &mut FixedViewport, target: Vec2) {
        camera.button_down(MouseButton::Left, Vec2::new(10.0, 10.0), viewport);
        camera.pointer_moved(target, viewport);
    }

    #[test]
    fn test_default_location_behind_origin() {
        let camera = OrbitalCamera::new(Rotation::ZERO, 5.0);
        assert!(approx(camera.location(SIZE), Location::new(-5.0, 0.0, 0.0)));
    }

    #[test]
    fn test_distance_scales_location() {
        let mut camera = OrbitalCamera::new(Rotation::new(0.0, 25.0, 40.0), 3.0);
        let near = camera.location(SIZE).length();
        camera.distance *= 2.0;
        let far = camera.location(SIZE).length();
        assert!((far - 2.0 * near).abs() < 1e-4);
    }

    #[test]
    fn test_view_matrix_matches_location() {
        let camera = OrbitalCamera::new(Rotation::new(15.0, 30.0, -60.0), 7.0);
        let eye = camera.view_matrix(SIZE).inverse().transform_point3(Vec3::ZERO);
        let expected = coords::location_to_render(camera.location(SIZE));
        assert!((eye - expected).length() < 1e-4, "{eye:?} vs {expected:?}");
    }

    #[test]
    fn test_button_down_recenters_pointer() {
        let mut viewport = FixedViewport::new(800, 600);
        let mut camera = OrbitalCamera::default();
        camera.button_down(MouseButton::Left, Vec2::new(10.0, 10.0), &mut viewport);
        assert_eq!(viewport.last_warp(), Some(Vec2::new(400.0, 300.0)));
        assert_eq!(camera.drag().pointer(), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_drag_rotates_and_commits() {
        let mut viewport = FixedViewport::new(800, 600);
        let mut camera = OrbitalCamera::default();
        drag_to(&mut camera, &mut viewport, Vec2::new(300.0, 300.0));
        // 100px = 2 * 100 * 90 / 800 度
        assert_eq!(camera.rotation(SIZE).yaw, 22.5);
        assert_eq!(camera.rotation, Rotation::ZERO);
        camera.button_up(MouseButton::Left, &mut viewport);
        assert_eq!(camera.rotation.yaw, 22.5);
        assert_eq!(camera.pointer_delta(), Vec2::ZERO);
    }

    #[test]
    fn test_drag_wraps_yaw() {
        let mut viewport = FixedViewport::new(800, 600);
        let mut camera = OrbitalCamera::new(Rotation::new(0.0, 0.0, 170.0), 4.0);
        drag_to(&mut camera, &mut viewport, Vec2::new(300.0, 300.0));
        assert_eq!(camera.rotation(SIZE).yaw, -167.5);
    }

    #[test]
    fn test_drag_clamps_pitch() {
        let mut viewport = FixedViewport::new(800, 600);
        let mut camera = OrbitalCamera::default();
        drag_to(&mut camera, &mut viewport, Vec2::new(400.0, 700.0));
        assert_eq!(camera.rotation(SIZE).pitch, 90.0);

        let mut unclamped = OrbitalCamera {
            clamp_vertically: true,
            ..OrbitalCamera::default()
        };
        drag_to(&mut unclamped, &mut viewport, Vec2::new(400.0, 700.0));
        assert_eq!(unclamped.rotation(SIZE).pitch, 120.0);
    }

    #[test]
    fn test_other_button_does_not_rotate() {
        let mut viewport = FixedViewport::new(800, 600);
        let mut camera = OrbitalCamera::default();
        camera.button_down(MouseButton::Right, Vec2::new(100.0, 100.0), &mut viewport);
        camera.pointer_moved(Vec2::new(200.0, 100.0), &mut viewport);
        assert_eq!(camera.rotation(SIZE), Rotation::ZERO);
        assert!(viewport.warps.is_empty());
    }

    #[test]
    fn test_press_during_other_drag_does_not_jump() {
        let mut viewport = FixedViewport::new(800, 600);
        let mut camera = OrbitalCamera::default();
        camera.button_down(MouseButton::Right, Vec2::new(100.0, 100.0), &mut viewport);
        camera.button_down(MouseButton::Left, Vec2::new(100.0, 100.0), &mut viewport);
        assert_eq!(camera.rotation(SIZE), Rotation::ZERO);
        camera.pointer_moved(Vec2::new(300.0, 300.0), &mut viewport);
        assert_eq!(camera.rotation(SIZE).yaw, 22.5);
    }

    #[test]
    fn test_other_button_release_keeps_rotation() {
        let mut viewport = FixedViewport::new(800, 600);
        let mut camera = OrbitalCamera::default();
        drag_to(&mut camera, &mut viewport, Vec2::new(300.0, 300.0));
        camera.button_down(MouseButton::Right, Vec2::new(400.0, 300.0), &mut viewport);
        camera.button_up(MouseButton::Right, &mut viewport);
        assert_eq!(camera.rotation(SIZE).yaw, 22.5);

        // 回転ボタンはまだ押されているので続けて回せる
        camera.pointer_moved(Vec2::new(300.0, 300.0), &mut viewport);
        assert_eq!(camera.rotation(SIZE).yaw, 45.0);
        camera.button_up(MouseButton::Left, &mut viewport);
        assert_eq!(camera.rotation.yaw, 45.0);
    }

    #[test]
    fn test_release_outside_keeps_rotation_of_held_button() {
        let mut viewport = FixedViewport::new(800, 600);
        let mut camera = OrbitalCamera::default();
        drag_to(&mut camera, &mut viewport, Vec2::new(300.0, 300.0));
        camera.button_down(MouseButton::Middle, Vec2::new(400.0, 300.0), &mut viewport);
        let held_now = MouseButtons { left: true, ..MouseButtons::NONE };
        camera.release_buttons_not_held(held_now, &mut viewport);
        assert!(camera.drag().is_held(MouseButton::Left));
        assert_eq!(camera.rotation(SIZE).yaw, 22.5);
    }

    #[test]
    fn test_wheel_zoom() {
        let mut viewport = FixedViewport::new(800, 600);
        let mut camera = OrbitalCamera::new(Rotation::ZERO, 8.0);
        camera.wheel(256.0, Vec2::ZERO, &mut viewport);
        assert_eq!(camera.distance, 4.0);
        camera.wheel(-512.0, Vec2::ZERO, &mut viewport);
        assert_eq!(camera.distance, 16.0);
    }

    #[test]
    fn test_from_view_matrix_round_trip() {
        let camera = OrbitalCamera::new(Rotation::new(10.0, 20.0, 30.0), 7.0);
        let restored = OrbitalCamera::from_view_matrix(&camera.view_matrix(SIZE));
        let r = restored.rotation;
        assert!((r.roll - 10.0).abs() < 1e-3, "{r:?}");
        assert!((r.pitch - 20.0).abs() < 1e-3, "{r:?}");
        assert!((r.yaw - 30.0).abs() < 1e-3, "{r:?}");
        assert!((restored.distance - 7.0).abs() < 1e-4);
    }
}
