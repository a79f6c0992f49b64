use serde::{Deserialize, Serialize};
use viewer_core::coords;
use viewer_core::math::{Mat4, Vec2, Vec3};
use viewer_core::{Location, Rotation};

use super::{
    compose_rotation, orthographic_projection, CameraControl, DragState, ProjectionKind,
    DEFAULT_FAR_PLANE, DEFAULT_NEAR_PLANE,
};
use crate::input::MouseButton;
use crate::viewport::{Viewport, ViewportSize};

/// ズーム倍率の下限・上限
const MIN_ORTHO_SCALE: f32 = 0.1;
const MAX_ORTHO_SCALE: f32 = 100_000.0;

/// 正射影カメラ
/// ドラッグで平行移動、ホイールでカーソル位置を中心に拡大縮小
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrthographicCamera {
    pub rotation: Rotation,
    /// 確定済みの位置
    pub location: Location,
    /// 縦方向の表示範囲（ワールド単位）
    pub ortho_scale: f32,
    pub near_plane: f32,
    pub far_plane: f32,
    /// 平行移動に使うボタン
    pub pan_button: MouseButton,
    #[serde(skip)]
    drag: DragState,
}

impl OrthographicCamera {
    pub fn new(location: Location, rotation: Rotation) -> Self {
        Self {
            location,
            rotation,
            ..Self::default()
        }
    }

    /// 1ピクセルあたりのワールド単位
    pub fn units_per_pixel(&self, size: ViewportSize) -> f32 {
        if size.height == 0 {
            return 0.0;
        }
        self.ortho_scale / size.height as f32
    }

    /// 画面の右方向・上方向（ワールド空間）
    pub fn screen_axes(&self) -> (Vec3, Vec3) {
        let inverse = compose_rotation(coords::rotation_to_render(self.rotation)).inverse();
        (
            coords::direction_to_world(inverse * Vec3::X),
            coords::direction_to_world(inverse * Vec3::Y),
        )
    }

    /// ドラッグ中の平行移動を反映した位置
    pub fn live_location(&self, size: ViewportSize) -> Location {
        if !self.drag.is_held(self.pan_button) {
            return self.location;
        }
        let delta = self.drag.delta() * self.units_per_pixel(size);
        let (right, up) = self.screen_axes();
        self.location + right * delta.x + up * delta.y
    }

    /// ドラッグ中の平行移動を確定し、開始点を現在位置へ合わせる
    fn commit(&mut self, size: ViewportSize) {
        if self.drag.is_held(self.pan_button) {
            self.location = self.live_location(size);
            log::trace!("orthographic camera: committed location {:?}", self.location);
        }
        self.drag.rebase();
    }

    /// スクリーン座標の下にある投影面上のワールド座標
    pub fn screen_to_world(&self, pointer: Vec2, size: ViewportSize) -> Location {
        let upp = self.units_per_pixel(size);
        let center = size.center();
        let (right, up) = self.screen_axes();
        self.live_location(size)
            + right * ((pointer.x - center.x) * upp)
            + up * (-(pointer.y - center.y) * upp)
    }
}

impl Default for OrthographicCamera {
    fn default() -> Self {
        Self {
            rotation: Rotation::ZERO,
            location: Location::ORIGIN,
            ortho_scale: 64.0,
            near_plane: DEFAULT_NEAR_PLANE,
            far_plane: DEFAULT_FAR_PLANE,
            pan_button: MouseButton::Middle,
            drag: DragState::default(),
        }
    }
}

impl CameraControl for OrthographicCamera {
    fn projection_kind(&self) -> ProjectionKind {
        ProjectionKind::Orthographic
    }

    fn drag(&self) -> &DragState {
        &self.drag
    }

    fn projection_matrix(&self, size: ViewportSize) -> Mat4 {
        orthographic_projection(self.ortho_scale, self.near_plane, self.far_plane, size)
    }

    fn view_matrix(&self, size: ViewportSize) -> Mat4 {
        let angles = coords::rotation_to_render(self.rotation);
        Mat4::from_quat(compose_rotation(angles))
            * Mat4::from_translation(-coords::location_to_render(self.live_location(size)))
    }

    fn location(&self, size: ViewportSize) -> Location {
        self.live_location(size)
    }

    fn rotation(&self, _size: ViewportSize) -> Rotation {
        self.rotation
    }

    fn button_down(&mut self, button: MouseButton, pointer: Vec2, viewport: &mut dyn Viewport) {
        self.commit(viewport.size());
        self.drag.press(button, pointer);
    }

    fn button_up(&mut self, button: MouseButton, viewport: &mut dyn Viewport) {
        self.commit(viewport.size());
        self.drag.release(button);
    }

    fn pointer_moved(&mut self, pointer: Vec2, _viewport: &mut dyn Viewport) {
        self.drag.pointer_moved(pointer);
    }

    /// カーソル下のワールド座標を固定したまま拡大縮小
    fn wheel(&mut self, delta: f32, pointer: Vec2, viewport: &mut dyn Viewport) {
        let size = viewport.size();
        if size.is_degenerate() {
            return;
        }
        let before = self.screen_to_world(pointer, size);
        let zoom = 1.05f32.powf(delta / 40.0);
        self.ortho_scale = (self.ortho_scale / zoom).clamp(MIN_ORTHO_SCALE, MAX_ORTHO_SCALE);
        let after = self.screen_to_world(pointer, size);
        self.location = self.location + (before - after);
    }
}
