//! カメラ
//!
//! 軌道（Orbital）・フリールック（FreeLook）・正射影（Orthographic）の3種類。
//! 共通の振る舞いは [`CameraControl`] に、種類の切り替えは [`Camera`] 列挙型にまとめる。

mod drag;
mod free_look;
mod orbital;
pub mod orientation;
mod orthographic;

pub use drag::DragState;
pub use free_look::FreeLookCamera;
pub use orbital::OrbitalCamera;
pub use orthographic::OrthographicCamera;

use serde::{Deserialize, Serialize};
use viewer_core::math::{Mat4, Quat, Vec2, Vec3};
use viewer_core::{Location, Rotation};

use crate::input::{MouseButton, MouseButtons, MoveKeys};
use crate::viewport::{Viewport, ViewportSize};

/// 既定のニアクリップ面
pub const DEFAULT_NEAR_PLANE: f32 = 0.1;
/// 既定のファークリップ面
pub const DEFAULT_FAR_PLANE: f32 = 1000.0;
/// 既定の垂直視野角（度）
pub const DEFAULT_FOV: f32 = 90.0;

/// 投影の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionKind {
    Perspective,
    Orthographic,
}

/// 全カメラ共通の操作
pub trait CameraControl {
    fn projection_kind(&self) -> ProjectionKind;

    /// ドラッグの一時状態
    fn drag(&self) -> &DragState;

    /// 射影行列（ビューポートが縦横どちらか0なら単位行列）
    fn projection_matrix(&self, size: ViewportSize) -> Mat4;

    /// ドラッグ中の姿勢を反映したビュー行列
    fn view_matrix(&self, size: ViewportSize) -> Mat4;

    /// ワールド空間でのカメラ位置
    fn location(&self, size: ViewportSize) -> Location;

    /// ワールド空間でのカメラ回転（度）
    fn rotation(&self, size: ViewportSize) -> Rotation;

    fn button_down(&mut self, button: MouseButton, pointer: Vec2, viewport: &mut dyn Viewport);

    fn button_up(&mut self, button: MouseButton, viewport: &mut dyn Viewport);

    fn pointer_moved(&mut self, pointer: Vec2, viewport: &mut dyn Viewport);

    /// ホイール（既定では何もしない）
    fn wheel(&mut self, _delta: f32, _pointer: Vec2, _viewport: &mut dyn Viewport) {}

    /// ドラッグ開始点からのポインタ移動量
    fn pointer_delta(&self) -> Vec2 {
        self.drag().delta()
    }

    fn view_projection(&self, size: ViewportSize) -> Mat4 {
        self.projection_matrix(size) * self.view_matrix(size)
    }

    /// コントロール外で離されたボタンを解放する
    fn release_buttons_not_held(&mut self, held_now: MouseButtons, viewport: &mut dyn Viewport) {
        let stale: Vec<_> = self.drag().held().held_but_not_in(&held_now).collect();
        for button in stale {
            log::trace!("camera: {button:?} released outside the viewport");
            self.button_up(button, viewport);
        }
    }
}

/// カメラ（種類ごとの列挙型）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Camera {
    Orbital(OrbitalCamera),
    FreeLook(FreeLookCamera),
    Orthographic(OrthographicCamera),
}

macro_rules! dispatch {
    ($camera:expr, $inner:ident => $body:expr) => {
        match $camera {
            Camera::Orbital($inner) => $body,
            Camera::FreeLook($inner) => $body,
            Camera::Orthographic($inner) => $body,
        }
    };
}

impl Camera {
    /// フリールックカメラならキー入力で移動する
    pub fn move_by(&mut self, dt: f32, keys: MoveKeys, size: ViewportSize) {
        if let Camera::FreeLook(camera) = self {
            camera.move_by(dt, keys, size);
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Camera::Orbital(OrbitalCamera::default())
    }
}

impl From<OrbitalCamera> for Camera {
    fn from(camera: OrbitalCamera) -> Self {
        Camera::Orbital(camera)
    }
}

impl From<FreeLookCamera> for Camera {
    fn from(camera: FreeLookCamera) -> Self {
        Camera::FreeLook(camera)
    }
}

impl From<OrthographicCamera> for Camera {
    fn from(camera: OrthographicCamera) -> Self {
        Camera::Orthographic(camera)
    }
}

impl CameraControl for Camera {
    fn projection_kind(&self) -> ProjectionKind {
        dispatch!(self, c => c.projection_kind())
    }

    fn drag(&self) -> &DragState {
        dispatch!(self, c => c.drag())
    }

    fn projection_matrix(&self, size: ViewportSize) -> Mat4 {
        dispatch!(self, c => c.projection_matrix(size))
    }

    fn view_matrix(&self, size: ViewportSize) -> Mat4 {
        dispatch!(self, c => c.view_matrix(size))
    }

    fn location(&self, size: ViewportSize) -> Location {
        dispatch!(self, c => c.location(size))
    }

    fn rotation(&self, size: ViewportSize) -> Rotation {
        dispatch!(self, c => c.rotation(size))
    }

    fn button_down(&mut self, button: MouseButton, pointer: Vec2, viewport: &mut dyn Viewport) {
        dispatch!(self, c => c.button_down(button, pointer, viewport))
    }

    fn button_up(&mut self, button: MouseButton, viewport: &mut dyn Viewport) {
        dispatch!(self, c => c.button_up(button, viewport))
    }

    fn pointer_moved(&mut self, pointer: Vec2, viewport: &mut dyn Viewport) {
        dispatch!(self, c => c.pointer_moved(pointer, viewport))
    }

    fn wheel(&mut self, delta: f32, pointer: Vec2, viewport: &mut dyn Viewport) {
        dispatch!(self, c => c.wheel(delta, pointer, viewport))
    }
}

/// レンダー空間のオイラー角（度、X・Y・Z軸まわり）から回転を合成
/// 順序は roll * pitch * yaw
pub(crate) fn compose_rotation(angles: Vec3) -> Quat {
    let radians = angles * (std::f32::consts::PI / 180.0);
    let pitch = Quat::from_axis_angle(Vec3::X, radians.x);
    let yaw = Quat::from_axis_angle(Vec3::Y, radians.y);
    let roll = Quat::from_axis_angle(Vec3::Z, radians.z);
    roll * pitch * yaw
}

/// ドラッグ量から回転量（度）を求める
/// 画面幅・高さいっぱいのドラッグで視野角の2倍
pub(crate) fn drag_rotation(delta: Vec2, fov: f32, size: ViewportSize) -> Rotation {
    if size.is_degenerate() {
        return Rotation::ZERO;
    }
    Rotation::new(
        0.0,
        2.0 * delta.y * fov / size.height as f32,
        2.0 * delta.x * fov / size.width as f32,
    )
}

/// ドラッグ後の回転を整える
/// `clamp_vertically` が false のときにピッチを±90度へ制限する（名前と逆の挙動を維持）
pub(crate) fn settle_rotation(rotation: Rotation, clamp_vertically: bool) -> Rotation {
    let rotation = if clamp_vertically {
        rotation
    } else {
        rotation.with_clamped_pitch()
    };
    rotation.normalized()
}

/// 透視投影行列（OpenGLのクリップ規約）
pub fn perspective_projection(fov: f32, near: f32, far: f32, size: ViewportSize) -> Mat4 {
    match size.aspect() {
        Some(aspect) => Mat4::perspective_rh_gl(fov.to_radians(), aspect, near, far),
        None => {
            log::warn!("degenerate viewport {}x{}, using identity projection", size.width, size.height);
            Mat4::IDENTITY
        }
    }
}

/// 正射影行列（`scale` は縦方向の表示範囲）
pub fn orthographic_projection(scale: f32, near: f32, far: f32, size: ViewportSize) -> Mat4 {
    match size.aspect() {
        Some(aspect) => {
            let half_height = scale * 0.5;
            let half_width = half_height * aspect;
            Mat4::orthographic_rh_gl(-half_width, half_width, -half_height, half_height, near, far)
        }
        None => {
            log::warn!("degenerate viewport {}x{}, using identity projection", size.width, size.height);
            Mat4::IDENTITY
        }
    }
}
