use viewer_core::math::Vec2;

use crate::input::{MouseButton, MouseButtons};
use crate::viewport::Viewport;

/// マウスドラッグの一時状態
/// 押下中のボタン、ドラッグ開始時のポインタ位置、最新のポインタ位置を保持する
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragState {
    held: MouseButtons,
    /// ボタン無しでポインタを捕捉中（マウスルック）
    captured: bool,
    origin: Vec2,
    pointer: Vec2,
}

impl DragState {
    pub fn new() -> Self {
        Self::default()
    }

    /// ボタン押下: 現在位置を開始点として記録
    /// ドラッグ中なら呼び出し側が先に姿勢を確定しておく
    pub fn press(&mut self, button: MouseButton, pointer: Vec2) {
        self.origin = pointer;
        self.pointer = pointer;
        self.held.set(button, true);
    }

    /// ボタン解放
    pub fn release(&mut self, button: MouseButton) {
        self.held.set(button, false);
    }

    /// ボタン無しでポインタを捕捉
    pub fn capture(&mut self, pointer: Vec2) {
        self.origin = pointer;
        self.pointer = pointer;
        self.captured = true;
    }

    pub fn release_capture(&mut self) {
        self.captured = false;
    }

    pub fn pointer_moved(&mut self, pointer: Vec2) {
        self.pointer = pointer;
    }

    /// 確定後にドラッグ開始点を現在位置へ合わせる
    pub fn rebase(&mut self) {
        self.origin = self.pointer;
    }

    pub fn held(&self) -> MouseButtons {
        self.held
    }

    pub fn is_held(&self, button: MouseButton) -> bool {
        self.held.is_held(button)
    }

    pub fn is_captured(&self) -> bool {
        self.captured
    }

    pub fn is_dragging(&self) -> bool {
        self.held.any() || self.captured
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    /// ドラッグ開始点からの移動量（X反転）
    /// ドラッグ中でなければゼロ
    pub fn delta(&self) -> Vec2 {
        if !self.is_dragging() {
            return Vec2::ZERO;
        }
        Vec2::new(-(self.pointer.x - self.origin.x), self.pointer.y - self.origin.y)
    }

    /// ポインタを画面中央へ戻す
    /// 開始点も同じだけずらすので、移動量は変わらない
    pub fn recenter(&mut self, viewport: &mut dyn Viewport) {
        let center = viewport.screen_center();
        self.origin -= self.pointer - center;
        self.pointer = center;
        viewport.warp_pointer(center);
    }
}
