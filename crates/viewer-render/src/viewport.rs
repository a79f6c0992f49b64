//! Viewport contract between cameras and the host surface.

use serde::{Deserialize, Serialize};
use viewer_core::math::Vec2;

/// Viewport dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ViewportSize {
    pub width: u32,
    pub height: u32,
}

impl ViewportSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Zero width or height
    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Width over height, `None` when degenerate
    pub fn aspect(&self) -> Option<f32> {
        if self.is_degenerate() {
            None
        } else {
            Some(self.width as f32 / self.height as f32)
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width as f32 * 0.5, self.height as f32 * 0.5)
    }
}

/// Host surface a camera draws into and steers the pointer of.
pub trait Viewport {
    fn size(&self) -> ViewportSize;

    /// Center of the viewport in the pointer's coordinate space
    fn screen_center(&self) -> Vec2 {
        self.size().center()
    }

    /// Moves the OS pointer to `position`
    fn warp_pointer(&mut self, position: Vec2);
}

/// Viewport without a window, recording pointer warps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FixedViewport {
    pub size: ViewportSize,
    pub warps: Vec<Vec2>,
}

impl FixedViewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: ViewportSize::new(width, height),
            warps: Vec::new(),
        }
    }

    pub fn last_warp(&self) -> Option<Vec2> {
        self.warps.last().copied()
    }
}

impl Viewport for FixedViewport {
    fn size(&self) -> ViewportSize {
        self.size
    }

    fn warp_pointer(&mut self, position: Vec2) {
        self.warps.push(position);
    }
}
