//! Platform-agnostic input model.
//!
//! The host window translates its native events into [`InputEvent`] values;
//! pointer positions are control-local pixels with the origin top-left.

use serde::{Deserialize, Serialize};
use viewer_core::math::Vec2;

/// Platform-agnostic mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    /// Primary (left) mouse button.
    Left,
    /// Secondary (right) mouse button.
    Right,
    /// Middle mouse button (wheel click).
    Middle,
}

/// Set of held mouse buttons, each tracked independently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MouseButtons {
    pub left: bool,
    pub right: bool,
    pub middle: bool,
}

impl MouseButtons {
    pub const NONE: Self = Self {
        left: false,
        right: false,
        middle: false,
    };

    pub const ALL: [MouseButton; 3] = [MouseButton::Left, MouseButton::Right, MouseButton::Middle];

    pub fn is_held(&self, button: MouseButton) -> bool {
        match button {
            MouseButton::Left => self.left,
            MouseButton::Right => self.right,
            MouseButton::Middle => self.middle,
        }
    }

    pub fn set(&mut self, button: MouseButton, held: bool) {
        match button {
            MouseButton::Left => self.left = held,
            MouseButton::Right => self.right = held,
            MouseButton::Middle => self.middle = held,
        }
    }

    pub fn any(&self) -> bool {
        self.left || self.right || self.middle
    }

    /// Buttons held in `self` but not in `other`
    pub fn held_but_not_in(&self, other: &MouseButtons) -> impl Iterator<Item = MouseButton> + use<> {
        let (this, other) = (*self, *other);
        Self::ALL
            .into_iter()
            .filter(move |b| this.is_held(*b) && !other.is_held(*b))
    }
}

/// Keys that drive free-look movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveKey {
    Forward,
    Back,
    Left,
    Right,
}

/// Held state of the movement keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveKeys {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveKeys {
    pub fn set(&mut self, key: MoveKey, held: bool) {
        match key {
            MoveKey::Forward => self.forward = held,
            MoveKey::Back => self.back = held,
            MoveKey::Left => self.left = held,
            MoveKey::Right => self.right = held,
        }
    }

    /// +1 forward, -1 back, 0 when neither or both
    pub fn longitudinal(&self) -> f32 {
        (self.forward as i8 - self.back as i8) as f32
    }

    /// +1 left, -1 right, 0 when neither or both
    pub fn lateral(&self) -> f32 {
        (self.left as i8 - self.right as i8) as f32
    }
}

/// Snapshot of pointer and keyboard state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputState {
    /// Pointer position in control-local pixels.
    pub pointer: Vec2,
    pub buttons: MouseButtons,
    pub keys: MoveKeys,
}

/// Platform-agnostic input events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Button pressed at a pointer position.
    ButtonDown { button: MouseButton, x: f32, y: f32 },
    /// Button released.
    ButtonUp { button: MouseButton },
    /// Pointer moved to a control-local position.
    PointerMoved { x: f32, y: f32 },
    /// Wheel notches in raw units (one notch is usually 120).
    Wheel { delta: f32 },
    KeyDown(MoveKey),
    KeyUp(MoveKey),
}
