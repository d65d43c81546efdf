//! Pointer-driven drag of the strip

use crate::host::{CardIndex, PointerId};

/// DOM `button` value of the primary (usually left) button.
pub const PRIMARY_BUTTON: i16 = 0;

/// What the pointer went down on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    Track,
    PlayButton(CardIndex),
    Video(CardIndex),
}

impl PointerTarget {
    /// Play affordances and videos take clicks, not drags.
    pub fn starts_drag(self) -> bool {
        matches!(self, Self::Track)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    pub pointer: PointerId,
    pub button: i16,
    pub client_x: f64,
    pub target: PointerTarget,
}

impl PointerInput {
    pub fn primary(pointer: PointerId, client_x: f64) -> Self {
        Self {
            pointer,
            button: PRIMARY_BUTTON,
            client_x,
            target: PointerTarget::Track,
        }
    }

    pub fn on(mut self, target: PointerTarget) -> Self {
        self.target = target;
        self
    }

    pub fn with_button(mut self, button: i16) -> Self {
        self.button = button;
        self
    }
}

/// An active drag: the offset follows the pointer 1:1 from where it
/// started.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pointer: PointerId,
    start_x: f64,
    start_offset: f64,
}

impl DragSession {
    /// Begin a drag for `input` if it qualifies (primary button on the
    /// bare track).
    pub fn begin(input: &PointerInput, offset: f64) -> Option<Self> {
        if !input.target.starts_drag() || input.button != PRIMARY_BUTTON {
            return None;
        }
        Some(Self {
            pointer: input.pointer,
            start_x: input.client_x,
            start_offset: offset,
        })
    }

    pub fn pointer(&self) -> PointerId {
        self.pointer
    }

    pub fn owns(&self, pointer: PointerId) -> bool {
        self.pointer == pointer
    }

    /// Un-normalized offset for a pointer at `client_x`.
    pub fn offset_at(&self, client_x: f64) -> f64 {
        self.start_offset + (client_x - self.start_x)
    }
}
