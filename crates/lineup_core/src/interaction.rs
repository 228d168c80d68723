//! Drag / touch gesture state for moving players on the field
//!
//! A gesture is begin → zero or more hovers → release (or cancel). The
//! session owns the id of the dragged player so the release handler does
//! not need to look anything up in the rendered scene.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::field::{FieldPos, FieldRect};

/// Pointer or touch location in screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerPos {
    pub x: f32,
    pub y: f32,
}

impl PointerPos {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Final position for the dragged player, in stored coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragCommit {
    pub player_id: String,
    pub position: FieldPos,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DragSession {
    player_id: Option<String>,
    /// Last hover position, in display coordinates
    preview: Option<FieldPos>,
}

/// Pointer → clamped display position on the field.
pub fn pointer_to_field(pointer: PointerPos, rect: &FieldRect) -> Option<FieldPos> {
    rect.to_percent(pointer.x, pointer.y).map(FieldPos::clamp_inset)
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start dragging a player. A gesture already in progress is replaced.
    pub fn begin(&mut self, player_id: impl Into<String>) {
        let player_id = player_id.into();
        debug!(player = %player_id, "drag started");
        self.player_id = Some(player_id);
        self.preview = None;
    }

    pub fn is_active(&self) -> bool {
        self.player_id.is_some()
    }

    pub fn player_id(&self) -> Option<&str> {
        self.player_id.as_deref()
    }

    /// Transient marker position while the pointer moves. Nothing is
    /// committed to the team.
    pub fn hover(&mut self, pointer: PointerPos, rect: &FieldRect) -> Option<FieldPos> {
        if !self.is_active() {
            return None;
        }
        let pos = pointer_to_field(pointer, rect)?;
        self.preview = Some(pos);
        Some(pos)
    }

    /// Latest hover position in display coordinates
    pub fn preview(&self) -> Option<FieldPos> {
        self.preview
    }

    /// Finish the gesture at `pointer`.
    ///
    /// The release point is clamped into the inset box, never rejected.
    /// With `rotated` set the drawn y is mapped back to the stored y. The
    /// session is cleared either way.
    pub fn release(&mut self, pointer: PointerPos, rect: &FieldRect, rotated: bool) -> Option<DragCommit> {
        let player_id = self.player_id.take()?;
        self.preview = None;

        let Some(display) = pointer_to_field(pointer, rect) else {
            debug!(player = %player_id, "drag dropped on degenerate field rect");
            return None;
        };

        Some(DragCommit { player_id, position: display.from_display(rotated) })
    }

    pub fn cancel(&mut self) {
        self.player_id = None;
        self.preview = None;
    }
}
