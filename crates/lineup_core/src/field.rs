//! Field coordinate model
//!
//! Player positions are stored as percentages of the field container:
//! - x: 0 = left edge, 100 = right edge
//! - y: 0 = top edge, 100 = bottom edge
//!
//! Pointer-driven placement is clamped to the 5..95 inset box so a marker
//! never hangs over the field padding. Formation presets are written
//! verbatim and only need to stay inside 0..100.
//!
//! Rotation is a display transform. The stored y never changes when the
//! field is flipped; only `display()` mirrors it.

use serde::{Deserialize, Serialize};

/// Lower bound for pointer-driven placement (percent)
pub const INSET_MIN: f32 = 5.0;
/// Upper bound for pointer-driven placement (percent)
pub const INSET_MAX: f32 = 95.0;
/// Full field extent (percent)
pub const FIELD_EXTENT: f32 = 100.0;

/// Clamp one axis into the 5..95 inset box.
#[inline]
pub fn clamp_inset(v: f32) -> f32 {
    INSET_MIN.max(INSET_MAX.min(v))
}

/// Mirror a vertical coordinate for a 180° rotated field.
#[inline]
pub fn rotate_y(y: f32, rotated: bool) -> f32 {
    if rotated {
        FIELD_EXTENT - y
    } else {
        y
    }
}

/// Percentage position on the field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldPos {
    pub x: f32,
    pub y: f32,
}

impl FieldPos {
    pub const CENTER: FieldPos = FieldPos { x: 50.0, y: 50.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Both axes clamped to the 5..95 inset box
    pub fn clamp_inset(self) -> Self {
        Self { x: clamp_inset(self.x), y: clamp_inset(self.y) }
    }

    /// Both axes clamped to the full 0..100 field
    pub fn clamp_bounds(self) -> Self {
        Self { x: self.x.clamp(0.0, FIELD_EXTENT), y: self.y.clamp(0.0, FIELD_EXTENT) }
    }

    pub fn is_within_inset(&self) -> bool {
        (INSET_MIN..=INSET_MAX).contains(&self.x) && (INSET_MIN..=INSET_MAX).contains(&self.y)
    }

    pub fn is_within_bounds(&self) -> bool {
        (0.0..=FIELD_EXTENT).contains(&self.x) && (0.0..=FIELD_EXTENT).contains(&self.y)
    }

    /// Position as drawn. Stored coordinates are untouched.
    pub fn display(self, rotated: bool) -> Self {
        Self { x: self.x, y: rotate_y(self.y, rotated) }
    }

    /// Inverse of `display`: a drawn position back to stored coordinates.
    ///
    /// The y mirror is its own inverse, so this is the same mapping.
    pub fn from_display(self, rotated: bool) -> Self {
        self.display(rotated)
    }
}

/// Rendered rectangle of the field container, in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl FieldRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, width, height }
    }

    /// A rectangle with no area cannot map pointer positions.
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0) || !self.left.is_finite() || !self.top.is_finite()
    }

    /// Screen point → unclamped field percentage.
    ///
    /// Returns `None` for a degenerate rectangle.
    pub fn to_percent(&self, screen_x: f32, screen_y: f32) -> Option<FieldPos> {
        if self.is_degenerate() {
            return None;
        }
        Some(FieldPos {
            x: (screen_x - self.left) / self.width * FIELD_EXTENT,
            y: (screen_y - self.top) / self.height * FIELD_EXTENT,
        })
    }

    /// Field percentage → screen point (marker centre).
    pub fn to_screen(&self, pos: FieldPos) -> (f32, f32) {
        (
            self.left + pos.x / FIELD_EXTENT * self.width,
            self.top + pos.y / FIELD_EXTENT * self.height,
        )
    }
}
