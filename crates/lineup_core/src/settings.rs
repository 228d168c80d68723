//! Field appearance preferences
//!
//! Stored next to the team record. Every field has a serde default so an
//! older or hand-edited settings file still loads.

use image::Rgba;
use serde::{Deserialize, Serialize};

use crate::crop::CropSettings;

pub const MIN_PLAYER_SIZE: u32 = 24;
pub const MAX_PLAYER_SIZE: u32 = 96;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditorSettings {
    #[serde(default)]
    pub appearance: FieldAppearance,
    #[serde(default)]
    pub crop: CropSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldAppearance {
    /// Pitch colour, `#rrggbb`
    #[serde(default = "default_field_color")]
    pub field_color: String,

    /// Marker fill colour, `#rrggbb`
    #[serde(default = "default_marker_color")]
    pub marker_color: String,

    /// Marker diameter in pixels
    #[serde(default = "default_player_size")]
    pub player_size: u32,

    /// Field drawn upside down (presentation only)
    #[serde(default)]
    pub rotated: bool,
}

fn default_field_color() -> String {
    "#450a0a".to_string()
}

fn default_marker_color() -> String {
    "#dc2626".to_string()
}

fn default_player_size() -> u32 {
    48
}

impl Default for FieldAppearance {
    fn default() -> Self {
        Self {
            field_color: default_field_color(),
            marker_color: default_marker_color(),
            player_size: default_player_size(),
            rotated: false,
        }
    }
}

impl FieldAppearance {
    pub fn set_player_size(&mut self, size: u32) {
        self.player_size = size.clamp(MIN_PLAYER_SIZE, MAX_PLAYER_SIZE);
    }

    /// Accepts `#rrggbb` / `rrggbb`; returns false and keeps the old value
    /// otherwise.
    pub fn set_field_color(&mut self, color: &str) -> bool {
        match parse_hex_color(color) {
            Some(_) => {
                self.field_color = normalize_hex(color);
                true
            }
            None => false,
        }
    }

    pub fn set_marker_color(&mut self, color: &str) -> bool {
        match parse_hex_color(color) {
            Some(_) => {
                self.marker_color = normalize_hex(color);
                true
            }
            None => false,
        }
    }

    pub fn field_rgba(&self) -> Rgba<u8> {
        parse_hex_color(&self.field_color).unwrap_or_else(|| parse_or_black(&default_field_color()))
    }

    pub fn marker_rgba(&self) -> Rgba<u8> {
        parse_hex_color(&self.marker_color).unwrap_or_else(|| parse_or_black(&default_marker_color()))
    }
}

fn normalize_hex(color: &str) -> String {
    format!("#{}", color.trim().trim_start_matches('#').to_ascii_lowercase())
}

fn parse_or_black(color: &str) -> Rgba<u8> {
    parse_hex_color(color).unwrap_or(Rgba([0, 0, 0, 255]))
}

/// `#rrggbb` → opaque RGBA
pub fn parse_hex_color(color: &str) -> Option<Rgba<u8>> {
    let hex = color.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Rgba([channel(0)?, channel(2)?, channel(4)?, 255]))
}
