//! Lineup image export
//!
//! Draws the field, its markings and one marker per player onto a
//! phone-portrait canvas. Markers use the displayed position, so a rotated
//! field exports rotated.
//!
//! A marker is a disc showing the profile photo, or the jersey number when
//! there is no photo. A photo that no longer decodes falls back to the
//! player's initial. Every marker carries a jersey badge at its lower right
//! and the player's name underneath. Text uses the 8×8 bitmap font scaled by
//! whole pixels.

use std::io::Cursor;

use font8x8::{UnicodeFonts, BASIC_FONTS, LATIN_FONTS};
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::crop::decode_data_url;
use crate::field::{FieldPos, FieldRect};
use crate::models::{Player, Team};
use crate::save::export_file_stem;
use crate::settings::FieldAppearance;

pub const CANVAS_WIDTH: u32 = 1080;
pub const CANVAS_HEIGHT: u32 = 1920;
/// Field width the marker size preference refers to
const REFERENCE_FIELD_WIDTH: f32 = 400.0;
const LINE_WIDTH: f32 = 4.0;
const GLYPH_SIZE: u32 = 8;

const BACKGROUND: Rgba<u8> = Rgba([24, 24, 27, 255]);
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to encode lineup image: {0}")]
    Encode(#[from] image::ImageError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineupImageExport {
    pub file_name: String,
    #[serde(skip)]
    pub png: Vec<u8>,
}

/// Where the 2:3 field sits on the canvas
pub fn field_rect_on_canvas() -> FieldRect {
    let width = CANVAS_WIDTH as f32 - 120.0;
    let height = width * 1.5;
    FieldRect::new(
        (CANVAS_WIDTH as f32 - width) / 2.0,
        (CANVAS_HEIGHT as f32 - height) / 2.0,
        width,
        height,
    )
}

/// Marker diameter on the canvas for the configured player size
pub fn marker_diameter(appearance: &FieldAppearance, field: &FieldRect) -> f32 {
    appearance.player_size as f32 * field.width / REFERENCE_FIELD_WIDTH
}

pub fn render_lineup(team: &Team, appearance: &FieldAppearance) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(CANVAS_WIDTH, CANVAS_HEIGHT, BACKGROUND);
    let field = field_rect_on_canvas();

    fill_rect(&mut canvas, field.left, field.top, field.width, field.height, appearance.field_rgba());
    draw_markings(&mut canvas, &field);

    let diameter = marker_diameter(appearance, &field);
    for player in &team.players {
        let shown = player.field_pos().display(appearance.rotated);
        draw_marker(&mut canvas, &field, player, shown, diameter, appearance.marker_rgba());
    }

    debug!(players = team.players.len(), rotated = appearance.rotated, "lineup rendered");
    canvas
}

pub fn export_lineup_png(team: &Team, appearance: &FieldAppearance) -> Result<LineupImageExport, RenderError> {
    let canvas = render_lineup(team, appearance);
    let mut png = Vec::new();
    DynamicImage::ImageRgba8(canvas).write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

    let file_name = format!("{}_lineup.png", export_file_stem(team));
    info!(file = %file_name, bytes = png.len(), "lineup image exported");
    Ok(LineupImageExport { file_name, png })
}

fn draw_markings(canvas: &mut RgbaImage, field: &FieldRect) {
    let inset = 16.0;
    let left = field.left + inset;
    let top = field.top + inset;
    let width = field.width - inset * 2.0;
    let height = field.height - inset * 2.0;
    let center_x = field.left + field.width / 2.0;
    let center_y = field.top + field.height / 2.0;

    stroke_rect(canvas, left, top, width, height);
    fill_rect(canvas, left, center_y - LINE_WIDTH / 2.0, width, LINE_WIDTH, WHITE);
    stroke_circle(canvas, center_x, center_y, field.width * 0.16);
    fill_circle(canvas, center_x, center_y, LINE_WIDTH * 1.5, WHITE);

    // Penalty area, six-yard box and spot at each end
    let penalty_w = width * 0.5;
    let penalty_h = height * 0.14;
    let box_w = width * 0.25;
    let box_h = height * 0.06;
    let bottom = top + height;
    stroke_rect(canvas, center_x - penalty_w / 2.0, top, penalty_w, penalty_h);
    stroke_rect(canvas, center_x - penalty_w / 2.0, bottom - penalty_h, penalty_w, penalty_h);
    stroke_rect(canvas, center_x - box_w / 2.0, top, box_w, box_h);
    stroke_rect(canvas, center_x - box_w / 2.0, bottom - box_h, box_w, box_h);
    fill_circle(canvas, center_x, top + penalty_h * 0.75, LINE_WIDTH, WHITE);
    fill_circle(canvas, center_x, bottom - penalty_h * 0.75, LINE_WIDTH, WHITE);
}

fn draw_marker(
    canvas: &mut RgbaImage,
    field: &FieldRect,
    player: &Player,
    shown: FieldPos,
    diameter: f32,
    fill: Rgba<u8>,
) {
    let (cx, cy) = field.to_screen(shown);
    let radius = diameter / 2.0;
    let ring = (diameter * 0.03).max(2.0);
    let jersey = player.jersey_number.to_string();

    match &player.profile_photo {
        None => {
            fill_circle(canvas, cx, cy, radius, fill);
            fill_circle(canvas, cx, cy, radius - ring, WHITE);
            draw_text_centered(canvas, &jersey, cx, cy, text_scale((diameter * 0.25).max(10.0)), fill);
        }
        Some(url) => {
            fill_circle(canvas, cx, cy, radius, WHITE);
            let photo = decode_data_url(url).ok().and_then(|bytes| image::load_from_memory(&bytes).ok());
            match photo {
                Some(photo) => {
                    let size = (diameter - ring * 2.0).max(1.0) as u32;
                    let scaled = imageops::resize(&photo.to_rgba8(), size, size, FilterType::Triangle);
                    paste_circle(canvas, &scaled, cx, cy);
                }
                None => {
                    fill_circle(canvas, cx, cy, radius - ring, fill);
                    let initial = player.initial().to_string();
                    draw_text_centered(canvas, &initial, cx, cy, text_scale((diameter * 0.25).max(10.0)), WHITE);
                }
            }
        }
    }

    // Jersey badge
    let badge_radius = (diameter * 0.175).max(8.0);
    let (bx, by) = (cx + radius * 0.7, cy + radius * 0.7);
    fill_circle(canvas, bx, by, badge_radius, WHITE);
    fill_circle(canvas, bx, by, badge_radius - ring / 2.0, fill);
    draw_text_centered(canvas, &jersey, bx, by, text_scale((diameter * 0.2).max(8.0)), WHITE);

    let name_top = cy + radius.max(radius * 0.7 + badge_radius) + 4.0;
    draw_text(canvas, &player.name, cx, name_top, text_scale((diameter * 0.22).max(10.0)), WHITE);
}

/// Whole-pixel scale that brings the 8px font closest to `px`
fn text_scale(px: f32) -> u32 {
    ((px / GLYPH_SIZE as f32).round() as u32).max(1)
}

fn glyph(c: char) -> [u8; 8] {
    BASIC_FONTS
        .get(c)
        .or_else(|| LATIN_FONTS.get(c))
        .or_else(|| BASIC_FONTS.get('?'))
        .unwrap_or([0; 8])
}

fn draw_text_centered(canvas: &mut RgbaImage, text: &str, cx: f32, cy: f32, scale: u32, color: Rgba<u8>) {
    let height = (GLYPH_SIZE * scale) as f32;
    draw_text(canvas, text, cx, cy - height / 2.0, scale, color);
}

/// One line of text, horizontally centred on `cx`
fn draw_text(canvas: &mut RgbaImage, text: &str, cx: f32, top: f32, scale: u32, color: Rgba<u8>) {
    let advance = (GLYPH_SIZE * scale) as f32;
    let width = text.chars().count() as f32 * advance;
    let left = cx - width / 2.0;
    let cell = scale as f32;

    for (i, c) in text.chars().enumerate() {
        let origin = left + i as f32 * advance;
        for (row, bits) in glyph(c).iter().enumerate() {
            for col in 0..GLYPH_SIZE {
                // bit 0 is the leftmost column
                if *bits & (1u8 << col) != 0 {
                    let x = origin + col as f32 * cell;
                    let y = top + row as f32 * cell;
                    fill_rect(canvas, x, y, cell, cell, color);
                }
            }
        }
    }
}

fn blend(canvas: &mut RgbaImage, x: i64, y: i64, color: Rgba<u8>) {
    if x < 0 || y < 0 || x >= canvas.width() as i64 || y >= canvas.height() as i64 {
        return;
    }
    let alpha = color[3] as u32;
    if alpha == 0 {
        return;
    }
    let pixel = canvas.get_pixel_mut(x as u32, y as u32);
    for c in 0..3 {
        pixel[c] = ((color[c] as u32 * alpha + pixel[c] as u32 * (255 - alpha)) / 255) as u8;
    }
    pixel[3] = 255;
}

fn fill_rect(canvas: &mut RgbaImage, left: f32, top: f32, width: f32, height: f32, color: Rgba<u8>) {
    let x0 = left.round() as i64;
    let y0 = top.round() as i64;
    let x1 = (left + width).round() as i64;
    let y1 = (top + height).round() as i64;
    for y in y0..y1 {
        for x in x0..x1 {
            blend(canvas, x, y, color);
        }
    }
}

fn stroke_rect(canvas: &mut RgbaImage, left: f32, top: f32, width: f32, height: f32) {
    fill_rect(canvas, left, top, width, LINE_WIDTH, WHITE);
    fill_rect(canvas, left, top + height - LINE_WIDTH, width, LINE_WIDTH, WHITE);
    fill_rect(canvas, left, top, LINE_WIDTH, height, WHITE);
    fill_rect(canvas, left + width - LINE_WIDTH, top, LINE_WIDTH, height, WHITE);
}

fn circle_span(cx: f32, cy: f32, radius: f32) -> (i64, i64, i64, i64) {
    (
        (cx - radius).floor() as i64,
        (cx + radius).ceil() as i64,
        (cy - radius).floor() as i64,
        (cy + radius).ceil() as i64,
    )
}

fn fill_circle(canvas: &mut RgbaImage, cx: f32, cy: f32, radius: f32, color: Rgba<u8>) {
    let (x0, x1, y0, y1) = circle_span(cx, cy, radius);
    for y in y0..=y1 {
        for x in x0..=x1 {
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            if dx * dx + dy * dy <= radius * radius {
                blend(canvas, x, y, color);
            }
        }
    }
}

fn stroke_circle(canvas: &mut RgbaImage, cx: f32, cy: f32, radius: f32) {
    let inner = radius - LINE_WIDTH;
    let (x0, x1, y0, y1) = circle_span(cx, cy, radius);
    for y in y0..=y1 {
        for x in x0..=x1 {
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            let d2 = dx * dx + dy * dy;
            if d2 <= radius * radius && d2 >= inner * inner {
                blend(canvas, x, y, WHITE);
            }
        }
    }
}

fn paste_circle(canvas: &mut RgbaImage, photo: &RgbaImage, cx: f32, cy: f32) {
    let radius = photo.width() as f32 / 2.0;
    let left = (cx - radius).round() as i64;
    let top = (cy - radius).round() as i64;
    for (px, py, color) in photo.enumerate_pixels() {
        let dx = px as f32 + 0.5 - radius;
        let dy = py as f32 + 0.5 - radius;
        if dx * dx + dy * dy <= radius * radius {
            blend(canvas, left + px as i64, top + py as i64, *color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crop::{crop_profile_photo, CropRequest, CropSettings};
    use crate::models::PlayerDraft;

    fn team_with_player_at(x: f32, y: f32) -> Team {
        let mut team = Team::default();
        let mut draft = PlayerDraft::new("Ana", "Pivot", 9);
        draft.x = x;
        draft.y = y;
        team.players.push(Player::from_draft(draft));
        team
    }

    /// Marker centre and radius on the canvas
    fn marker_geometry(team: &Team, appearance: &FieldAppearance) -> (f32, f32, f32) {
        let field = field_rect_on_canvas();
        let shown = team.players[0].field_pos().display(appearance.rotated);
        let (cx, cy) = field.to_screen(shown);
        (cx, cy, marker_diameter(appearance, &field) / 2.0)
    }

    /// Pixel just inside the marker's outer edge, right of centre
    fn ring_pixel(canvas: &RgbaImage, cx: f32, cy: f32, radius: f32) -> Rgba<u8> {
        *canvas.get_pixel((cx + radius - 2.0) as u32, cy as u32)
    }

    fn region(canvas: &RgbaImage, x0: f32, y0: f32, x1: f32, y1: f32) -> Vec<Rgba<u8>> {
        let mut pixels = Vec::new();
        for y in y0 as u32..y1 as u32 {
            for x in x0 as u32..x1 as u32 {
                pixels.push(*canvas.get_pixel(x, y));
            }
        }
        pixels
    }

    fn count(pixels: &[Rgba<u8>], color: Rgba<u8>) -> usize {
        pixels.iter().filter(|p| **p == color).count()
    }

    #[test]
    fn test_canvas_is_phone_portrait() {
        let canvas = render_lineup(&Team::default(), &FieldAppearance::default());
        assert_eq!(canvas.dimensions(), (CANVAS_WIDTH, CANVAS_HEIGHT));
        assert_eq!(*canvas.get_pixel(5, 5), BACKGROUND);

        let field = field_rect_on_canvas();
        assert_eq!(field.height / field.width, 1.5);
    }

    #[test]
    fn test_marker_drawn_at_player_position() {
        let appearance = FieldAppearance::default();
        let team = team_with_player_at(25.0, 30.0);
        let canvas = render_lineup(&team, &appearance);
        let (cx, cy, radius) = marker_geometry(&team, &appearance);

        assert_eq!(ring_pixel(&canvas, cx, cy, radius), appearance.marker_rgba());
    }

    #[test]
    fn test_rotation_moves_marker_not_player() {
        let mut appearance = FieldAppearance::default();
        appearance.rotated = true;
        let team = team_with_player_at(25.0, 30.0);

        let canvas = render_lineup(&team, &appearance);
        let field = field_rect_on_canvas();
        let (cx, cy) = field.to_screen(FieldPos::new(25.0, 70.0));
        let radius = marker_diameter(&appearance, &field) / 2.0;
        assert_eq!(ring_pixel(&canvas, cx, cy, radius), appearance.marker_rgba());
        assert_eq!(team.players[0].y, 30.0);
    }

    #[test]
    fn test_jersey_number_drawn_inside_marker() {
        let appearance = FieldAppearance::default();
        let mut team = team_with_player_at(25.0, 30.0);
        let (cx, cy, _) = marker_geometry(&team, &appearance);
        let centre = |canvas: &RgbaImage| region(canvas, cx - 20.0, cy - 20.0, cx + 20.0, cy + 20.0);

        team.players[0].jersey_number = 1;
        let one = centre(&render_lineup(&team, &appearance));
        team.players[0].jersey_number = 8;
        let eight = centre(&render_lineup(&team, &appearance));

        assert!(count(&one, appearance.marker_rgba()) > 0);
        assert!(count(&one, WHITE) > 0);
        assert_ne!(one, eight);
    }

    #[test]
    fn test_name_drawn_under_marker() {
        let appearance = FieldAppearance::default();
        let mut team = team_with_player_at(25.0, 30.0);
        let (cx, cy, radius) = marker_geometry(&team, &appearance);
        let below = |canvas: &RgbaImage| region(canvas, cx - 80.0, cy + radius, cx + 80.0, cy + radius + 60.0);

        let named = below(&render_lineup(&team, &appearance));
        team.players[0].name = String::new();
        let unnamed = below(&render_lineup(&team, &appearance));

        assert!(count(&named, WHITE) > count(&unnamed, WHITE));
    }

    #[test]
    fn test_photo_marker_uses_photo_pixels() {
        let source = RgbaImage::from_pixel(32, 32, Rgba([0, 200, 0, 255]));
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(source)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        let url = crop_profile_photo(&bytes, CropRequest::default(), &CropSettings::default()).unwrap();

        let mut team = team_with_player_at(50.0, 50.0);
        team.players[0].profile_photo = Some(url);
        let appearance = FieldAppearance::default();
        let canvas = render_lineup(&team, &appearance);
        let (cx, cy, _) = marker_geometry(&team, &appearance);
        let pixel = *canvas.get_pixel(cx as u32, cy as u32);
        // resampling may shift a channel by a step
        assert!(pixel[0] < 8 && pixel[2] < 8);
        assert!(pixel[1].abs_diff(200) <= 2);
    }

    #[test]
    fn test_broken_photo_shows_initial() {
        let mut team = team_with_player_at(40.0, 60.0);
        team.players[0].profile_photo = Some("data:image/png;base64,AAAA".to_string());
        let appearance = FieldAppearance::default();
        let canvas = render_lineup(&team, &appearance);
        let (cx, cy, radius) = marker_geometry(&team, &appearance);

        assert_eq!(ring_pixel(&canvas, cx, cy, radius), WHITE);
        assert_eq!(*canvas.get_pixel((cx - radius * 0.6) as u32, cy as u32), appearance.marker_rgba());
        let centre = region(&canvas, cx - 16.0, cy - 16.0, cx + 16.0, cy + 16.0);
        assert!(count(&centre, WHITE) > 0);
    }

    #[test]
    fn test_glyph_lookup_falls_back() {
        assert_ne!(glyph('A'), [0; 8]);
        assert_ne!(glyph('é'), [0; 8]);
        assert_eq!(glyph('\u{4e00}'), glyph('?'));
    }

    #[test]
    fn test_text_scale_rounds_to_whole_pixels() {
        assert_eq!(text_scale(4.0), 1);
        assert_eq!(text_scale(25.3), 3);
        assert_eq!(text_scale(28.8), 4);
    }

    #[test]
    fn test_export_png_file_name() {
        let mut team = team_with_player_at(50.0, 50.0);
        team.name = "Blues".to_string();
        let export = export_lineup_png(&team, &FieldAppearance::default()).unwrap();
        assert_eq!(export.file_name, "Blues_lineup.png");
        let decoded = image::load_from_memory(&export.png).unwrap();
        assert_eq!(decoded.width(), CANVAS_WIDTH);
    }
}
