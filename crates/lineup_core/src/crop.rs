//! Circular profile-photo cropping
//!
//! The crop dialog shows the upload in a square viewport (object-cover),
//! scaled by `zoom` and shifted by a pan offset in screen pixels. On
//! confirm, a square window of the source image is sampled into a fixed
//! size output and everything outside the inscribed circle is cleared.
//!
//! Sample window, in source pixels:
//! - size   = min(width, height) / zoom
//! - origin = centre - size / 2 - pan / zoom

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

#[derive(Error, Debug)]
pub enum CropError {
    #[error("Failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Failed to encode image: {0}")]
    Encode(#[source] image::ImageError),

    #[error("Image has no pixels")]
    EmptyImage,

    #[error("Not an image data URL")]
    InvalidDataUrl,

    #[error("Invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// Zoom range, output size and viewport of the crop dialog
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropSettings {
    pub min_zoom: f32,
    pub max_zoom: f32,
    /// Edge length of the square output, in pixels
    pub output_size: u32,
    pub viewport_width: f32,
    pub viewport_height: f32,
}

impl Default for CropSettings {
    fn default() -> Self {
        Self {
            min_zoom: 1.0,
            max_zoom: 3.0,
            output_size: 200,
            viewport_width: 256.0,
            viewport_height: 256.0,
        }
    }
}

/// Pan offset in screen pixels at 1× scale
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PanOffset {
    pub x: f32,
    pub y: f32,
}

impl PanOffset {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropRequest {
    pub zoom: f32,
    pub pan: PanOffset,
}

impl Default for CropRequest {
    fn default() -> Self {
        Self { zoom: 1.0, pan: PanOffset::default() }
    }
}

impl CropRequest {
    pub fn new(zoom: f32, pan: PanOffset) -> Self {
        Self { zoom, pan }
    }
}

/// Square window of the source image, in source pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleRect {
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

/// Largest pan along one axis that keeps the zoomed image covering the
/// viewport.
pub fn max_pan(rendered: f32, zoom: f32, container: f32) -> f32 {
    ((rendered * zoom - container) / 2.0).max(0.0)
}

/// Window of the source image sampled into the output.
pub fn sample_rect(image_width: u32, image_height: u32, zoom: f32, pan: PanOffset) -> SampleRect {
    let size = image_width.min(image_height) as f32 / zoom;
    SampleRect {
        x: image_width as f32 / 2.0 - size / 2.0 - pan.x / zoom,
        y: image_height as f32 / 2.0 - size / 2.0 - pan.y / zoom,
        size,
    }
}

impl CropSettings {
    pub fn clamp_zoom(&self, zoom: f32) -> f32 {
        if zoom.is_nan() {
            return self.min_zoom;
        }
        zoom.max(self.min_zoom).min(self.max_zoom)
    }

    /// Size of the image as drawn in the viewport at 1× (object-cover fit)
    pub fn rendered_size(&self, image_width: u32, image_height: u32) -> (f32, f32) {
        if image_width == 0 || image_height == 0 {
            return (0.0, 0.0);
        }
        let scale = (self.viewport_width / image_width as f32).max(self.viewport_height / image_height as f32);
        (image_width as f32 * scale, image_height as f32 * scale)
    }

    pub fn clamp_pan(&self, pan: PanOffset, image_width: u32, image_height: u32, zoom: f32) -> PanOffset {
        let (rendered_w, rendered_h) = self.rendered_size(image_width, image_height);
        let limit_x = max_pan(rendered_w, zoom, self.viewport_width);
        let limit_y = max_pan(rendered_h, zoom, self.viewport_height);
        PanOffset {
            x: clamp_axis(pan.x, limit_x),
            y: clamp_axis(pan.y, limit_y),
        }
    }

    /// Request with zoom and pan pulled into their allowed ranges
    pub fn normalize(&self, request: CropRequest, image_width: u32, image_height: u32) -> CropRequest {
        let zoom = self.clamp_zoom(request.zoom);
        CropRequest { zoom, pan: self.clamp_pan(request.pan, image_width, image_height, zoom) }
    }
}

fn clamp_axis(value: f32, limit: f32) -> f32 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(-limit, limit)
}

/// Sample `request`'s window into a square output with a circular mask.
///
/// Sampling is nearest-neighbour; source coordinates past the image edge
/// repeat the edge pixel.
pub fn render_circular(source: &RgbaImage, request: CropRequest, settings: &CropSettings) -> Result<RgbaImage, CropError> {
    let (width, height) = source.dimensions();
    if width == 0 || height == 0 {
        return Err(CropError::EmptyImage);
    }

    let request = settings.normalize(request, width, height);
    let rect = sample_rect(width, height, request.zoom, request.pan);
    let size = settings.output_size;
    let step = rect.size / size as f32;
    let radius = size as f32 / 2.0;

    let output = RgbaImage::from_fn(size, size, |ox, oy| {
        let cx = ox as f32 + 0.5 - radius;
        let cy = oy as f32 + 0.5 - radius;
        if cx * cx + cy * cy > radius * radius {
            return Rgba([0, 0, 0, 0]);
        }

        let sx = (rect.x + (ox as f32 + 0.5) * step).floor().clamp(0.0, (width - 1) as f32) as u32;
        let sy = (rect.y + (oy as f32 + 0.5) * step).floor().clamp(0.0, (height - 1) as f32) as u32;
        *source.get_pixel(sx, sy)
    });

    Ok(output)
}

/// Decode an uploaded image, crop it and return a PNG data URL.
///
/// Nothing is returned on failure, so callers never store a partial image.
pub fn crop_profile_photo(bytes: &[u8], request: CropRequest, settings: &CropSettings) -> Result<String, CropError> {
    let decoded = image::load_from_memory(bytes).map_err(CropError::Decode)?;
    let source = decoded.to_rgba8();
    let cropped = render_circular(&source, request, settings)?;

    let mut png = Vec::new();
    DynamicImage::ImageRgba8(cropped)
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(CropError::Encode)?;

    debug!(
        source_width = source.width(),
        source_height = source.height(),
        zoom = request.zoom,
        bytes = png.len(),
        "profile photo cropped"
    );

    Ok(format!("{}{}", PNG_DATA_URL_PREFIX, STANDARD.encode(&png)))
}

/// Raw bytes behind an `data:image/...;base64,` reference
pub fn decode_data_url(url: &str) -> Result<Vec<u8>, CropError> {
    let rest = url.strip_prefix("data:image/").ok_or(CropError::InvalidDataUrl)?;
    let (_, payload) = rest.split_once(";base64,").ok_or(CropError::InvalidDataUrl)?;
    Ok(STANDARD.decode(payload)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes(image: RgbaImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(image)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    /// Left half red, right half blue
    fn split_image(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, _| {
            if x < width / 2 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 0, 255, 255])
            }
        })
    }

    #[test]
    fn test_sample_rect_centered_at_unit_zoom() {
        let rect = sample_rect(400, 300, 1.0, PanOffset::default());
        assert_eq!(rect, SampleRect { x: 50.0, y: 0.0, size: 300.0 });
    }

    #[test]
    fn test_sample_rect_zoom_and_pan() {
        let rect = sample_rect(300, 300, 2.0, PanOffset::new(20.0, -10.0));
        assert_eq!(rect.size, 150.0);
        assert_eq!(rect.x, 75.0 - 10.0);
        assert_eq!(rect.y, 75.0 + 5.0);
    }

    #[test]
    fn test_sample_rect_deterministic() {
        let pan = PanOffset::new(13.5, 7.25);
        assert_eq!(sample_rect(640, 480, 1.7, pan), sample_rect(640, 480, 1.7, pan));
    }

    #[test]
    fn test_max_pan() {
        assert_eq!(max_pan(256.0, 1.0, 256.0), 0.0);
        assert_eq!(max_pan(256.0, 2.0, 256.0), 128.0);
        assert_eq!(max_pan(100.0, 1.0, 256.0), 0.0);
    }

    #[test]
    fn test_normalize_clamps_zoom_and_pan() {
        let settings = CropSettings::default();
        let request = settings.normalize(CropRequest::new(5.0, PanOffset::new(-999.0, 40.0)), 512, 256);

        assert_eq!(request.zoom, 3.0);
        // rendered 512x256, zoomed 1536x768
        assert_eq!(request.pan.x, -640.0);
        assert_eq!(request.pan.y, 40.0);

        let low = settings.normalize(CropRequest::new(0.2, PanOffset::new(50.0, 50.0)), 256, 256);
        assert_eq!(low.zoom, 1.0);
        assert_eq!(low.pan, PanOffset::default());
    }

    #[test]
    fn test_render_circular_masks_corners() {
        let settings = CropSettings::default();
        let source = RgbaImage::from_pixel(64, 64, Rgba([10, 200, 30, 255]));
        let out = render_circular(&source, CropRequest::default(), &settings).unwrap();

        assert_eq!(out.dimensions(), (200, 200));
        assert_eq!(out.get_pixel(0, 0)[3], 0);
        assert_eq!(out.get_pixel(199, 199)[3], 0);
        assert_eq!(*out.get_pixel(100, 100), Rgba([10, 200, 30, 255]));
    }

    #[test]
    fn test_render_follows_pan() {
        let settings = CropSettings::default();
        let source = split_image(256, 256);

        // pan right by the full allowance shows the left (red) part
        let request = CropRequest::new(2.0, PanOffset::new(128.0, 0.0));
        let out = render_circular(&source, request, &settings).unwrap();
        assert_eq!(*out.get_pixel(100, 100), Rgba([255, 0, 0, 255]));

        let request = CropRequest::new(2.0, PanOffset::new(-128.0, 0.0));
        let out = render_circular(&source, request, &settings).unwrap();
        assert_eq!(*out.get_pixel(100, 100), Rgba([0, 0, 255, 255]));
    }

    #[test]
    fn test_crop_profile_photo_round_trip() {
        let bytes = png_bytes(split_image(40, 30));
        let url = crop_profile_photo(&bytes, CropRequest::default(), &CropSettings::default()).unwrap();

        assert!(url.starts_with(PNG_DATA_URL_PREFIX));
        let decoded = image::load_from_memory(&decode_data_url(&url).unwrap()).unwrap();
        assert_eq!(decoded.width(), 200);
        assert_eq!(decoded.height(), 200);
    }

    #[test]
    fn test_crop_rejects_garbage() {
        let result = crop_profile_photo(b"not an image", CropRequest::default(), &CropSettings::default());
        assert!(matches!(result, Err(CropError::Decode(_))));
    }

    #[test]
    fn test_decode_data_url_rejects_other_schemes() {
        assert!(matches!(decode_data_url("https://example.com/a.png"), Err(CropError::InvalidDataUrl)));
        assert!(matches!(decode_data_url("data:image/png;base64,@@@"), Err(CropError::Base64(_))));
    }
}
