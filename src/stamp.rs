use ab_glyph::{Font, PxScale, ScaleFont};
use chrono::{DateTime, Local};
use chrono::format::{Item, StrftimeItems};
use image::{GrayImage, Luma, Rgb, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};
use serde::{Deserialize, Serialize};

use crate::WatermarkConfig;

const STROKE_COLOR: Rgb<u8> = Rgb([0, 0, 0]);
const FILL_COLOR: Rgb<u8> = Rgb([255, 255, 255]);

/// How far the timestamp sits from the bottom-right corner, as fractions of the long side
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum PaddingPolicy {
    /// Separate horizontal and vertical insets
    Independent { x_ratio: f64, y_ratio: f64 },
    /// One inset used for both axes
    Uniform { ratio: f64 },
}

impl PaddingPolicy {
    pub const INDEPENDENT: Self = Self::Independent {
        x_ratio: 0.03,
        y_ratio: 0.06,
    };
    pub const UNIFORM: Self = Self::Uniform { ratio: 0.035 };

    /// Returns `(padding_x, padding_y)` in pixels
    pub fn padding(&self, long_side: u32) -> (u32, u32) {
        let inset = |ratio: f64| (long_side as f64 * ratio).floor() as u32;
        match *self {
            Self::Independent { x_ratio, y_ratio } => (inset(x_ratio), inset(y_ratio)),
            Self::Uniform { ratio } => (inset(ratio), inset(ratio)),
        }
    }

    pub fn is_valid(&self) -> bool {
        match *self {
            Self::Independent { x_ratio, y_ratio } => x_ratio >= 0.0 && y_ratio >= 0.0,
            Self::Uniform { ratio } => ratio >= 0.0,
        }
    }
}

impl Default for PaddingPolicy {
    fn default() -> Self {
        Self::INDEPENDENT
    }
}

/// Geometry of the timestamp for one output size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StampLayout {
    pub font_size: f64,
    pub padding_x: u32,
    pub padding_y: u32,
    /// Bottom-right corner the text is aligned to
    pub anchor_x: i32,
    pub anchor_y: i32,
    pub stroke_width: f64,
}

impl StampLayout {
    pub fn new(width: u32, height: u32, config: &WatermarkConfig) -> Self {
        let long_side = width.max(height);
        let font_size = font_size_for(long_side, config.min_font_size, config.font_size_ratio);
        let (padding_x, padding_y) = config.padding.padding(long_side);

        Self {
            font_size,
            padding_x,
            padding_y,
            anchor_x: width as i32 - padding_x as i32,
            anchor_y: height as i32 - padding_y as i32,
            stroke_width: (font_size / 8.0).max(config.min_stroke_width),
        }
    }
}

pub fn font_size_for(long_side: u32, min_font_size: f64, ratio: f64) -> f64 {
    (long_side as f64 * ratio).floor().max(min_font_size)
}

pub fn format_timestamp(at: &DateTime<Local>, format: &str) -> String {
    at.format(format).to_string()
}

pub fn is_valid_timestamp_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

/// Burn `text` into the image: a translucent black outline, then white fill on top.
pub fn draw_timestamp<F: Font>(
    image: &mut RgbaImage,
    text: &str,
    layout: &StampLayout,
    font: &F,
    stroke_opacity: f32,
) {
    let scale = PxScale::from(layout.font_size as f32);
    let scaled_font = font.as_scaled(scale);
    let line_height = (scaled_font.ascent() - scaled_font.descent()).ceil() as i32;
    let (text_width, _) = text_size(scale, font, text);

    // Right/bottom alignment at the anchor
    let text_x = layout.anchor_x - text_width as i32;
    let text_y = layout.anchor_y - line_height;

    let radius = layout.stroke_width / 2.0;
    let margin = radius.ceil() as i32 + 2;
    let mask_width = (text_width as i32 + 2 * margin).max(1) as u32;
    let mask_height = (line_height + 2 * margin).max(1) as u32;

    let mut stroke_mask = GrayImage::new(mask_width, mask_height);
    for (dx, dy) in disk_offsets(radius) {
        draw_text_mut(
            &mut stroke_mask,
            Luma([255u8]),
            margin + dx,
            margin + dy,
            scale,
            font,
            text,
        );
    }

    let mut fill_mask = GrayImage::new(mask_width, mask_height);
    draw_text_mut(
        &mut fill_mask,
        Luma([255u8]),
        margin,
        margin,
        scale,
        font,
        text,
    );

    let origin = (text_x - margin, text_y - margin);
    blend_mask(image, &stroke_mask, origin, STROKE_COLOR, stroke_opacity);
    blend_mask(image, &fill_mask, origin, FILL_COLOR, 1.0);
}

/// Integer offsets covering a disk; stamping a glyph at each gives a round-joined outline
fn disk_offsets(radius: f64) -> Vec<(i32, i32)> {
    let reach = radius.ceil() as i32;
    let limit = radius * radius + 1e-6;
    let mut offsets = Vec::new();
    for dy in -reach..=reach {
        for dx in -reach..=reach {
            if (dx * dx + dy * dy) as f64 <= limit {
                offsets.push((dx, dy));
            }
        }
    }
    offsets
}

/// Source-over composite of a solid color through a coverage mask placed at `origin`.
fn blend_mask(
    image: &mut RgbaImage,
    mask: &GrayImage,
    origin: (i32, i32),
    color: Rgb<u8>,
    opacity: f32,
) {
    let (width, height) = (image.width() as i32, image.height() as i32);

    for (mx, my, coverage) in mask.enumerate_pixels() {
        if coverage[0] == 0 {
            continue;
        }

        let x = origin.0 + mx as i32;
        let y = origin.1 + my as i32;
        if x < 0 || y < 0 || x >= width || y >= height {
            continue;
        }

        let alpha = opacity * coverage[0] as f32 / 255.0;
        let pixel = image.get_pixel_mut(x as u32, y as u32);
        for channel in 0..3 {
            let base = pixel[channel] as f32;
            pixel[channel] = (base + (color[channel] as f32 - base) * alpha).round() as u8;
        }
        let base_alpha = pixel[3] as f32;
        pixel[3] = (base_alpha + (255.0 - base_alpha) * alpha).round() as u8;
    }
}
