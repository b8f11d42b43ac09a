use tracing::{debug, warn};

use super::canvas::Canvas;
use super::font::{load_font, locate_font};
use crate::WatermarkConfig;
use crate::stamp::StampLayout;

/// Burn the timestamp into the canvas. Returns false when it had to be skipped.
pub fn apply_watermark(canvas: &mut Canvas, text: &str, config: &WatermarkConfig) -> bool {
    let Some(font_path) = locate_font(config.font_path.as_deref()) else {
        warn!("No usable watermark font found, skipping timestamp");
        return false;
    };

    let font = match load_font(&font_path) {
        Ok(font) => font,
        Err(e) => {
            warn!("Failed to load watermark font {:?}: {}", font_path, e);
            return false;
        }
    };

    let dimensions = canvas.dimensions();
    let layout = StampLayout::new(dimensions.width, dimensions.height, config);
    debug!(
        "Stamping {:?} at ({}, {}) with {}px font from {:?}",
        text, layout.anchor_x, layout.anchor_y, layout.font_size, font_path
    );

    canvas.draw_stamp(text, &layout, &font, config.stroke_opacity);
    true
}
