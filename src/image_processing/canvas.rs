use ab_glyph::Font;
use image::{DynamicImage, RgbImage, RgbaImage, buffer::ConvertBuffer};

use super::formats::jpeg;
use super::resize::resize_image;
use super::types::Dimensions;
use crate::error::CompressError;
use crate::source::Blob;
use crate::stamp::{self, StampLayout};

/// Off-screen render surface for a single compression call
pub struct Canvas {
    surface: RgbaImage,
}

impl Canvas {
    pub fn new(dimensions: Dimensions) -> Self {
        Self {
            surface: RgbaImage::new(dimensions.width, dimensions.height),
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.surface.width(), self.surface.height())
    }

    /// Draw `image` scaled to cover the whole surface
    pub fn draw_image(&mut self, image: &DynamicImage) {
        if self.dimensions().is_empty() {
            return;
        }
        let scaled = resize_image(image, self.dimensions());
        image::imageops::replace(&mut self.surface, &scaled, 0, 0);
    }

    pub fn draw_stamp<F: Font>(
        &mut self,
        text: &str,
        layout: &StampLayout,
        font: &F,
        stroke_opacity: f32,
    ) {
        stamp::draw_timestamp(&mut self.surface, text, layout, font, stroke_opacity);
    }

    /// Export the surface as a JPEG blob. `quality` is on the 0..=1 scale.
    pub fn to_jpeg_blob(&self, quality: f32) -> Result<Blob, CompressError> {
        let dimensions = self.dimensions();
        if dimensions.is_empty() {
            return Err(CompressError::Encode(format!(
                "surface {} has zero area",
                dimensions
            )));
        }

        // JPEG has no alpha channel
        let rgb: RgbImage = self.surface.convert();
        let bytes = jpeg::encode(&rgb, jpeg::quality_percent(quality))
            .map_err(|e| CompressError::Encode(e.to_string()))?;

        if bytes.is_empty() {
            return Err(CompressError::Encode("encoder produced no output".to_string()));
        }

        Ok(Blob::jpeg(bytes))
    }

    #[cfg(test)]
    pub(crate) fn surface(&self) -> &RgbaImage {
        &self.surface
    }
}
