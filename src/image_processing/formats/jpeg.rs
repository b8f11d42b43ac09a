use image::{ExtendedColorType, ImageEncoder, RgbImage, codecs::jpeg::JpegEncoder};
use tracing::debug;

/// Map a 0..=1 quality factor onto the encoder's 1..=100 scale
pub fn quality_percent(quality: f32) -> u8 {
    (quality * 100.0).round().clamp(1.0, 100.0) as u8
}

/// Encode an RGB image as baseline JPEG
pub fn encode(image: &RgbImage, quality: u8) -> Result<Vec<u8>, image::ImageError> {
    let mut buffer = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);
    encoder.write_image(
        image,
        image.width(),
        image.height(),
        ExtendedColorType::Rgb8,
    )?;

    debug!(
        "JPEG encoded {}x{} at quality {}: {} bytes",
        image.width(),
        image.height(),
        quality,
        buffer.len()
    );
    Ok(buffer)
}
