use image::{DynamicImage, RgbaImage, imageops::FilterType};

use super::types::Dimensions;

/// Bound the long side to `max_dimension`, preserving aspect ratio. Never upscales.
///
/// The long side lands exactly on `max_dimension`; the short side is scaled by the
/// same factor and truncated.
pub fn target_dimensions(source: Dimensions, max_dimension: u32) -> Dimensions {
    let Dimensions { width, height } = source;

    if source.long_side() <= max_dimension {
        return source;
    }

    // Integer math keeps exact ratios (3024x4032 -> 1440x1920) from landing a pixel short
    let scale_short = |short: u32, long: u32| (short as u64 * max_dimension as u64 / long as u64) as u32;

    if width > height {
        Dimensions::new(max_dimension, scale_short(height, width))
    } else {
        Dimensions::new(scale_short(width, height), max_dimension)
    }
}

/// Scale the raster to exactly `dimensions`
pub fn resize_image(image: &DynamicImage, dimensions: Dimensions) -> RgbaImage {
    let rgba = image.to_rgba8();

    // Only resize if dimensions are different
    if rgba.width() == dimensions.width && rgba.height() == dimensions.height {
        rgba
    } else {
        image::imageops::resize(
            &rgba,
            dimensions.width,
            dimensions.height,
            FilterType::Lanczos3,
        )
    }
}
