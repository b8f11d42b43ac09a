use crate::image_processing::font::locate_font;
use crate::image_processing::{Canvas, Compressor, Dimensions, apply_watermark, target_dimensions};
use crate::source::Blob;
use crate::stamp::StampLayout;
use crate::{Config, MAX_DIMENSION, WatermarkConfig};
use chrono::{Local, TimeZone};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

fn gray_canvas(width: u32, height: u32) -> Canvas {
    let source = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
        width,
        height,
        Rgba([128, 128, 128, 255]),
    ));
    let mut canvas = Canvas::new(Dimensions::new(width, height));
    canvas.draw_image(&source);
    canvas
}

fn region_changed(image: &RgbaImage, x0: u32, y0: u32, x1: u32, y1: u32) -> bool {
    (y0..y1).any(|y| (x0..x1).any(|x| image.get_pixel(x, y) != &Rgba([128, 128, 128, 255])))
}

#[test]
fn test_layout_uses_output_long_side() {
    let config = WatermarkConfig::default();

    // 3840x2160 is stamped after downscaling, so it matches a 1920x1080 source
    let target = target_dimensions(Dimensions::new(3840, 2160), MAX_DIMENSION);
    let downscaled = StampLayout::new(target.width, target.height, &config);
    let native = StampLayout::new(1920, 1080, &config);

    assert_eq!(downscaled, native);
    assert_eq!(downscaled.font_size, 48.0);
}

#[test]
fn test_unreadable_font_skips_watermark() {
    let dir = tempfile::TempDir::new().unwrap();
    let font_path = dir.path().join("broken.ttf");
    std::fs::write(&font_path, b"garbage").unwrap();

    let config = WatermarkConfig {
        font_path: Some(font_path),
        ..Default::default()
    };
    let mut canvas = gray_canvas(400, 300);

    assert!(!apply_watermark(&mut canvas, "2024/01/01 00:00", &config));
    assert!(!region_changed(canvas.surface(), 0, 0, 400, 300));
}

#[test]
fn test_watermark_lands_in_bottom_right() {
    if locate_font(None).is_none() {
        // Can't test without a system font
        return;
    }

    let config = WatermarkConfig::default();
    let mut canvas = gray_canvas(1920, 1080);

    assert!(apply_watermark(&mut canvas, "2024/01/01 12:34", &config));

    let surface = canvas.surface();
    // Anchor is (1863, 965); the text runs leftwards and upwards from there
    assert!(region_changed(surface, 1300, 880, 1900, 1000));
    assert!(!region_changed(surface, 0, 0, 960, 540));
    // Nothing drawn below the bottom padding except the outline's spill
    assert!(!region_changed(surface, 0, 1000, 1920, 1080));
}

#[tokio::test]
async fn test_compressed_output_carries_watermark() {
    if locate_font(None).is_none() {
        return;
    }

    let img = RgbaImage::from_pixel(1200, 900, Rgba([128, 128, 128, 255]));
    let mut cursor = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(img)
        .write_to(&mut cursor, ImageFormat::Png)
        .unwrap();
    let source = Blob::new(cursor.into_inner(), "image/png");
    let taken_at = Local.with_ymd_and_hms(2025, 12, 31, 23, 59, 0).unwrap();

    let stamped = Compressor::default()
        .compress_at(&source, taken_at)
        .await
        .unwrap();

    let mut plain_config = Config::default();
    plain_config.watermark.enabled = false;
    let plain = Compressor::new(plain_config)
        .compress_at(&source, taken_at)
        .await
        .unwrap();

    assert_ne!(stamped.bytes, plain.bytes);

    let decoded = image::load_from_memory(&stamped.bytes).unwrap().to_rgb8();
    let corner_has_white = (700..1200)
        .flat_map(|x| (750..900).map(move |y| (x, y)))
        .any(|(x, y)| decoded.get_pixel(x, y)[0] > 200);
    let corner_has_dark = (700..1200)
        .flat_map(|x| (750..900).map(move |y| (x, y)))
        .any(|(x, y)| decoded.get_pixel(x, y)[0] < 80);
    assert!(corner_has_white);
    assert!(corner_has_dark);
}
