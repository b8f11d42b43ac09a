use crate::error::CompressError;
use crate::image_processing::{Compressor, compress_image};
use crate::source::Blob;
use crate::Config;
use chrono::{Local, TimeZone};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::io::Cursor;
use std::path::PathBuf;

fn png_blob(width: u32, height: u32) -> Blob {
    let img = RgbImage::from_pixel(width, height, Rgb([120u8, 140, 160]));
    let mut cursor = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img)
        .write_to(&mut cursor, ImageFormat::Png)
        .unwrap();
    Blob::new(cursor.into_inner(), "image/png")
}

fn decoded_size(blob: &Blob) -> (u32, u32) {
    let img = image::load_from_memory_with_format(&blob.bytes, ImageFormat::Jpeg).unwrap();
    (img.width(), img.height())
}

#[tokio::test]
async fn test_full_hd_is_kept() {
    let blob = compress_image(&png_blob(1920, 1080)).await.unwrap();
    assert_eq!(blob.mime_type, "image/jpeg");
    assert_eq!(decoded_size(&blob), (1920, 1080));
}

#[tokio::test]
async fn test_4k_is_downscaled() {
    let blob = compress_image(&png_blob(3840, 2160)).await.unwrap();
    assert_eq!(decoded_size(&blob), (1920, 1080));
}

#[tokio::test]
async fn test_small_image_is_not_upscaled() {
    let blob = compress_image(&png_blob(800, 600)).await.unwrap();
    assert_eq!(decoded_size(&blob), (800, 600));
}

#[tokio::test]
async fn test_portrait_is_downscaled() {
    let blob = compress_image(&png_blob(1500, 3000)).await.unwrap();
    assert_eq!(decoded_size(&blob), (960, 1920));
}

#[tokio::test]
async fn test_zero_byte_input_is_a_decode_error() {
    let empty = Blob::new(Vec::new(), "image/jpeg");
    let err = compress_image(&empty).await.unwrap_err();
    assert!(matches!(err, CompressError::Decode(_)));
    assert!(err.to_string().starts_with("Image load failed"));
}

#[tokio::test]
async fn test_non_image_input_is_a_decode_error() {
    let text = Blob::new(b"this is not an image at all".to_vec(), "text/plain");
    let err = compress_image(&text).await.unwrap_err();
    assert!(matches!(err, CompressError::Decode(_)));
}

#[tokio::test]
async fn test_truncated_png_is_a_decode_error() {
    let mut blob = png_blob(64, 64);
    blob.bytes.truncate(40);
    let err = compress_image(&blob).await.unwrap_err();
    assert!(matches!(err, CompressError::Decode(_)));
}

#[tokio::test]
async fn test_missing_file_is_a_read_error() {
    let path = PathBuf::from("/nonexistent/photo.jpg");
    let err = compress_image(&path).await.unwrap_err();
    assert!(matches!(err, CompressError::Read(_)));
}

#[tokio::test]
async fn test_custom_max_dimension() {
    let mut config = Config::default();
    config.compress.max_dimension = 500;
    config.watermark.enabled = false;

    let blob = Compressor::new(config)
        .compress(&png_blob(1000, 400))
        .await
        .unwrap();
    assert_eq!(decoded_size(&blob), (500, 200));
}

#[tokio::test]
async fn test_same_timestamp_gives_same_output() {
    let compressor = Compressor::default();
    let source = png_blob(640, 480);
    let taken_at = Local.with_ymd_and_hms(2024, 6, 1, 8, 30, 0).unwrap();

    let first = compressor.compress_at(&source, taken_at).await.unwrap();
    let second = compressor.compress_at(&source, taken_at).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_concurrent_calls_are_independent() {
    let compressor = Compressor::default();
    let small = png_blob(300, 200);
    let large = png_blob(2400, 1200);

    let (a, b) = tokio::join!(compressor.compress(&small), compressor.compress(&large));

    assert_eq!(decoded_size(&a.unwrap()), (300, 200));
    assert_eq!(decoded_size(&b.unwrap()), (1920, 960));
}
