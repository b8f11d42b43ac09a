// Image processing - decoding, bounded resizing, timestamp watermarking and JPEG export
mod canvas;
pub mod font;
pub mod formats;
mod resize;
mod types;
mod watermark;

pub use canvas::Canvas;
pub use resize::target_dimensions;
pub use types::Dimensions;
pub use watermark::apply_watermark;

use chrono::{DateTime, Local};
use image::DynamicImage;
use tracing::debug;

use crate::error::CompressError;
use crate::source::{Blob, ReadSource};
use crate::{CompressConfig, Config, WatermarkConfig, stamp};

/// Resizes, watermarks and re-encodes images according to a [`Config`].
#[derive(Debug, Clone, Default)]
pub struct Compressor {
    config: Config,
}

impl Compressor {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Compress `source`, stamping it with the current local time.
    pub async fn compress<S>(&self, source: &S) -> Result<Blob, CompressError>
    where
        S: ReadSource + ?Sized,
    {
        self.compress_at(source, Local::now()).await
    }

    /// Compress `source`, stamping it with `taken_at`.
    pub async fn compress_at<S>(
        &self,
        source: &S,
        taken_at: DateTime<Local>,
    ) -> Result<Blob, CompressError>
    where
        S: ReadSource + ?Sized,
    {
        debug!("Reading image source: {}", source.describe());
        let bytes = source.read_bytes().await?;

        let compress = self.config.compress.clone();
        let watermark = self.config.watermark.clone();

        // Decoding, drawing and encoding are CPU bound
        tokio::task::spawn_blocking(move || {
            process_image(&bytes, &compress, &watermark, &taken_at)
        })
        .await?
    }
}

/// Compress an image with the default settings: 1920px long edge, JPEG quality 0.8.
pub async fn compress_image<S>(source: &S) -> Result<Blob, CompressError>
where
    S: ReadSource + ?Sized,
{
    Compressor::default().compress(source).await
}

fn process_image(
    bytes: &[u8],
    compress: &CompressConfig,
    watermark: &WatermarkConfig,
    taken_at: &DateTime<Local>,
) -> Result<Blob, CompressError> {
    let image = decode_image(bytes)?;

    let source_dimensions = Dimensions::new(image.width(), image.height());
    let target = target_dimensions(source_dimensions, compress.max_dimension);
    debug!("Resizing {} -> {}", source_dimensions, target);

    let mut canvas = Canvas::new(target);
    canvas.draw_image(&image);
    drop(image);

    if watermark.enabled {
        let text = stamp::format_timestamp(taken_at, &watermark.timestamp_format);
        apply_watermark(&mut canvas, &text, watermark);
    }

    let blob = canvas.to_jpeg_blob(compress.jpeg_quality)?;
    debug!("Compressed image to {} bytes", blob.len());
    Ok(blob)
}

fn decode_image(bytes: &[u8]) -> Result<DynamicImage, CompressError> {
    image::load_from_memory(bytes).map_err(CompressError::Decode)
}
