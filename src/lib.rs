use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

pub mod data_url;
pub mod error;
pub mod image_processing;
pub mod source;
pub mod stamp;
pub mod startup_checks;

pub use data_url::{DataUrlError, blob_to_data_url, parse_data_url, read_data_url};
pub use error::{CompressError, ConfigError};
pub use image_processing::{Compressor, compress_image};
pub use source::{Blob, ReadSource};
pub use stamp::PaddingPolicy;

/// Longest edge, in pixels, of a compressed image
pub const MAX_DIMENSION: u32 = 1920;
/// JPEG quality on the 0..=1 scale
pub const JPEG_QUALITY: f32 = 0.8;
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub compress: CompressConfig,
    #[serde(default)]
    pub watermark: WatermarkConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CompressConfig {
    pub max_dimension: u32,
    pub jpeg_quality: f32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WatermarkConfig {
    pub enabled: bool,
    /// Font file to use instead of searching the usual system locations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_path: Option<PathBuf>,
    pub min_font_size: f64,
    /// Font size as a fraction of the output's long side
    pub font_size_ratio: f64,
    pub padding: PaddingPolicy,
    pub min_stroke_width: f64,
    pub stroke_opacity: f32,
    pub timestamp_format: String,
}

impl Default for CompressConfig {
    fn default() -> Self {
        Self {
            max_dimension: MAX_DIMENSION,
            jpeg_quality: JPEG_QUALITY,
        }
    }
}

impl Default for WatermarkConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            font_path: None,
            min_font_size: 24.0,
            font_size_ratio: 0.025,
            padding: PaddingPolicy::default(),
            min_stroke_width: 3.0,
            stroke_opacity: 0.8,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file, falling back to defaults when it doesn't exist
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml_edit::de::from_str::<Config>(&content)?
        } else {
            info!("Config file not found at {:?}, using defaults", path);
            Config::default()
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.compress.max_dimension == 0 {
            return Err(ConfigError::Invalid(
                "compress.max_dimension must be greater than zero".to_string(),
            ));
        }

        let quality = self.compress.jpeg_quality;
        if !(quality > 0.0 && quality <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "compress.jpeg_quality must be in (0, 1], got {}",
                quality
            )));
        }

        let watermark = &self.watermark;
        if watermark.min_font_size <= 0.0 || watermark.font_size_ratio < 0.0 {
            return Err(ConfigError::Invalid(
                "watermark font sizing must be positive".to_string(),
            ));
        }

        if !watermark.padding.is_valid() {
            return Err(ConfigError::Invalid(
                "watermark.padding ratios must be non-negative".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&watermark.stroke_opacity) {
            return Err(ConfigError::Invalid(format!(
                "watermark.stroke_opacity must be in [0, 1], got {}",
                watermark.stroke_opacity
            )));
        }

        if !stamp::is_valid_timestamp_format(&watermark.timestamp_format) {
            return Err(ConfigError::Invalid(format!(
                "watermark.timestamp_format is not a valid strftime pattern: {:?}",
                watermark.timestamp_format
            )));
        }

        Ok(())
    }
}
