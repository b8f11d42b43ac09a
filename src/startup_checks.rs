use crate::Config;
use crate::image_processing::font::{FontError, load_font, locate_font};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{error, info, warn};

#[derive(Debug, Error)]
pub enum StartupCheckError {
    #[error("Configured watermark font does not exist: {0:?}")]
    ConfiguredFontMissing(PathBuf),

    #[error("No watermark font found on this system")]
    NoFontAvailable,

    #[error("Watermark font could not be loaded: {0}")]
    FontUnreadable(#[from] FontError),
}

/// Check the watermark can actually be drawn before processing anything.
///
/// None of these failures stop compression; images are still resized and encoded
/// without the timestamp.
pub fn perform_startup_checks(config: &Config) -> Result<(), Vec<StartupCheckError>> {
    let mut errors = Vec::new();

    if !config.watermark.enabled {
        info!("Watermark disabled, skipping font checks");
        return Ok(());
    }

    info!("Performing startup checks...");

    if let Some(configured) = &config.watermark.font_path
        && !configured.exists()
    {
        warn!("Configured watermark font does not exist: {:?}", configured);
        errors.push(StartupCheckError::ConfiguredFontMissing(configured.clone()));
    }

    match locate_font(config.watermark.font_path.as_deref()) {
        Some(path) => match load_font(&path) {
            Ok(_) => info!("Watermark font: {:?}", path),
            Err(e) => {
                error!("Failed to load watermark font {:?}: {}", path, e);
                errors.push(StartupCheckError::FontUnreadable(e));
            }
        },
        None => {
            error!("No watermark font found; set watermark.font_path");
            errors.push(StartupCheckError::NoFontAvailable);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
