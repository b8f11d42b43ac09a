use ab_glyph::FontVec;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

// Bold sans-serif faces commonly present on Linux, macOS and Windows hosts
const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "static/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Bold.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Bold.ttf",
    "/usr/share/fonts/noto/NotoSans-Bold.ttf",
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "/Library/Fonts/Arial Bold.ttf",
    "/System/Library/Fonts/Helvetica.ttc",
    "C:\\Windows\\Fonts\\arialbd.ttf",
];

#[derive(Debug, Error)]
pub enum FontError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse font {0:?}")]
    InvalidFont(PathBuf),
}

/// Pick the configured font if it exists, otherwise the first system candidate found.
pub fn locate_font(configured: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = configured {
        if path.exists() {
            return Some(path.to_path_buf());
        }
        debug!("Configured font {:?} not found, searching system fonts", path);
    }

    SYSTEM_FONT_CANDIDATES
        .iter()
        .map(PathBuf::from)
        .find(|candidate| candidate.exists())
}

pub fn load_font(path: &Path) -> Result<FontVec, FontError> {
    let data = std::fs::read(path)?;
    FontVec::try_from_vec(data).map_err(|_| FontError::InvalidFont(path.to_path_buf()))
}
