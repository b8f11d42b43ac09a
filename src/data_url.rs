use base64::{Engine as _, engine::general_purpose::STANDARD};
use thiserror::Error;
use tracing::debug;

use crate::error::CompressError;
use crate::source::{Blob, ReadSource};

/// MIME type assumed for `data:;base64,...` URLs that omit one (RFC 2397)
const DEFAULT_DATA_URL_MIME_TYPE: &str = "text/plain;charset=US-ASCII";

#[derive(Debug, Error)]
pub enum DataUrlError {
    #[error("Not a data URL")]
    MissingScheme,

    #[error("Malformed data URL: missing ',' separator")]
    MissingPayload,

    #[error("Only base64 data URLs are supported")]
    NotBase64,

    #[error("Invalid base64 payload: {0}")]
    InvalidPayload(#[from] base64::DecodeError),
}

/// Encode a blob as `data:<mime>;base64,<payload>`.
pub fn blob_to_data_url(blob: &Blob) -> String {
    format!(
        "data:{};base64,{}",
        blob.mime_type,
        STANDARD.encode(&blob.bytes)
    )
}

/// Read a source to completion and encode it as a data URL.
///
/// Unlike [`blob_to_data_url`] the read itself can fail here, and that failure
/// is returned instead of an empty string.
pub async fn read_data_url<S>(source: &S) -> Result<String, CompressError>
where
    S: ReadSource + ?Sized,
{
    let bytes = source.read_bytes().await?;
    debug!(
        "Encoding {} ({} bytes) as data URL",
        source.describe(),
        bytes.len()
    );
    Ok(blob_to_data_url(&Blob::new(bytes, source.mime_type())))
}

/// Decode a base64 data URL back into a blob.
pub fn parse_data_url(url: &str) -> Result<Blob, DataUrlError> {
    let rest = url.strip_prefix("data:").ok_or(DataUrlError::MissingScheme)?;
    let (header, payload) = rest.split_once(',').ok_or(DataUrlError::MissingPayload)?;
    let mime_type = header
        .strip_suffix(";base64")
        .ok_or(DataUrlError::NotBase64)?;

    let mime_type = if mime_type.is_empty() {
        DEFAULT_DATA_URL_MIME_TYPE
    } else {
        mime_type
    };

    let bytes = STANDARD.decode(payload.trim())?;
    Ok(Blob::new(bytes, mime_type))
}
