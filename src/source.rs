use async_trait::async_trait;
use std::path::{Path, PathBuf};

pub const JPEG_MIME_TYPE: &str = "image/jpeg";

/// An owned chunk of binary data tagged with its MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl Blob {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }

    pub fn jpeg(bytes: Vec<u8>) -> Self {
        Self::new(bytes, JPEG_MIME_TYPE)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Anything whose full contents can be read asynchronously in one go.
#[async_trait]
pub trait ReadSource: Send + Sync {
    async fn read_bytes(&self) -> std::io::Result<Vec<u8>>;

    /// MIME type reported when the contents are turned into a data URL
    fn mime_type(&self) -> String;

    /// Human readable name used in log lines
    fn describe(&self) -> String;
}

#[async_trait]
impl ReadSource for Blob {
    async fn read_bytes(&self) -> std::io::Result<Vec<u8>> {
        Ok(self.bytes.clone())
    }

    fn mime_type(&self) -> String {
        self.mime_type.clone()
    }

    fn describe(&self) -> String {
        format!("in-memory blob ({} bytes, {})", self.bytes.len(), self.mime_type)
    }
}

#[async_trait]
impl ReadSource for Path {
    async fn read_bytes(&self) -> std::io::Result<Vec<u8>> {
        tokio::fs::read(self).await
    }

    fn mime_type(&self) -> String {
        mime_guess::from_path(self)
            .first_or_octet_stream()
            .essence_str()
            .to_string()
    }

    fn describe(&self) -> String {
        self.display().to_string()
    }
}

#[async_trait]
impl ReadSource for PathBuf {
    async fn read_bytes(&self) -> std::io::Result<Vec<u8>> {
        self.as_path().read_bytes().await
    }

    fn mime_type(&self) -> String {
        self.as_path().mime_type()
    }

    fn describe(&self) -> String {
        self.as_path().describe()
    }
}
