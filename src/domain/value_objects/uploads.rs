use anyhow::{Context, Result};
use bytes::Bytes;
use std::{path::Path, sync::Arc};

/// Multipart field carrying the video binary.
pub const VIDEO_FIELD: &str = "video";
pub const TITLE_FIELD: &str = "title";

/// Receives upload completion as a whole percentage in `0..=100`.
pub type ProgressCallback = Arc<dyn Fn(u8) + Send + Sync>;

/// Receives raw `(loaded, total)` byte counters from the transport.
/// `total` is `None` when the body length is unknown.
pub type ByteProgressFn = Box<dyn Fn(u64, Option<u64>) + Send + Sync>;

/// A video binary plus the text fields sent alongside it.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadPayload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Bytes,
    pub fields: Vec<(String, String)>,
}

impl UploadPayload {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        let file_name = file_name.into();
        let mime_type = mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .essence_str()
            .to_string();

        Self {
            file_name,
            mime_type,
            bytes: bytes.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_title(self, title: impl Into<String>) -> Self {
        self.with_field(TITLE_FIELD, title)
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Reads the whole file into memory and titles the upload.
    pub async fn from_path(path: impl AsRef<Path>, title: impl Into<String>) -> Result<Self> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .with_context(|| format!("upload path has no file name: {}", path.display()))?
            .to_string();

        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("failed to read upload file {}", path.display()))?;

        Ok(Self::new(file_name, bytes).with_title(title))
    }

    pub fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
