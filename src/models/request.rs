use bytes::Bytes;
use std::path::Path;

/// An uploaded document as received by the HTTP layer.
#[derive(Debug, Clone)]
pub struct ProcessedFile {
    pub name: String,
    pub size: usize,
    pub content: Bytes,
    pub mime_type: Option<String>,
}

impl ProcessedFile {
    pub fn new(name: String, content: Bytes) -> Self {
        let size = content.len();
        Self {
            name,
            size,
            content,
            mime_type: None,
        }
    }

    pub fn with_mime_type(mut self, mime_type: String) -> Self {
        self.mime_type = Some(mime_type);
        self
    }

    /// Lower-cased extension including the leading dot, e.g. `.pdf`.
    pub fn extension(&self) -> Option<String> {
        file_extension(&self.name)
    }
}

pub fn file_extension(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .map(|ext| format!(".{}", ext.to_lowercase()))
}
