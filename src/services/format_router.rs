//! Picks the extraction strategy for an upload.

use crate::error::{AppError, AppResult};
use crate::models::file_extension;

pub const PDF_MAGIC: &[u8] = b"%PDF";
pub const MIN_CONTENT_CHARS: usize = 30;
pub const DEFAULT_IMAGE_MIME: &str = "image/jpeg";

pub const PDF_EXTENSIONS: &[&str] = &[".pdf"];
pub const DOCX_EXTENSIONS: &[&str] = &[".docx"];
pub const TEXT_EXTENSIONS: &[&str] = &[".txt", ".csv", ".json", ".xml", ".html", ".htm", ".md"];
pub const IMAGE_EXTENSIONS: &[&str] = &[".png", ".jpg", ".jpeg", ".webp", ".bmp", ".tif", ".tiff"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentRoute {
    Pdf,
    Docx,
    Text,
    Image,
}

impl DocumentRoute {
    pub fn label(&self) -> &'static str {
        match self {
            DocumentRoute::Pdf => "PDF",
            DocumentRoute::Docx => "DOCX",
            DocumentRoute::Text => "text",
            DocumentRoute::Image => "image",
        }
    }
}

/// First match wins: PDF, DOCX, text, image.
pub fn route_document(
    bytes: &[u8],
    filename: Option<&str>,
    content_type: Option<&str>,
) -> AppResult<DocumentRoute> {
    let ext = filename.and_then(file_extension);
    let has_ext = |set: &[&str]| ext.as_deref().map_or(false, |e| set.contains(&e));

    let route = if has_ext(PDF_EXTENSIONS) || bytes.starts_with(PDF_MAGIC) {
        DocumentRoute::Pdf
    } else if has_ext(DOCX_EXTENSIONS) {
        DocumentRoute::Docx
    } else if has_ext(TEXT_EXTENSIONS) {
        DocumentRoute::Text
    } else if has_ext(IMAGE_EXTENSIONS) || is_image_content_type(content_type) {
        DocumentRoute::Image
    } else {
        return Err(AppError::UnsupportedFormat);
    };

    tracing::debug!(
        route = route.label(),
        extension = ?ext,
        content_type = ?content_type,
        "Document routed"
    );
    Ok(route)
}

/// Rejects extracted text too short to be worth a model call.
pub fn ensure_min_content(route: DocumentRoute, text: &str) -> AppResult<()> {
    let chars = text.trim().chars().count();
    if chars < MIN_CONTENT_CHARS {
        return Err(AppError::InsufficientContent {
            format: route.label(),
            chars,
            minimum: MIN_CONTENT_CHARS,
        });
    }
    Ok(())
}

/// Upload allow-list: any known extension, or an `image/*` content type.
pub fn is_supported_upload(filename: &str, content_type: Option<&str>) -> bool {
    let known = file_extension(filename).map_or(false, |ext| {
        [PDF_EXTENSIONS, DOCX_EXTENSIONS, TEXT_EXTENSIONS, IMAGE_EXTENSIONS]
            .iter()
            .any(|set| set.contains(&ext.as_str()))
    });
    known || is_image_content_type(content_type)
}

/// Declared `image/*` type, else sniffed from the bytes, else JPEG.
pub fn image_mime_type(bytes: &[u8], content_type: Option<&str>) -> String {
    if let Some(declared) = content_type.filter(|ct| is_image_content_type(Some(ct))) {
        return declared.to_string();
    }

    image::guess_format(bytes)
        .map(|format| format.to_mime_type().to_string())
        .unwrap_or_else(|_| DEFAULT_IMAGE_MIME.to_string())
}

fn is_image_content_type(content_type: Option<&str>) -> bool {
    content_type.map_or(false, |ct| ct.starts_with("image/"))
}
