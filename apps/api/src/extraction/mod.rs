//! Text Extractor — turns an uploaded PDF or DOCX into plain text.
//!
//! Failures never return partial text: the whole document is rejected with
//! `AppError::UnsupportedOrCorruptDocument`.

pub mod docx;
pub mod pdf;

use bytes::Bytes;
use tracing::debug;

use crate::errors::AppError;

pub const PDF_MEDIA_TYPE: &str = "application/pdf";
pub const DOCX_MEDIA_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Content types that carry no format information; the file name decides instead.
const GENERIC_MEDIA_TYPES: &[&str] = &["application/octet-stream", "binary/octet-stream"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    /// Accepts full media types and the short forms `pdf` / `docx`.
    pub fn from_declared_type(declared: &str) -> Option<Self> {
        let declared = declared
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match declared.as_str() {
            PDF_MEDIA_TYPE | "pdf" => Some(DocumentKind::Pdf),
            DOCX_MEDIA_TYPE | "docx" => Some(DocumentKind::Docx),
            _ => None,
        }
    }
}

/// An uploaded candidate document. Immutable once received.
#[derive(Debug, Clone)]
pub struct Document {
    /// Display name, usually the uploaded file name.
    pub name: String,
    pub declared_type: String,
    pub bytes: Bytes,
}

impl Document {
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>, bytes: Bytes) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
            bytes,
        }
    }

    /// Builds a document from a multipart upload. A missing or generic content type
    /// falls back to the file extension.
    pub fn from_upload(name: impl Into<String>, content_type: Option<&str>, bytes: Bytes) -> Self {
        let name = name.into();
        let declared_type = match content_type.map(str::trim) {
            Some(ct)
                if !ct.is_empty()
                    && !GENERIC_MEDIA_TYPES.contains(&ct.to_ascii_lowercase().as_str()) =>
            {
                ct.to_string()
            }
            _ => extension(&name).unwrap_or_default(),
        };
        Self::new(name, declared_type, bytes)
    }

    pub fn kind(&self) -> Option<DocumentKind> {
        DocumentKind::from_declared_type(&self.declared_type)
    }
}

fn extension(name: &str) -> Option<String> {
    std::path::Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
}

/// Extracts plain text from `document` according to its declared type.
pub fn extract_text(document: &Document) -> Result<String, AppError> {
    let kind = document.kind().ok_or_else(|| {
        AppError::unsupported(
            &document.name,
            format!(
                "declared type '{}' is not PDF or DOCX",
                document.declared_type
            ),
        )
    })?;

    let result = match kind {
        DocumentKind::Pdf => pdf::extract(&document.bytes),
        DocumentKind::Docx => docx::extract(&document.bytes),
    };

    let text = result.map_err(|reason| AppError::unsupported(&document.name, reason))?;
    debug!(
        document = %document.name,
        kind = ?kind,
        chars = text.len(),
        "Extracted document text"
    );
    Ok(text)
}
