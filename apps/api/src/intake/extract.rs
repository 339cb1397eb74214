//! Text Extraction Adapter — turns an uploaded document into plain text.
//!
//! Unsupported formats are a deliberate soft-fail: they yield an empty
//! string rather than an error, because the pipeline must still persist the
//! submission even when no text can be derived. Only a document the adapter
//! claims to support but cannot read is fatal.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to read document: {0}")]
    Unreadable(String),
}

/// Format the client declared for the upload, resolved from the multipart
/// part's content type first and the filename extension as a fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclaredFormat {
    Pdf,
    PlainText,
    Markdown,
    /// Anything we do not extract text from (docx, zip, images, ...).
    /// Kept for logging; extraction soft-fails to `""`.
    Unsupported(String),
}

impl DeclaredFormat {
    pub fn resolve(content_type: Option<&str>, filename: Option<&str>) -> Self {
        if let Some(ct) = content_type {
            let ct = ct.split(';').next().unwrap_or(ct).trim().to_lowercase();
            match ct.as_str() {
                "application/pdf" => return DeclaredFormat::Pdf,
                "text/plain" => return DeclaredFormat::PlainText,
                "text/markdown" => return DeclaredFormat::Markdown,
                // octet-stream says nothing; fall through to the extension
                "application/octet-stream" | "" => {}
                other => return DeclaredFormat::Unsupported(other.to_string()),
            }
        }

        let extension = filename
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext.to_lowercase());

        match extension.as_deref() {
            Some("pdf") => DeclaredFormat::Pdf,
            Some("txt") => DeclaredFormat::PlainText,
            Some("md") | Some("markdown") => DeclaredFormat::Markdown,
            Some(ext) => DeclaredFormat::Unsupported(ext.to_string()),
            None => DeclaredFormat::Unsupported("unknown".to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            DeclaredFormat::Pdf => "pdf",
            DeclaredFormat::PlainText => "text",
            DeclaredFormat::Markdown => "markdown",
            DeclaredFormat::Unsupported(kind) => kind,
        }
    }
}

/// Extracts plain text from `bytes` according to the declared format.
///
/// Returns `Ok("")` for unsupported formats; returns `Err` only when a
/// supported document cannot be read, which the caller treats as fatal for
/// the submission.
pub fn extract_text(bytes: &[u8], format: &DeclaredFormat) -> Result<String, ExtractError> {
    match format {
        DeclaredFormat::Pdf => pdf_extract::extract_text_from_mem(bytes)
            .map(|text| text.trim().to_string())
            .map_err(|e| ExtractError::Unreadable(format!("pdf: {e}"))),
        DeclaredFormat::PlainText | DeclaredFormat::Markdown => {
            Ok(String::from_utf8_lossy(bytes).trim().to_string())
        }
        DeclaredFormat::Unsupported(_) => Ok(String::new()),
    }
}
