//! Plain-text extraction from acquired content.
//!
//! Every [`ContentBlob`] is classified into a [`ContentKind`] and reduced to
//! text by the matching extractor:
//! - [`ContentKind::WordDocument`]: paragraph text from `word/document.xml`
//! - [`ContentKind::Pdf`]: page-order text via `pdf-extract`
//! - [`ContentKind::Html`]: visible text with markup noise removed
//! - [`ContentKind::Text`] / [`ContentKind::Binary`]: UTF-8, invalid bytes dropped

mod docx;
mod html;
mod pdf;

use tracing::{debug, instrument};

use resumekit_shared::{ContentBlob, Result};

pub use html::html_to_text;

/// MIME type of `.docx` documents.
pub const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// MIME type of legacy Word documents, routed to the same extractor.
const MSWORD_MIME: &str = "application/msword";

/// MIME type of PDF documents.
pub const PDF_MIME: &str = "application/pdf";

// ---------------------------------------------------------------------------
// ContentKind
// ---------------------------------------------------------------------------

/// The extraction strategy for a blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    WordDocument,
    Pdf,
    Html,
    Text,
    /// Anything unrecognized; decoded leniently as UTF-8.
    Binary,
}

impl ContentKind {
    /// Classify a content type, using the origin's `.docx` suffix as a hint
    /// when servers mislabel Word documents.
    pub fn resolve(content_type: &str, origin: &str) -> Self {
        let ct = content_type
            .split(';')
            .next()
            .unwrap_or("")
            .trim()
            .to_ascii_lowercase();

        if ct == PDF_MIME {
            return Self::Pdf;
        }
        if ct == DOCX_MIME || ct == MSWORD_MIME || origin.to_ascii_lowercase().ends_with(".docx") {
            return Self::WordDocument;
        }
        match ct.as_str() {
            "text/html" | "application/xhtml+xml" => Self::Html,
            "application/xml" => Self::Text,
            other if other.starts_with("text/") => Self::Text,
            _ => Self::Binary,
        }
    }

    /// Short label used in logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            Self::WordDocument => "docx",
            Self::Pdf => "pdf",
            Self::Html => "html",
            Self::Text => "text",
            Self::Binary => "binary",
        }
    }
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// Extract plain text from a blob.
///
/// Only a failing document parser (Word or PDF) produces an error; text
/// decoding never fails.
#[instrument(skip(blob), fields(origin = %blob.origin, content_type = %blob.content_type, len = blob.bytes.len()))]
pub fn extract(blob: ContentBlob) -> Result<String> {
    let kind = ContentKind::resolve(&blob.content_type, &blob.origin);
    debug!(kind = kind.name(), "extracting text");

    let text = match kind {
        ContentKind::WordDocument => docx::extract_text(&blob.bytes, &blob.origin)?,
        ContentKind::Pdf => pdf::extract_text(&blob.bytes, &blob.origin)?,
        ContentKind::Html => html_to_text(&decode_lossy(&blob.bytes)),
        ContentKind::Text | ContentKind::Binary => decode_lossy(&blob.bytes),
    };

    debug!(kind = kind.name(), chars = text.len(), "extraction complete");
    Ok(text)
}

/// Decode UTF-8, silently dropping invalid byte sequences.
pub fn decode_lossy(bytes: &[u8]) -> String {
    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }
    let mut out = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        out.push_str(chunk.valid());
    }
    out
}
