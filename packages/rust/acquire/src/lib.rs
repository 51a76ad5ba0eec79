//! Content acquisition: turn a [`SourceDescriptor`] into a [`ContentBlob`].
//!
//! This crate provides:
//! - [`acquire`]: dispatch over file, URL, and standard-input sources
//! - [`session`]: the cookie-carrying HTTP session with optional form login

pub mod session;

use std::path::Path;

use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{debug, info, instrument};

use resumekit_shared::{ContentBlob, FetchConfig, ResumeKitError, Result, SourceDescriptor};

pub use session::{HttpSession, fetch_url, resolve_content_type};

/// MIME type assigned to `.docx` files.
const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Resolve a source into raw bytes plus a content type.
#[instrument(skip_all, fields(source = %descriptor.id()))]
pub async fn acquire(descriptor: &SourceDescriptor, config: &FetchConfig) -> Result<ContentBlob> {
    let blob = match descriptor {
        SourceDescriptor::File(path) => read_file(path).await?,
        SourceDescriptor::Url(source) => fetch_url(source, config).await?,
        SourceDescriptor::Stdin => read_stream(tokio::io::stdin(), "<stdin>").await?,
    };

    info!(
        content_type = %blob.content_type,
        bytes = blob.bytes.len(),
        "content acquired"
    );
    Ok(blob)
}

/// Read a local file; the content type comes from its extension.
pub async fn read_file(path: &Path) -> Result<ContentBlob> {
    let origin = path.display().to_string();

    let bytes = tokio::fs::read(path).await.map_err(|e| {
        let reason = match e.kind() {
            std::io::ErrorKind::NotFound => "file not found".to_string(),
            _ => format!("read failed: {e}"),
        };
        ResumeKitError::source_unavailable(&origin, reason)
    })?;

    let content_type = content_type_for_path(path);
    debug!(%content_type, "inferred content type from extension");
    Ok(ContentBlob::new(bytes, content_type, origin))
}

/// Drain a reader until end-of-stream as plain text.
pub async fn read_stream<R>(mut reader: R, origin: &str) -> Result<ContentBlob>
where
    R: AsyncRead + Unpin,
{
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .await
        .map_err(|e| ResumeKitError::source_unavailable(origin, format!("read failed: {e}")))?;
    Ok(ContentBlob::text(bytes, origin))
}

/// Only Word and PDF documents get a binary type; every other file is text.
fn content_type_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("docx") => DOCX_MIME,
        Some("pdf") => "application/pdf",
        _ => resumekit_shared::DEFAULT_CONTENT_TYPE,
    }
}
