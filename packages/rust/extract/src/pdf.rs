//! PDF text extraction via `pdf-extract`.

use tracing::{debug, warn};

use resumekit_shared::{ResumeKitError, Result};

/// Extract page-order text. Image-only PDFs legitimately yield an empty
/// string.
pub(crate) fn extract_text(bytes: &[u8], origin: &str) -> Result<String> {
    // pdf-extract panics on some malformed inputs instead of returning Err.
    let outcome = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes));

    match outcome {
        Ok(Ok(text)) => {
            debug!(chars = text.len(), "pdf text extracted");
            Ok(text)
        }
        Ok(Err(e)) => Err(ResumeKitError::unsupported_format(origin, "pdf", e.to_string())),
        Err(_) => {
            warn!(origin, "pdf parser panicked");
            Err(ResumeKitError::unsupported_format(
                origin,
                "pdf",
                "parser aborted on malformed document",
            ))
        }
    }
}
