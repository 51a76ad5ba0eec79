//! Word (`.docx`) paragraph extraction via `docx-rs`.
//!
//! The document tree is walked as Document → Paragraph → Run → Text. Only
//! top-level body paragraphs are read: tables, text boxes, headers, and
//! footers are left out.

use docx_rs::{DocumentChild, Paragraph, ParagraphChild, RunChild};
use tracing::{debug, warn};

use resumekit_shared::{ResumeKitError, Result};

/// Extract paragraph text in document order, one paragraph per line.
pub(crate) fn extract_text(bytes: &[u8], origin: &str) -> Result<String> {
    // docx-rs can panic on malformed parts instead of returning Err.
    let parsed = std::panic::catch_unwind(|| docx_rs::read_docx(bytes));

    let docx = match parsed {
        Ok(Ok(docx)) => docx,
        Ok(Err(e)) => {
            return Err(ResumeKitError::unsupported_format(origin, "docx", e.to_string()));
        }
        Err(_) => {
            warn!(origin, "docx parser panicked");
            return Err(ResumeKitError::unsupported_format(
                origin,
                "docx",
                "parser aborted on malformed document",
            ));
        }
    };

    let paragraphs: Vec<String> = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(para) => Some(paragraph_text(para)),
            _ => None,
        })
        .collect();

    debug!(paragraphs = paragraphs.len(), "docx paragraphs extracted");
    Ok(paragraphs.join("\n"))
}

/// Concatenate the text of a paragraph's runs. Tabs and breaks inside a run
/// are kept; drawings (and the text boxes they carry) are not.
fn paragraph_text(para: &Paragraph) -> String {
    let mut text = String::new();

    for child in &para.children {
        let ParagraphChild::Run(run) = child else {
            continue;
        };
        for rc in &run.children {
            match rc {
                RunChild::Text(t) => text.push_str(&t.text),
                RunChild::Tab(_) => text.push('\t'),
                RunChild::Break(_) => text.push('\n'),
                _ => {}
            }
        }
    }

    text
}
