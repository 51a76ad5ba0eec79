//! HTML-to-text reduction.
//!
//! Visible text nodes are pulled out of the parsed document one per line,
//! then a short cleanup pipeline normalizes the lines so that paragraph and
//! bullet boundaries survive into segmentation.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html};

/// Elements whose content is never visible text.
const SKIPPED_TAGS: &[&str] = &["script", "style", "noscript"];

/// Reduce an HTML document to newline-separated visible text.
pub fn html_to_text(html: &str) -> String {
    let doc = Html::parse_document(html);

    let mut fragments = Vec::new();
    collect_text(doc.root_element(), &mut fragments);

    run_pipeline(&fragments.join("\n"))
}

/// Depth-first walk collecting text nodes, skipping non-visible subtrees.
fn collect_text(element: ElementRef<'_>, out: &mut Vec<String>) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push(text.to_string());
        } else if let Some(child_el) = ElementRef::wrap(child) {
            if SKIPPED_TAGS.contains(&child_el.value().name()) {
                continue;
            }
            collect_text(child_el, out);
        }
    }
}

// ---------------------------------------------------------------------------
// Cleanup passes
// ---------------------------------------------------------------------------

fn run_pipeline(text: &str) -> String {
    let mut result = trim_lines(text);
    result = collapse_blank_lines(&result);
    result.trim().to_string()
}

/// Trim every line; whitespace-only lines become empty.
fn trim_lines(text: &str) -> String {
    text.lines().map(str::trim).collect::<Vec<_>>().join("\n")
}

/// Collapse runs of blank lines into a single blank line.
fn collapse_blank_lines(text: &str) -> String {
    static MULTI_BLANK_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid regex"));

    MULTI_BLANK_RE.replace_all(text, "\n\n").to_string()
}
