//! Markdown rendering of a [`ResumeRecord`].
//!
//! Two renderers share the record as their only input: the built-in layout
//! ([`render_markdown`]) and user templates with `{{ field }}` placeholders
//! ([`render_template`]).

use std::path::Path;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::{debug, instrument};

use resumekit_shared::{ResumeKitError, Result, ResumeRecord};

/// Title used when the record carries no name.
const DEFAULT_TITLE: &str = "Resume";

/// Render the record with the built-in layout. Empty sections are omitted.
pub fn render_markdown(record: &ResumeRecord) -> String {
    let mut md = format!("# {}\n", record.name().unwrap_or(DEFAULT_TITLE));

    if !record.summary().is_empty() {
        md.push_str("\n## Summary\n\n");
        md.push_str(record.summary());
        md.push('\n');
    }

    if !record.skills().is_empty() {
        md.push_str("\n## Skills\n\n");
        md.push_str(&bullet_list(record.skills()));
    }

    if !record.experiences().is_empty() {
        md.push_str("\n## Experience\n\n");
        md.push_str(&bullet_list(record.experiences()));
    }

    md
}

/// Render a user template. Supported placeholders: `{{ name }}`,
/// `{{ summary }}`, `{{ skills }}`, `{{ experiences }}`; list placeholders
/// expand to Markdown bullet lists.
pub fn render_template(template: &str, record: &ResumeRecord) -> Result<String> {
    static PLACEHOLDER_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"\{\{\s*([A-Za-z_]+)\s*\}\}").expect("valid regex"));

    if let Some(unknown) = PLACEHOLDER_RE
        .captures_iter(template)
        .map(|c| c[1].to_string())
        .find(|field| !matches!(field.as_str(), "name" | "summary" | "skills" | "experiences"))
    {
        return Err(ResumeKitError::Render(format!(
            "unknown template placeholder '{{{{ {unknown} }}}}'"
        )));
    }

    let rendered = PLACEHOLDER_RE.replace_all(template, |caps: &Captures| match &caps[1] {
        "name" => record.name().unwrap_or_default().to_string(),
        "summary" => record.summary().to_string(),
        "skills" => bullet_list(record.skills()).trim_end().to_string(),
        _ => bullet_list(record.experiences()).trim_end().to_string(),
    });

    Ok(rendered.into_owned())
}

/// Read a template from disk and render it.
#[instrument(skip(record), fields(template = %path.display()))]
pub fn render_template_file(path: &Path, record: &ResumeRecord) -> Result<String> {
    let template = std::fs::read_to_string(path).map_err(|e| ResumeKitError::io(path, e))?;
    debug!(len = template.len(), "template loaded");
    render_template(&template, record)
}

fn bullet_list(items: &[String]) -> String {
    items.iter().map(|item| format!("- {item}\n")).collect()
}
