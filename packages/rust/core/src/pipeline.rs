//! End-to-end ingestion: source → bytes → plain text → [`ResumeRecord`].

use tracing::{info, instrument};

use resumekit_shared::{FetchConfig, Result, ResumeRecord, SourceDescriptor};

use crate::segment;

/// Acquire the source and extract its plain text.
#[instrument(skip_all, fields(source = %descriptor.id()))]
pub async fn load_text(descriptor: &SourceDescriptor, config: &FetchConfig) -> Result<String> {
    let blob = resumekit_acquire::acquire(descriptor, config).await?;
    let text = resumekit_extract::extract(blob)?;
    info!(chars = text.chars().count(), "text extracted");
    Ok(text)
}

/// Segment `text` and attach the display name, if any.
pub fn build_record(text: &str, name: Option<String>) -> ResumeRecord {
    segment::segment(text).with_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use resumekit_shared::UrlSource;

    #[tokio::test]
    async fn html_url_to_record() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cv"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                "<html><head><script>track()</script></head><body>\
                 <p>Skills: Rust, SQL</p><ul><li>- Built pipelines</li></ul>\
                 <p>Backend engineer.</p></body></html>",
                "text/html; charset=utf-8",
            ))
            .mount(&server)
            .await;

        let url = format!("{}/cv", server.uri()).parse().unwrap();
        let descriptor = SourceDescriptor::Url(UrlSource::new(url));
        let text = load_text(&descriptor, &FetchConfig::default()).await.unwrap();
        assert!(!text.contains("track()"));

        let record = build_record(&text, Some("Jane Doe".into()));
        assert_eq!(record.name(), Some("Jane Doe"));
        assert_eq!(record.skills(), ["Rust", "SQL", "Built pipelines"]);
        assert_eq!(record.summary(), "Backend engineer.");
    }

    #[tokio::test]
    async fn text_file_with_invalid_bytes_still_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.bin");
        std::fs::write(&path, b"Summary line\n\xff\xfe- Shipped v1\n").unwrap();

        let text = load_text(&SourceDescriptor::File(path), &FetchConfig::default())
            .await
            .unwrap();
        let record = build_record(&text, None);
        assert_eq!(record.summary(), "Summary line");
        assert_eq!(record.experiences(), ["Shipped v1"]);
        assert_eq!(record.name(), None);
    }

    #[tokio::test]
    async fn missing_source_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_text(
            &SourceDescriptor::File(dir.path().join("absent.txt")),
            &FetchConfig::default(),
        )
        .await
        .unwrap_err();
        assert!(err.is_source_unavailable());
    }

    #[test]
    fn blank_name_is_cleared() {
        let record = build_record("Prose.", Some("   ".into()));
        assert_eq!(record.name(), None);
    }
}
