//! Shared types, error model, and configuration for resumekit.
//!
//! This crate is the foundation depended on by all other resumekit crates.
//! It provides:
//! - [`ResumeKitError`]: the unified error type
//! - Domain types ([`SourceDescriptor`], [`ContentBlob`], [`ResumeRecord`], [`AuthPlan`])
//! - Configuration ([`AppConfig`], [`FetchConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, FetchConfig, FetchSection, LoginSection, OpenAiSection, OutputSection, config_dir,
    config_file_path, load_config, load_config_from, resolve_api_key,
};
pub use error::{ResumeKitError, Result};
pub use types::{
    AuthPlan, ContentBlob, Credentials, DEFAULT_CONTENT_TYPE, FormLogin, ResumeRecord,
    SourceDescriptor, UrlSource, redact_url,
};
