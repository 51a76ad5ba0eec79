//! Resume assembly for resumekit.
//!
//! This crate ties acquisition and extraction to segmentation, and holds the
//! two renderers: the template renderer over a [`ResumeRecord`] and the LLM
//! renderer over a collected [`profile::UserProfile`].
//!
//! [`ResumeRecord`]: resumekit_shared::ResumeRecord

pub mod llm;
pub mod pipeline;
pub mod profile;
pub mod render;
pub mod segment;

pub use pipeline::{build_record, load_text};
pub use segment::segment;
