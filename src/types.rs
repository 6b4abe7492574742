//! Shared types passed between the pipeline stages.
//!
//! [`PageDescriptor`] flows from the manifest loader into the site builder;
//! [`BuildEvent`] flows from the site builder out to whoever reports progress.

use serde_json::{Map, Value};
use std::path::PathBuf;

/// One page definition from the manifest.
///
/// Built once per entry at load time and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct PageDescriptor {
    /// Logical URL, always starting with `/` (e.g. `/users/ada/`)
    pub url: String,
    /// Template file name relative to the template root
    pub template: String,
    /// Render-time variables. Arbitrary JSON, templates may reach into nested fields.
    pub context: Map<String, Value>,
}

/// Progress reported by the site builder as files land in the output root.
#[derive(Debug, Clone, PartialEq)]
pub enum BuildEvent {
    /// A page was rendered and written.
    PageRendered {
        url: String,
        template: String,
        output_path: PathBuf,
    },
    /// The static subtree was mirrored into the output root.
    StaticCopied {
        source: PathBuf,
        destination: PathBuf,
        files: usize,
    },
}
