//! Page manifest loading and validation.
//!
//! The manifest lists every page of the site, in render order. Each entry
//! names the page URL, the template to render, and the context the template
//! is rendered with:
//!
//! ```json
//! [
//!   { "url": "/", "template": "index.html", "context": { "title": "Home" } },
//!   { "url": "/about/", "template": "about.html", "context": {} }
//! ]
//! ```
//!
//! `config.toml` is accepted as an alternative serialization, one `[[page]]`
//! table per entry:
//!
//! ```toml
//! [[page]]
//! url = "/"
//! template = "index.html"
//! context = { title = "Home" }
//! ```
//!
//! ## Validation
//!
//! Loading fails fast on the first problem:
//! - No manifest file → [`ManifestError::NotFound`]
//! - Not well-formed JSON/TOML, or not a list of entries → [`ManifestError::Parse`]
//! - An entry without a string `url`, a string `template` or a mapping
//!   `context`, or a `url` not starting with `/` → [`ManifestError::Schema`]
//!
//! Templates are not checked here. A missing template surfaces when the page
//! is rendered.

use crate::config;
use crate::types::PageDescriptor;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Manifest not found: expected one of {} in {}", config::MANIFEST_FILES.join(", "), .0.display())]
    NotFound(PathBuf),
    #[error("Cannot parse manifest {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },
    #[error("Invalid manifest entry #{index} in {}: {reason}", .path.display())]
    Schema {
        path: PathBuf,
        index: usize,
        reason: String,
    },
}

/// Ordered page list loaded from the manifest file.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    /// The manifest file the pages came from
    pub source: PathBuf,
    /// Pages in manifest order
    pub pages: Vec<PageDescriptor>,
}

/// TOML has no top-level arrays, so entries live under `[[page]]`.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlManifest {
    #[serde(default)]
    page: Vec<Value>,
}

/// Load and validate the manifest from an input directory.
pub fn load(input_dir: &Path) -> Result<Manifest, ManifestError> {
    let path = config::find_manifest(input_dir)
        .ok_or_else(|| ManifestError::NotFound(input_dir.to_path_buf()))?;
    let content = fs::read_to_string(&path).map_err(|source| ManifestError::Io {
        path: path.clone(),
        source,
    })?;
    let entries = parse_entries(&path, &content)?;

    let pages = entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| parse_page(&path, index, entry))
        .collect::<Result<Vec<_>, _>>()?;

    log::debug!("loaded {} pages from {}", pages.len(), path.display());
    Ok(Manifest {
        source: path,
        pages,
    })
}

/// Parse the raw entry list, picking the format from the file extension.
fn parse_entries(path: &Path, content: &str) -> Result<Vec<Value>, ManifestError> {
    let parse_error = |message: String| ManifestError::Parse {
        path: path.to_path_buf(),
        message,
    };
    match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => toml::from_str::<TomlManifest>(content)
            .map(|m| m.page)
            .map_err(|e| parse_error(e.to_string())),
        _ => serde_json::from_str::<Vec<Value>>(content).map_err(|e| parse_error(e.to_string())),
    }
}

/// Validate one raw entry into a [`PageDescriptor`].
///
/// Keys other than `url`, `template` and `context` are ignored.
fn parse_page(path: &Path, index: usize, entry: Value) -> Result<PageDescriptor, ManifestError> {
    let schema_error = |reason: String| ManifestError::Schema {
        path: path.to_path_buf(),
        index,
        reason,
    };

    let mut entry = match entry {
        Value::Object(entry) => entry,
        other => {
            return Err(schema_error(format!(
                "expected a mapping with url, template and context, found {}",
                type_name(&other)
            )));
        }
    };

    let url = take_string(&mut entry, "url").map_err(schema_error)?;
    let template = take_string(&mut entry, "template").map_err(schema_error)?;
    let context = match entry.remove("context") {
        Some(Value::Object(context)) => context,
        Some(other) => {
            return Err(schema_error(format!(
                "`context` must be a mapping, found {}",
                type_name(&other)
            )));
        }
        None => return Err(schema_error("missing required key `context`".into())),
    };

    if !url.starts_with('/') {
        return Err(schema_error(format!("`url` must start with '/': {url:?}")));
    }
    if template.is_empty() {
        return Err(schema_error("`template` must not be empty".into()));
    }

    Ok(PageDescriptor {
        url,
        template,
        context,
    })
}

fn take_string(entry: &mut Map<String, Value>, key: &str) -> Result<String, String> {
    match entry.remove(key) {
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(format!(
            "`{key}` must be a string, found {}",
            type_name(&other)
        )),
        None => Err(format!("missing required key `{key}`")),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}
