//! Site generation.
//!
//! Drives a whole build from input directory to finished output root. The
//! run is strictly linear:
//!
//! ```text
//! 1. Resolve destination   output root must not exist yet
//! 2. Load manifest         parse, validate entries and URLs
//! 3. Create destination    output root and parents
//! 4. Render pages          in manifest order, one file at a time
//! 5. Propagate static      static/ mirrored into the output root
//! ```
//!
//! Nothing is written before step 3, so a bad manifest or an existing
//! destination leaves the filesystem untouched. From step 3 on, the first
//! error aborts the run and whatever was already written stays in place:
//! a half-built site is never reported as success.
//!
//! ## Collisions
//!
//! Two pages with the same URL, or a static file at the same path as a
//! rendered page, resolve as "last writer wins". Static files are copied
//! after all pages, so they win over pages. Both cases are logged as
//! warnings.

use crate::assets::{self, CopyError};
use crate::config::BuildOptions;
use crate::manifest::{self, Manifest, ManifestError};
use crate::paths;
use crate::template::{TemplateError, TemplateResolver};
use crate::types::{BuildEvent, PageDescriptor};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Output directory already exists: {}", .0.display())]
    DestinationExists(PathBuf),
    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),
    #[error("Page URL {url:?} (entry #{index}) escapes the output directory")]
    UnsafeUrl { index: usize, url: String },
    #[error("Cannot load templates: {0}")]
    TemplateDir(#[source] TemplateError),
    #[error("Failed to render {url} with template {template}: {source}")]
    Page {
        url: String,
        template: String,
        source: TemplateError,
    },
    #[error("IO error writing {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Static file error: {0}")]
    Static(#[from] CopyError),
}

/// What a successful build produced.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildSummary {
    pub output_root: PathBuf,
    /// Page files written, in manifest order
    pub pages: Vec<PathBuf>,
    /// Number of static files copied
    pub static_files: usize,
}

/// Build the site described by `options`.
///
/// `on_event` is called after each file (or the static tree) lands in the
/// output root; the CLI uses it for verbose progress output.
pub fn generate<F>(options: &BuildOptions, mut on_event: F) -> Result<BuildSummary, GenerateError>
where
    F: FnMut(&BuildEvent),
{
    let output_root = options.output_root();
    // symlink_metadata so a dangling link at the destination also counts
    if fs::symlink_metadata(&output_root).is_ok() {
        return Err(GenerateError::DestinationExists(output_root));
    }

    let manifest = manifest::load(&options.input_dir)?;
    check_urls(&manifest)?;

    fs::create_dir_all(&output_root).map_err(|source| GenerateError::Write {
        path: output_root.clone(),
        source,
    })?;

    let resolver =
        TemplateResolver::new(options.templates_dir()).map_err(GenerateError::TemplateDir)?;
    let mut written: HashMap<PathBuf, &str> = HashMap::new();
    let mut pages = Vec::with_capacity(manifest.pages.len());

    for page in &manifest.pages {
        let output_path = paths::map_url(&output_root, &page.url);
        render_page(&resolver, page, &output_path)?;

        if let Some(previous) = written.insert(output_path.clone(), &page.url) {
            log::warn!(
                "{} overwrote {} (both map to {})",
                page.url,
                previous,
                output_path.display()
            );
        }
        on_event(&BuildEvent::PageRendered {
            url: page.url.clone(),
            template: page.template.clone(),
            output_path: output_path.clone(),
        });
        pages.push(output_path);
    }

    let static_dir = options.static_dir();
    let mut static_files = 0;
    if static_dir.is_dir() {
        let copied = assets::copy_tree(&static_dir, &output_root)?;
        for file in &copied {
            if let Some(url) = written.get(&file.destination) {
                log::warn!(
                    "static file {} overwrote page {}",
                    file.source.display(),
                    url
                );
            }
        }
        static_files = copied.len();
        on_event(&BuildEvent::StaticCopied {
            source: static_dir,
            destination: output_root.clone(),
            files: static_files,
        });
    } else {
        log::debug!("no static directory at {}", static_dir.display());
    }

    Ok(BuildSummary {
        output_root,
        pages,
        static_files,
    })
}

/// Reject URLs that would map outside the output root.
fn check_urls(manifest: &Manifest) -> Result<(), GenerateError> {
    match manifest
        .pages
        .iter()
        .position(|page| !paths::is_contained(&page.url))
    {
        Some(index) => Err(GenerateError::UnsafeUrl {
            index,
            url: manifest.pages[index].url.clone(),
        }),
        None => Ok(()),
    }
}

/// Render one page and write it to `output_path`.
///
/// Takes everything it needs as arguments: the resolver (bound to the
/// template root), the page's template name and context, and the target path.
fn render_page(
    resolver: &TemplateResolver,
    page: &PageDescriptor,
    output_path: &Path,
) -> Result<(), GenerateError> {
    let html = resolver
        .render(&page.template, &page.context)
        .map_err(|source| GenerateError::Page {
            url: page.url.clone(),
            template: page.template.clone(),
            source,
        })?;

    let write_error = |source| GenerateError::Write {
        path: output_path.to_path_buf(),
        source,
    };
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent).map_err(write_error)?;
    }
    fs::write(output_path, html).map_err(write_error)?;
    log::debug!(
        "rendered {} ({}) -> {}",
        page.url,
        page.template,
        output_path.display()
    );
    Ok(())
}
