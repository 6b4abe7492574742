//! Shared test utilities for the simple-site test suite.
//!
//! Provides fixture setup and small filesystem helpers for asserting on
//! generated output trees.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let site = setup_fixtures();
//! let out = site.path().join("out");
//! generate(&BuildOptions::new(site.path()).with_output_dir(Some(out.clone())), |_| {}).unwrap();
//!
//! assert_eq!(relative_files(&out), vec!["about/index.html", "css/style.css", "index.html"]);
//! ```

use std::path::Path;
use tempfile::TempDir;
use walkdir::WalkDir;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/site/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
    crate::assets::copy_tree(&fixtures, tmp.path()).unwrap();
    tmp
}

/// Build an input directory from a JSON manifest and `(name, source)` templates.
pub fn write_site(manifest: &str, templates: &[(&str, &str)]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("config.json"), manifest).unwrap();
    for (name, source) in templates {
        write_file(&tmp.path().join("templates"), name, source);
    }
    tmp
}

/// Write `content` to `root/rel`, creating parent directories.
pub fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

// =========================================================================
// Output tree inspection
// =========================================================================

/// All regular files under `root`, as sorted `/`-separated relative paths.
pub fn relative_files(root: &Path) -> Vec<String> {
    let mut files: Vec<String> = WalkDir::new(root)
        .into_iter()
        .map(|e| e.unwrap())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            e.path()
                .strip_prefix(root)
                .unwrap()
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/")
        })
        .collect();
    files.sort();
    files
}

/// Read a generated file as a string. Panics with the path on failure.
pub fn read(root: &Path, rel: &str) -> String {
    let path = root.join(rel);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()))
}
