//! URL to output path mapping.
//!
//! Every page is written as `index.html` inside a directory named after its
//! URL, so any static file server can serve it without a `.html` suffix:
//!
//! ```text
//! /             →  out/index.html
//! /about/       →  out/about/index.html
//! /users/ada/   →  out/users/ada/index.html
//! ```

use std::path::{Path, PathBuf};

/// File name every page is written as.
pub const INDEX_FILE: &str = "index.html";

/// Characters the platform treats as path separators inside a URL segment.
#[cfg(windows)]
const SEPARATORS: &[char] = &['/', '\\'];
#[cfg(not(windows))]
const SEPARATORS: &[char] = &['/'];

/// Map a page URL to its file under `output_root`.
///
/// Strips exactly one leading `/` and leaves the rest of the URL alone.
/// No traversal checks happen here; see [`is_contained`].
pub fn map_url(output_root: &Path, url: &str) -> PathBuf {
    let segment = url.strip_prefix('/').unwrap_or(url);
    if segment.is_empty() {
        output_root.join(INDEX_FILE)
    } else {
        output_root.join(segment).join(INDEX_FILE)
    }
}

/// Whether [`map_url`] keeps this URL inside the output root.
///
/// Rejects `.` and `..` segments, and a second leading slash, which would
/// make the joined path absolute.
/// On Windows a `\` also separates segments.
pub fn is_contained(url: &str) -> bool {
    let segment = url.strip_prefix('/').unwrap_or(url);
    if segment.starts_with(SEPARATORS) {
        return false;
    }
    segment
        .split(SEPARATORS)
        .all(|part| part != "." && part != "..")
}
