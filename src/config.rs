//! Build configuration and the fixed input/output layout.
//!
//! A site build is fully described by [`BuildOptions`]: where the input
//! directory lives and, optionally, where the output should go. Everything
//! else is convention:
//!
//! ```text
//! site/                        # Input directory
//! ├── config.json              # Page manifest (or config.toml)
//! ├── templates/               # Template root, referenced by name in the manifest
//! │   ├── base.html
//! │   └── index.html
//! └── static/                  # Optional, mirrored verbatim into the output root
//!     └── css/style.css
//! ```
//!
//! Options are immutable once built. Every stage receives the paths it needs
//! as explicit arguments derived from them; nothing in the pipeline mutates a
//! shared output location mid-run.

use std::path::{Path, PathBuf};

/// Manifest file names, in lookup order. The first one present wins.
pub const MANIFEST_FILES: &[&str] = &["config.json", "config.toml"];

/// Template root, relative to the input directory.
pub const TEMPLATES_DIR: &str = "templates";

/// Static assets subtree, relative to the input directory.
pub const STATIC_DIR: &str = "static";

/// Output directory used when none is given, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "generated_html";

/// Options for a single site build.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildOptions {
    /// Input directory holding the manifest, `templates/` and `static/`.
    pub input_dir: PathBuf,
    /// Explicit output directory. `None` means [`DEFAULT_OUTPUT_DIR`].
    pub output_dir: Option<PathBuf>,
}

impl BuildOptions {
    pub fn new(input_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: None,
        }
    }

    pub fn with_output_dir(mut self, output_dir: Option<PathBuf>) -> Self {
        self.output_dir = output_dir;
        self
    }

    /// Resolve the output root: the explicit option, else the default name.
    pub fn output_root(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR))
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.input_dir.join(TEMPLATES_DIR)
    }

    pub fn static_dir(&self) -> PathBuf {
        self.input_dir.join(STATIC_DIR)
    }
}

/// Find the manifest file in an input directory.
///
/// Returns `None` when none of [`MANIFEST_FILES`] exists.
pub fn find_manifest(input_dir: &Path) -> Option<PathBuf> {
    MANIFEST_FILES
        .iter()
        .map(|name| input_dir.join(name))
        .find(|path| path.is_file())
}
