//! Static asset propagation.
//!
//! Mirrors a source tree (usually `static/`) into the output root, byte for
//! byte. Directories are recreated, regular files copied, and anything else
//! (symlinks, sockets, devices) aborts the copy with
//! [`CopyError::UnsupportedFileType`]. Links are never followed below the
//! source root, so a link cannot pull files from outside the tree into the
//! published site.
//!
//! Files already present at the destination are overwritten.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum CopyError {
    #[error("IO error copying to {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Cannot list static directory: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Unsupported file type (not a regular file or directory): {}", .0.display())]
    UnsupportedFileType(PathBuf),
}

/// One file written by [`copy_tree`].
#[derive(Debug, Clone, PartialEq)]
pub struct CopiedFile {
    pub source: PathBuf,
    pub destination: PathBuf,
}

/// Recursively copy `source` into `destination`.
///
/// Entries are visited in file-name order so the returned list, and any
/// failure, are deterministic.
pub fn copy_tree(source: &Path, destination: &Path) -> Result<Vec<CopiedFile>, CopyError> {
    let mut copied = Vec::new();

    for entry in WalkDir::new(source).follow_links(false).sort_by_file_name() {
        let entry = entry?;
        let Ok(relative) = entry.path().strip_prefix(source) else {
            continue;
        };
        let target = destination.join(relative);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            create_dir(&target)?;
        } else if file_type.is_file() {
            if let Some(parent) = target.parent() {
                create_dir(parent)?;
            }
            fs::copy(entry.path(), &target).map_err(|source| CopyError::Io {
                path: target.clone(),
                source,
            })?;
            log::debug!("copied {} -> {}", entry.path().display(), target.display());
            copied.push(CopiedFile {
                source: entry.path().to_path_buf(),
                destination: target,
            });
        } else {
            return Err(CopyError::UnsupportedFileType(entry.path().to_path_buf()));
        }
    }

    Ok(copied)
}

fn create_dir(path: &Path) -> Result<(), CopyError> {
    fs::create_dir_all(path).map_err(|source| CopyError::Io {
        path: path.to_path_buf(),
        source,
    })
}
