//! On-disk layout of downloaded images.

use apod_core::Quality;
use apod_error::{ApodResult, StorageError, StorageErrorKind};
use std::path::{Path, PathBuf};

/// Images root with one subdirectory per resolution tier.
///
/// ```text
/// images/
/// ├── SD/
/// │   └── Nasa-APOD-2021-02-03-SD-SPIRAL-GALAXY.jpg
/// └── HD/
///     └── Nasa-APOD-2021-02-03-HD-SPIRAL-GALAXY.jpg
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetLayout {
    root: PathBuf,
}

impl AssetLayout {
    /// Layout rooted at `root`. Nothing is created until
    /// [`ensure_dirs`](Self::ensure_dirs).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Images root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding one resolution tier.
    pub fn dir(&self, quality: Quality) -> PathBuf {
        self.root.join(quality.as_ref())
    }

    /// Full path for `file_name` in the tier directory.
    pub fn path_for(&self, quality: Quality, file_name: &str) -> PathBuf {
        self.dir(quality).join(file_name)
    }

    /// Create the root and both tier directories if absent.
    pub fn ensure_dirs(&self) -> ApodResult<()> {
        for quality in [Quality::Standard, Quality::High] {
            let dir = self.dir(quality);
            std::fs::create_dir_all(&dir).map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    dir.display(),
                    e
                )))
            })?;
        }
        Ok(())
    }
}
