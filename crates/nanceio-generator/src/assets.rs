//! Static asset copying.
//!
//! Files under the static directory (the profile picture, favicons) are
//! copied into the output unchanged, keeping their relative paths.

use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, info};

/// Asset processing errors.
#[derive(Debug, Error)]
pub enum AssetError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid asset path.
    #[error("invalid asset path: {0}")]
    InvalidPath(PathBuf),
}

/// Result type for asset operations.
pub type Result<T> = std::result::Result<T, AssetError>;

/// Site-relative paths of every copied asset, e.g. `/profile-pic.png`.
#[derive(Debug, Clone, Default)]
pub struct AssetManifest {
    assets: BTreeSet<String>,
}

impl AssetManifest {
    /// Create a new empty manifest.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a copied asset.
    pub fn add(&mut self, path: impl Into<String>) {
        self.assets.insert(path.into());
    }

    /// Whether an asset with this site path was copied.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.assets.contains(path)
    }

    /// Number of copied assets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Asset paths in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.assets.iter().map(String::as_str)
    }
}

/// Copies a static directory tree into the output directory.
#[derive(Debug, Default)]
pub struct AssetProcessor;

impl AssetProcessor {
    /// Create a new asset processor.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Copy all assets from `source_dir` into `dest_dir`.
    ///
    /// A missing source directory yields an empty manifest.
    pub fn process(&self, source_dir: &Path, dest_dir: &Path) -> Result<AssetManifest> {
        info!(
            source = %source_dir.display(),
            dest = %dest_dir.display(),
            "processing assets"
        );

        let mut manifest = AssetManifest::new();

        if !source_dir.exists() {
            debug!("source directory does not exist, skipping");
            return Ok(manifest);
        }

        self.process_dir(source_dir, source_dir, dest_dir, &mut manifest)?;

        info!(count = manifest.len(), "assets processed");
        Ok(manifest)
    }

    fn process_dir(
        &self,
        base_dir: &Path,
        current_dir: &Path,
        dest_base: &Path,
        manifest: &mut AssetManifest,
    ) -> Result<()> {
        for entry in fs::read_dir(current_dir)? {
            let path = entry?.path();

            // Skip hidden files/directories
            if path
                .file_name()
                .is_some_and(|n| n.to_string_lossy().starts_with('.'))
            {
                continue;
            }

            if path.is_dir() {
                self.process_dir(base_dir, &path, dest_base, manifest)?;
            } else if path.is_file() {
                let relative = path
                    .strip_prefix(base_dir)
                    .map_err(|_| AssetError::InvalidPath(path.clone()))?;
                let dest_path = dest_base.join(relative);

                copy_file(&path, &dest_path)?;
                manifest.add(format!("/{}", relative.display()).replace('\\', "/"));

                debug!(src = %path.display(), dest = %dest_path.display(), "copied asset");
            }
        }

        Ok(())
    }
}

/// Copy a single file, creating parent directories as needed.
pub fn copy_file(source: &Path, dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(source, dest)?;
    Ok(())
}
