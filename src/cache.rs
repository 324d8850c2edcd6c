use std::io;
use std::path::{Path, PathBuf};

/// Holding area for installers downloaded during this run.
///
/// Created on first download; whatever is found there at startup is leftover
/// from an earlier run and goes away with everything else in `clear`.
#[derive(Debug, Clone)]
pub struct CacheDir {
    path: PathBuf,
}

impl CacheDir {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CacheDir { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path for `file_name` inside the cache, creating the directory if needed.
    pub fn file_path(&self, file_name: &str) -> io::Result<PathBuf> {
        std::fs::create_dir_all(&self.path)?;
        Ok(self.path.join(file_name))
    }

    /// Remove the cache and everything in it. A missing directory is fine.
    pub fn clear(&self) -> io::Result<()> {
        match std::fs::remove_dir_all(&self.path) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}
