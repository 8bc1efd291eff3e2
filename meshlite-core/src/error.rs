use std::fmt;
use std::path::PathBuf;

/// A mesh file could not be read. No partial mesh is produced.
#[derive(Debug)]
pub struct MeshLoadError {
    pub path: PathBuf,
    pub source: std::io::Error,
}

impl MeshLoadError {
    pub(crate) fn new(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self {
            path: path.into(),
            source,
        }
    }
}

impl fmt::Display for MeshLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to open mesh file {}: {}", self.path.display(), self.source)
    }
}

impl std::error::Error for MeshLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}
