use std::io;
use std::path::{Path, PathBuf};

/// A temporary file owned by one request. The file is removed when the
/// guard drops, on success and failure paths alike.
pub struct ScratchFile {
    path: PathBuf,
}

impl ScratchFile {
    /// Create an empty scratch file, preserving the given extension so
    /// format detection by filename keeps working downstream.
    pub fn create(extension: Option<&str>) -> io::Result<Self> {
        let suffix = extension.map(|ext| format!(".{}", ext));

        let mut builder = tempfile::Builder::new();
        builder.prefix("kuching-audio-");
        if let Some(suffix) = &suffix {
            builder.suffix(suffix.as_str());
        }

        let (_, path) = builder.tempfile()?.keep().map_err(|e| e.error)?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        remove_quietly(&self.path);
    }
}

/// Best-effort deletion: failures are logged, never propagated, and must
/// not stop the removal of other files.
pub fn remove_quietly(path: &Path) {
    if let Err(e) = std::fs::remove_file(path) {
        tracing::warn!(path = %path.display(), error = %e, "Failed to remove scratch file");
    }
}
