use std::path::PathBuf;

use bytes::Bytes;

/// Where the audio for a transcription request comes from.
#[derive(Debug, Clone)]
pub enum AudioSource {
    /// Bytes uploaded in the request body, with the client-supplied filename.
    Upload { filename: String, data: Bytes },
    /// A remote file to download before transcribing.
    RemoteUrl(String),
    /// A file already on the local filesystem. Used in place, never copied
    /// or deleted.
    LocalPath(PathBuf),
}

impl AudioSource {
    pub fn kind(&self) -> &'static str {
        match self {
            AudioSource::Upload { .. } => "upload",
            AudioSource::RemoteUrl(_) => "url",
            AudioSource::LocalPath(_) => "path",
        }
    }
}
