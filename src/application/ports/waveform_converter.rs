use std::path::Path;

use async_trait::async_trait;

/// Re-encodes an arbitrary supported audio container into the canonical
/// waveform format the transcription engine expects: 16 kHz mono 16-bit
/// PCM WAV.
#[async_trait]
pub trait WaveformConverter: Send + Sync {
    async fn convert_to_wav(&self, source: &Path, dest: &Path) -> Result<(), ConversionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("audio decoding failed: {0}")]
    DecodingFailed(String),
    #[error("wav encoding failed: {0}")]
    EncodingFailed(String),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
