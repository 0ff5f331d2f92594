use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::application::ports::{
    AudioFetchError, AudioFetcher, ConversionError, TranscriptionEngine, TranscriptionError,
    WaveformConverter,
};
use crate::domain::AudioSource;

use super::scratch::ScratchFile;

const CANONICAL_EXTENSION: &str = "wav";

/// The transcription request pipeline: stage the audio as a local file,
/// normalize it to canonical WAV, run the speech model, and reap every
/// intermediate file on the way out.
pub struct TranscriptionService {
    fetcher: Arc<dyn AudioFetcher>,
    converter: Arc<dyn WaveformConverter>,
    engine: Arc<dyn TranscriptionEngine>,
}

/// A local audio file produced by acquisition. Scratch files are deleted
/// when dropped; existing files are borrowed and left alone.
enum AcquiredAudio {
    Scratch(ScratchFile),
    Existing(PathBuf),
}

impl AcquiredAudio {
    fn path(&self) -> &Path {
        match self {
            AcquiredAudio::Scratch(file) => file.path(),
            AcquiredAudio::Existing(path) => path.as_path(),
        }
    }
}

enum NormalizedAudio<'a> {
    AlreadyCanonical(&'a Path),
    Converted(ScratchFile),
}

impl NormalizedAudio<'_> {
    fn path(&self) -> &Path {
        match self {
            NormalizedAudio::AlreadyCanonical(path) => path,
            NormalizedAudio::Converted(file) => file.path(),
        }
    }
}

impl TranscriptionService {
    pub fn new(
        fetcher: Arc<dyn AudioFetcher>,
        converter: Arc<dyn WaveformConverter>,
        engine: Arc<dyn TranscriptionEngine>,
    ) -> Self {
        Self {
            fetcher,
            converter,
            engine,
        }
    }

    #[tracing::instrument(skip(self, source), fields(source_kind = source.kind()))]
    pub async fn transcribe(&self, source: AudioSource) -> Result<String, PipelineError> {
        let acquired = self.acquire(source).await?;
        let normalized = self.normalize(acquired.path()).await?;

        let audio = tokio::fs::read(normalized.path()).await?;
        let transcription = self.engine.transcribe(&audio).await?;

        tracing::info!(chars = transcription.len(), "Transcription pipeline completed");
        Ok(transcription)
    }

    async fn acquire(&self, source: AudioSource) -> Result<AcquiredAudio, PipelineError> {
        match source {
            AudioSource::Upload { filename, data } => {
                let scratch = ScratchFile::create(extension_of(&filename).as_deref())?;
                tokio::fs::write(scratch.path(), &data).await?;
                tracing::debug!(bytes = data.len(), "Upload staged to scratch file");
                Ok(AcquiredAudio::Scratch(scratch))
            }
            AudioSource::RemoteUrl(url) => {
                let fetched = self.fetcher.fetch(&url).await?;
                let scratch = ScratchFile::create(fetched.extension.as_deref())?;
                tokio::fs::write(scratch.path(), &fetched.data).await?;
                tracing::debug!(bytes = fetched.data.len(), "Remote audio staged to scratch file");
                Ok(AcquiredAudio::Scratch(scratch))
            }
            AudioSource::LocalPath(path) => {
                if tokio::fs::try_exists(&path).await.unwrap_or(false) {
                    Ok(AcquiredAudio::Existing(path))
                } else {
                    Err(PipelineError::SourceNotFound(path.display().to_string()))
                }
            }
        }
    }

    async fn normalize<'a>(&self, input: &'a Path) -> Result<NormalizedAudio<'a>, PipelineError> {
        let extension = input
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        if extension.as_deref() == Some(CANONICAL_EXTENSION) {
            return Ok(NormalizedAudio::AlreadyCanonical(input));
        }

        let scratch = ScratchFile::create(Some(CANONICAL_EXTENSION))?;
        self.converter.convert_to_wav(input, scratch.path()).await?;
        Ok(NormalizedAudio::Converted(scratch))
    }
}

fn extension_of(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("file not found: {0}")]
    SourceNotFound(String),
    #[error("download: {0}")]
    Download(#[from] AudioFetchError),
    #[error("conversion: {0}")]
    Conversion(#[from] ConversionError),
    #[error("transcription: {0}")]
    Transcription(#[from] TranscriptionError),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
