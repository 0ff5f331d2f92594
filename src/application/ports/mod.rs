mod audio_fetcher;
mod history_repository;
mod transcription_engine;
mod waveform_converter;

pub use audio_fetcher::{AudioFetchError, AudioFetcher, FetchedAudio};
pub use history_repository::{HistoryRepository, RepositoryError};
pub use transcription_engine::{TranscriptionEngine, TranscriptionError};
pub use waveform_converter::{ConversionError, WaveformConverter};
