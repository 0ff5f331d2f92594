mod scratch;
mod transcription_service;

pub use scratch::{ScratchFile, remove_quietly};
pub use transcription_service::{PipelineError, TranscriptionService};
