use std::sync::Arc;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};

use super::candle_whisper_engine::CandleWhisperEngine;
use super::openai_whisper_engine::OpenAiWhisperEngine;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptionProvider {
    Local,
    OpenAi,
}

/// Build the configured engine once, at startup. The returned handle is
/// shared by every request for the process lifetime.
pub fn create_engine(
    provider: TranscriptionProvider,
    model: &str,
    api_key: Option<String>,
    base_url: Option<String>,
) -> Result<Arc<dyn TranscriptionEngine>, TranscriptionError> {
    match provider {
        TranscriptionProvider::Local => Ok(Arc::new(CandleWhisperEngine::new(model)?)),
        TranscriptionProvider::OpenAi => {
            let api_key = api_key.ok_or_else(|| {
                TranscriptionError::ModelLoadFailed(
                    "API key required for the whisper API engine".to_string(),
                )
            })?;
            Ok(Arc::new(OpenAiWhisperEngine::new(
                api_key,
                base_url,
                model.to_string(),
            )))
        }
    }
}
