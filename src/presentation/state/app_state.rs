use std::sync::Arc;

use crate::application::ports::HistoryRepository;
use crate::application::services::TranscriptionService;

#[derive(Clone)]
pub struct AppState {
    pub transcription_service: Arc<TranscriptionService>,
    pub history_repository: Arc<dyn HistoryRepository>,
}
