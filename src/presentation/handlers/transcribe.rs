use std::path::PathBuf;

use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use bytes::Bytes;
use serde::Serialize;

use crate::domain::AudioSource;
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct TranscribeResponse {
    pub transcription: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[tracing::instrument(skip(state, multipart))]
pub async fn transcribe_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let source = match read_audio_source(&mut multipart).await {
        Ok(Some(source)) => source,
        Ok(None) => {
            tracing::warn!("Transcription request with no audio input");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "No audio file provided".to_string(),
                }),
            )
                .into_response();
        }
        Err(message) => {
            tracing::error!(error = %message, "Failed to read multipart request");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse { error: message }),
            )
                .into_response();
        }
    };

    tracing::debug!(source_kind = source.kind(), "Audio input received");

    match state.transcription_service.transcribe(source).await {
        Ok(transcription) => {
            tracing::info!(chars = transcription.len(), "Transcription request succeeded");
            (StatusCode::OK, Json(TranscribeResponse { transcription })).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Transcription request failed");
            // Every pipeline failure maps to 400 with a flat error body;
            // existing callers depend on that status code.
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// Pick the audio input out of the multipart form. An uploaded file wins
/// over a URL, a URL over a local path reference.
async fn read_audio_source(multipart: &mut Multipart) -> Result<Option<AudioSource>, String> {
    let mut upload: Option<(String, Bytes)> = None;
    let mut url: Option<String> = None;
    let mut path: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| format!("Failed to read multipart: {}", e))?
    {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };

        match name.as_str() {
            "audio" => {
                let filename = field.file_name().unwrap_or("audio").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| format!("Failed to read audio field: {}", e))?;
                upload = Some((filename, data));
            }
            "audio_url" => {
                url = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| format!("Failed to read audio_url field: {}", e))?,
                );
            }
            "audio_path" => {
                path = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| format!("Failed to read audio_path field: {}", e))?,
                );
            }
            _ => {}
        }
    }

    if let Some((filename, data)) = upload {
        return Ok(Some(AudioSource::Upload { filename, data }));
    }
    if let Some(url) = url {
        return Ok(Some(AudioSource::RemoteUrl(url)));
    }
    if let Some(path) = path {
        return Ok(Some(AudioSource::LocalPath(PathBuf::from(path))));
    }
    Ok(None)
}
