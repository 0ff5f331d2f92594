use std::path::Path;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use kuching::application::ports::{
    AudioFetchError, AudioFetcher, ConversionError, FetchedAudio, HistoryRepository,
    RepositoryError, TranscriptionEngine, TranscriptionError, WaveformConverter,
};
use kuching::application::services::TranscriptionService;
use kuching::domain::{ChatExchange, ChatExchangeRecord};
use kuching::presentation::{AppState, create_router};

const MOCK_TRANSCRIPT: &str = "hello from the mock engine";
const BOUNDARY: &str = "kuching-test-boundary";

struct MockEngine;

#[async_trait::async_trait]
impl TranscriptionEngine for MockEngine {
    async fn transcribe(&self, _audio: &[u8]) -> Result<String, TranscriptionError> {
        Ok(MOCK_TRANSCRIPT.to_string())
    }
}

struct UnreachableFetcher;

#[async_trait::async_trait]
impl AudioFetcher for UnreachableFetcher {
    async fn fetch(&self, _url: &str) -> Result<FetchedAudio, AudioFetchError> {
        Err(AudioFetchError::HttpStatus(404))
    }
}

struct CopyConverter;

#[async_trait::async_trait]
impl WaveformConverter for CopyConverter {
    async fn convert_to_wav(&self, source: &Path, dest: &Path) -> Result<(), ConversionError> {
        std::fs::copy(source, dest)?;
        Ok(())
    }
}

#[derive(Default)]
struct InMemoryHistoryRepository {
    records: Mutex<Vec<ChatExchangeRecord>>,
}

#[async_trait::async_trait]
impl HistoryRepository for InMemoryHistoryRepository {
    async fn create(&self, exchange: &ChatExchange) -> Result<ChatExchangeRecord, RepositoryError> {
        let mut records = self.records.lock().unwrap();
        let record = ChatExchangeRecord {
            id: records.len() as i64 + 1,
            title: exchange.title().to_string(),
            created_at: chrono::Utc::now(),
        };
        records.push(record.clone());
        Ok(record)
    }
}

struct FailingHistoryRepository;

#[async_trait::async_trait]
impl HistoryRepository for FailingHistoryRepository {
    async fn create(
        &self,
        _exchange: &ChatExchange,
    ) -> Result<ChatExchangeRecord, RepositoryError> {
        Err(RepositoryError::QueryFailed("connection reset".to_string()))
    }
}

fn create_test_app() -> axum::Router {
    let transcription_service = Arc::new(TranscriptionService::new(
        Arc::new(UnreachableFetcher),
        Arc::new(CopyConverter),
        Arc::new(MockEngine),
    ));

    let state = AppState {
        transcription_service,
        history_repository: Arc::new(InMemoryHistoryRepository::default()),
    };

    create_router(state)
}

fn build_wav(sample_rate: u32, samples: &[i16]) -> Vec<u8> {
    let num_samples = samples.len() as u32;
    let byte_rate = sample_rate * 2;
    let data_size = num_samples * 2;
    let file_size = 36 + data_size;

    let mut wav = Vec::with_capacity(44 + data_size as usize);
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&file_size.to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
    wav.extend_from_slice(&1u16.to_le_bytes()); // mono
    wav.extend_from_slice(&sample_rate.to_le_bytes());
    wav.extend_from_slice(&byte_rate.to_le_bytes());
    wav.extend_from_slice(&2u16.to_le_bytes()); // block align
    wav.extend_from_slice(&16u16.to_le_bytes()); // bits per sample
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_size.to_le_bytes());
    for &s in samples {
        wav.extend_from_slice(&s.to_le_bytes());
    }
    wav
}

fn multipart_request(uri: &str, parts: &[(&str, Option<&str>, Vec<u8>)]) -> Request<Body> {
    let mut body = Vec::new();
    for (name, filename, data) in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        let disposition = match filename {
            Some(filename) => format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\r\n",
                name, filename
            ),
            None => format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name),
        };
        body.extend_from_slice(disposition.as_bytes());
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn given_running_server_when_health_check_then_returns_ok() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn given_no_audio_field_when_transcribing_then_returns_bad_request() {
    let app = create_test_app();

    let request = multipart_request(
        "/api/v1/transcribe",
        &[("note", None, b"not audio".to_vec())],
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = response_json(response).await;
    assert_eq!(json["error"], "No audio file provided");
}

#[tokio::test]
async fn given_wav_upload_when_transcribing_then_returns_transcription() {
    let app = create_test_app();

    let wav = build_wav(16_000, &vec![0i16; 1600]);
    let request = multipart_request("/api/v1/transcribe", &[("audio", Some("speech.wav"), wav)]);
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["transcription"], MOCK_TRANSCRIPT);
}

#[tokio::test]
async fn given_non_wav_upload_when_transcribing_then_conversion_path_succeeds() {
    let app = create_test_app();

    let wav = build_wav(16_000, &vec![0i16; 1600]);
    let request = multipart_request("/api/v1/transcribe", &[("audio", Some("speech.mp3"), wav)]);
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["transcription"], MOCK_TRANSCRIPT);
}

#[tokio::test]
async fn given_missing_audio_path_when_transcribing_then_returns_bad_request() {
    let app = create_test_app();

    let request = multipart_request(
        "/api/v1/transcribe",
        &[("audio_path", None, b"/nonexistent/audio.wav".to_vec())],
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = response_json(response).await;
    let message = json["error"].as_str().unwrap();
    assert!(message.contains("file not found"), "got: {}", message);
}

#[tokio::test]
async fn given_audio_url_when_download_fails_then_returns_bad_request() {
    let app = create_test_app();

    let request = multipart_request(
        "/api/v1/transcribe",
        &[(
            "audio_url",
            None,
            b"http://audio.example/missing.mp3".to_vec(),
        )],
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = response_json(response).await;
    let message = json["error"].as_str().unwrap();
    assert!(message.contains("HTTP 404"), "got: {}", message);
}

#[tokio::test]
async fn given_valid_exchange_when_posting_history_then_returns_derived_title() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/history")
                .header("content-type", "application/json")
                .body(Body::from(
                    r#"{"input_text": "hi", "output_text": "one two three four five"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["title"], "one two three four...");
    assert_eq!(json["id"], 1);
    let timestamp = json["timestamp"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
}

#[tokio::test]
async fn given_get_method_when_requesting_history_then_returns_bad_request() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/history")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = response_json(response).await;
    assert_eq!(json["error"], "Invalid request method");
}

#[tokio::test]
async fn given_malformed_body_when_posting_history_then_returns_bad_request() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/history")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"input_text": "hi"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = response_json(response).await;
    assert!(
        json["error"]
            .as_str()
            .unwrap()
            .contains("Invalid request body")
    );
}

#[tokio::test]
async fn given_failing_store_when_posting_history_then_returns_server_error() {
    let transcription_service = Arc::new(TranscriptionService::new(
        Arc::new(UnreachableFetcher),
        Arc::new(CopyConverter),
        Arc::new(MockEngine),
    ));
    let state = AppState {
        transcription_service,
        history_repository: Arc::new(FailingHistoryRepository),
    };
    let app = create_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/history")
                .header("content-type", "application/json")
                .body(Body::from(
                    r#"{"input_text": "hi", "output_text": "one two"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = response_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("query failed"));
}

#[tokio::test]
async fn given_request_without_id_when_any_endpoint_then_response_contains_request_id() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn given_request_with_id_when_any_endpoint_then_response_echoes_request_id() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("x-request-id", "test-request-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.headers().get("x-request-id").unwrap(),
        "test-request-123"
    );
}
