use async_trait::async_trait;
use bytes::Bytes;

/// Downloaded audio plus the extension derived from the source URL path.
pub struct FetchedAudio {
    pub data: Bytes,
    pub extension: Option<String>,
}

#[async_trait]
pub trait AudioFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedAudio, AudioFetchError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AudioFetchError {
    #[error("request failed: {0}")]
    RequestFailed(String),
    #[error("failed to download audio: HTTP {0}")]
    HttpStatus(u16),
}
