use std::path::Path;

use async_trait::async_trait;

use crate::application::ports::{AudioFetchError, AudioFetcher, FetchedAudio};

/// Downloads remote audio over HTTP. The extension is taken from the final
/// URL path so the pipeline can stage the bytes under a matching name.
pub struct ReqwestAudioFetcher {
    client: reqwest::Client,
}

impl ReqwestAudioFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for ReqwestAudioFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AudioFetcher for ReqwestAudioFetcher {
    #[tracing::instrument(skip(self))]
    async fn fetch(&self, url: &str) -> Result<FetchedAudio, AudioFetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AudioFetchError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AudioFetchError::HttpStatus(status.as_u16()));
        }

        let extension = Path::new(response.url().path())
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        let data = response
            .bytes()
            .await
            .map_err(|e| AudioFetchError::RequestFailed(e.to_string()))?;

        tracing::debug!(bytes = data.len(), "Remote audio downloaded");

        Ok(FetchedAudio { data, extension })
    }
}
