use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use kuching::application::services::TranscriptionService;
use kuching::infrastructure::audio::{SymphoniaWavConverter, TranscriptionProvider, create_engine};
use kuching::infrastructure::http::ReqwestAudioFetcher;
use kuching::infrastructure::observability::{TracingConfig, init_tracing};
use kuching::infrastructure::persistence::{PgHistoryRepository, create_pool};
use kuching::presentation::{
    AppState, Environment, Settings, TranscriptionProviderSetting, create_router,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".to_string())
        .try_into()
        .map_err(anyhow::Error::msg)?;

    init_tracing(TracingConfig::default());

    let settings = Settings::load(environment)?;

    let pool = create_pool(&settings.database.url, settings.database.max_connections).await?;
    sqlx::migrate!().run(&pool).await?;

    let provider = match settings.transcription.provider {
        TranscriptionProviderSetting::Local => TranscriptionProvider::Local,
        TranscriptionProviderSetting::OpenAi => TranscriptionProvider::OpenAi,
    };

    // Loaded once here; every request shares this engine instance.
    let engine = create_engine(
        provider,
        &settings.transcription.model,
        settings.transcription.api_key.clone(),
        settings.transcription.base_url.clone(),
    )?;

    let transcription_service = Arc::new(TranscriptionService::new(
        Arc::new(ReqwestAudioFetcher::new()),
        Arc::new(SymphoniaWavConverter),
        engine,
    ));

    let history_repository = Arc::new(PgHistoryRepository::new(pool));

    let state = AppState {
        transcription_service,
        history_repository,
    };

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    tracing::info!(%addr, environment = %environment, "Listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
