use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use crate::application::ports::{HistoryRepository, RepositoryError};
use crate::domain::{ChatExchange, ChatExchangeRecord};

pub struct PgHistoryRepository {
    pool: PgPool,
}

impl PgHistoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HistoryRepository for PgHistoryRepository {
    #[instrument(skip(self, exchange), fields(title = %exchange.title()))]
    async fn create(&self, exchange: &ChatExchange) -> Result<ChatExchangeRecord, RepositoryError> {
        let row: (i64, DateTime<Utc>) = sqlx::query_as(
            r#"
            INSERT INTO chat_exchanges (title, input_text, output_text, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, created_at
            "#,
        )
        .bind(exchange.title())
        .bind(&exchange.input_text)
        .bind(&exchange.output_text)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(ChatExchangeRecord {
            id: row.0,
            title: exchange.title().to_string(),
            created_at: row.1,
        })
    }
}
