use async_trait::async_trait;

use crate::domain::{ChatExchange, ChatExchangeRecord};

#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Insert a new exchange and return it with the store-assigned id and
    /// timestamp.
    async fn create(&self, exchange: &ChatExchange) -> Result<ChatExchangeRecord, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("connection failed: {0}")]
    ConnectionFailed(String),
    #[error("query failed: {0}")]
    QueryFailed(String),
}
