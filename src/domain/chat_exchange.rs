use chrono::{DateTime, Utc};

const TITLE_WORD_COUNT: usize = 4;

/// An input/output text pair recorded by the history endpoint.
///
/// The title is always a truncation of the output text; it cannot be set
/// independently.
#[derive(Debug, Clone)]
pub struct ChatExchange {
    title: String,
    pub input_text: String,
    pub output_text: String,
}

impl ChatExchange {
    pub fn new(input_text: String, output_text: String) -> Self {
        let title = derive_title(&output_text);
        Self {
            title,
            input_text,
            output_text,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

/// First four whitespace-separated words of the output, ellipsis-terminated
/// even when fewer than four words exist.
fn derive_title(output_text: &str) -> String {
    let head: Vec<&str> = output_text
        .split_whitespace()
        .take(TITLE_WORD_COUNT)
        .collect();
    format!("{}...", head.join(" "))
}

/// A persisted exchange, as handed back by the history store.
#[derive(Debug, Clone)]
pub struct ChatExchangeRecord {
    pub id: i64,
    pub title: String,
    pub created_at: DateTime<Utc>,
}
