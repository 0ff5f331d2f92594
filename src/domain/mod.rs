mod audio_source;
mod chat_exchange;

pub use audio_source::AudioSource;
pub use chat_exchange::{ChatExchange, ChatExchangeRecord};
