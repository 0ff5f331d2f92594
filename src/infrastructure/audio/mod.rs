mod candle_whisper_engine;
mod engine_factory;
mod openai_whisper_engine;
mod pcm_decoder;
mod wav_converter;

pub use candle_whisper_engine::CandleWhisperEngine;
pub use engine_factory::{TranscriptionProvider, create_engine};
pub use openai_whisper_engine::OpenAiWhisperEngine;
pub use wav_converter::SymphoniaWavConverter;
