mod reqwest_audio_fetcher;

pub use reqwest_audio_fetcher::ReqwestAudioFetcher;
