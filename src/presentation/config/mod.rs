mod settings;

pub use settings::{
    DatabaseSettings, Environment, ServerSettings, Settings, TranscriptionProviderSetting,
    TranscriptionSettings,
};
