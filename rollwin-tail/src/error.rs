use std::io;

#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Invalid settings: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Settings path in {name} is not valid unicode")]
    Env {
        name: &'static str,
        #[source]
        source: std::env::VarError,
    },
}

#[derive(thiserror::Error, Debug)]
pub enum FeedError {
    #[error("Sample stream I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to encode report: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Sample producer stopped unexpectedly: {0}")]
    Producer(#[from] tokio::task::JoinError),
}
