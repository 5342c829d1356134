use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no API key configured. Set ATELIER_API_KEY or add it to the config file")]
    MissingApiKey,
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("engine returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed engine response: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("engine reply contained no content")]
    EmptyReply,
}

#[derive(Debug, Error)]
pub enum ComponentError {
    #[error("unknown component '{0}'")]
    Unknown(String),
    #[error("invalid props for '{name}': {source}")]
    InvalidProps {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("nothing visible to export")]
    EmptyScene,
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("model serialization failed: {0}")]
    Model(String),
    #[error("pdf build failed: {0}")]
    Pdf(String),
}
