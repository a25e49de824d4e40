use dialbook_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("core error: {0}")]
    Core(#[from] CoreError),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("api rejected request: {0}")]
    Api(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("command failed: {0}")]
    Command(String),
    #[error("unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, SourceError>;
