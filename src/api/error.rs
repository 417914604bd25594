use thiserror::Error;

/// Failures talking to the cost service.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("failed to build http client: {0}")]
    BuildClient(#[source] reqwest::Error),
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("http status {code}: {body}")]
    Status { code: u16, body: String },
    #[error("decode response failed: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ApiError {
    /// The service answered, but not with something we could decode.
    pub fn is_decode(&self) -> bool {
        matches!(self, ApiError::Decode(_))
    }
}
