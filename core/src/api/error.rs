use thiserror::Error;

/// Errors from the log-hosting service API. Any of these fails the build
/// outright; there is no retry layer.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to log service failed")]
    Transport(#[from] reqwest::Error),

    #[error("log service returned HTTP {status}")]
    Status { status: u16 },

    #[error("malformed response payload")]
    Decode(#[from] serde_json::Error),

    #[error("log service rejected the query: {0}")]
    GraphQl(String),

    #[error("response is missing '{0}'")]
    MissingField(&'static str),
}
