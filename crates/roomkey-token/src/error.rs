use thiserror::Error;

#[derive(Error, Debug)]
pub enum TokenError {
    /// A required configuration value is unset or empty.
    #[error("{0} is not defined")]
    MissingConfig(&'static str),

    #[error("failed to encode participant metadata: {0}")]
    Metadata(#[from] serde_json::Error),

    #[error("LiveKit API error: {0}")]
    Signing(#[from] livekit_api::access_token::AccessTokenError),
}
