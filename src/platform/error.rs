use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Platform returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Failed to sign project token: {0}")]
    Signing(String),

    #[error("Platform response did not contain a session")]
    MissingSession,
}
