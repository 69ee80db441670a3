use thiserror::Error;

use crate::location::LocationError;

/// Failures reported by a [`crate::WeatherProvider`].
///
/// The CLI shows one message for all of these; the kinds are kept apart so
/// the logs still say what actually went wrong.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Location not found: {0}")]
    LocationNotFound(String),

    #[error("Provider rejected the API key")]
    Unauthorized,

    #[error("Provider rate limit exceeded")]
    RateLimited,

    #[error("Failed to reach weather provider: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Provider request failed with status {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Failed to parse provider response: {0}")]
    Parse(String),
}

impl ProviderError {
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::LocationNotFound(_) => "not_found",
            ProviderError::Unauthorized => "unauthorized",
            ProviderError::RateLimited => "rate_limited",
            ProviderError::Transport(_) => "transport",
            ProviderError::Upstream { .. } => "upstream",
            ProviderError::Parse(_) => "parse",
        }
    }
}

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Location(#[from] LocationError),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}
