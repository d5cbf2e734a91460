//! Error types for the market data crate.

use thiserror::Error;

/// Errors that can occur while talking to the upstream provider.
///
/// The adapter does not retry; every variant is surfaced to the caller, which
/// decides how to report it.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The requested symbol was not found by the provider.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// A provider-specific error occurred (bad status, malformed body, ...).
    #[error("Provider error: {provider} - {message}")]
    Provider {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// A network error occurred while communicating with the provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl ProviderError {
    /// Shorthand for a [`ProviderError::Provider`] raised by `provider`.
    pub fn provider(provider: &str, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.to_string(),
            message: message.into(),
        }
    }
}
