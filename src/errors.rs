/*!
 * Error types for the dishfinder application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when working with language model provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Errors raised inside a business directory adapter.
///
/// These never reach the matcher: adapters log them and return an empty set.
#[derive(Error, Debug)]
pub enum DirectoryError {
    /// Transport level failure
    #[error("Directory request failed: {0}")]
    RequestFailed(String),

    /// Non-success HTTP status
    #[error("Directory responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Body or reason text
        message: String,
    },

    /// Upstream payload did not have the expected shape
    #[error("Unexpected directory payload: {0}")]
    UnexpectedPayload(String),
}

/// Errors produced while interpreting free-form language model output
#[derive(Error, Debug, PartialEq)]
pub enum ParseError {
    /// The response contained no usable dish lines
    #[error("No dish names found in response")]
    NoDishes,

    /// The nutrition block was missing or not valid JSON
    #[error("Invalid nutrition data: {0}")]
    InvalidNutrition(String),
}

/// Errors that can occur while producing meal recommendations
#[derive(Error, Debug)]
pub enum RecommendationError {
    /// Error from the provider API
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error interpreting the provider output
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from recommendation generation
    #[error("Recommendation error: {0}")]
    Recommendation(#[from] RecommendationError),

    /// Restaurant search was requested without a position
    #[error("Latitude and longitude are required for restaurant recommendations")]
    MissingCoordinates,

    /// Error in the loaded configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

impl From<reqwest::Error> for DirectoryError {
    fn from(error: reqwest::Error) -> Self {
        match error.status() {
            Some(status) => Self::ApiError {
                status_code: status.as_u16(),
                message: error.to_string(),
            },
            None if error.is_decode() => Self::UnexpectedPayload(error.to_string()),
            None => Self::RequestFailed(error.to_string()),
        }
    }
}
