/*!
 * Tests for error types and conversions
 */

use dishfinder::errors::{AppError, DirectoryError, ParseError, ProviderError, RecommendationError};

#[test]
fn test_providerError_apiError_shouldDisplayStatusAndMessage() {
    let error = ProviderError::ApiError {
        status_code: 503,
        message: "Service unavailable".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("503"));
    assert!(display.contains("Service unavailable"));
}

#[test]
fn test_providerError_authenticationError_shouldDisplayCorrectly() {
    let error = ProviderError::AuthenticationError("Invalid API key".to_string());
    let display = format!("{}", error);
    assert!(display.contains("Authentication error"));
    assert!(display.contains("Invalid API key"));
}

#[test]
fn test_directoryError_unexpectedPayload_shouldDisplayCorrectly() {
    let error = DirectoryError::UnexpectedPayload("no results field".to_string());
    assert_eq!(error.to_string(), "Unexpected directory payload: no results field");
}

#[test]
fn test_parseError_variants_shouldDisplayCorrectly() {
    assert_eq!(ParseError::NoDishes.to_string(), "No dish names found in response");
    assert!(ParseError::InvalidNutrition("eof".to_string()).to_string().contains("eof"));
}

#[test]
fn test_recommendationError_fromProviderError_shouldWrapCorrectly() {
    let provider_error = ProviderError::RateLimitExceeded("slow down".to_string());
    let error: RecommendationError = provider_error.into();

    assert!(matches!(error, RecommendationError::Provider(ProviderError::RateLimitExceeded(_))));
    assert!(error.to_string().contains("slow down"));
}

#[test]
fn test_recommendationError_fromParseError_shouldWrapCorrectly() {
    let error: RecommendationError = ParseError::NoDishes.into();
    assert!(matches!(error, RecommendationError::Parse(ParseError::NoDishes)));
}

#[test]
fn test_appError_fromRecommendationError_shouldWrapCorrectly() {
    let error: AppError = RecommendationError::Parse(ParseError::NoDishes).into();
    let display = error.to_string();
    assert!(display.starts_with("Recommendation error"));
    assert!(display.contains("No dish names"));
}

#[test]
fn test_appError_fromIoError_shouldBecomeFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "conf.json missing");
    let error: AppError = io_error.into();
    assert!(matches!(error, AppError::File(_)));
}

#[test]
fn test_appError_fromAnyhow_shouldKeepMessage() {
    let error: AppError = anyhow::anyhow!("something odd").into();
    assert!(matches!(error, AppError::Unknown(ref message) if message == "something odd"));
}

#[test]
fn test_appError_missingCoordinates_shouldMentionLatitude() {
    assert!(AppError::MissingCoordinates.to_string().contains("Latitude"));
}
