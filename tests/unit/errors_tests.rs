/*!
 * Tests for error types and their user-facing messages
 */

use desi_translate::errors::{ApiError, AppError, ValidationError};

/// Validation messages are exactly what the pages show
#[test]
fn test_validation_messages_shouldMatchPageText() {
    assert_eq!(ValidationError::PasswordMismatch.to_string(), "Passwords do not match");
    assert_eq!(
        ValidationError::PasswordTooShort { min: 6 }.to_string(),
        "Password must be at least 6 characters long"
    );
    assert_eq!(
        ValidationError::MissingInput("Please enter an idiom to translate").to_string(),
        "Please enter an idiom to translate"
    );
    assert_eq!(ValidationError::CopyFailed.to_string(), "Failed to copy text");
}

/// Status errors without a body message print just the code
#[test]
fn test_api_status_error_withoutMessage_shouldPrintCode() {
    let err = ApiError::Status { status_code: 404, message: None };
    assert_eq!(err.to_string(), "API responded with error: 404");
    assert!(err.is_status());
    assert!(!ApiError::RequestFailed("timeout".to_string()).is_status());
}

/// Lower level errors convert into the application error
#[test]
fn test_app_error_conversions_shouldWrapSource() {
    let err: AppError = ValidationError::NoCuesExtracted.into();
    assert!(matches!(err, AppError::Validation(ValidationError::NoCuesExtracted)));

    let err: AppError = ApiError::ParseError("eof".to_string()).into();
    assert_eq!(err.to_string(), "Backend error: Failed to parse API response: eof");

    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.srt");
    let err: AppError = io.into();
    assert!(matches!(err, AppError::File(_)));

    let err: AppError = anyhow::anyhow!("boom").into();
    assert_eq!(err.to_string(), "Unknown error: boom");
}

/// Bad JSON converts into a parse error
#[test]
fn test_api_error_fromSerde_shouldBeParseError() {
    let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err: ApiError = source.into();
    assert!(matches!(err, ApiError::ParseError(_)));
}
