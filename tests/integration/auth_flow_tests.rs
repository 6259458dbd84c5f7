/*!
 * Integration tests for the login and registration forms
 */

use anyhow::Result;
use std::time::Duration;
use desi_translate::api::client::ApiClient;
use desi_translate::api::mock::MockBackend;
use desi_translate::api::models::Endpoint;
use desi_translate::app_config::UiConfig;
use desi_translate::pages::auth::{LoginForm, RegisterForm};
use desi_translate::pages::MessageKind;
use crate::common;

fn filled_register_form(password: &str, confirm: &str) -> RegisterForm {
    let mut form = RegisterForm::new(&UiConfig::default());
    form.username = "ravi".to_string();
    form.email = "ravi@example.com".to_string();
    form.password = password.to_string();
    form.confirm_password = confirm.to_string();
    form
}

/// A password mismatch is reported locally and nothing is sent
#[tokio::test]
async fn test_register_withMismatchedPasswords_shouldNotCallBackend() {
    let backend = MockBackend::working();
    let mut form = filled_register_form("secret1", "secret2");

    let redirect = form.submit(&backend).await;

    assert!(redirect.is_none());
    assert_eq!(backend.call_count(), 0);
    let error = form.error.unwrap();
    assert_eq!(error.kind, MessageKind::Error);
    assert_eq!(error.text, "Passwords do not match");
    assert!(error.is_visible_after(Duration::from_millis(4999)));
    assert!(!error.is_visible_after(Duration::from_millis(5000)));
}

/// Matching but short passwords are refused locally
#[tokio::test]
async fn test_register_withShortPassword_shouldNotCallBackend() {
    let backend = MockBackend::working();
    let mut form = filled_register_form("abc", "abc");

    assert!(form.submit(&backend).await.is_none());
    assert_eq!(backend.call_count(), 0);
    assert_eq!(form.error.unwrap().text, "Password must be at least 6 characters long");
}

/// Successful registration clears the form and redirects to login after the delay
#[tokio::test]
async fn test_register_withValidForm_shouldRedirectToLogin() {
    let backend = MockBackend::working();
    let mut form = filled_register_form("secret1", "secret1");

    let redirect = form.submit(&backend).await.unwrap();

    assert_eq!(redirect.location, "/login");
    assert_eq!(redirect.delay, Duration::from_millis(2000));
    assert_eq!(backend.calls(), vec![Endpoint::Register]);
    assert_eq!(form.success.as_ref().unwrap().text, "Registration successful");
    assert!(form.username.is_empty());
    assert!(form.confirm_password.is_empty());
    assert!(form.render_html().contains("successMessage"));
}

/// Backend messages are shown as-is
#[tokio::test]
async fn test_register_withTakenUsername_shouldShowBackendMessage() {
    let backend = MockBackend::rejecting(409).with_form_message("Username already exists");
    let mut form = filled_register_form("secret1", "secret1");

    assert!(form.submit(&backend).await.is_none());
    assert_eq!(form.error.unwrap().text, "Username already exists");
    assert_eq!(form.username, "ravi");
}

/// A real 401 with an empty body falls back to the generic login text
#[tokio::test]
async fn test_login_withEmptyUnauthorizedBody_shouldShowGenericFailure() -> Result<()> {
    common::init_logging();
    let base_url = common::serve_once("401 Unauthorized", "").await?;
    let client = ApiClient::new(&base_url, Duration::from_secs(5))?;
    let mut form = LoginForm::new(&UiConfig::default());
    form.username = "ravi".to_string();
    form.password = "wrong".to_string();

    let redirect = form.submit(&client).await;

    assert!(redirect.is_none());
    assert_eq!(form.error.unwrap().text, "Login failed. Please try again.");
    Ok(())
}

/// Same fallback for registration
#[tokio::test]
async fn test_register_withEmptyErrorBody_shouldShowGenericFailure() -> Result<()> {
    let base_url = common::serve_once("400 Bad Request", "").await?;
    let client = ApiClient::new(&base_url, Duration::from_secs(5))?;
    let mut form = filled_register_form("secret1", "secret1");

    assert!(form.submit(&client).await.is_none());
    assert_eq!(form.error.unwrap().text, "Registration failed. Please try again.");
    Ok(())
}

/// A JSON success reply from a real server redirects home
#[tokio::test]
async fn test_login_withRealServerSuccess_shouldRedirectHome() -> Result<()> {
    let base_url = common::serve_once("200 OK", r#"{"success": true, "message": "Login successful"}"#).await?;
    let client = ApiClient::new(&base_url, Duration::from_secs(5))?;
    let mut form = LoginForm::new(&UiConfig::default());
    form.username = "ravi".to_string();
    form.password = "secret1".to_string();

    let redirect = form.submit(&client).await.unwrap();
    assert_eq!(redirect.location, "/home");
    assert_eq!(redirect.delay, Duration::ZERO);
    Ok(())
}

/// Transport failures show the generic error text
#[tokio::test]
async fn test_login_withOfflineBackend_shouldShowGenericError() {
    let backend = MockBackend::offline();
    let mut form = LoginForm::new(&UiConfig::default());
    form.username = "ravi".to_string();
    form.password = "secret1".to_string();

    assert!(form.submit(&backend).await.is_none());
    assert_eq!(form.error.as_ref().unwrap().text, "An error occurred. Please try again.");
    assert!(form.render_html().contains("errorMessage"));
}
