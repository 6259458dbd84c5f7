use log::{debug, error, info};
use std::time::Duration;

use crate::api::models::{LoginRequest, RegisterRequest};
use crate::api::TranslationBackend;
use crate::app_config::UiConfig;
use crate::errors::ValidationError;
use crate::pages::{escape_html, InlineMessage};

// @module: Login and registration forms

const LOGIN_FAILED: &str = "Login failed. Please try again.";
const REGISTER_FAILED: &str = "Registration failed. Please try again.";
const REGISTER_SUCCEEDED: &str = "Registration successful!";
const REQUEST_ERRORED: &str = "An error occurred. Please try again.";

/// Navigation requested by a form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redirect {
    pub location: &'static str,
    /// Delay before navigating
    pub delay: Duration,
}

/// Login form state
#[derive(Debug, Clone)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    /// Error element under the form
    pub error: Option<InlineMessage>,
    dismiss_ms: u64,
}

impl LoginForm {
    pub fn new(ui: &UiConfig) -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            error: None,
            dismiss_ms: ui.message_dismiss_ms,
        }
    }

    /// Submit the credentials; a 2xx reply redirects to the home page
    pub async fn submit(&mut self, backend: &dyn TranslationBackend) -> Option<Redirect> {
        let request = LoginRequest {
            username: self.username.clone(),
            password: self.password.clone(),
        };

        match backend.login(&request).await {
            Ok(reply) if reply.is_success() => {
                info!("Logged in as {}", self.username);
                self.error = None;
                Some(Redirect {
                    location: "/home",
                    delay: Duration::ZERO,
                })
            }
            Ok(reply) => {
                debug!("Login rejected with status {}", reply.status);
                let text = reply.message.unwrap_or_else(|| LOGIN_FAILED.to_string());
                self.error = Some(InlineMessage::error(text, self.dismiss_ms));
                None
            }
            Err(err) => {
                error!("Error: {}", err);
                self.error = Some(InlineMessage::error(REQUEST_ERRORED, self.dismiss_ms));
                None
            }
        }
    }

    pub fn render_html(&self) -> String {
        render_messages(self.error.as_ref(), None)
    }
}

/// Registration form state
#[derive(Debug, Clone)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub error: Option<InlineMessage>,
    pub success: Option<InlineMessage>,
    dismiss_ms: u64,
    redirect_delay_ms: u64,
    min_password_len: usize,
}

impl RegisterForm {
    pub fn new(ui: &UiConfig) -> Self {
        Self {
            username: String::new(),
            email: String::new(),
            password: String::new(),
            confirm_password: String::new(),
            error: None,
            success: None,
            dismiss_ms: ui.message_dismiss_ms,
            redirect_delay_ms: ui.redirect_delay_ms,
            min_password_len: ui.min_password_len,
        }
    }

    /// Local checks run before anything is sent
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        if self.password.chars().count() < self.min_password_len {
            return Err(ValidationError::PasswordTooShort {
                min: self.min_password_len,
            });
        }
        Ok(())
    }

    /// Validate and submit; success resets the form and redirects to login after a delay
    pub async fn submit(&mut self, backend: &dyn TranslationBackend) -> Option<Redirect> {
        if let Err(err) = self.validate() {
            self.error = Some(InlineMessage::error(err.to_string(), self.dismiss_ms));
            return None;
        }

        let request = RegisterRequest {
            username: self.username.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            confirm_password: self.confirm_password.clone(),
        };

        match backend.register(&request).await {
            Ok(reply) if reply.is_success() => {
                info!("Registered {}", self.username);
                let text = reply.message.unwrap_or_else(|| REGISTER_SUCCEEDED.to_string());
                self.success = Some(InlineMessage::success(text));
                self.reset();
                Some(Redirect {
                    location: "/login",
                    delay: Duration::from_millis(self.redirect_delay_ms),
                })
            }
            Ok(reply) => {
                debug!("Registration rejected with status {}", reply.status);
                let text = reply.message.unwrap_or_else(|| REGISTER_FAILED.to_string());
                self.error = Some(InlineMessage::error(text, self.dismiss_ms));
                None
            }
            Err(err) => {
                error!("Error: {}", err);
                self.error = Some(InlineMessage::error(REQUEST_ERRORED, self.dismiss_ms));
                None
            }
        }
    }

    /// Clear every field
    pub fn reset(&mut self) {
        self.username.clear();
        self.email.clear();
        self.password.clear();
        self.confirm_password.clear();
    }

    pub fn render_html(&self) -> String {
        render_messages(self.error.as_ref(), self.success.as_ref())
    }
}

fn render_messages(error: Option<&InlineMessage>, success: Option<&InlineMessage>) -> String {
    let mut html = String::new();
    if let Some(message) = error {
        html.push_str(&format!(
            "<div id=\"errorMessage\" class=\"error-message show\">{}</div>\n",
            escape_html(&message.text)
        ));
    }
    if let Some(message) = success {
        html.push_str(&format!(
            "<div id=\"successMessage\" class=\"success-message show\">{}</div>\n",
            escape_html(&message.text)
        ));
    }
    html
}
