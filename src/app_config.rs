use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Application configuration module
/// This module handles the client configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language key sent to the detailed translator
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Target language key sent to the backend (e.g. "hindi")
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Backend connection settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Stored credentials, used to open a session before protected calls
    #[serde(default)]
    pub auth: AuthConfig,

    /// Page behaviour timings and limits
    #[serde(default)]
    pub ui: UiConfig,

    /// Subtitle upload limits
    #[serde(default)]
    pub upload: UploadConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Backend connection settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    // @field: Backend root URL, endpoints are joined onto it
    #[serde(default = "default_base_url")]
    pub base_url: String,

    // @field: Request timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ServerConfig {
    /// Request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Optional login credentials
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct AuthConfig {
    // @field: Username
    #[serde(default)]
    pub username: Option<String>,

    // @field: Password
    #[serde(default)]
    pub password: Option<String>,
}

impl AuthConfig {
    /// Both halves of the credentials, when configured
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.username.as_deref(), self.password.as_deref()) {
            (Some(user), Some(pass)) if !user.is_empty() => Some((user, pass)),
            _ => None,
        }
    }
}

/// Timings and limits shared by every page
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UiConfig {
    /// Delay before an inline error message hides itself
    #[serde(default = "default_message_dismiss_ms")]
    pub message_dismiss_ms: u64,

    /// How long the copy button shows its confirmation
    #[serde(default = "default_copy_feedback_ms")]
    pub copy_feedback_ms: u64,

    /// Delay before a successful registration redirects to the login page
    #[serde(default = "default_redirect_delay_ms")]
    pub redirect_delay_ms: u64,

    /// Size shown in the character counters ("n/500")
    #[serde(default = "default_max_input_chars")]
    pub max_input_chars: usize,

    /// Minimum registration password length
    #[serde(default = "default_min_password_len")]
    pub min_password_len: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            message_dismiss_ms: default_message_dismiss_ms(),
            copy_feedback_ms: default_copy_feedback_ms(),
            redirect_delay_ms: default_redirect_delay_ms(),
            max_input_chars: default_max_input_chars(),
            min_password_len: default_min_password_len(),
        }
    }
}

/// Subtitle file upload limits
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UploadConfig {
    /// Maximum file size in bytes
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,

    /// Accepted file extensions, lowercase without the dot
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_size: default_max_file_size(),
            allowed_extensions: default_allowed_extensions(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Matching `log` filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_source_language() -> String {
    "en".to_string()
}

fn default_target_language() -> String {
    "hindi".to_string()
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_message_dismiss_ms() -> u64 {
    5000
}

fn default_copy_feedback_ms() -> u64 {
    2000
}

fn default_redirect_delay_ms() -> u64 {
    2000
}

fn default_max_input_chars() -> usize {
    500
}

fn default_min_password_len() -> usize {
    6
}

fn default_max_file_size() -> u64 {
    5 * 1024 * 1024 // 5MB
}

fn default_allowed_extensions() -> Vec<String> {
    vec!["srt".to_string(), "vtt".to_string(), "txt".to_string()]
}

impl Config {
    /// Load the configuration file, or write a default one when it is missing
    pub fn load_or_create<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_path = config_path.as_ref();

        if config_path.exists() {
            let file = File::open(config_path)
                .context(format!("Failed to open config file: {:?}", config_path))?;

            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .context(format!("Failed to parse config file: {:?}", config_path))?;

            Ok(config)
        } else {
            warn!("Config file not found at {:?}, creating default config.", config_path);

            let config = Config::default();

            let config_json = serde_json::to_string_pretty(&config)
                .context("Failed to serialize default config to JSON")?;

            std::fs::write(config_path, config_json)
                .context(format!("Failed to write default config to file: {:?}", config_path))?;

            Ok(config)
        }
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.server.base_url)
            .map_err(|e| anyhow!("Invalid server base_url '{}': {}", self.server.base_url, e))?;

        if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
            return Err(anyhow!("Server base_url must be an http(s) URL: {}", self.server.base_url));
        }

        if self.server.timeout_secs == 0 {
            return Err(anyhow!("Server timeout_secs must be greater than zero"));
        }

        crate::language_utils::backend_language_key(&self.target_language)?;

        if self.ui.min_password_len == 0 {
            return Err(anyhow!("ui.min_password_len must be at least 1"));
        }

        if self.upload.allowed_extensions.is_empty() {
            return Err(anyhow!("upload.allowed_extensions must not be empty"));
        }

        Ok(())
    }

    /// Normalized backend key for the configured target language
    pub fn target_language_key(&self) -> Result<String> {
        crate::language_utils::backend_language_key(&self.target_language)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: default_source_language(),
            target_language: default_target_language(),
            server: ServerConfig::default(),
            auth: AuthConfig::default(),
            ui: UiConfig::default(),
            upload: UploadConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
