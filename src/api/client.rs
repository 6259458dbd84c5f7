use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use url::Url;

use crate::api::models::{
    DetailedRequest, DetailedResponse, Endpoint, FormReply, HistoricalResponse, IdiomRequest,
    IdiomResponse, LoginRequest, MessageBody, RegisterRequest, SlangResponse, TextRequest,
    VideoRequest, VideoResponse,
};
use crate::api::TranslationBackend;
use crate::app_config::ServerConfig;
use crate::errors::ApiError;

/// HTTP client for the translation backend
///
/// Keeps a cookie store for its whole lifetime so the session opened by
/// `login` is sent with every later call.
#[derive(Debug, Clone)]
pub struct ApiClient {
    /// Backend root, always ending in '/'
    base_url: Url,
    /// HTTP client for making requests
    client: Client,
}

impl ApiClient {
    /// Create a client for the backend at `base_url`
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut base_url = Url::parse(base_url)
            .with_context(|| format!("Invalid backend URL: {}", base_url))?;

        if base_url.cannot_be_a_base() {
            return Err(anyhow!("Backend URL cannot be used as a base: {}", base_url));
        }

        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .timeout(timeout)
            .cookie_store(true)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { base_url, client })
    }

    /// Create a client from the `server` section of the configuration
    pub fn from_config(config: &ServerConfig) -> Result<Self> {
        Self::new(&config.base_url, config.timeout())
    }

    /// Backend root URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL of an endpoint, relative to any path prefix of the base
    pub fn endpoint_url(&self, endpoint: Endpoint) -> Result<Url, ApiError> {
        self.base_url
            .join(endpoint.path().trim_start_matches('/'))
            .map_err(|e| ApiError::RequestFailed(format!("Invalid endpoint URL for {}: {}", endpoint, e)))
    }

    /// POST a JSON body and return the status code and the raw response text
    async fn post_raw<B: Serialize + ?Sized + Sync>(&self, endpoint: Endpoint, body: &B) -> Result<(u16, String), ApiError> {
        let url = self.endpoint_url(endpoint)?;
        debug!("POST {}", url);

        let response = self.client.post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                error!("Request to {} failed: {}", endpoint, e);
                ApiError::RequestFailed(e.to_string())
            })?;

        let status = response.status().as_u16();
        let text = response.text().await
            .map_err(|e| ApiError::RequestFailed(format!("Failed to read response from {}: {}", endpoint, e)))?;

        debug!("{} answered {} ({} bytes)", endpoint, status, text.len());
        Ok((status, text))
    }

    /// POST a form and keep non-2xx answers as data
    async fn post_form<B: Serialize + ?Sized + Sync>(&self, endpoint: Endpoint, body: &B) -> Result<FormReply, ApiError> {
        let (status, text) = self.post_raw(endpoint, body).await?;
        let message = parse_message_body(&text)?;
        Ok(FormReply { status, message })
    }

    /// POST a request and decode a 2xx JSON answer
    async fn post_json<B, R>(&self, endpoint: Endpoint, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let (status, text) = self.post_raw(endpoint, body).await?;
        decode_response(endpoint, status, &text)
    }
}

/// Pull the `message` field out of a response body.
///
/// An empty body is not an error and yields `None`; a non-empty body that
/// is not JSON is a parse error.
pub fn parse_message_body(text: &str) -> Result<Option<String>, ApiError> {
    if text.trim().is_empty() {
        return Ok(None);
    }

    let body: MessageBody = serde_json::from_str(text)?;
    Ok(body.message)
}

/// Turn a status and body into the endpoint's response type
pub fn decode_response<R: DeserializeOwned>(endpoint: Endpoint, status: u16, text: &str) -> Result<R, ApiError> {
    if !(200..300).contains(&status) {
        let message = parse_message_body(text).ok().flatten();
        error!("{} responded with status {}", endpoint, status);
        return Err(ApiError::Status { status_code: status, message });
    }

    serde_json::from_str::<R>(text).map_err(|e| {
        error!("Failed to parse {} response: {}", endpoint, e);
        ApiError::ParseError(e.to_string())
    })
}

#[async_trait]
impl TranslationBackend for ApiClient {
    async fn login(&self, request: &LoginRequest) -> Result<FormReply, ApiError> {
        self.post_form(Endpoint::Login, request).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<FormReply, ApiError> {
        self.post_form(Endpoint::Register, request).await
    }

    async fn translate_idiom(&self, request: &IdiomRequest) -> Result<IdiomResponse, ApiError> {
        self.post_json(Endpoint::TranslateIdiom, request).await
    }

    async fn normalize_slang(&self, request: &TextRequest) -> Result<SlangResponse, ApiError> {
        self.post_json(Endpoint::NormalizeSlang, request).await
    }

    async fn translate_historical(&self, request: &TextRequest) -> Result<HistoricalResponse, ApiError> {
        self.post_json(Endpoint::TranslateHistorical, request).await
    }

    async fn translate_detailed(&self, request: &DetailedRequest) -> Result<DetailedResponse, ApiError> {
        self.post_json(Endpoint::TranslateDetailed, request).await
    }

    async fn translate_video(&self, request: &VideoRequest) -> Result<VideoResponse, ApiError> {
        self.post_json(Endpoint::TranslateVideo, request).await
    }
}
