/*!
 * Client side of the translation backend.
 *
 * - `models`: request/response bodies for every endpoint
 * - `client`: reqwest implementation with a session cookie store
 * - `mock`: scripted backend for tests and offline use
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ApiError;
use models::{
    DetailedRequest, DetailedResponse, FormReply, HistoricalResponse, IdiomRequest,
    IdiomResponse, LoginRequest, RegisterRequest, SlangResponse, TextRequest, VideoRequest,
    VideoResponse,
};

/// Operations the pages need from the backend
///
/// Every call is a single JSON `POST`. Implementations never retry.
#[async_trait]
pub trait TranslationBackend: Send + Sync + Debug {
    /// Submit credentials; non-2xx statuses come back as a `FormReply`
    async fn login(&self, request: &LoginRequest) -> Result<FormReply, ApiError>;

    /// Create an account; non-2xx statuses come back as a `FormReply`
    async fn register(&self, request: &RegisterRequest) -> Result<FormReply, ApiError>;

    /// Look up an idiom
    async fn translate_idiom(&self, request: &IdiomRequest) -> Result<IdiomResponse, ApiError>;

    /// Normalize chat slang
    async fn normalize_slang(&self, request: &TextRequest) -> Result<SlangResponse, ApiError>;

    /// Modernize historical English
    async fn translate_historical(&self, request: &TextRequest) -> Result<HistoricalResponse, ApiError>;

    /// Translate with word-level analysis
    async fn translate_detailed(&self, request: &DetailedRequest) -> Result<DetailedResponse, ApiError>;

    /// Translate a list of subtitle cues
    async fn translate_video(&self, request: &VideoRequest) -> Result<VideoResponse, ApiError>;
}

pub mod client;
pub mod mock;
pub mod models;
