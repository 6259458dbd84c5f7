/*!
 * Scripted backend for tests and offline runs.
 *
 * - `MockBackend::working()` - answers every endpoint with plausible data
 * - `MockBackend::rejecting(status)` - answers with a non-2xx status
 * - `MockBackend::broken()` - answers 2xx with an unparseable body
 * - `MockBackend::offline()` - the request never reaches a server
 */

use async_trait::async_trait;
use std::sync::Mutex;

use crate::api::models::{
    DetailedRequest, DetailedResponse, Endpoint, FormReply, HistoricalExplanation,
    HistoricalResponse, IdiomRequest, IdiomResponse, LoginRequest, RegisterRequest,
    SlangExplanation, SlangResponse, TextRequest, TranslatedCue, VideoRequest, VideoResponse,
    WordExplanation, WordMapping,
};
use crate::api::TranslationBackend;
use crate::errors::ApiError;

/// Behavior mode for the mock backend
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds
    Working,
    /// Answers with this non-2xx status
    Rejecting { status: u16 },
    /// Answers 2xx but the body does not parse
    Broken,
    /// Transport failure
    Offline,
}

/// Mock backend recording every call it receives
#[derive(Debug)]
pub struct MockBackend {
    behavior: MockBehavior,
    /// `message` returned with form replies
    form_message: Option<String>,
    /// Cap on translated subtitles returned, to simulate short answers
    video_limit: Option<usize>,
    calls: Mutex<Vec<Endpoint>>,
}

impl MockBackend {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            form_message: None,
            video_limit: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    pub fn rejecting(status: u16) -> Self {
        Self::new(MockBehavior::Rejecting { status })
    }

    pub fn broken() -> Self {
        Self::new(MockBehavior::Broken)
    }

    pub fn offline() -> Self {
        Self::new(MockBehavior::Offline)
    }

    /// Attach a `message` to login/register replies
    pub fn with_form_message(mut self, message: impl Into<String>) -> Self {
        self.form_message = Some(message.into());
        self
    }

    /// Return at most `limit` translated subtitles
    pub fn with_video_limit(mut self, limit: usize) -> Self {
        self.video_limit = Some(limit);
        self
    }

    /// Endpoints called so far, in order
    pub fn calls(&self) -> Vec<Endpoint> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    /// Number of calls received
    pub fn call_count(&self) -> usize {
        self.calls().len()
    }

    fn record(&self, endpoint: Endpoint) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(endpoint);
        }
    }

    /// Shared failure path for the JSON endpoints
    fn fail(&self, endpoint: Endpoint) -> Option<ApiError> {
        match self.behavior {
            MockBehavior::Working => None,
            MockBehavior::Rejecting { status } => Some(ApiError::Status {
                status_code: status,
                message: Some(format!("{} rejected", endpoint)),
            }),
            MockBehavior::Broken => Some(ApiError::ParseError("expected value at line 1 column 1".to_string())),
            MockBehavior::Offline => Some(ApiError::RequestFailed("connection refused".to_string())),
        }
    }

    fn form_reply(&self, endpoint: Endpoint, success_status: u16, default_message: &str) -> Result<FormReply, ApiError> {
        self.record(endpoint);
        match self.behavior {
            MockBehavior::Working => Ok(FormReply {
                status: success_status,
                message: Some(self.form_message.clone().unwrap_or_else(|| default_message.to_string())),
            }),
            MockBehavior::Rejecting { status } => Ok(FormReply {
                status,
                message: self.form_message.clone(),
            }),
            MockBehavior::Broken => Err(ApiError::ParseError("unexpected token".to_string())),
            MockBehavior::Offline => Err(ApiError::RequestFailed("connection refused".to_string())),
        }
    }
}

fn split_punctuation(word: &str) -> (&str, &str) {
    let clean = word.trim_end_matches(|c: char| ".,!?;:".contains(c));
    (clean, &word[clean.len()..])
}

fn slang_lookup(word: &str) -> Option<&'static str> {
    match word {
        "u" => Some("you"),
        "ur" => Some("your"),
        "r" => Some("are"),
        "gr8" => Some("great"),
        "btw" => Some("by the way"),
        "thx" => Some("thanks"),
        "pls" => Some("please"),
        "l8r" => Some("later"),
        _ => None,
    }
}

fn historical_lookup(word: &str) -> Option<&'static str> {
    match word {
        "thee" | "thou" | "ye" => Some("you"),
        "thy" => Some("your"),
        "thine" => Some("yours"),
        "hath" => Some("has"),
        "doth" => Some("does"),
        "art" => Some("are"),
        _ => None,
    }
}

#[async_trait]
impl TranslationBackend for MockBackend {
    async fn login(&self, _request: &LoginRequest) -> Result<FormReply, ApiError> {
        self.form_reply(Endpoint::Login, 200, "Login successful")
    }

    async fn register(&self, _request: &RegisterRequest) -> Result<FormReply, ApiError> {
        self.form_reply(Endpoint::Register, 201, "Registration successful")
    }

    async fn translate_idiom(&self, request: &IdiomRequest) -> Result<IdiomResponse, ApiError> {
        self.record(Endpoint::TranslateIdiom);
        if let Some(err) = self.fail(Endpoint::TranslateIdiom) {
            return Err(err);
        }

        Ok(IdiomResponse {
            original: request.idiom.trim().to_string(),
            meaning: format!("Meaning of {}", request.idiom.trim()),
            translation: Some(format!("[{}] {}", request.target_lang, request.idiom.trim())),
            confidence: 0.9,
            explanation: "A common figurative expression".to_string(),
            example: format!("He said \"{}\" yesterday.", request.idiom.trim()),
            cultural_note: None,
        })
    }

    async fn normalize_slang(&self, request: &TextRequest) -> Result<SlangResponse, ApiError> {
        self.record(Endpoint::NormalizeSlang);
        if let Some(err) = self.fail(Endpoint::NormalizeSlang) {
            return Err(err);
        }

        let lowered = request.text.to_lowercase();
        let mut words = Vec::new();
        let mut explanations = Vec::new();
        for word in lowered.split_whitespace() {
            let (clean, punctuation) = split_punctuation(word);
            match slang_lookup(clean) {
                Some(normalized) => {
                    let normalized = format!("{}{}", normalized, punctuation);
                    words.push(normalized.clone());
                    explanations.push(SlangExplanation {
                        original: word.to_string(),
                        normalized,
                        explanation: "Internet slang abbreviated form".to_string(),
                    });
                }
                None => {
                    words.push(word.to_string());
                    explanations.push(SlangExplanation {
                        original: word.to_string(),
                        normalized: word.to_string(),
                        explanation: "Proper English".to_string(),
                    });
                }
            }
        }

        Ok(SlangResponse {
            normalized_text: words.join(" "),
            confidence: 0.85,
            explanations,
        })
    }

    async fn translate_historical(&self, request: &TextRequest) -> Result<HistoricalResponse, ApiError> {
        self.record(Endpoint::TranslateHistorical);
        if let Some(err) = self.fail(Endpoint::TranslateHistorical) {
            return Err(err);
        }

        let lowered = request.text.to_lowercase();
        let mut words = Vec::new();
        let mut explanations = Vec::new();
        for word in lowered.split_whitespace() {
            let (clean, punctuation) = split_punctuation(word);
            let (modern, era, explanation) = match historical_lookup(clean) {
                Some(modern) => (format!("{}{}", modern, punctuation), "Early Modern English", "Archaic form"),
                None => (word.to_string(), "Modern English", "Already in modern form"),
            };
            words.push(modern.clone());
            explanations.push(HistoricalExplanation {
                original: word.to_string(),
                modern,
                era: Some(era.to_string()),
                explanation: explanation.to_string(),
            });
        }

        Ok(HistoricalResponse {
            modern_text: words.join(" "),
            confidence: 0.88,
            explanations,
        })
    }

    async fn translate_detailed(&self, request: &DetailedRequest) -> Result<DetailedResponse, ApiError> {
        self.record(Endpoint::TranslateDetailed);
        if let Some(err) = self.fail(Endpoint::TranslateDetailed) {
            return Err(err);
        }

        let words: Vec<&str> = request.text.split_whitespace().collect();
        let word_mappings = words
            .iter()
            .map(|w| WordMapping {
                source_word: w.to_string(),
                target_word: format!("{}*", w),
                source_pos: "noun".to_string(),
                target_pos: "noun".to_string(),
                confidence: 0.8,
            })
            .collect();
        let word_explanations = words
            .iter()
            .map(|w| WordExplanation {
                original_word: w.to_string(),
                source_pos: "NOUN".to_string(),
                source_meaning: None,
                translated_word: format!("{}*", w),
                target_pos: "NOUN".to_string(),
                rule: "Direct translation".to_string(),
                confidence: 0.5,
            })
            .collect();

        Ok(DetailedResponse {
            translated_text: format!("[{}] {}", request.target_lang, request.text.trim()),
            confidence: 85.0,
            word_mappings,
            word_explanations,
            linguistic_explanation: Some(format!(
                "Translated from {} to {} word by word.",
                request.source_lang, request.target_lang
            )),
        })
    }

    async fn translate_video(&self, request: &VideoRequest) -> Result<VideoResponse, ApiError> {
        self.record(Endpoint::TranslateVideo);
        if let Some(err) = self.fail(Endpoint::TranslateVideo) {
            return Err(err);
        }

        let limit = self.video_limit.unwrap_or(request.subtitles.len());
        let translated_subtitles: Vec<TranslatedCue> = request
            .subtitles
            .iter()
            .take(limit)
            .map(|cue| TranslatedCue {
                original: cue.clone(),
                translated: format!("[{}] {}", request.target_lang, cue),
            })
            .collect();

        Ok(VideoResponse {
            total: Some(translated_subtitles.len()),
            translated_subtitles,
        })
    }
}
