use serde::{Deserialize, Serialize};

/// Backend endpoints used by the pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Login,
    Register,
    TranslateIdiom,
    NormalizeSlang,
    TranslateHistorical,
    TranslateDetailed,
    TranslateVideo,
}

impl Endpoint {
    /// Path relative to the backend root
    pub fn path(&self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Register => "/register",
            Self::TranslateIdiom => "/api/translate-idiom",
            Self::NormalizeSlang => "/api/normalize-slang",
            Self::TranslateHistorical => "/api/translate-historical",
            Self::TranslateDetailed => "/api/translate-detailed",
            Self::TranslateVideo => "/api/translate-video",
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// Login form body
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Registration form body
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Reply to a form submission; non-2xx replies are data here, not errors
#[derive(Debug, Clone, PartialEq)]
pub struct FormReply {
    /// HTTP status code
    pub status: u16,
    /// `message` field of the body; `None` for an empty body or a body without one
    pub message: Option<String>,
}

impl FormReply {
    /// 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Body of a form reply; every field is optional
#[derive(Debug, Default, Deserialize)]
pub struct MessageBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Idiom lookup request
#[derive(Debug, Clone, Serialize)]
pub struct IdiomRequest {
    pub idiom: String,
    pub target_lang: String,
}

/// Idiom lookup result
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct IdiomResponse {
    #[serde(default)]
    pub original: String,
    #[serde(default)]
    pub meaning: String,
    #[serde(default)]
    pub translation: Option<String>,
    /// Fraction in 0..1
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub example: String,
    #[serde(default)]
    pub cultural_note: Option<String>,
}

/// Single-text request shared by the slang and historical endpoints
#[derive(Debug, Clone, Serialize)]
pub struct TextRequest {
    pub text: String,
}

/// One slang word mapping
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SlangExplanation {
    #[serde(default)]
    pub original: String,
    #[serde(default)]
    pub normalized: String,
    #[serde(default)]
    pub explanation: String,
}

/// Slang normalization result
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SlangResponse {
    #[serde(default)]
    pub normalized_text: String,
    /// Fraction in 0..1
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub explanations: Vec<SlangExplanation>,
}

/// One historical word mapping
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HistoricalExplanation {
    #[serde(default)]
    pub original: String,
    #[serde(default)]
    pub modern: String,
    #[serde(default)]
    pub era: Option<String>,
    #[serde(default)]
    pub explanation: String,
}

/// Historical-English translation result
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HistoricalResponse {
    #[serde(default)]
    pub modern_text: String,
    /// Fraction in 0..1
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub explanations: Vec<HistoricalExplanation>,
}

/// Detailed translation request
#[derive(Debug, Clone, Serialize)]
pub struct DetailedRequest {
    pub text: String,
    pub source_lang: String,
    pub target_lang: String,
}

/// Source/target word alignment entry
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WordMapping {
    #[serde(default)]
    pub source_word: String,
    #[serde(default)]
    pub target_word: String,
    #[serde(default)]
    pub source_pos: String,
    #[serde(default)]
    pub target_pos: String,
    /// Fraction in 0..1
    #[serde(default)]
    pub confidence: f64,
}

/// Row of the word explanation table
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WordExplanation {
    #[serde(default)]
    pub original_word: String,
    #[serde(default)]
    pub source_pos: String,
    #[serde(default)]
    pub source_meaning: Option<String>,
    #[serde(default)]
    pub translated_word: String,
    #[serde(default)]
    pub target_pos: String,
    #[serde(default)]
    pub rule: String,
    /// Fraction in 0..1
    #[serde(default)]
    pub confidence: f64,
}

/// Detailed translation result
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DetailedResponse {
    #[serde(default)]
    pub translated_text: String,
    /// Already a percentage (0..100)
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub word_mappings: Vec<WordMapping>,
    #[serde(default)]
    pub word_explanations: Vec<WordExplanation>,
    #[serde(default)]
    pub linguistic_explanation: Option<String>,
}

/// Subtitle translation request
#[derive(Debug, Clone, Serialize)]
pub struct VideoRequest {
    pub subtitles: Vec<String>,
    pub target_lang: String,
}

/// One translated cue, index-aligned with the submitted list
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TranslatedCue {
    #[serde(default)]
    pub original: String,
    #[serde(default)]
    pub translated: String,
}

/// Subtitle translation result
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct VideoResponse {
    #[serde(default)]
    pub translated_subtitles: Vec<TranslatedCue>,
    #[serde(default)]
    pub total: Option<usize>,
}
