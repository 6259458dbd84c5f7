/*!
 * # desi-translate
 *
 * Client library for the desi-translate web application: typed page
 * view-models and controllers driving the translation backend over HTTP.
 *
 * ## Features
 *
 * - Login and registration forms with local validation
 * - Idiom, slang, historical English and detailed text translation pages
 * - Subtitle (SRT/VTT) cue extraction and translated transcript reassembly
 * - Speech synthesis queue and speech recognition capture state
 * - Client-side downloads rebuilt from on-screen values, including SRT re-export
 *
 * ## Architecture
 *
 * - `app_config`: Configuration management
 * - `api`: Backend trait, reqwest client and scripted mock
 * - `pages`: One view-model and controller per page, plus shared widgets
 * - `subtitle_processor`: Cue extraction and transcript reassembly
 * - `speech`: Utterance queue and voice input state
 * - `export`: Download attachments
 * - `file_utils`: File system operations
 * - `language_utils`: Language keys, ISO codes and speech tags
 * - `errors`: Custom error types for the application
 */

#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

pub mod api;
pub mod app_config;
pub mod errors;
pub mod export;
pub mod file_utils;
pub mod language_utils;
pub mod pages;
pub mod speech;
pub mod subtitle_processor;

// Re-export main types for easier usage
pub use api::client::ApiClient;
pub use api::mock::MockBackend;
pub use api::TranslationBackend;
pub use app_config::Config;
pub use errors::{ApiError, AppError, ValidationError};
pub use subtitle_processor::{extract_cues, Cue, SubtitleTranscript};
