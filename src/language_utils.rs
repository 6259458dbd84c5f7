/*!
 * Language utilities for the backend's language keys.
 *
 * The backend identifies languages by lowercase English names ("hindi",
 * "telugu", ...). Users may type ISO 639-1 / 639-2 codes or English names
 * instead; this module folds all of them onto the backend key and maps
 * keys onto speech synthesis tags.
 */

use anyhow::{anyhow, Result};
use isolang::Language;

/// Languages the backend ships dictionaries for
pub const SUPPORTED_TARGETS: &[&str] = &["hindi", "telugu", "tamil", "spanish", "french"];

/// Convert an ISO 639-2/B code to its ISO 639-2/T twin
fn part2b_to_part2t(code: &str) -> &str {
    match code {
        "fre" => "fra",
        "ger" => "deu",
        "dut" => "nld",
        "gre" => "ell",
        "chi" => "zho",
        "cze" => "ces",
        "per" => "fas",
        "may" => "msa",
        "rum" => "ron",
        "slo" => "slk",
        "wel" => "cym",
        other => other,
    }
}

/// Resolve a code or English name to an isolang `Language`
pub fn resolve_language(input: &str) -> Option<Language> {
    let normalized = input.trim().to_lowercase();

    match normalized.len() {
        0 => None,
        2 => Language::from_639_1(&normalized),
        3 => Language::from_639_3(part2b_to_part2t(&normalized)).or_else(|| from_english_name(&normalized)),
        _ => from_english_name(&normalized),
    }
}

fn from_english_name(lowercase: &str) -> Option<Language> {
    let mut chars = lowercase.chars();
    let capitalized = match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => return None,
    };
    Language::from_name(&capitalized)
}

/// Normalize user input to the key the backend expects ("hi" → "hindi")
pub fn backend_language_key(input: &str) -> Result<String> {
    let lang = resolve_language(input)
        .ok_or_else(|| anyhow!("Invalid language: {}", input))?;

    Ok(lang.to_name().to_lowercase())
}

/// Whether the backend has a dictionary for this key
pub fn is_supported_target(key: &str) -> bool {
    SUPPORTED_TARGETS.contains(&key)
}

/// Speech synthesis tag for a backend key, en-US when unknown
pub fn speech_tag(key: &str) -> &'static str {
    match key.trim().to_lowercase().as_str() {
        "hindi" | "hi" => "hi-IN",
        "telugu" | "te" => "te-IN",
        "tamil" | "ta" => "ta-IN",
        "spanish" | "es" => "es-ES",
        "french" | "fr" => "fr-FR",
        _ => "en-US",
    }
}

/// Display form of a backend key: first letter uppercased ("hindi" → "Hindi")
pub fn display_name(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
