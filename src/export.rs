use chrono::Utc;

// @module: Client-side downloads rebuilt from on-screen values

/// A text file offered for download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Suggested file name
    pub file_name: String,
    /// File body
    pub content: String,
}

impl Attachment {
    /// `{prefix}_{millis}.{extension}`
    pub fn stamped(prefix: &str, extension: &str, millis: i64, content: String) -> Self {
        Self {
            file_name: format!("{}_{}.{}", prefix, millis, extension),
            content,
        }
    }
}

/// Unix time in milliseconds, used to stamp file names
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Slang page download
pub fn slang_attachment(source: &str, normalized: &str, millis: i64) -> Attachment {
    let content = format!("ORIGINAL SLANG TEXT:\n{}\n\nNORMALIZED TEXT:\n{}", source, normalized);
    Attachment::stamped("normalized_text", "txt", millis, content)
}

/// Historical page download
pub fn historical_attachment(source: &str, modern: &str, millis: i64) -> Attachment {
    let content = format!("HISTORICAL/OLD ENGLISH TEXT:\n{}\n\nMODERN ENGLISH TEXT:\n{}", source, modern);
    Attachment::stamped("historical_translation", "txt", millis, content)
}

/// Translator page download
pub fn translation_attachment(source: &str, translated: &str, target_lang: &str, millis: i64) -> Attachment {
    let content = format!(
        "SOURCE TEXT (ENGLISH):\n{}\n\nTRANSLATED TEXT ({}):\n{}",
        source,
        target_lang.to_uppercase(),
        translated
    );
    Attachment::stamped("translation", "txt", millis, content)
}

/// Video page download, either the plain transcript or an SRT document
pub fn subtitle_attachment(content: String, srt: bool, millis: i64) -> Attachment {
    let extension = if srt { "srt" } else { "txt" };
    Attachment::stamped("translated_subtitles", extension, millis, content)
}
