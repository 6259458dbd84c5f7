/*!
 * Page controllers and their view-models.
 *
 * Each page owns one typed view-model, built once and updated by its
 * controller; rendering reads the view-model only. The widgets in this
 * module are shared by every page:
 * - `ResultArea`: the main output box
 * - `InlineMessage`: validation and form messages
 * - `PanelToggle`: collapsible explanation panels
 * - `CopyButton` + `Clipboard`: copy with confirmation feedback
 */

use log::error;
use std::time::Duration;

use crate::errors::{ApiError, ValidationError};

pub mod auth;
pub mod historical;
pub mod idiom;
pub mod slang;
pub mod translator;
pub mod video;

/// State of a page's main output box
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultArea {
    /// Initial hint text
    Placeholder(String),
    /// Request in flight
    Pending(String),
    /// Successful result, as displayed text
    Ready(String),
    /// Static failure text
    Failed(String),
}

impl ResultArea {
    /// Displayed text content
    pub fn text(&self) -> &str {
        match self {
            Self::Placeholder(text) | Self::Pending(text) | Self::Ready(text) | Self::Failed(text) => text,
        }
    }

    /// Result text available for copy, speech and download
    pub fn ready_text(&self) -> Option<&str> {
        match self {
            Self::Ready(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder(_))
    }
}

/// The two static strings a page shows when its request fails
#[derive(Debug, Clone, Copy)]
pub struct FailureTexts {
    /// Backend answered with a non-2xx status
    pub rejected: &'static str,
    /// Transport or parse failure
    pub errored: &'static str,
}

impl FailureTexts {
    /// Pick the placeholder for this error and log the cause
    pub fn for_error(&self, err: &ApiError) -> &'static str {
        error!("Error: {}", err);
        if err.is_status() { self.rejected } else { self.errored }
    }
}

/// Kind of inline message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Error,
    Success,
}

/// Inline message element under a form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineMessage {
    pub kind: MessageKind,
    pub text: String,
    /// Errors hide themselves after this delay; success messages stay
    pub dismiss_after: Option<Duration>,
}

impl InlineMessage {
    pub fn error(text: impl Into<String>, dismiss_ms: u64) -> Self {
        Self {
            kind: MessageKind::Error,
            text: text.into(),
            dismiss_after: Some(Duration::from_millis(dismiss_ms)),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Success,
            text: text.into(),
            dismiss_after: None,
        }
    }

    /// Whether the message is still shown `elapsed` after it appeared
    pub fn is_visible_after(&self, elapsed: Duration) -> bool {
        self.dismiss_after.is_none_or(|limit| elapsed < limit)
    }
}

/// Collapsible panel; panels start expanded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelToggle {
    visible: bool,
}

impl Default for PanelToggle {
    fn default() -> Self {
        Self { visible: true }
    }
}

impl PanelToggle {
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Flip visibility and return the new button glyph
    pub fn toggle(&mut self) -> &'static str {
        self.visible = !self.visible;
        self.glyph()
    }

    pub fn glyph(&self) -> &'static str {
        if self.visible { "▲" } else { "▼" }
    }
}

/// Clipboard access
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> anyhow::Result<()>;
}

/// Clipboard kept in memory
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> anyhow::Result<()> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}

/// Copy button with temporary confirmation feedback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyButton {
    pub label: String,
    original_label: String,
    /// Background colour while the confirmation shows
    pub highlight: Option<&'static str>,
    success_colour: &'static str,
    confirmed_label: &'static str,
    feedback_ms: u64,
}

impl CopyButton {
    pub fn new(label: impl Into<String>, success_colour: &'static str, feedback_ms: u64) -> Self {
        let label = label.into();
        Self {
            original_label: label.clone(),
            label,
            highlight: None,
            success_colour,
            confirmed_label: "✓ Copied!",
            feedback_ms,
        }
    }

    /// Confirmation label without the check mark
    pub fn plain_confirmation(mut self) -> Self {
        self.confirmed_label = "Copied!";
        self
    }

    /// Copy `text`; on success the caller reverts after `revert_after()`
    pub fn copy<C: Clipboard>(&mut self, clipboard: &mut C, text: &str) -> Result<(), ValidationError> {
        match clipboard.write_text(text) {
            Ok(()) => {
                self.label = self.confirmed_label.to_string();
                self.highlight = Some(self.success_colour);
                Ok(())
            }
            Err(err) => {
                error!("Copy failed: {}", err);
                Err(ValidationError::CopyFailed)
            }
        }
    }

    pub fn revert_after(&self) -> Duration {
        Duration::from_millis(self.feedback_ms)
    }

    /// Restore the original label and colour
    pub fn revert(&mut self) {
        self.label = self.original_label.clone();
        self.highlight = None;
    }
}

/// Buttons that appear once a result is available
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResultActions {
    pub copy: bool,
    pub speak: bool,
    pub download: bool,
}

impl ResultActions {
    pub fn all() -> Self {
        Self { copy: true, speak: true, download: true }
    }
}

/// How a backend confidence value is expressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceScale {
    /// 0..1
    Fraction,
    /// 0..100
    Percent,
}

/// Render a confidence value as "NN%"
pub fn format_percent(value: f64, scale: ConfidenceScale) -> String {
    match scale {
        ConfidenceScale::Fraction => format!("{}%", (value * 100.0).round() as i64),
        ConfidenceScale::Percent if value.fract() == 0.0 => format!("{}%", value as i64),
        ConfidenceScale::Percent => format!("{}%", value),
    }
}

/// Per-word confidence banding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl ConfidenceLevel {
    /// `confidence` is a fraction
    pub fn from_fraction(confidence: f64) -> Self {
        if confidence >= 0.8 {
            Self::High
        } else if confidence >= 0.5 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    pub fn colour(&self) -> &'static str {
        match self {
            Self::High => "#27ae60",
            Self::Medium => "#f39c12",
            Self::Low => "#e74c3c",
        }
    }
}

/// Character counter text ("12/500")
pub fn char_count(text: &str, max: usize) -> String {
    format!("{}/{}", text.chars().count(), max)
}

/// Escape text for inclusion in HTML
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Main output box; a ready result uses `rendered`, anything else shows its text as a placeholder
pub fn result_html(id: &str, area: &ResultArea, rendered: Option<String>) -> String {
    match (area, rendered) {
        (ResultArea::Ready(_), Some(html)) => format!("<div id=\"{}\" class=\"result\">{}</div>\n", id, html),
        (ResultArea::Ready(text), None) | (ResultArea::Pending(text), _) => {
            format!("<div id=\"{}\" class=\"result\">{}</div>\n", id, escape_html(text))
        }
        (ResultArea::Placeholder(text) | ResultArea::Failed(text), _) => {
            format!("<div id=\"{}\" class=\"result placeholder\">{}</div>\n", id, escape_html(text))
        }
    }
}

/// Titled panel; a collapsed panel keeps its markup but is not displayed
pub fn panel_html(class: &str, title: &str, toggle: Option<&PanelToggle>, body: &str) -> String {
    let (button, display) = match toggle {
        Some(panel) => (
            format!(" <button class=\"panel-toggle\">{}</button>", panel.glyph()),
            if panel.is_visible() { "block" } else { "none" },
        ),
        None => (String::new(), "block"),
    };
    format!(
        "<div class=\"panel {}\"><div class=\"panel-header\">{}{}</div><div class=\"panel-content\" style=\"display: {};\">{}</div></div>\n",
        class, title, button, display, body
    )
}

/// Plain-text panel; collapsed panels render nothing
pub fn panel_text(title: &str, toggle: Option<&PanelToggle>, body: &str) -> String {
    if toggle.is_some_and(|panel| !panel.is_visible()) {
        return String::new();
    }
    format!("== {} ==\n{}\n\n", title, body.trim_end())
}

/// Required-field check shared by the text pages
pub fn require_input(text: &str, prompt: &'static str) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        Err(ValidationError::MissingInput(prompt))
    } else {
        Ok(())
    }
}
