use log::info;

use crate::api::models::{SlangExplanation, SlangResponse, TextRequest};
use crate::api::TranslationBackend;
use crate::app_config::UiConfig;
use crate::errors::ValidationError;
use crate::export::{self, Attachment};
use crate::pages::{
    escape_html, format_percent, panel_html, panel_text, require_input, result_html, Clipboard,
    ConfidenceScale, CopyButton, FailureTexts, PanelToggle, ResultActions, ResultArea,
};
use crate::speech::{SpeechEngine, Speaker, UtteranceQueue};

// @module: Slang normalizer page

const PLACEHOLDER: &str = "Click Normalize to convert slang to standard English";
const CATEGORY_CHARS: usize = 40;
const EXPLANATION_LIMIT: usize = 5;
const ABOUT_SLANG: &str = "Internet slang and text abbreviations have become an integral part of digital communication. \
This tool helps convert casual online language into formal, standardized English suitable for professional and academic contexts. \
Understanding both forms is essential in today's multilingual communication landscape.";

const FAILURES: FailureTexts = FailureTexts {
    rejected: "Normalization failed",
    errored: "Error during normalization",
};

#[derive(Debug, Clone, Copy, Default)]
pub struct SlangPanels {
    pub slang: PanelToggle,
    pub abbreviations: PanelToggle,
    pub language: PanelToggle,
}

/// Slang page view-model and controller
#[derive(Debug)]
pub struct SlangPage<E: SpeechEngine = UtteranceQueue> {
    pub input: String,
    pub result: ResultArea,
    pub confidence: Option<String>,
    pub actions: ResultActions,
    pub panels: SlangPanels,
    /// Last successful response, source of the explanation panels
    pub data: Option<SlangResponse>,
    pub copy_button: CopyButton,
    pub speaker: Speaker<E>,
    max_input_chars: usize,
}

impl SlangPage<UtteranceQueue> {
    pub fn new(ui: &UiConfig) -> Self {
        Self::with_engine(ui, UtteranceQueue::new())
    }
}

impl<E: SpeechEngine> SlangPage<E> {
    pub fn with_engine(ui: &UiConfig, engine: E) -> Self {
        Self {
            input: String::new(),
            result: ResultArea::Placeholder(PLACEHOLDER.to_string()),
            confidence: None,
            actions: ResultActions::default(),
            panels: SlangPanels::default(),
            data: None,
            copy_button: CopyButton::new("Copy", "#60a5fa", ui.copy_feedback_ms),
            speaker: Speaker::new(engine),
            max_input_chars: ui.max_input_chars,
        }
    }

    pub fn char_count(&self) -> String {
        super::char_count(&self.input, self.max_input_chars)
    }

    pub fn clear(&mut self) {
        self.input.clear();
    }

    pub async fn normalize(&mut self, backend: &dyn TranslationBackend) -> Result<(), ValidationError> {
        require_input(&self.input, "Please enter text to normalize")?;

        self.result = ResultArea::Pending("Normalizing...".to_string());
        let request = TextRequest {
            text: self.input.clone(),
        };

        match backend.normalize_slang(&request).await {
            Ok(data) => {
                info!("Normalized {} word(s)", data.explanations.len());
                self.result = ResultArea::Ready(data.normalized_text.clone());
                self.confidence = Some(format_percent(data.confidence, ConfidenceScale::Fraction));
                self.actions = ResultActions::all();
                self.data = Some(data);
            }
            Err(err) => {
                self.result = ResultArea::Failed(FAILURES.for_error(&err).to_string());
                self.confidence = None;
                self.actions = ResultActions::default();
                self.data = None;
            }
        }
        Ok(())
    }

    pub fn speak_input(&mut self) -> Result<(), ValidationError> {
        self.speaker.speak_input(&self.input, "Please enter text to speak")
    }

    /// Speak the output box unless it still shows the initial hint
    pub fn speak_output(&mut self) {
        if matches!(self.result, ResultArea::Placeholder(_)) || self.result.text().is_empty() {
            return;
        }
        let text = self.result.text().to_string();
        self.speaker.speak_text(&text, "en-US");
    }

    pub fn copy_result<C: Clipboard>(&mut self, clipboard: &mut C) -> Result<(), ValidationError> {
        self.copy_button.copy(clipboard, self.result.text())
    }

    /// Download built from the input box and the output box
    pub fn download(&self, millis: i64) -> Attachment {
        export::slang_attachment(&self.input, self.result.text(), millis)
    }

    pub fn render_html(&self) -> String {
        let mut html = result_html("normalizedText", &self.result, None);
        if let Some(confidence) = &self.confidence {
            html.push_str(&format!("<div id=\"confidenceScore\">{}</div>\n", confidence));
        }
        let Some(data) = &self.data else {
            return html;
        };

        if !data.explanations.is_empty() {
            html.push_str(&panel_html("word-mapping", "Word-by-Word Mapping", None, &mapping_table_html(&data.explanations)));
        }

        let explanations: String = data
            .explanations
            .iter()
            .take(EXPLANATION_LIMIT)
            .map(|item| {
                format!(
                    "<div class=\"slang-item\"><div class=\"slang-item-original\">&quot;{}&quot; → &quot;{}&quot;</div><div class=\"slang-item-meaning\">{}</div></div>",
                    escape_html(&item.original),
                    escape_html(&item.normalized),
                    escape_html(&item.explanation)
                )
            })
            .collect();
        html.push_str(&panel_html("slang-panel", "Slang Explanations", Some(&self.panels.slang), &explanations));

        let abbreviations: String = unique_abbreviations(&data.explanations)
            .iter()
            .map(|item| format!("<strong>{}</strong> = {}<br>", escape_html(&item.original), escape_html(&item.normalized)))
            .collect();
        html.push_str(&panel_html(
            "abbreviation-panel",
            "Abbreviations",
            Some(&self.panels.abbreviations),
            &format!("<div><strong>Common Abbreviations Found:</strong><br>{}</div>", abbreviations),
        ));

        html.push_str(&panel_html(
            "language-panel",
            "Language Info",
            Some(&self.panels.language),
            &format!(
                "<div><strong>Internet Language Analysis:</strong><br><br><strong>Confidence Level:</strong> {}<br><br><strong>About Modern Slang:</strong> {}</div>",
                format_percent(data.confidence, ConfidenceScale::Fraction),
                ABOUT_SLANG
            ),
        ));
        html
    }

    pub fn render_text(&self) -> String {
        let mut out = format!("{}\n\n", self.result.text());
        if let Some(confidence) = &self.confidence {
            out.push_str(&format!("Confidence: {}\n\n", confidence));
        }
        let Some(data) = &self.data else {
            return out;
        };

        if !data.explanations.is_empty() {
            let rows: Vec<String> = data
                .explanations
                .iter()
                .map(|item| format!("{} -> {} ({})", item.original, item.normalized, category(&item.explanation)))
                .collect();
            out.push_str(&panel_text("Word-by-Word Mapping", None, &rows.join("\n")));
        }

        let explanations: Vec<String> = data
            .explanations
            .iter()
            .take(EXPLANATION_LIMIT)
            .map(|item| format!("\"{}\" → \"{}\": {}", item.original, item.normalized, item.explanation))
            .collect();
        out.push_str(&panel_text("Slang Explanations", Some(&self.panels.slang), &explanations.join("\n")));

        let abbreviations: Vec<String> = unique_abbreviations(&data.explanations)
            .iter()
            .map(|item| format!("{} = {}", item.original, item.normalized))
            .collect();
        out.push_str(&panel_text(
            "Abbreviations",
            Some(&self.panels.abbreviations),
            &format!("Common Abbreviations Found:\n{}", abbreviations.join("\n")),
        ));
        out.push_str(&panel_text(
            "Language Info",
            Some(&self.panels.language),
            &format!(
                "Confidence Level: {}\n{}",
                format_percent(data.confidence, ConfidenceScale::Fraction),
                ABOUT_SLANG
            ),
        ));
        out
    }
}

/// First 40 characters of an explanation followed by "..."
pub fn category(explanation: &str) -> String {
    let head: String = explanation.chars().take(CATEGORY_CHARS).collect();
    format!("{}...", head)
}

/// Explanations with a repeated `original` dropped, first occurrence kept
pub fn unique_abbreviations(explanations: &[SlangExplanation]) -> Vec<&SlangExplanation> {
    let mut seen = Vec::new();
    let mut unique = Vec::new();
    for item in explanations {
        if !seen.contains(&item.original.as_str()) {
            seen.push(item.original.as_str());
            unique.push(item);
        }
    }
    unique
}

fn mapping_table_html(explanations: &[SlangExplanation]) -> String {
    let mut html = String::from("<table><tr><th>Slang</th><th>Normalized</th><th>Category</th></tr>");
    for (idx, item) in explanations.iter().enumerate() {
        let row_class = if idx % 2 == 0 { "even" } else { "odd" };
        html.push_str(&format!(
            "<tr class=\"{}\"><td><strong>{}</strong></td><td>{}</td><td>{}</td></tr>",
            row_class,
            escape_html(&item.original),
            escape_html(&item.normalized),
            escape_html(&category(&item.explanation))
        ));
    }
    html.push_str("</table>");
    html
}
