use log::info;

use crate::api::models::{HistoricalExplanation, HistoricalResponse, TextRequest};
use crate::api::TranslationBackend;
use crate::app_config::UiConfig;
use crate::errors::ValidationError;
use crate::export::{self, Attachment};
use crate::pages::{
    escape_html, format_percent, panel_html, panel_text, require_input, result_html, Clipboard,
    ConfidenceScale, CopyButton, FailureTexts, PanelToggle, ResultActions, ResultArea,
};
use crate::speech::{SpeechEngine, Speaker, UtteranceQueue};

// @module: Historical English translator page

const PLACEHOLDER: &str = "Click Translate to see the modern English version";
const ETYMOLOGY: &str = "This text contains words and phrases from different historical periods. \
Each word has evolved over centuries with changes in pronunciation, meaning, and usage. \
The explanations above show how these historical terms map to their modern equivalents, \
preserving the original intent while making the text accessible to contemporary readers.";
const CONTEXT: &str = "This text has been translated from historical English to modern English. \
The translation maintains the original meaning while converting archaic vocabulary and grammar patterns to contemporary usage. \
Perfect for understanding historical documents, literature, and correspondence.";

const FAILURES: FailureTexts = FailureTexts {
    rejected: "Translation failed",
    errored: "Error during translation",
};

#[derive(Debug, Clone, Copy, Default)]
pub struct HistoricalPanels {
    pub explanation: PanelToggle,
    pub etymology: PanelToggle,
    pub context: PanelToggle,
}

/// Historical page view-model and controller
#[derive(Debug)]
pub struct HistoricalPage<E: SpeechEngine = UtteranceQueue> {
    pub input: String,
    pub result: ResultArea,
    pub confidence: Option<String>,
    pub actions: ResultActions,
    pub panels: HistoricalPanels,
    pub data: Option<HistoricalResponse>,
    pub copy_button: CopyButton,
    pub speaker: Speaker<E>,
    max_input_chars: usize,
}

impl HistoricalPage<UtteranceQueue> {
    pub fn new(ui: &UiConfig) -> Self {
        Self::with_engine(ui, UtteranceQueue::new())
    }
}

impl<E: SpeechEngine> HistoricalPage<E> {
    pub fn with_engine(ui: &UiConfig, engine: E) -> Self {
        Self {
            input: String::new(),
            result: ResultArea::Placeholder(PLACEHOLDER.to_string()),
            confidence: None,
            actions: ResultActions::default(),
            panels: HistoricalPanels::default(),
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

    pub async fn translate(&mut self, backend: &dyn TranslationBackend) -> Result<(), ValidationError> {
        require_input(&self.input, "Please enter historical text to translate")?;

        self.result = ResultArea::Pending("Translating...".to_string());
        let request = TextRequest {
            text: self.input.clone(),
        };

        match backend.translate_historical(&request).await {
            Ok(data) => {
                info!("Modernized {} word(s)", data.explanations.len());
                self.result = ResultArea::Ready(data.modern_text.clone());
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

    pub fn download(&self, millis: i64) -> Attachment {
        export::historical_attachment(&self.input, self.result.text(), millis)
    }

    pub fn render_html(&self) -> String {
        let mut html = result_html("modernText", &self.result, None);
        if let Some(confidence) = &self.confidence {
            html.push_str(&format!("<div id=\"confidenceScore\">{}</div>\n", confidence));
        }
        let Some(data) = &self.data else {
            return html;
        };

        if !data.explanations.is_empty() {
            html.push_str(&panel_html("word-mapping", "Word-by-Word Translation", None, &mapping_table_html(&data.explanations)));
        }

        let explanations: String = data
            .explanations
            .iter()
            .map(|item| {
                format!(
                    "<div class=\"historical-item\"><div class=\"mapping\">&quot;{}&quot; → &quot;{}&quot;</div>\
                     <div><strong>Era:</strong> {}</div><div><strong>Explanation:</strong> {}</div></div>",
                    escape_html(&item.original),
                    escape_html(&item.modern),
                    escape_html(era(item)),
                    escape_html(&item.explanation)
                )
            })
            .collect();
        html.push_str(&panel_html("explanation-panel", "Explanations", Some(&self.panels.explanation), &explanations));
        html.push_str(&panel_html(
            "etymology-panel",
            "Etymology",
            Some(&self.panels.etymology),
            &format!("<div class=\"historical-item\"><strong>Etymology Analysis:</strong><br>{}</div>", ETYMOLOGY),
        ));
        html.push_str(&panel_html(
            "context-panel",
            "Historical Context",
            Some(&self.panels.context),
            &format!(
                "<div class=\"historical-item\"><strong>Historical Context:</strong><br><strong>Confidence Level:</strong> {}<br><br>{}</div>",
                format_percent(data.confidence, ConfidenceScale::Fraction),
                CONTEXT
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
                .map(|item| format!("{} -> {} [{}]", item.original, item.modern, era(item)))
                .collect();
            out.push_str(&panel_text("Word-by-Word Translation", None, &rows.join("\n")));
        }

        let explanations: Vec<String> = data
            .explanations
            .iter()
            .map(|item| format!("\"{}\" → \"{}\" ({}): {}", item.original, item.modern, era(item), item.explanation))
            .collect();
        out.push_str(&panel_text("Explanations", Some(&self.panels.explanation), &explanations.join("\n")));
        out.push_str(&panel_text("Etymology", Some(&self.panels.etymology), ETYMOLOGY));
        out.push_str(&panel_text(
            "Historical Context",
            Some(&self.panels.context),
            &format!(
                "Confidence Level: {}\n{}",
                format_percent(data.confidence, ConfidenceScale::Fraction),
                CONTEXT
            ),
        ));
        out
    }
}

/// Era of a mapping, "Unknown" when the backend gave none
pub fn era(item: &HistoricalExplanation) -> &str {
    item.era.as_deref().filter(|e| !e.is_empty()).unwrap_or("Unknown")
}

fn mapping_table_html(explanations: &[HistoricalExplanation]) -> String {
    let mut html = String::from("<table><tr><th>Historical</th><th>Modern</th><th>Era</th></tr>");
    for (idx, item) in explanations.iter().enumerate() {
        let row_class = if idx % 2 == 0 { "even" } else { "odd" };
        html.push_str(&format!(
            "<tr class=\"{}\"><td><strong>{}</strong></td><td>{}</td><td>{}</td></tr>",
            row_class,
            escape_html(&item.original),
            escape_html(&item.modern),
            escape_html(era(item))
        ));
    }
    html.push_str("</table>");
    html
}
