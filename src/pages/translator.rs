use log::info;

use crate::api::models::{DetailedRequest, DetailedResponse, WordExplanation, WordMapping};
use crate::api::TranslationBackend;
use crate::app_config::UiConfig;
use crate::errors::ValidationError;
use crate::export::{self, Attachment};
use crate::language_utils::speech_tag;
use crate::pages::{
    escape_html, format_percent, panel_html, panel_text, require_input, result_html, Clipboard,
    ConfidenceLevel, ConfidenceScale, CopyButton, FailureTexts, PanelToggle, ResultActions,
    ResultArea,
};
use crate::speech::{SpeechEngine, Speaker, UtteranceQueue, VoiceInput};

// @module: Detailed text translator page

const PLACEHOLDER: &str = "Translation will appear here";

const FAILURES: FailureTexts = FailureTexts {
    rejected: "Translation failed",
    errored: "Error during translation",
};

/// Translator page view-model and controller
#[derive(Debug)]
pub struct TranslatorPage<E: SpeechEngine = UtteranceQueue> {
    pub input: String,
    pub source_lang: String,
    pub target_lang: String,
    pub result: ResultArea,
    pub confidence: Option<String>,
    pub actions: ResultActions,
    pub explanation_panel: PanelToggle,
    pub data: Option<DetailedResponse>,
    pub voice: VoiceInput,
    pub copy_button: CopyButton,
    pub speaker: Speaker<E>,
    max_input_chars: usize,
}

impl TranslatorPage<UtteranceQueue> {
    pub fn new(ui: &UiConfig, source_lang: &str, target_lang: &str) -> Self {
        Self::with_engine(ui, source_lang, target_lang, UtteranceQueue::new(), false)
    }
}

impl<E: SpeechEngine> TranslatorPage<E> {
    pub fn with_engine(ui: &UiConfig, source_lang: &str, target_lang: &str, engine: E, recognition: bool) -> Self {
        Self {
            input: String::new(),
            source_lang: source_lang.to_string(),
            target_lang: target_lang.to_string(),
            result: ResultArea::Placeholder(PLACEHOLDER.to_string()),
            confidence: None,
            actions: ResultActions::default(),
            explanation_panel: PanelToggle::default(),
            data: None,
            voice: VoiceInput::new(recognition),
            copy_button: CopyButton::new("Copy", "#10b981", ui.copy_feedback_ms).plain_confirmation(),
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

    /// Recognition finished; the transcript replaces the source text
    pub fn on_voice_result(&mut self, results: &[String], result_index: usize) {
        self.input = self.voice.on_result(results, result_index);
    }

    pub async fn translate(&mut self, backend: &dyn TranslationBackend) -> Result<(), ValidationError> {
        require_input(&self.input, "Please enter text to translate")?;

        self.result = ResultArea::Pending("Translating...".to_string());
        let request = DetailedRequest {
            text: self.input.clone(),
            source_lang: self.source_lang.clone(),
            target_lang: self.target_lang.clone(),
        };

        match backend.translate_detailed(&request).await {
            Ok(data) => {
                info!("Translated {} word(s) to {}", data.word_mappings.len(), self.target_lang);
                self.result = ResultArea::Ready(data.translated_text.clone());
                self.confidence = Some(format_percent(data.confidence, ConfidenceScale::Percent));
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

    /// Speak the output box in the target language
    pub fn speak_translation(&mut self) -> Result<(), ValidationError> {
        let text = self.result.text();
        if text.is_empty() || text == FAILURES.rejected {
            return Err(ValidationError::NothingToSpeak("No translation to speak"));
        }
        let text = text.to_string();
        self.speaker.speak_text(&text, speech_tag(&self.target_lang));
        Ok(())
    }

    pub fn copy_result<C: Clipboard>(&mut self, clipboard: &mut C) -> Result<(), ValidationError> {
        self.copy_button.copy(clipboard, self.result.text())
    }

    pub fn download(&self, millis: i64) -> Attachment {
        export::translation_attachment(&self.input, self.result.text(), &self.target_lang, millis)
    }

    pub fn render_html(&self) -> String {
        let mut html = result_html("translatedText", &self.result, None);
        if let Some(confidence) = &self.confidence {
            html.push_str(&format!("<div id=\"confidenceScore\">{}</div>\n", confidence));
        }
        let Some(data) = &self.data else {
            return html;
        };

        if !data.word_mappings.is_empty() {
            html.push_str(&panel_html("word-mapping", "Word-to-Word Mapping", None, &mapping_rows_html(&data.word_mappings)));
        }

        let mut details = String::new();
        if let Some(explanation) = data.linguistic_explanation.as_deref().filter(|e| !e.is_empty()) {
            details.push_str(&format!(
                "<div id=\"linguisticExplanation\"><p id=\"linguisticText\">{}</p></div>",
                escape_html(explanation)
            ));
        }
        if !data.word_explanations.is_empty() {
            details.push_str(&explanation_table_html(&data.word_explanations));
        }
        html.push_str(&panel_html("explanation-panel", "Detailed Explanation", Some(&self.explanation_panel), &details));
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

        if !data.word_mappings.is_empty() {
            let rows: Vec<String> = data
                .word_mappings
                .iter()
                .map(|m| {
                    format!(
                        "{} ({}) -> {} ({}) {} confidence [{}]",
                        m.source_word,
                        m.source_pos,
                        m.target_word,
                        m.target_pos,
                        format_percent(m.confidence, ConfidenceScale::Fraction),
                        ConfidenceLevel::from_fraction(m.confidence).css_class()
                    )
                })
                .collect();
            out.push_str(&panel_text("Word-to-Word Mapping", None, &rows.join("\n")));
        }

        let mut details = Vec::new();
        if let Some(explanation) = data.linguistic_explanation.as_deref().filter(|e| !e.is_empty()) {
            details.push(explanation.to_string());
        }
        for word in &data.word_explanations {
            details.push(format!(
                "{} [{}] {} -> {} [{}] | {} | {}",
                word.original_word,
                word.source_pos,
                word.source_meaning.as_deref().unwrap_or("N/A"),
                word.translated_word,
                word.target_pos,
                word.rule,
                format_percent(word.confidence, ConfidenceScale::Fraction)
            ));
        }
        out.push_str(&panel_text("Detailed Explanation", Some(&self.explanation_panel), &details.join("\n")));
        out
    }
}

fn mapping_rows_html(mappings: &[WordMapping]) -> String {
    let last = mappings.len().saturating_sub(1);

    let mut source = String::from("<div class=\"word-mapping-row\">");
    for (index, mapping) in mappings.iter().enumerate() {
        source.push_str(&format!(
            "<div class=\"word-mapping-item\"><div class=\"source-word\">{}</div><div class=\"pos-tag\">{}</div></div>",
            escape_html(&mapping.source_word),
            escape_html(&mapping.source_pos)
        ));
        if index < last {
            source.push_str("<div class=\"word-mapping-arrow\">→</div>");
        }
    }
    source.push_str("</div>");

    let mut target = String::from("<div class=\"word-mapping-row target\">");
    for (index, mapping) in mappings.iter().enumerate() {
        let level = ConfidenceLevel::from_fraction(mapping.confidence);
        target.push_str(&format!(
            "<div class=\"word-mapping-item\"><div class=\"target-word\">{}</div><div class=\"pos-tag\">{}</div>\
             <div class=\"confidence-indicator\" style=\"color: {};\">{} confidence</div></div>",
            escape_html(&mapping.target_word),
            escape_html(&mapping.target_pos),
            level.colour(),
            format_percent(mapping.confidence, ConfidenceScale::Fraction)
        ));
        if index < last {
            target.push_str("<div class=\"word-mapping-arrow\">↓</div>");
        }
    }
    target.push_str("</div>");

    source + &target
}

fn explanation_table_html(words: &[WordExplanation]) -> String {
    let mut html = String::from(
        "<table id=\"wordExplanationTable\"><tr><th>Word</th><th>POS</th><th>Meaning</th>\
         <th>Translation</th><th>POS</th><th>Rule</th><th>Confidence</th></tr>",
    );
    for word in words {
        let level = ConfidenceLevel::from_fraction(word.confidence).css_class();
        html.push_str(&format!(
            "<tr><td><strong>{}</strong></td><td><span class=\"pos-tag {}\">{}</span></td><td>{}</td>\
             <td><strong>{}</strong></td><td><span class=\"pos-tag {}\">{}</span></td><td>{}</td>\
             <td><div class=\"confidence-indicator confidence-{}\"><span class=\"confidence-bar {}\"></span>{}</div></td></tr>",
            escape_html(&word.original_word),
            escape_html(&word.source_pos.to_lowercase()),
            escape_html(&word.source_pos),
            escape_html(word.source_meaning.as_deref().unwrap_or("N/A")),
            escape_html(&word.translated_word),
            escape_html(&word.target_pos.to_lowercase()),
            escape_html(&word.target_pos),
            escape_html(&word.rule),
            level,
            level,
            format_percent(word.confidence, ConfidenceScale::Fraction)
        ));
    }
    html.push_str("</table>");
    html
}
