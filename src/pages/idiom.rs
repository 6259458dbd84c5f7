use log::info;

use crate::api::models::{IdiomRequest, IdiomResponse};
use crate::api::TranslationBackend;
use crate::app_config::UiConfig;
use crate::errors::ValidationError;
use crate::language_utils::{display_name, speech_tag};
use crate::pages::{
    escape_html, format_percent, panel_html, panel_text, require_input, result_html, Clipboard,
    ConfidenceScale, CopyButton, FailureTexts, PanelToggle, ResultActions, ResultArea,
};
use crate::speech::{SpeechEngine, Speaker, UtteranceQueue};

// @module: Idiom translator page

const PLACEHOLDER: &str = "Translation will appear here";
const DEFAULT_CULTURAL_NOTE: &str = "This idiom reflects common cultural expressions and communication styles.";
const USAGE_TIP: &str = "Use this idiom in casual conversations or when describing situations that match the idiom's meaning.";

const FAILURES: FailureTexts = FailureTexts {
    rejected: "Idiom not found in database",
    errored: "Error during translation",
};

/// The last successful lookup and the language it was made for
#[derive(Debug, Clone, Default)]
pub struct IdiomSession {
    pub data: Option<IdiomResponse>,
    pub target_lang: String,
}

impl IdiomSession {
    pub fn new(target_lang: impl Into<String>) -> Self {
        Self {
            data: None,
            target_lang: target_lang.into(),
        }
    }

    /// Translation text, when the last lookup returned one
    pub fn translation(&self) -> Option<&str> {
        self.data
            .as_ref()
            .and_then(|data| data.translation.as_deref())
            .filter(|t| !t.is_empty())
    }
}

/// Collapsible panels of the idiom page
#[derive(Debug, Clone, Copy, Default)]
pub struct IdiomPanels {
    pub explanation: PanelToggle,
    pub example: PanelToggle,
    pub reference: PanelToggle,
    pub pronunciation: PanelToggle,
}

/// Idiom page view-model and controller
#[derive(Debug)]
pub struct IdiomPage<E: SpeechEngine = UtteranceQueue> {
    pub input: String,
    pub target_lang: String,
    pub session: IdiomSession,
    pub result: ResultArea,
    pub confidence: Option<String>,
    pub actions: ResultActions,
    pub panels: IdiomPanels,
    pub copy_button: CopyButton,
    pub speaker: Speaker<E>,
}

impl IdiomPage<UtteranceQueue> {
    pub fn new(ui: &UiConfig, target_lang: &str) -> Self {
        Self::with_engine(ui, target_lang, UtteranceQueue::new())
    }
}

impl<E: SpeechEngine> IdiomPage<E> {
    pub fn with_engine(ui: &UiConfig, target_lang: &str, engine: E) -> Self {
        Self {
            input: String::new(),
            target_lang: target_lang.to_string(),
            session: IdiomSession::new(target_lang),
            result: ResultArea::Placeholder(PLACEHOLDER.to_string()),
            confidence: None,
            actions: ResultActions::default(),
            panels: IdiomPanels::default(),
            copy_button: CopyButton::new("Copy", "#10b981", ui.copy_feedback_ms),
            speaker: Speaker::new(engine),
        }
    }

    pub fn clear(&mut self) {
        self.input.clear();
    }

    /// Look up the idiom in the input box
    pub async fn translate(&mut self, backend: &dyn TranslationBackend) -> Result<(), ValidationError> {
        self.session.target_lang = self.target_lang.clone();
        require_input(&self.input, "Please enter an idiom to translate")?;

        self.result = ResultArea::Pending("Translating...".to_string());
        let request = IdiomRequest {
            idiom: self.input.clone(),
            target_lang: self.target_lang.clone(),
        };

        match backend.translate_idiom(&request).await {
            Ok(data) => {
                info!("Idiom \"{}\" translated to {}", data.original, self.target_lang);
                self.result = ResultArea::Ready(result_text(&data, &self.target_lang));
                self.confidence = Some(format_percent(data.confidence, ConfidenceScale::Fraction));
                self.actions.copy = true;
                self.actions.speak = true;
                self.session.data = Some(data);
            }
            Err(err) => {
                self.result = ResultArea::Failed(FAILURES.for_error(&err).to_string());
            }
        }
        Ok(())
    }

    /// Speak the typed idiom in English
    pub fn speak_input(&mut self) -> Result<(), ValidationError> {
        self.speaker.speak_input(&self.input, "Please enter an idiom to speak")
    }

    /// Speak the stored translation in the session's language; no-op without one
    pub fn speak_translation(&mut self) {
        if let Some(translation) = self.session.translation() {
            let tag = speech_tag(&self.session.target_lang);
            let translation = translation.to_string();
            self.speaker.speak_text(&translation, tag);
        }
    }

    /// Speak the original idiom from the reference or pronunciation panels
    pub fn speak_original(&mut self) {
        if let Some(data) = &self.session.data {
            let original = data.original.clone();
            self.speaker.speak_text(&original, "en-US");
        }
    }

    pub fn copy_result<C: Clipboard>(&mut self, clipboard: &mut C) -> Result<(), ValidationError> {
        self.copy_button.copy(clipboard, self.result.text())
    }

    pub fn render_html(&self) -> String {
        let lang = &self.session.target_lang;
        let data = self.session.data.as_ref().filter(|_| self.result.ready_text().is_some());

        let mut html = result_html("idiomResult", &self.result, data.map(|d| result_body_html(d, lang)));
        if let Some(confidence) = &self.confidence {
            html.push_str(&format!("<div id=\"confidenceScore\">{}</div>\n", confidence));
        }

        if let Some(data) = data {
            html.push_str(&panel_html("word-break", "Word-by-Word Breakdown", None, &breakdown_html(data)));
            html.push_str(&panel_html("explanation-panel", "Explanation", Some(&self.panels.explanation), &explanation_html(data)));
            html.push_str(&panel_html("example-panel", "Example", Some(&self.panels.example), &example_html(data)));
            html.push_str(&panel_html("reference-panel", "Quick Reference", Some(&self.panels.reference), &reference_html(data, lang)));
            html.push_str(&panel_html("pronunciation-panel", "Pronunciation Guide", Some(&self.panels.pronunciation), &pronunciation_html(data, lang)));
        }
        html
    }

    pub fn render_text(&self) -> String {
        let mut out = format!("{}\n\n", self.result.text());
        let Some(data) = self.session.data.as_ref().filter(|_| self.result.ready_text().is_some()) else {
            return out;
        };
        let lang = display_name(&self.session.target_lang);
        let translation = data.translation.as_deref().unwrap_or("N/A");

        if let Some(confidence) = &self.confidence {
            out.push_str(&format!("Confidence: {}\n\n", confidence));
        }

        let words: Vec<String> = data
            .original
            .split_whitespace()
            .enumerate()
            .map(|(idx, word)| format!("Word {}: {}", idx + 1, word))
            .collect();
        out.push_str(&panel_text(
            "Word-by-Word Breakdown",
            None,
            &format!("{}\nFull Translation: {}", words.join("\n"), translation),
        ));
        out.push_str(&panel_text(
            "Explanation",
            Some(&self.panels.explanation),
            &format!(
                "Explanation: {}\nCultural Note: {}\nConfidence Level: {}",
                data.explanation,
                cultural_note(data),
                format_percent(data.confidence, ConfidenceScale::Fraction)
            ),
        ));
        out.push_str(&panel_text(
            "Example",
            Some(&self.panels.example),
            &format!("Example Sentence: \"{}\"\nUsage Tip: {}", data.example, USAGE_TIP),
        ));
        out.push_str(&panel_text(
            "Quick Reference",
            Some(&self.panels.reference),
            &format!("English: {}\n{}: {}\nQuick Meaning: {}", data.original, lang, translation, data.meaning),
        ));
        out.push_str(&panel_text(
            "Pronunciation Guide",
            Some(&self.panels.pronunciation),
            &format!(
                "English Idiom ({}): {}\n{} Translation ({}): {}",
                "en-US",
                data.original,
                lang,
                speech_tag(&self.session.target_lang),
                translation
            ),
        ));
        out
    }
}

fn cultural_note(data: &IdiomResponse) -> &str {
    data.cultural_note
        .as_deref()
        .filter(|note| !note.is_empty())
        .unwrap_or(DEFAULT_CULTURAL_NOTE)
}

fn result_text(data: &IdiomResponse, target_lang: &str) -> String {
    format!(
        "Original Idiom: \"{}\"\nEnglish Meaning: {}\nTranslation in {}: {}",
        data.original,
        data.meaning,
        display_name(target_lang),
        data.translation.as_deref().unwrap_or("N/A")
    )
}

fn meaning_block(title: &str, text: &str) -> String {
    format!(
        "<div class=\"idiom-meaning\"><div class=\"idiom-meaning-title\">{}</div><div class=\"idiom-meaning-text\">{}</div></div>",
        title, text
    )
}

fn result_body_html(data: &IdiomResponse, target_lang: &str) -> String {
    let translation = data.translation.as_deref().unwrap_or("N/A");
    [
        meaning_block("Original Idiom:", &format!("&quot;{}&quot;", escape_html(&data.original))),
        meaning_block("English Meaning:", &escape_html(&data.meaning)),
        meaning_block(
            &format!("Translation in {}:", escape_html(&display_name(target_lang))),
            &escape_html(translation),
        ),
    ]
    .concat()
}

fn breakdown_html(data: &IdiomResponse) -> String {
    let mut html = String::from("<div class=\"word-grid\">");
    for (idx, word) in data.original.split_whitespace().enumerate() {
        html.push_str(&format!(
            "<div class=\"word-card\"><div class=\"word\">{}</div><div class=\"word-index\">Word {}</div></div>",
            escape_html(word),
            idx + 1
        ));
    }
    html.push_str("</div>");
    html.push_str(&format!(
        "<div class=\"full-translation\"><strong>Full Translation:</strong> {}</div>",
        escape_html(data.translation.as_deref().unwrap_or("N/A"))
    ));
    html
}

fn explanation_html(data: &IdiomResponse) -> String {
    format!(
        "<div class=\"explanation-item\"><div class=\"explanation-item-title\">📚 What does it mean?</div>\
         <div class=\"explanation-item-detail\"><strong>Explanation:</strong> {}<br><br>\
         <strong>Cultural Note:</strong> {}<br><br><strong>Confidence Level:</strong> {}</div></div>",
        escape_html(&data.explanation),
        escape_html(cultural_note(data)),
        format_percent(data.confidence, ConfidenceScale::Fraction)
    )
}

fn example_html(data: &IdiomResponse) -> String {
    format!(
        "<div class=\"example-item\"><div class=\"example-item-title\">📝 How to use it?</div>\
         <div class=\"example-item-detail\"><strong>Example Sentence:</strong><br><em>&quot;{}&quot;</em><br><br>\
         <div class=\"usage-tip\"><strong>🎯 Usage Tip:</strong> {}</div></div></div>",
        escape_html(&data.example),
        escape_html(USAGE_TIP)
    )
}

fn speak_button(text: &str, tag: &str, label: &str) -> String {
    format!(
        "<button class=\"voice-btn-small\" data-speak=\"{}\" data-lang=\"{}\">{}</button>",
        escape_html(text),
        tag,
        label
    )
}

fn reference_html(data: &IdiomResponse, target_lang: &str) -> String {
    let translation = data.translation.as_deref().unwrap_or("N/A");
    format!(
        "<div class=\"reference-item\"><div><strong>English:</strong> {} {}</div>\
         <div><strong>{}:</strong> {} {}</div>\
         <div class=\"quick-meaning\"><strong>Quick Meaning:</strong> {}</div></div>",
        escape_html(&data.original),
        speak_button(&data.original, "en-US", "🔊"),
        escape_html(&display_name(target_lang)),
        escape_html(translation),
        speak_button(translation, speech_tag(target_lang), "🔊"),
        escape_html(&data.meaning)
    )
}

fn pronunciation_html(data: &IdiomResponse, target_lang: &str) -> String {
    let translation = data.translation.as_deref().unwrap_or("N/A");
    format!(
        "<div class=\"pronunciation-item\"><div class=\"pronunciation-item-lang\">English Idiom</div>\
         <div class=\"pronunciation-item-text\">{}</div>{}</div>\
         <div class=\"pronunciation-item\"><div class=\"pronunciation-item-lang\">{} Translation</div>\
         <div class=\"pronunciation-item-text\">{}</div>{}</div>",
        escape_html(&data.original),
        speak_button(&data.original, "en-US", "🔊 Listen"),
        escape_html(&display_name(target_lang)),
        escape_html(translation),
        speak_button(translation, speech_tag(target_lang), "🔊 Listen")
    )
}
