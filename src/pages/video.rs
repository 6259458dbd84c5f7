use log::{info, warn};
use std::path::Path;

use crate::api::models::VideoRequest;
use crate::api::TranslationBackend;
use crate::app_config::{UiConfig, UploadConfig};
use crate::errors::{AppError, ValidationError};
use crate::export::{self, Attachment};
use crate::file_utils::FileManager;
use crate::pages::{
    escape_html, panel_html, panel_text, require_input, result_html, Clipboard, CopyButton,
    FailureTexts, PanelToggle, ResultActions, ResultArea,
};
use crate::speech::{SpeechEngine, Speaker, UtteranceQueue};
use crate::subtitle_processor::{extract_cues_checked, SubtitleTranscript};

// @module: Video subtitle translator page

const PLACEHOLDER: &str = "Click Translate to see the translated subtitles";
const DETAIL_LIMIT: usize = 5;
const TIMING_NOTE: &str = "When you download the translated subtitles as SRT, the start and end times \
from the original SRT/VTT file are kept, so the result stays in sync with your video file.";
const FORMAT_NOTE: &str = "Input formats: SRT (SubRip), VTT (WebVTT). Output formats: plain transcript or SRT (SubRip).";

const FAILURES: FailureTexts = FailureTexts {
    rejected: "Translation failed",
    errored: "Error during translation",
};

#[derive(Debug, Clone, Copy, Default)]
pub struct VideoPanels {
    pub details: PanelToggle,
    pub timing: PanelToggle,
    pub format: PanelToggle,
}

/// Video subtitle page view-model and controller
#[derive(Debug)]
pub struct VideoPage<E: SpeechEngine = UtteranceQueue> {
    /// Subtitle text box
    pub input: String,
    pub target_lang: String,
    pub result: ResultArea,
    pub confidence: Option<String>,
    pub actions: ResultActions,
    pub panels: VideoPanels,
    pub transcript: Option<SubtitleTranscript>,
    pub copy_button: CopyButton,
    pub speaker: Speaker<E>,
    upload: UploadConfig,
}

impl VideoPage<UtteranceQueue> {
    pub fn new(ui: &UiConfig, upload: &UploadConfig, target_lang: &str) -> Self {
        Self::with_engine(ui, upload, target_lang, UtteranceQueue::new())
    }
}

impl<E: SpeechEngine> VideoPage<E> {
    pub fn with_engine(ui: &UiConfig, upload: &UploadConfig, target_lang: &str, engine: E) -> Self {
        Self {
            input: String::new(),
            target_lang: target_lang.to_string(),
            result: ResultArea::Placeholder(PLACEHOLDER.to_string()),
            confidence: None,
            actions: ResultActions::default(),
            panels: VideoPanels::default(),
            transcript: None,
            copy_button: CopyButton::new("Copy", "#1e40af", ui.copy_feedback_ms),
            speaker: Speaker::new(engine),
            upload: upload.clone(),
        }
    }

    /// Replace the text box with the content of a subtitle file
    pub async fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), AppError> {
        self.input = FileManager::read_subtitle_file(path, &self.upload).await?;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.input.clear();
    }

    /// Extract cues from the text box and translate them in one request
    pub async fn translate(&mut self, backend: &dyn TranslationBackend) -> Result<(), ValidationError> {
        self.discard_transcript();
        require_input(&self.input, "Please enter subtitle content to translate")?;
        let cues = extract_cues_checked(&self.input)?;

        self.result = ResultArea::Pending("Translating subtitles...".to_string());
        let request = VideoRequest {
            subtitles: cues.iter().map(|cue| cue.text.clone()).collect(),
            target_lang: self.target_lang.clone(),
        };

        match backend.translate_video(&request).await {
            Ok(response) => {
                let transcript = SubtitleTranscript::assemble(cues, response);
                info!(
                    "Translated {} of {} subtitle(s) to {}",
                    transcript.translated.len(),
                    transcript.sent(),
                    self.target_lang
                );
                self.result = ResultArea::Ready(transcript.to_text());
                self.confidence = Some(format!("{}%", transcript.completion_percent()));
                self.actions = ResultActions::all();
                self.transcript = Some(transcript);
            }
            Err(err) => {
                self.result = ResultArea::Failed(FAILURES.for_error(&err).to_string());
            }
        }
        Ok(())
    }

    /// Drop the previous run's transcript so no export outlives its result
    fn discard_transcript(&mut self) {
        self.transcript = None;
        self.confidence = None;
        self.actions = ResultActions::default();
    }

    pub fn speak_input(&mut self) -> Result<(), ValidationError> {
        self.speaker.speak_input(&self.input, "Please enter subtitle text to speak")
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

    /// Plain transcript download, the output box as shown
    pub fn download(&self, millis: i64) -> Attachment {
        export::subtitle_attachment(self.result.text().to_string(), false, millis)
    }

    /// SRT download with the original timings; needs a translated transcript
    pub fn download_srt(&self, millis: i64) -> Option<Attachment> {
        match self.transcript.as_ref().filter(|_| self.result.ready_text().is_some()) {
            Some(transcript) => Some(export::subtitle_attachment(transcript.to_srt(), true, millis)),
            None => {
                warn!("No translated subtitles to export");
                None
            }
        }
    }

    pub fn render_html(&self) -> String {
        let transcript = self.transcript.as_ref().filter(|_| self.result.ready_text().is_some());

        let mut html = result_html("translatedSubtitles", &self.result, transcript.map(transcript_html));
        if let Some(confidence) = &self.confidence {
            html.push_str(&format!("<div id=\"confidenceScore\">{}</div>\n", confidence));
        }
        let Some(transcript) = transcript else {
            return html;
        };

        let mut details = format!(
            "<div class=\"summary\"><strong>Translation Summary:</strong><br><strong>Total Subtitles:</strong> {}<br>\
             <strong>Translated:</strong> {} subtitles<br><br><strong>First Few Translations:</strong><br></div>",
            transcript.sent(),
            transcript.translated.len().min(DETAIL_LIMIT)
        );
        for item in transcript.translated.iter().take(DETAIL_LIMIT) {
            details.push_str(&format!(
                "<div class=\"subtitle-item\"><div class=\"subtitle-item-text\"><strong>Original:</strong> {}</div>\
                 <div class=\"subtitle-item-text\"><strong>Translated:</strong> {}</div></div>",
                escape_html(&item.original),
                escape_html(&item.translated)
            ));
        }
        html.push_str(&panel_html("details-panel", "Translation Details", Some(&self.panels.details), &details));
        html.push_str(&panel_html(
            "timing-panel",
            "Timing Information",
            Some(&self.panels.timing),
            &format!(
                "<div><strong>Subtitle Count:</strong> {} subtitle entries<br><br>{}</div>",
                transcript.translated.len(),
                TIMING_NOTE
            ),
        ));
        html.push_str(&panel_html(
            "format-panel",
            "Format Information",
            Some(&self.panels.format),
            &format!(
                "<div>{}<br><br><strong>Confidence Level:</strong> {}%</div>",
                FORMAT_NOTE,
                transcript.completion_percent()
            ),
        ));
        html
    }

    pub fn render_text(&self) -> String {
        let mut out = format!("{}\n", self.result.text().trim_end());
        if let Some(confidence) = &self.confidence {
            out.push_str(&format!("\nConfidence: {}\n\n", confidence));
        }
        let Some(transcript) = self.transcript.as_ref().filter(|_| self.result.ready_text().is_some()) else {
            return out;
        };

        let mut details = vec![
            format!("Total Subtitles: {}", transcript.sent()),
            format!("Translated: {} subtitles", transcript.translated.len().min(DETAIL_LIMIT)),
        ];
        for item in transcript.translated.iter().take(DETAIL_LIMIT) {
            details.push(format!("{} => {}", item.original, item.translated));
        }
        out.push_str(&panel_text("Translation Details", Some(&self.panels.details), &details.join("\n")));
        out.push_str(&panel_text(
            "Timing Information",
            Some(&self.panels.timing),
            &format!("Subtitle Count: {} subtitle entries\n{}", transcript.translated.len(), TIMING_NOTE),
        ));
        out.push_str(&panel_text(
            "Format Information",
            Some(&self.panels.format),
            &format!("{}\nConfidence Level: {}%", FORMAT_NOTE, transcript.completion_percent()),
        ));
        out
    }
}

fn transcript_html(transcript: &SubtitleTranscript) -> String {
    let mut html = String::from("<strong>Translated Subtitles:</strong><br><br>");
    for item in &transcript.translated {
        html.push_str(&format!(
            "<div class=\"subtitle-pair\"><strong>Original:</strong> <span>{}</span><br>\
             <strong>Translated:</strong> <span>{}</span></div>",
            escape_html(&item.original),
            escape_html(&item.translated)
        ));
    }
    html
}
