use log::{debug, error};

use crate::errors::ValidationError;
use crate::language_utils;

// @module: Speech synthesis playback and speech recognition capture

/// A queued piece of speech
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    /// BCP-47 tag, e.g. "hi-IN"
    pub lang: String,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

impl Utterance {
    pub fn new(text: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            lang: lang.into(),
            rate: 0.9,
            pitch: 1.0,
            volume: 1.0,
        }
    }
}

/// Speech synthesis engine with a single utterance queue
pub trait SpeechEngine {
    /// Drop the in-flight utterance and everything queued behind it
    fn cancel(&mut self);

    /// Queue an utterance
    fn speak(&mut self, utterance: Utterance);
}

/// In-process engine: keeps the queue, plays nothing
#[derive(Debug, Default)]
pub struct UtteranceQueue {
    queue: Vec<Utterance>,
    cancelled: usize,
}

impl UtteranceQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Utterance currently playing, if any
    pub fn current(&self) -> Option<&Utterance> {
        self.queue.first()
    }

    /// Queued utterances including the current one
    pub fn pending(&self) -> &[Utterance] {
        &self.queue
    }

    /// Utterances dropped by `cancel`
    pub fn cancelled(&self) -> usize {
        self.cancelled
    }

    /// The current utterance finished playing
    pub fn finish_current(&mut self) -> Option<Utterance> {
        if self.queue.is_empty() {
            None
        } else {
            Some(self.queue.remove(0))
        }
    }
}

impl SpeechEngine for UtteranceQueue {
    fn cancel(&mut self) {
        self.cancelled += self.queue.len();
        self.queue.clear();
    }

    fn speak(&mut self, utterance: Utterance) {
        debug!("Speaking ({}): {}", utterance.lang, utterance.text);
        self.queue.push(utterance);
    }
}

/// Per-page handle on the speech engine
#[derive(Debug, Default)]
pub struct Speaker<E: SpeechEngine> {
    engine: E,
}

impl<E: SpeechEngine> Speaker<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    /// Speak `text`, cancelling whatever is in flight first
    pub fn speak_text(&mut self, text: &str, lang: &str) {
        self.engine.cancel();
        self.engine.speak(Utterance::new(text, lang));
    }

    /// Speak text typed by the user; empty input is rejected with `prompt`
    pub fn speak_input(&mut self, text: &str, prompt: &'static str) -> Result<(), ValidationError> {
        if text.trim().is_empty() {
            return Err(ValidationError::NothingToSpeak(prompt));
        }
        self.speak_text(text, "en-US");
        Ok(())
    }

    /// Speak text in a backend language ("hindi" → hi-IN)
    pub fn speak_in(&mut self, text: &str, language_key: &str) {
        self.speak_text(text, language_utils::speech_tag(language_key));
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }
}

/// Speech recognition capture state for the voice input button
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceInput {
    supported: bool,
    listening: bool,
    /// Recognition language
    pub lang: String,
    /// Voice button enabled
    pub button_enabled: bool,
    /// Voice button tooltip
    pub button_title: Option<String>,
    /// "Listening..." indicator shown
    pub status_visible: bool,
}

impl VoiceInput {
    /// Unsupported engines start with the button disabled
    pub fn new(supported: bool) -> Self {
        Self {
            supported,
            listening: false,
            lang: "en-US".to_string(),
            button_enabled: supported,
            button_title: (!supported).then(|| "Speech Recognition not supported".to_string()),
            status_visible: false,
        }
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// Begin capturing
    pub fn start(&mut self) -> Result<(), ValidationError> {
        if !self.supported {
            return Err(ValidationError::RecognitionUnsupported);
        }
        self.listening = true;
        self.status_visible = true;
        self.button_enabled = false;
        Ok(())
    }

    /// Recognition produced results; returns the transcript for the source box
    pub fn on_result(&mut self, results: &[String], result_index: usize) -> String {
        let transcript: String = results.iter().skip(result_index).map(String::as_str).collect();
        self.reset();
        transcript
    }

    /// Recognition failed; logged only
    pub fn on_error(&mut self, err: &str) {
        error!("Speech recognition error: {}", err);
        self.reset();
    }

    fn reset(&mut self) {
        self.listening = false;
        self.status_visible = false;
        self.button_enabled = true;
    }
}
