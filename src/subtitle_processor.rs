use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

use crate::api::models::{TranslatedCue, VideoResponse};
use crate::errors::ValidationError;

// @module: Subtitle cue extraction and translated transcript reassembly

// @const: Sequence number line, ASCII digits only
static SEQUENCE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]+$").unwrap()
});

// @const: Standalone SRT/VTT timestamp (HH:MM:SS,mmm or HH:MM:SS.mmm)
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{2}:[0-9]{2}:[0-9]{2}[,.][0-9]{3}$").unwrap()
});

// @const: Timing range marker
const TIMING_ARROW: &str = "-->";

/// Classification of a single trimmed line of a subtitle document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Empty line, terminates a cue block
    Blank,
    /// Cue sequence number
    SequenceNumber,
    /// `start --> end` timing line
    TimingRange,
    /// Timestamp on a line of its own
    Timestamp,
    /// Caption text
    Text,
}

impl LineKind {
    /// Classify a line. Predicates are evaluated in order; the first match wins.
    pub fn classify(line: &str) -> Self {
        let line = line.trim();

        if line.is_empty() {
            LineKind::Blank
        } else if SEQUENCE_REGEX.is_match(line) {
            LineKind::SequenceNumber
        } else if line.contains(TIMING_ARROW) {
            LineKind::TimingRange
        } else if TIMESTAMP_REGEX.is_match(line) {
            LineKind::Timestamp
        } else {
            LineKind::Text
        }
    }

    /// Structural lines are dropped without ending the current block
    pub fn is_metadata(self) -> bool {
        matches!(self, LineKind::SequenceNumber | LineKind::TimingRange | LineKind::Timestamp)
    }
}

/// One extracted caption
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cue {
    /// Caption lines of the block joined with single spaces
    pub text: String,

    /// The block's timing line, when it had one
    pub timing: Option<String>,
}

impl Cue {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            timing: None,
        }
    }
}

#[derive(Debug)]
enum ExtractorState {
    /// Between blocks; remembers a timing line seen ahead of the caption
    Idle { timing: Option<String> },
    /// Collecting caption lines of one block
    Accumulating(Cue),
}

/// Two-state line loop that turns a subtitle document into cues
#[derive(Debug)]
pub struct CueExtractor {
    state: ExtractorState,
    cues: Vec<Cue>,
}

impl Default for CueExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl CueExtractor {
    pub fn new() -> Self {
        Self {
            state: ExtractorState::Idle { timing: None },
            cues: Vec::new(),
        }
    }

    /// Feed one raw line
    pub fn push_line(&mut self, raw: &str) {
        let line = raw.trim();
        let kind = LineKind::classify(line);

        let state = std::mem::replace(&mut self.state, ExtractorState::Idle { timing: None });
        self.state = match (state, kind) {
            (ExtractorState::Accumulating(cue), LineKind::Blank) => {
                self.cues.push(cue);
                ExtractorState::Idle { timing: None }
            }
            (idle @ ExtractorState::Idle { .. }, LineKind::Blank) => idle,
            (ExtractorState::Idle { .. }, LineKind::TimingRange) => {
                ExtractorState::Idle { timing: Some(line.to_string()) }
            }
            (ExtractorState::Accumulating(mut cue), LineKind::TimingRange) => {
                if cue.timing.is_none() {
                    cue.timing = Some(line.to_string());
                }
                ExtractorState::Accumulating(cue)
            }
            (state, kind) if kind.is_metadata() => state,
            (ExtractorState::Idle { timing }, _) => ExtractorState::Accumulating(Cue {
                text: line.to_string(),
                timing,
            }),
            (ExtractorState::Accumulating(mut cue), _) => {
                cue.text.push(' ');
                cue.text.push_str(line);
                ExtractorState::Accumulating(cue)
            }
        };
    }

    /// Flush any cue still open at end of input and return all cues
    pub fn finish(mut self) -> Vec<Cue> {
        if let ExtractorState::Accumulating(cue) = self.state {
            self.cues.push(cue);
        }
        self.cues
    }
}

/// Extract cues, keeping each block's timing line
pub fn extract_cue_blocks(document: &str) -> Vec<Cue> {
    let mut extractor = CueExtractor::new();
    for line in document.lines() {
        extractor.push_line(line);
    }
    let cues = extractor.finish();
    debug!("Extracted {} cue(s) from {} line(s)", cues.len(), document.lines().count());
    cues
}

/// Extract caption strings in document order
pub fn extract_cues(document: &str) -> Vec<String> {
    extract_cue_blocks(document).into_iter().map(|cue| cue.text).collect()
}

/// Extract cues, rejecting a document with no caption text at all
pub fn extract_cues_checked(document: &str) -> Result<Vec<Cue>, ValidationError> {
    let cues = extract_cue_blocks(document);
    if cues.is_empty() {
        return Err(ValidationError::NoCuesExtracted);
    }
    Ok(cues)
}

/// Translated subtitles merged back with the cues that were sent
#[derive(Debug, Clone)]
pub struct SubtitleTranscript {
    /// Cues as they were submitted
    pub cues: Vec<Cue>,

    /// Backend pairs, index-aligned with `cues`
    pub translated: Vec<TranslatedCue>,

    /// Entry count reported by the backend
    pub reported_total: usize,
}

impl SubtitleTranscript {
    /// Pair the backend response with the submitted cues
    pub fn assemble(cues: Vec<Cue>, response: VideoResponse) -> Self {
        let reported_total = response.total.unwrap_or(response.translated_subtitles.len());

        if response.translated_subtitles.len() < cues.len() {
            warn!(
                "Backend returned {} translated subtitle(s) for {} cue(s)",
                response.translated_subtitles.len(),
                cues.len()
            );
        }

        Self {
            cues,
            translated: response.translated_subtitles,
            reported_total,
        }
    }

    /// Number of cues that were submitted
    pub fn sent(&self) -> usize {
        self.cues.len()
    }

    /// Returned entries over submitted cues; display only
    pub fn completion_ratio(&self) -> f64 {
        if self.cues.is_empty() {
            return 0.0;
        }
        self.reported_total as f64 / self.cues.len() as f64
    }

    /// Completion ratio rounded to a whole percent
    pub fn completion_percent(&self) -> u32 {
        (self.completion_ratio() * 100.0).round() as u32
    }

    /// Plain-text transcript, the content of the downloaded file
    pub fn to_text(&self) -> String {
        let mut out = String::from("Translated Subtitles:\n\n");
        for item in &self.translated {
            out.push_str(&format!("Original: {}\nTranslated: {}\n\n", item.original, item.translated));
        }
        out
    }

    /// SRT document with the original timings and translated text.
    ///
    /// Cues without a translated counterpart keep their original text.
    pub fn to_srt(&self) -> String {
        let mut out = String::new();
        for (index, cue) in self.cues.iter().enumerate() {
            let text = self
                .translated
                .get(index)
                .map(|t| t.translated.as_str())
                .unwrap_or(cue.text.as_str());

            out.push_str(&format!("{}\n", index + 1));
            if let Some(timing) = &cue.timing {
                out.push_str(&format!("{}\n", timing));
            }
            out.push_str(&format!("{}\n\n", text));
        }
        out
    }
}

impl fmt::Display for SubtitleTranscript {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for item in &self.translated {
            writeln!(f, "Original: {}", item.original)?;
            writeln!(f, "Translated: {}", item.translated)?;
            writeln!(f)?;
        }
        Ok(())
    }
}
