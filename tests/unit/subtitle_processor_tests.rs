/*!
 * Tests for subtitle cue extraction and transcript reassembly
 */

use desi_translate::api::models::{TranslatedCue, VideoResponse};
use desi_translate::errors::ValidationError;
use desi_translate::subtitle_processor::{
    extract_cue_blocks, extract_cues, extract_cues_checked, Cue, CueExtractor, LineKind,
    SubtitleTranscript,
};
use crate::common;

/// The reference document splits into its two captions
#[test]
fn test_extract_cues_withReferenceDocument_shouldJoinMultilineCaption() {
    assert_eq!(extract_cues(common::SAMPLE_SRT), vec!["Hello world", "Foo bar"]);
}

/// N well-formed blocks give N cues in document order
#[test]
fn test_extract_cues_withManyBlocks_shouldKeepCountAndOrder() {
    let mut document = String::new();
    for i in 1..=25 {
        document.push_str(&format!(
            "{}\n00:00:{:02},000 --> 00:00:{:02},500\nCaption number {}\n\n",
            i, i, i, i
        ));
    }

    let cues = extract_cues(&document);
    assert_eq!(cues.len(), 25);
    for (i, cue) in cues.iter().enumerate() {
        assert_eq!(cue, &format!("Caption number {}", i + 1));
    }
}

/// Structure-only documents produce no cues and the "could not extract" error
#[test]
fn test_extract_cues_checked_withOnlyStructure_shouldFail() {
    let document = "1\n00:00:01,000 --> 00:00:02,000\n\n2\n00:00:03,000 --> 00:00:04,000\n\n00:00:05,000\n";
    assert!(extract_cues(document).is_empty());

    let err = extract_cues_checked(document).unwrap_err();
    assert_eq!(err, ValidationError::NoCuesExtracted);
    assert_eq!(err.to_string(), "Could not extract subtitle text. Please check the file format.");
}

/// A caption at end of input without a trailing blank line is flushed
#[test]
fn test_extract_cues_withoutTrailingBlank_shouldFlushLastCue() {
    let document = "1\n00:00:01,000 --> 00:00:02,000\nFirst\n\n2\n00:00:03,000 --> 00:00:04,000\nLast line";
    assert_eq!(extract_cues(document), vec!["First", "Last line"]);
}

/// WebVTT headers are caption text to the extractor; timings and ids are not
#[test]
fn test_extract_cues_withVttAndCrlf_shouldStripStructure() {
    let cues = extract_cues(common::SAMPLE_VTT);
    assert_eq!(cues, vec!["WEBVTT", "Good morning", "How are you?"]);
}

/// Surrounding whitespace is trimmed and several blank lines collapse
#[test]
fn test_extract_cues_withExtraWhitespace_shouldTrimLines() {
    let document = "\n\n   \n  Hello  \n\t there \n\n\n\n  again\n";
    assert_eq!(extract_cues(document), vec!["Hello there", "again"]);
}

/// The driver loop can be fed line by line
#[test]
fn test_cue_extractor_withManualFeed_shouldMatchBatchExtraction() {
    let mut extractor = CueExtractor::new();
    for line in common::SAMPLE_SRT.lines() {
        extractor.push_line(line);
    }
    let cues = extractor.finish();
    assert_eq!(cues, extract_cue_blocks(common::SAMPLE_SRT));
    assert_eq!(cues[1].timing.as_deref(), Some("00:00:03,000 --> 00:00:04,000"));
}

/// Numbers inside text lines are not sequence numbers
#[test]
fn test_classify_withMixedLines_shouldFollowPrecedence() {
    assert_eq!(LineKind::classify("42"), LineKind::SequenceNumber);
    assert_eq!(LineKind::classify("42 apples"), LineKind::Text);
    assert_eq!(LineKind::classify("00:00:01,000"), LineKind::Timestamp);
    assert_eq!(LineKind::classify("1:00:01,000"), LineKind::Text);
    assert!(LineKind::classify("00:01.000 --> 00:02.000").is_metadata());
    assert!(!LineKind::Blank.is_metadata());
}

fn sent_cues() -> Vec<Cue> {
    extract_cue_blocks(common::SAMPLE_SRT)
}

/// Completion ratio uses the reported total over the cues sent
#[test]
fn test_transcript_completion_withReportedTotal_shouldUseTotal() {
    let response = VideoResponse {
        translated_subtitles: vec![TranslatedCue {
            original: "Hello world".to_string(),
            translated: "Namaste duniya".to_string(),
        }],
        total: Some(1),
    };

    let transcript = SubtitleTranscript::assemble(sent_cues(), response);
    assert_eq!(transcript.sent(), 2);
    assert_eq!(transcript.completion_ratio(), 0.5);
    assert_eq!(transcript.completion_percent(), 50);
}

/// Missing `total` falls back to the list length
#[test]
fn test_transcript_completion_withoutTotal_shouldUseListLength() {
    let response = VideoResponse {
        translated_subtitles: vec![
            TranslatedCue { original: "Hello world".into(), translated: "Hola mundo".into() },
            TranslatedCue { original: "Foo bar".into(), translated: "Fu bar".into() },
        ],
        total: None,
    };

    let transcript = SubtitleTranscript::assemble(sent_cues(), response);
    assert_eq!(transcript.completion_percent(), 100);
    assert_eq!(
        transcript.to_text(),
        "Translated Subtitles:\n\nOriginal: Hello world\nTranslated: Hola mundo\n\nOriginal: Foo bar\nTranslated: Fu bar\n\n"
    );
}

/// SRT export renumbers blocks and keeps the original timings
#[test]
fn test_transcript_to_srt_withTimings_shouldRebuildBlocks() {
    let response = VideoResponse {
        translated_subtitles: vec![
            TranslatedCue { original: "Hello world".into(), translated: "Bonjour".into() },
            TranslatedCue { original: "Foo bar".into(), translated: "Fou barre".into() },
        ],
        total: Some(2),
    };

    let srt = SubtitleTranscript::assemble(sent_cues(), response).to_srt();
    assert_eq!(
        srt,
        "1\n00:00:01,000 --> 00:00:02,000\nBonjour\n\n2\n00:00:03,000 --> 00:00:04,000\nFou barre\n\n"
    );

    // The exported document extracts back to the translated captions
    assert_eq!(extract_cues(&srt), vec!["Bonjour", "Fou barre"]);
}

/// No cues sent means nothing to compare against
#[test]
fn test_transcript_completion_withNoCues_shouldBeZero() {
    let transcript = SubtitleTranscript::assemble(Vec::new(), VideoResponse::default());
    assert_eq!(transcript.completion_ratio(), 0.0);
    assert_eq!(transcript.to_srt(), "");
}
