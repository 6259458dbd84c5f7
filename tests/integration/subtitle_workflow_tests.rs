/*!
 * Integration tests for the subtitle page: file in, translated download out
 */

use anyhow::Result;
use desi_translate::api::mock::MockBackend;
use desi_translate::api::models::Endpoint;
use desi_translate::app_config::{UiConfig, UploadConfig};
use desi_translate::errors::{AppError, ValidationError};
use desi_translate::file_utils::FileManager;
use desi_translate::pages::video::VideoPage;
use desi_translate::pages::{ResultActions, ResultArea};
use crate::common;

fn video_page(target_lang: &str) -> VideoPage {
    VideoPage::new(&UiConfig::default(), &UploadConfig::default(), target_lang)
}

/// An SRT file is loaded, translated and written back out as text and SRT
#[tokio::test]
async fn test_video_page_withSrtFile_shouldWriteBothDownloads() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_subtitle(temp_dir.path(), "episode.srt")?;
    common::init_logging();
    let backend = MockBackend::working();
    let mut page = video_page("hindi");

    page.load_file(&input).await?;
    assert_eq!(page.input, common::SAMPLE_SRT);

    page.translate(&backend).await?;
    assert_eq!(backend.calls(), vec![Endpoint::TranslateVideo]);
    assert_eq!(page.confidence.as_deref(), Some("100%"));
    assert_eq!(
        page.result.ready_text(),
        Some("Translated Subtitles:\n\nOriginal: Hello world\nTranslated: [hindi] Hello world\n\nOriginal: Foo bar\nTranslated: [hindi] Foo bar\n\n")
    );

    let out_dir = temp_dir.path().join("out");
    let txt = FileManager::write_attachment(&out_dir, &page.download(1000))?;
    assert_eq!(txt, out_dir.join("translated_subtitles_1000.txt"));
    assert_eq!(FileManager::read_to_string(&txt)?, page.result.text());

    let srt = page.download_srt(1000).unwrap();
    let srt_path = FileManager::write_attachment(&out_dir, &srt)?;
    assert_eq!(
        FileManager::read_to_string(&srt_path)?,
        "1\n00:00:01,000 --> 00:00:02,000\n[hindi] Hello world\n\n2\n00:00:03,000 --> 00:00:04,000\n[hindi] Foo bar\n\n"
    );
    Ok(())
}

/// WebVTT input keeps its cue timings in the SRT export
#[tokio::test]
async fn test_video_page_withVttFile_shouldKeepTimings() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "talk.vtt", common::SAMPLE_VTT)?;
    let mut page = video_page("tamil");

    page.load_file(&input).await?;
    page.translate(&MockBackend::working()).await?;

    let srt = page.download_srt(5).unwrap().content;
    assert!(srt.contains("00:00:01.000 --> 00:00:04.000\n[tamil] Good morning\n"));
    assert!(srt.contains("00:00:05.000 --> 00:00:08.000\n[tamil] How are you?\n"));
    Ok(())
}

/// A short backend answer is shown as partial and the SRT falls back to the original text
#[tokio::test]
async fn test_video_page_withPartialTranslation_shouldKeepOriginalCues() -> Result<()> {
    let backend = MockBackend::working().with_video_limit(1);
    let mut page = video_page("hindi");
    page.input = common::SAMPLE_SRT.to_string();

    page.translate(&backend).await?;

    assert_eq!(page.confidence.as_deref(), Some("50%"));
    let srt = page.download_srt(1).unwrap().content;
    assert!(srt.contains("[hindi] Hello world"));
    assert!(srt.contains("2\n00:00:03,000 --> 00:00:04,000\nFoo bar\n"));
    assert!(page.render_text().contains("50%"));
    Ok(())
}

/// A document made only of numbers and timings is refused before sending
#[tokio::test]
async fn test_video_page_withStructureOnly_shouldNotCallBackend() {
    let backend = MockBackend::working();
    let mut page = video_page("hindi");
    page.input = "1\n00:00:01,000 --> 00:00:02,000\n\n2\n00:00:03,000 --> 00:00:04,000\n".to_string();

    let err = page.translate(&backend).await.unwrap_err();
    assert_eq!(err, ValidationError::NoCuesExtracted);
    assert_eq!(backend.call_count(), 0);
    assert!(page.result.is_placeholder());
    assert!(page.download_srt(1).is_none());
}

/// Backend failures replace the output with the failure text
#[tokio::test]
async fn test_video_page_withRejection_shouldShowFailure() {
    let mut page = video_page("hindi");
    page.input = common::SAMPLE_SRT.to_string();

    page.translate(&MockBackend::rejecting(400)).await.unwrap();
    assert!(matches!(page.result, ResultArea::Failed(_)));
    assert!(page.transcript.is_none());

    page.speak_output();
    assert_eq!(page.speaker.engine().current().map(|u| u.text.as_str()), Some(page.result.text()));
}

/// A failed rerun leaves no SRT export from the earlier success
#[tokio::test]
async fn test_video_page_withFailureAfterSuccess_shouldDropOldTranscript() {
    let mut page = video_page("hindi");
    page.input = "1\n00:00:01,000 --> 00:00:02,000\nOld caption\n".to_string();
    page.translate(&MockBackend::working()).await.unwrap();
    assert!(page.download_srt(1).is_some());

    page.input = "1\n00:00:05,000 --> 00:00:06,000\nNew caption\n".to_string();
    page.translate(&MockBackend::offline()).await.unwrap();

    assert_eq!(page.result, ResultArea::Failed("Error during translation".to_string()));
    assert!(page.download_srt(1).is_none());
    assert!(page.transcript.is_none());
    assert!(page.confidence.is_none());
    assert!(!page.actions.download);
    assert!(!page.render_text().contains("Old caption"));
}

/// Input with no cues after a success also clears the export
#[tokio::test]
async fn test_video_page_withNoCuesAfterSuccess_shouldDropOldTranscript() {
    let backend = MockBackend::working();
    let mut page = video_page("hindi");
    page.input = common::SAMPLE_SRT.to_string();
    page.translate(&backend).await.unwrap();

    page.input = "1\n00:00:01,000 --> 00:00:02,000\n".to_string();
    let err = page.translate(&backend).await.unwrap_err();

    assert_eq!(err, ValidationError::NoCuesExtracted);
    assert_eq!(backend.call_count(), 1);
    assert!(page.download_srt(1).is_none());
    assert_eq!(page.actions, ResultActions::default());
}

/// Unsupported uploads never replace the text box
#[tokio::test]
async fn test_video_page_withUnsupportedFile_shouldKeepInput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "notes.docx", "Hello")?;
    let mut page = video_page("hindi");
    page.input = "kept".to_string();

    let err = page.load_file(&input).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(ValidationError::UnsupportedFile(_))));
    assert_eq!(page.input, "kept");
    Ok(())
}

/// The page can be driven from synchronous code
#[test]
fn test_video_page_withBlockingRuntime_shouldTranslate() {
    common::init_logging();
    let backend = MockBackend::working();
    let mut page = video_page("french");
    page.input = "Bonjour\n".to_string();

    let result = tokio_test::block_on(page.translate(&backend));

    assert!(result.is_ok());
    assert_eq!(page.transcript.as_ref().map(|t| t.sent()), Some(1));
    assert_eq!(page.confidence.as_deref(), Some("100%"));
}
