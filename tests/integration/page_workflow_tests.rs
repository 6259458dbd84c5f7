/*!
 * Integration tests driving the text pages against the mock backend
 */

use desi_translate::api::mock::MockBackend;
use desi_translate::api::models::Endpoint;
use desi_translate::app_config::UiConfig;
use desi_translate::errors::ValidationError;
use desi_translate::pages::historical::HistoricalPage;
use desi_translate::pages::idiom::IdiomPage;
use desi_translate::pages::slang::SlangPage;
use desi_translate::pages::translator::TranslatorPage;
use desi_translate::pages::{MemoryClipboard, ResultActions, ResultArea};
use desi_translate::speech::UtteranceQueue;
use crate::common;

/// Slang text is normalized, scored and offered for download
#[tokio::test]
async fn test_slang_page_withWorkingBackend_shouldNormalize() {
    common::init_logging();
    let backend = MockBackend::working();
    let mut page = SlangPage::new(&UiConfig::default());
    page.input = "thx u r gr8".to_string();
    assert_eq!(page.char_count(), "11/500");

    page.normalize(&backend).await.unwrap();

    assert_eq!(page.result, ResultArea::Ready("thanks you are great".to_string()));
    assert_eq!(page.confidence.as_deref(), Some("85%"));
    assert_eq!(page.actions, ResultActions::all());

    let attachment = page.download(42);
    assert_eq!(attachment.file_name, "normalized_text_42.txt");
    assert_eq!(
        attachment.content,
        "ORIGINAL SLANG TEXT:\nthx u r gr8\n\nNORMALIZED TEXT:\nthanks you are great"
    );

    let text = page.render_text();
    assert!(text.contains("== Abbreviations =="));
    assert!(text.contains("gr8 = great"));
}

/// Empty input never reaches the backend
#[tokio::test]
async fn test_slang_page_withBlankInput_shouldPrompt() {
    let backend = MockBackend::working();
    let mut page = SlangPage::new(&UiConfig::default());
    page.input = "   ".to_string();

    let err = page.normalize(&backend).await.unwrap_err();
    assert_eq!(err, ValidationError::MissingInput("Please enter text to normalize"));
    assert_eq!(backend.call_count(), 0);
    assert!(page.result.is_placeholder());
}

/// Rejections and transport failures get different placeholders
#[tokio::test]
async fn test_historical_page_withFailingBackends_shouldShowFailureText() {
    let mut page = HistoricalPage::new(&UiConfig::default());
    page.input = "thou art wise".to_string();

    page.translate(&MockBackend::rejecting(500)).await.unwrap();
    assert_eq!(page.result, ResultArea::Failed("Translation failed".to_string()));

    page.translate(&MockBackend::broken()).await.unwrap();
    assert_eq!(page.result, ResultArea::Failed("Error during translation".to_string()));

    page.translate(&MockBackend::offline()).await.unwrap();
    assert_eq!(page.result, ResultArea::Failed("Error during translation".to_string()));
    assert!(page.data.is_none());
    assert_eq!(page.actions, ResultActions::default());
}

/// Archaic words are modernized and the collapsed panels drop out of the text view
#[tokio::test]
async fn test_historical_page_withWorkingBackend_shouldModernize() {
    let backend = MockBackend::working();
    let mut page = HistoricalPage::new(&UiConfig::default());
    page.input = "Thou art wise".to_string();

    page.translate(&backend).await.unwrap();
    assert_eq!(page.result.ready_text(), Some("you are wise"));
    assert_eq!(page.confidence.as_deref(), Some("88%"));

    assert!(page.render_text().contains("== Etymology =="));
    page.panels.etymology.toggle();
    assert!(!page.render_text().contains("== Etymology =="));
    assert!(page.render_html().contains("display: none;"));
}

/// Detailed translation keeps percent confidence and speaks in the target language
#[tokio::test]
async fn test_translator_page_withWorkingBackend_shouldTranslateAndSpeak() {
    let backend = MockBackend::working();
    let mut page = TranslatorPage::with_engine(&UiConfig::default(), "english", "hindi", UtteranceQueue::new(), true);

    page.voice.start().unwrap();
    assert!(page.voice.is_listening());
    page.on_voice_result(&["good ".to_string(), "morning".to_string()], 0);
    assert_eq!(page.input, "good morning");

    page.translate(&backend).await.unwrap();
    assert_eq!(page.result.text(), "[hindi] good morning");
    assert_eq!(page.confidence.as_deref(), Some("85%"));
    assert_eq!(backend.calls(), vec![Endpoint::TranslateDetailed]);

    page.speak_translation().unwrap();
    let current = page.speaker.engine().current().unwrap();
    assert_eq!(current.lang, "hi-IN");
    assert_eq!(current.text, "[hindi] good morning");

    let html = page.render_html();
    assert!(html.contains("Translated from english to hindi word by word."));
    assert!(html.contains("confidence-medium"));

    let attachment = page.download(7);
    assert!(attachment.content.starts_with("SOURCE TEXT (ENGLISH):\ngood morning"));
    assert!(attachment.content.contains("TRANSLATED TEXT (HINDI):"));
}

/// A rejected translation cannot be spoken
#[tokio::test]
async fn test_translator_page_withRejection_shouldRefuseToSpeak() {
    let mut page = TranslatorPage::new(&UiConfig::default(), "english", "tamil");
    page.input = "hello".to_string();

    page.translate(&MockBackend::rejecting(400)).await.unwrap();
    assert_eq!(page.result.text(), "Translation failed");
    assert_eq!(
        page.speak_translation(),
        Err(ValidationError::NothingToSpeak("No translation to speak"))
    );
    assert!(page.speaker.engine().current().is_none());
    assert_eq!(page.voice.start(), Err(ValidationError::RecognitionUnsupported));
}

/// Idiom results are copied with a confirmation that reverts
#[tokio::test]
async fn test_idiom_page_withCopy_shouldConfirmAndRevert() {
    let backend = MockBackend::working();
    let mut page = IdiomPage::new(&UiConfig::default(), "hindi");
    page.input = "break the ice".to_string();

    page.translate(&backend).await.unwrap();
    assert_eq!(
        page.result.text(),
        "Original Idiom: \"break the ice\"\nEnglish Meaning: Meaning of break the ice\nTranslation in Hindi: [hindi] break the ice"
    );
    assert!(page.actions.copy);
    assert!(!page.actions.download);

    let mut clipboard = MemoryClipboard::default();
    page.copy_result(&mut clipboard).unwrap();
    assert_eq!(clipboard.contents.as_deref(), Some(page.result.text()));
    assert_eq!(page.copy_button.label, "✓ Copied!");
    assert_eq!(page.copy_button.highlight, Some("#10b981"));
    assert_eq!(page.copy_button.revert_after().as_millis(), 2000);

    page.copy_button.revert();
    assert_eq!(page.copy_button.label, "Copy");
    assert!(page.copy_button.highlight.is_none());
}

/// The idiom translation is spoken in the language it was requested in
#[tokio::test]
async fn test_idiom_page_withLanguageChange_shouldSpeakSessionLanguage() {
    let backend = MockBackend::working();
    let mut page = IdiomPage::new(&UiConfig::default(), "telugu");
    page.input = "spill the beans".to_string();
    page.translate(&backend).await.unwrap();

    page.target_lang = "french".to_string();
    page.speak_translation();

    let current = page.speaker.engine().current().unwrap();
    assert_eq!(current.lang, "te-IN");
    assert_eq!(current.text, "[telugu] spill the beans");
}

/// Not-found idioms leave nothing to speak
#[tokio::test]
async fn test_idiom_page_withNotFound_shouldShowNotFound() {
    let mut page = IdiomPage::new(&UiConfig::default(), "hindi");
    page.input = "unknown saying".to_string();

    page.translate(&MockBackend::rejecting(404)).await.unwrap();
    assert_eq!(page.result, ResultArea::Failed("Idiom not found in database".to_string()));

    page.speak_translation();
    assert!(page.speaker.engine().current().is_none());
}
