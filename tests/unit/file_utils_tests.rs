/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use desi_translate::app_config::UploadConfig;
use desi_translate::errors::{AppError, ValidationError};
use desi_translate::export::{slang_attachment, Attachment};
use desi_translate::file_utils::FileManager;
use crate::common;

/// Subtitle files load as text
#[tokio::test]
async fn test_read_subtitle_file_withSrt_shouldReturnContent() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_subtitle(temp_dir.path(), "movie.SRT")?;

    let content = FileManager::read_subtitle_file(&path, &UploadConfig::default()).await?;
    assert_eq!(content, common::SAMPLE_SRT);
    Ok(())
}

/// Extensions outside the allow-list are refused before reading
#[tokio::test]
async fn test_read_subtitle_file_withWrongExtension_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "movie.mkv", "binary")?;

    let err = FileManager::read_subtitle_file(&path, &UploadConfig::default()).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(ValidationError::UnsupportedFile(_))));
    Ok(())
}

/// Files over the size limit are refused
#[tokio::test]
async fn test_read_subtitle_file_withLargeFile_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "long.vtt", &"x".repeat(64))?;
    let upload = UploadConfig {
        max_file_size: 32,
        ..UploadConfig::default()
    };

    let err = FileManager::read_subtitle_file(&path, &upload).await.unwrap_err();
    assert!(matches!(
        err,
        AppError::Validation(ValidationError::FileTooLarge { size: 64, max: 32 })
    ));
    Ok(())
}

/// Invalid UTF-8 is replaced rather than rejected
#[tokio::test]
async fn test_read_subtitle_file_withInvalidUtf8_shouldBeLossy() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("latin1.txt");
    std::fs::write(&path, b"caf\xe9\n")?;

    let content = FileManager::read_subtitle_file(&path, &UploadConfig::default()).await?;
    assert_eq!(content, "caf\u{FFFD}\n");
    Ok(())
}

/// Missing files are file errors
#[tokio::test]
async fn test_read_subtitle_file_withMissingFile_shouldBeFileError() {
    let err = FileManager::read_subtitle_file("definitely_missing.srt", &UploadConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::File(_)));
}

/// Attachments are written under their stamped name, creating the directory
#[test]
fn test_write_attachment_withNestedDir_shouldCreateFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().join("downloads").join("today");

    let attachment = slang_attachment("u r gr8", "you are great", 1700000000123);
    let path = FileManager::write_attachment(&dir, &attachment)?;

    assert_eq!(path, dir.join("normalized_text_1700000000123.txt"));
    assert_eq!(FileManager::read_to_string(&path)?, attachment.content);
    Ok(())
}

/// Stamped names follow prefix_millis.ext
#[test]
fn test_attachment_stamped_shouldFormatName() {
    let attachment = Attachment::stamped("translation", "txt", 12, "body".to_string());
    assert_eq!(attachment.file_name, "translation_12.txt");
}
