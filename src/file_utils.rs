use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

use crate::app_config::UploadConfig;
use crate::errors::{AppError, ValidationError};
use crate::export::Attachment;

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    // @checks: Extension against the upload allow-list
    pub fn check_subtitle_extension<P: AsRef<Path>>(path: P, upload: &UploadConfig) -> Result<(), ValidationError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        if upload.allowed_extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(&ext)) {
            Ok(())
        } else {
            Err(ValidationError::UnsupportedFile(path.display().to_string()))
        }
    }

    /// Load a subtitle file chosen by the user, as the text box would receive it.
    ///
    /// Single-shot read; invalid UTF-8 is replaced rather than rejected.
    pub async fn read_subtitle_file<P: AsRef<Path>>(path: P, upload: &UploadConfig) -> Result<String, AppError> {
        let path = path.as_ref();
        Self::check_subtitle_extension(path, upload)?;

        let metadata = tokio::fs::metadata(path).await
            .map_err(|e| AppError::File(format!("Error reading file {:?}: {}", path, e)))?;

        if metadata.len() > upload.max_file_size {
            return Err(ValidationError::FileTooLarge {
                size: metadata.len(),
                max: upload.max_file_size,
            }
            .into());
        }

        let bytes = tokio::fs::read(path).await
            .map_err(|e| AppError::File(format!("Error reading file {:?}: {}", path, e)))?;

        debug!("Loaded {} bytes from {:?}", bytes.len(), path);
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a download attachment into `dir`, returning the full path
    pub fn write_attachment<P: AsRef<Path>>(dir: P, attachment: &Attachment) -> Result<PathBuf> {
        let dir = dir.as_ref();
        Self::ensure_dir(dir)?;

        let path = dir.join(&attachment.file_name);
        fs::write(&path, &attachment.content)
            .with_context(|| format!("Failed to write to file: {:?}", path))?;

        Ok(path)
    }

    /// The user's download directory, falling back to the working directory
    pub fn default_download_dir() -> PathBuf {
        dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
    }
}
