//! Caching front door for text extraction
//!
//! Dispatches each path to its format extractor and memoizes extracted
//! text in a bounded FIFO cache keyed by the path, so repeated parse
//! and match runs over the same files read each one once.

use crate::error::{Result, ResumeMatcherError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{
    MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor,
};
use crate::parsing::cache::BoundedCache;
use log::info;
use std::path::Path;

const TEXT_CACHE_CAPACITY: usize = 128;

pub struct InputManager {
    cache: BoundedCache<String, String>,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self::with_capacity(TEXT_CACHE_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cache: BoundedCache::new(capacity),
        }
    }

    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        let key = path.to_string_lossy().into_owned();

        if let Some(text) = self.cache.get(&key) {
            info!("Using cached text for: {}", path.display());
            return Ok(text);
        }

        if !path.exists() {
            return Err(ResumeMatcherError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let file_type = self.detect_file_type(path)?;
        info!("Extracting {:?} text from: {}", file_type, path.display());

        let text = match file_type {
            FileType::Pdf => PdfExtractor.extract(path).await?,
            FileType::Text => PlainTextExtractor.extract(path).await?,
            FileType::Markdown => MarkdownExtractor.extract(path).await?,
            FileType::Docx => {
                return Err(ResumeMatcherError::UnsupportedFormat(format!(
                    "DOCX extraction is not available, convert '{}' to PDF or text",
                    path.display()
                )));
            }
            FileType::Unknown => {
                return Err(ResumeMatcherError::UnsupportedFormat(format!(
                    "Unsupported file type for: {}",
                    path.display()
                )));
            }
        };

        self.cache.insert(key, text.clone());
        Ok(text)
    }

    pub fn detect_file_type(&self, path: &Path) -> Result<FileType> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| {
                ResumeMatcherError::InvalidInput(format!(
                    "File has no extension: {}",
                    path.display()
                ))
            })?;

        Ok(FileType::from_extension(extension))
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_cache_is_bounded() {
        let dir = TempDir::new().unwrap();
        let mut manager = InputManager::with_capacity(2);

        for name in ["a.txt", "b.txt", "c.txt"] {
            let path = dir.path().join(name);
            fs::write(&path, format!("resume {}", name)).unwrap();
            manager.extract_text(&path).await.unwrap();
        }

        assert_eq!(manager.cache_size(), 2);
        // Evicted entries are re-extracted, not lost.
        let text = manager.extract_text(&dir.path().join("a.txt")).await.unwrap();
        assert!(text.contains("a.txt"));
    }

    #[tokio::test]
    async fn test_missing_file_is_invalid_input() {
        let mut manager = InputManager::new();
        let result = manager.extract_text(Path::new("/no/such/resume.txt")).await;
        assert!(matches!(result, Err(ResumeMatcherError::InvalidInput(_))));
    }
}
