//! Text extraction from various file formats

use crate::error::{Result, ResumeMatcherError};
use crate::input::file_detector::FileType;
use pulldown_cmark::{html, Parser};
use std::path::Path;
use tokio::fs;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await.map_err(ResumeMatcherError::Io)?;
        extract_pdf_bytes(&bytes, path)
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let content = fs::read_to_string(path).await.map_err(ResumeMatcherError::Io)?;
        Ok(content)
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown_content = fs::read_to_string(path).await.map_err(ResumeMatcherError::Io)?;
        Ok(markdown_to_text(&markdown_content))
    }
}

fn extract_pdf_bytes(bytes: &[u8], path: &Path) -> Result<String> {
    let text = pdf_extract::extract_text_from_mem(bytes).map_err(|e| {
        ResumeMatcherError::PdfExtraction(format!(
            "Failed to extract text from PDF '{}': {}",
            path.display(),
            e
        ))
    })?;
    Ok(text)
}

fn markdown_to_text(markdown: &str) -> String {
    let parser = Parser::new(markdown);
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    html_to_text(&html_output)
}

fn html_to_text(html: &str) -> String {
    let text = html
        .replace("<br>", "\n")
        .replace("</p>", "\n\n")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'");

    let re = regex::Regex::new(r"<[^>]*>").unwrap();
    let clean_text = re.replace_all(&text, "");

    let lines: Vec<String> = clean_text
        .lines()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect();

    lines.join("\n")
}

/// Synchronous extraction path used by the batch ranker's worker pool.
pub fn extract_file(path: &Path) -> Result<String> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or_else(|| {
            ResumeMatcherError::InvalidInput(format!("File has no extension: {}", path.display()))
        })?;

    match FileType::from_extension(extension) {
        FileType::Pdf => {
            let bytes = std::fs::read(path)?;
            extract_pdf_bytes(&bytes, path)
        }
        FileType::Text => Ok(std::fs::read_to_string(path)?),
        FileType::Markdown => {
            let content = std::fs::read_to_string(path)?;
            Ok(markdown_to_text(&content))
        }
        FileType::Docx => Err(ResumeMatcherError::UnsupportedFormat(format!(
            "DOCX extraction is not available, convert '{}' to PDF or text",
            path.display()
        ))),
        FileType::Unknown => Err(ResumeMatcherError::UnsupportedFormat(format!(
            "Unsupported file type for: {}",
            path.display()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_markdown_to_text_strips_formatting() {
        let text = markdown_to_text("## Skills\n\n**Python** and *Docker*");
        assert!(text.contains("Skills"));
        assert!(text.contains("Python"));
        assert!(!text.contains("**"));
        assert!(!text.contains("##"));
    }

    #[test]
    fn test_extract_file_plain_text() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        writeln!(file, "Jane Doe\nPython developer").unwrap();
        let text = extract_file(file.path()).unwrap();
        assert!(text.contains("Jane Doe"));
    }

    #[test]
    fn test_extract_file_unknown_extension() {
        let file = tempfile::Builder::new().suffix(".xyz").tempfile().unwrap();
        assert!(extract_file(file.path()).is_err());
    }
}
