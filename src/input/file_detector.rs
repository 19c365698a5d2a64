//! File type detection

#[derive(Debug, Clone, PartialEq)]
pub enum FileType {
    Pdf,
    Text,
    Markdown,
    Docx,
    Unknown,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => FileType::Pdf,
            "txt" => FileType::Text,
            "md" | "markdown" => FileType::Markdown,
            "docx" => FileType::Docx,
            _ => FileType::Unknown,
        }
    }

    /// Short tag recorded in ParsedResume metadata.
    pub fn tag(&self) -> &'static str {
        match self {
            FileType::Pdf => "pdf",
            FileType::Text => "txt",
            FileType::Markdown => "md",
            FileType::Docx => "docx",
            FileType::Unknown => "unknown",
        }
    }
}
