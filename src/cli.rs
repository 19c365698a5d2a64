//! CLI interface for the resume matcher

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resume-matcher")]
#[command(about = "Resume parsing and job-description matching tool")]
#[command(
    long_about = "Parse resumes into structured fields, score them against job descriptions with hybrid TF-IDF + embedding similarity, and rank whole batches"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a resume into structured fields
    Parse {
        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        file: PathBuf,

        /// Emit the parsed resume as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Score one resume against a job description
    Match {
        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job description file (TXT, MD)
        #[arg(short, long)]
        job: PathBuf,

        /// Scoring method: hybrid, tfidf or embedding
        #[arg(short, long)]
        method: Option<String>,
    },

    /// Rank a batch of resumes against a job description
    Rank {
        /// Resume files to rank
        #[arg(short, long, num_args = 1.., required = true)]
        resumes: Vec<PathBuf>,

        /// Path to job description file (TXT, MD)
        #[arg(short, long)]
        job: PathBuf,

        /// Minimum score in percent to include in the table
        #[arg(long)]
        min_score: Option<f32>,

        /// Worker threads for text extraction
        #[arg(short, long)]
        workers: Option<usize>,

        /// Emit the ranking as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show or reset configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,
}

/// Validate file extension
pub fn validate_file_extension(path: &PathBuf, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension(&PathBuf::from("cv.pdf"), &["pdf", "txt"]).is_ok());
        assert!(validate_file_extension(&PathBuf::from("cv.PDF"), &["pdf"]).is_ok());
        assert!(validate_file_extension(&PathBuf::from("cv.docx"), &["pdf", "txt"]).is_err());
        assert!(validate_file_extension(&PathBuf::from("cv"), &["pdf"]).is_err());
    }
}
