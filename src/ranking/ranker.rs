//! Parallel ranking of resume files against one job description
//!
//! Text extraction fans out over a worker pool; scoring happens in a
//! single batch afterwards so the TF-IDF vocabulary is fitted on the
//! full corpus and results do not depend on worker scheduling.

use crate::config::Config;
use crate::error::{Result, ResumeMatcherError};
use crate::input::text_extractor::extract_file;
use crate::scoring::{ResumeInput, ResumeMatcher, ScoreMode};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedResume {
    pub rank: usize,
    pub name: String,
    pub score_pct: f32,
    pub email: String,
    pub phone: String,
    pub filename: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RankingTable {
    pub rows: Vec<RankedResume>,
}

impl RankingTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

impl std::fmt::Display for RankingTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{:<5} {:<25} {:>9}  {:<30} {:<15} {}",
            "Rank", "Name", "Score (%)", "Email", "Phone", "Filename"
        )?;
        for row in &self.rows {
            writeln!(
                f,
                "{:<5} {:<25} {:>9.2}  {:<30} {:<15} {}",
                row.rank, row.name, row.score_pct, row.email, row.phone, row.filename
            )?;
        }
        Ok(())
    }
}

struct Candidate {
    name: String,
    email: String,
    phone: String,
    filename: String,
    text: String,
}

pub struct ResumeRanker {
    /// Threshold in percent; rows below it are dropped.
    min_score: f32,
    workers: usize,
    matcher: ResumeMatcher,
    email_regex: Regex,
    phone_regex: Regex,
}

impl ResumeRanker {
    /// Ranking always scores lexically. Loading an embedding model for
    /// every batch run costs more than the precision it buys here.
    pub fn new(config: &Config) -> Self {
        Self {
            min_score: config.ranking.min_score,
            workers: config.ranking.workers.max(1),
            matcher: ResumeMatcher::lexical_only(config),
            email_regex: Regex::new(r"[\w.-]+@[\w.-]+\.\w+").expect("Invalid email regex"),
            phone_regex: Regex::new(r"(\+91[-\s]?)?[0-9]{10}").expect("Invalid phone regex"),
        }
    }

    pub fn with_min_score(mut self, min_score: f32) -> Self {
        self.min_score = min_score;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// A display name from the first few lines: short, and free of
    /// contact markers. Falls back to the file stem.
    fn extract_name(&self, text: &str, path: &Path) -> String {
        for line in text.lines().map(str::trim).filter(|l| !l.is_empty()).take(3) {
            let words = line.split_whitespace().count();
            let lower = line.to_lowercase();
            let has_marker = ["@", "linkedin", "github", "http"]
                .iter()
                .any(|marker| lower.contains(marker));
            if (1..=3).contains(&words) && !has_marker {
                return line.to_string();
            }
        }
        path.file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unknown".to_string())
    }

    fn load_candidate(&self, path: &Path) -> Option<Candidate> {
        let filename = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let text = match extract_file(path) {
            Ok(text) => text,
            Err(e) => {
                log::warn!("Skipped {}: {}", filename, e);
                return None;
            }
        };

        let email = self
            .email_regex
            .find(&text)
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| "N/A".to_string());
        let phone = self
            .phone_regex
            .find(&text)
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_else(|| "N/A".to_string());

        Some(Candidate {
            name: self.extract_name(&text, path),
            email,
            phone,
            filename,
            text,
        })
    }

    /// Rank resume files against a job description. Unreadable files
    /// are skipped with a warning; an empty job description is an
    /// error. Output is sorted by descending score with dense 1-based
    /// ranks; ties keep input order.
    pub fn rank(&self, resume_paths: &[PathBuf], jd_text: &str) -> Result<RankingTable> {
        if jd_text.trim().is_empty() {
            return Err(ResumeMatcherError::EmptyJobDescription);
        }
        self.matcher.reset();

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .build()
            .map_err(|e| ResumeMatcherError::Scoring(format!("Worker pool failed: {}", e)))?;

        let progress = ProgressBar::new(resume_paths.len() as u64);
        progress.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
        );
        progress.set_message("Processing resumes");

        let candidates: Vec<Candidate> = pool.install(|| {
            resume_paths
                .par_iter()
                .filter_map(|path| {
                    let candidate = self.load_candidate(path);
                    progress.inc(1);
                    candidate
                })
                .collect()
        });
        progress.finish_and_clear();

        let inputs: Vec<ResumeInput> = candidates
            .iter()
            .map(|c| ResumeInput::Raw(c.text.clone()))
            .collect();
        let scores = self.matcher.score(jd_text, &inputs, ScoreMode::Raw)?;

        let mut rows: Vec<RankedResume> = scores
            .into_iter()
            .map(|(idx, score)| {
                let candidate = &candidates[idx];
                RankedResume {
                    rank: 0,
                    name: candidate.name.clone(),
                    score_pct: (score * 100.0 * 100.0).round() / 100.0,
                    email: candidate.email.clone(),
                    phone: candidate.phone.clone(),
                    filename: candidate.filename.clone(),
                }
            })
            .filter(|row| row.score_pct >= self.min_score)
            .collect();

        rows.sort_by(|a, b| {
            b.score_pct
                .partial_cmp(&a.score_pct)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        for (i, row) in rows.iter_mut().enumerate() {
            row.rank = i + 1;
        }

        Ok(RankingTable { rows })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::fs;
    use tempfile::TempDir;

    const JD: &str = "Python developer with Docker and AWS skills. \
                      Python scripting and Docker containers required.";

    fn write_resume(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn ranker() -> ResumeRanker {
        ResumeRanker::new(&Config::default())
    }

    #[test]
    fn test_empty_jd_is_an_error() {
        let result = ranker().rank(&[], "   ");
        assert!(matches!(
            result,
            Err(ResumeMatcherError::EmptyJobDescription)
        ));
    }

    #[test]
    fn test_ranking_orders_by_score() {
        let dir = TempDir::new().unwrap();
        let strong = write_resume(
            &dir,
            "strong.txt",
            "Asha Rao\nasha@example.com\nPython engineer with Docker and AWS. Python daily.",
        );
        let weak = write_resume(
            &dir,
            "weak.txt",
            "Vikram Singh\nvikram@example.com\nRetail manager, inventory and staffing.",
        );

        let table = ranker().rank(&[weak, strong], JD).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0].name, "Asha Rao");
        assert_eq!(table.rows[0].rank, 1);
        assert_eq!(table.rows[1].rank, 2);
        assert!(table.rows[0].score_pct > table.rows[1].score_pct);
    }

    #[test]
    fn test_unreadable_file_is_skipped() {
        let dir = TempDir::new().unwrap();
        let good = write_resume(
            &dir,
            "good.txt",
            "Dev One\ndev@example.com\nPython and Docker work.",
        );
        let missing = dir.path().join("missing.txt");

        let table = ranker().rank(&[good, missing], JD).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0].filename, "good.txt");
    }

    #[test]
    fn test_min_score_filters_rows() {
        let dir = TempDir::new().unwrap();
        let strong = write_resume(
            &dir,
            "strong.txt",
            "Asha Rao\nPython engineer with Docker and AWS. Python daily.",
        );
        let weak = write_resume(&dir, "weak.txt", "Gardening blog author, pottery classes.");

        let table = ranker()
            .with_min_score(60.0)
            .rank(&[strong, weak], JD)
            .unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0].filename, "strong.txt");
    }

    #[test]
    fn test_threshold_above_every_score_empties_table() {
        let dir = TempDir::new().unwrap();
        let partial = write_resume(
            &dir,
            "partial.txt",
            "Priya Patel\nSome Python exposure, mostly support tickets and scheduling.",
        );

        let table = ranker()
            .with_min_score(99.9)
            .rank(&[partial], JD)
            .unwrap();
        assert!(table.is_empty());
        // The rendered table still carries its header row.
        assert!(table.to_string().contains("Score (%)"));
    }

    #[test]
    fn test_contact_fallbacks() {
        let dir = TempDir::new().unwrap();
        let path = write_resume(
            &dir,
            "anonymous_resume.txt",
            "Python developer with Docker experience and more Python work history here",
        );

        let table = ranker().rank(&[path], JD).unwrap();
        assert_eq!(table.rows[0].email, "N/A");
        assert_eq!(table.rows[0].phone, "N/A");
        // First line is too long for a name, so the file stem wins.
        assert_eq!(table.rows[0].name, "anonymous_resume");
    }
}
