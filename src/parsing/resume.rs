//! Resume parsing pipeline
//!
//! Ties segmentation, field extraction, and entity recognition together
//! into a single cached `ParsedResume` per input document.

use crate::config::Config;
use crate::entities::{EntityCleaner, EntityRecognizer};
use crate::error::Result;
use crate::parsing::cache::{content_hash, BoundedCache};
use crate::parsing::contact::{ContactExtractor, ContactInfo};
use crate::parsing::education::{Education, EducationExtractor};
use crate::parsing::internships::{extract_internships, Internship};
use crate::parsing::lists::{extract_certifications, extract_projects};
use crate::parsing::sections::{Sections, Segmenter};
use crate::parsing::skills::SkillExtractor;
use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

const PARSE_CACHE_CAPACITY: usize = 32;

static BLANK_LINES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{3,}").expect("Invalid blank-line regex"));
static INLINE_SPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t]+").expect("Invalid space regex"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeMetadata {
    pub filename: String,
    pub file_type: String,
    pub processing_date: String,
}

/// Fully parsed resume: ordered sections plus every structured field
/// extracted from them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedResume {
    pub metadata: ResumeMetadata,
    pub sections: Sections,
    pub contact: ContactInfo,
    pub education: Vec<Education>,
    pub skills: Vec<String>,
    pub projects: Vec<String>,
    pub certifications: Vec<String>,
    pub internships: Vec<Internship>,
    /// Cleaned named entities over the whole document, label -> values.
    pub global_entities: BTreeMap<String, Vec<String>>,
    /// Per-section subset of the global entities.
    pub section_entities: BTreeMap<String, BTreeMap<String, Vec<String>>>,
}

pub struct ResumeParser {
    segmenter: Segmenter,
    contact: ContactExtractor,
    education: EducationExtractor,
    skills: SkillExtractor,
    recognizer: EntityRecognizer,
    cleaner: EntityCleaner,
    cache: Mutex<BoundedCache<(String, String), Arc<ParsedResume>>>,
}

impl ResumeParser {
    pub fn new(config: &Config) -> Self {
        Self {
            segmenter: Segmenter::new(&config.heuristics),
            contact: ContactExtractor::new(),
            education: EducationExtractor::new(),
            skills: SkillExtractor::new(&config.heuristics),
            recognizer: EntityRecognizer::new(&config.models, config.matching.use_gpu),
            cleaner: EntityCleaner::new(&config.heuristics),
            cache: Mutex::new(BoundedCache::new(PARSE_CACHE_CAPACITY)),
        }
    }

    pub fn skill_extractor(&self) -> &SkillExtractor {
        &self.skills
    }

    /// Normalize extracted text before any downstream processing.
    /// Unicode is NFKC-folded, runs of blank lines collapse to one,
    /// and each line is trimmed with inner whitespace runs collapsed.
    pub fn clean_raw_text(text: &str) -> String {
        use unicode_normalization::UnicodeNormalization;

        let folded: String = text.nfkc().collect();
        let cleaned: String = folded
            .lines()
            .map(|line| INLINE_SPACE.replace_all(line.trim(), " ").into_owned())
            .collect::<Vec<_>>()
            .join("\n");
        BLANK_LINES.replace_all(&cleaned, "\n\n").trim().to_string()
    }

    /// Parse extracted resume text into structured fields. Results are
    /// cached by filename and content hash, so re-parsing an unchanged
    /// document is free.
    pub fn parse(&self, filename: &str, file_type: &str, raw_text: &str) -> Result<Arc<ParsedResume>> {
        let text = Self::clean_raw_text(raw_text);
        let key = (filename.to_string(), content_hash(&text));

        if let Some(cached) = self.cache.lock().expect("parse cache poisoned").get(&key) {
            return Ok(cached);
        }

        let sections = self.segmenter.segment(&text);

        let raw_entities = self.recognizer.extract_entities(&text);
        let global_entities = self.cleaner.clean(&raw_entities);

        let empty = Vec::new();
        let persons = global_entities.get("PER").unwrap_or(&empty);
        let contact = self.contact.extract(&text, persons);

        let parsed = Arc::new(ParsedResume {
            metadata: ResumeMetadata {
                filename: filename.to_string(),
                file_type: file_type.to_string(),
                processing_date: Utc::now().to_rfc3339(),
            },
            section_entities: Self::split_by_section(&sections, &global_entities),
            contact,
            education: self.education.extract(&sections),
            skills: self.skills.extract(&sections),
            projects: extract_projects(&sections),
            certifications: extract_certifications(&sections),
            internships: extract_internships(&sections),
            global_entities,
            sections,
        });

        self.cache
            .lock()
            .expect("parse cache poisoned")
            .insert(key, parsed.clone());
        Ok(parsed)
    }

    /// Attribute each cleaned entity to the sections whose text
    /// mentions it, case-insensitively. An entity may appear under
    /// several sections.
    fn split_by_section(
        sections: &Sections,
        entities: &BTreeMap<String, Vec<String>>,
    ) -> BTreeMap<String, BTreeMap<String, Vec<String>>> {
        let mut out = BTreeMap::new();
        for (name, text) in sections.iter() {
            let lower = text.to_lowercase();
            let mut per_label: BTreeMap<String, Vec<String>> = BTreeMap::new();
            for (label, values) in entities {
                let hits: Vec<String> = values
                    .iter()
                    .filter(|v| lower.contains(&v.to_lowercase()))
                    .cloned()
                    .collect();
                if !hits.is_empty() {
                    per_label.insert(label.clone(), hits);
                }
            }
            if !per_label.is_empty() {
                out.insert(name.to_string(), per_label);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn parser() -> ResumeParser {
        let mut config = Config::default();
        // Point at a nonexistent repo so recognition degrades to empty
        // maps instead of downloading a model in tests.
        config.models.ner_repo = "local/unavailable".to_string();
        config.models.models_dir = std::env::temp_dir().join("resume-matcher-test-models");
        ResumeParser::new(&config)
    }

    const SAMPLE: &str = "\
Jane Doe
jane.doe@example.com | 9876543210

Skills
Python, Docker, SQL

Education
B.Tech in CSE @ Vardhaman College (2020-2024)

Projects
\u{2022} Resume screening tool
\u{2022} Chat server

Internships
Edunet Foundation - AI Intern (Jun 2023 - Aug 2023) Built models
";

    #[test]
    fn test_full_parse_pipeline() {
        let parsed = parser().parse("jane.txt", "text", SAMPLE).unwrap();

        assert_eq!(parsed.metadata.filename, "jane.txt");
        assert_eq!(parsed.contact.name.as_deref(), Some("Jane Doe"));
        assert_eq!(parsed.contact.email.as_deref(), Some("jane.doe@example.com"));
        assert!(parsed.skills.contains(&"Python".to_string()));
        assert_eq!(parsed.education.len(), 1);
        assert_eq!(parsed.projects.len(), 2);
        assert_eq!(parsed.internships.len(), 1);
        assert_eq!(parsed.internships[0].company, "Edunet Foundation");
    }

    #[test]
    fn test_clean_raw_text_normalizes() {
        let messy = "Line one\t\twith   tabs\n\n\n\nLine two  ";
        let clean = ResumeParser::clean_raw_text(messy);
        assert_eq!(clean, "Line one with tabs\n\nLine two");
    }

    #[test]
    fn test_parse_is_cached() {
        let p = parser();
        let first = p.parse("jane.txt", "text", SAMPLE).unwrap();
        let second = p.parse("jane.txt", "text", SAMPLE).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_different_content_reparses() {
        let p = parser();
        let first = p.parse("jane.txt", "text", SAMPLE).unwrap();
        let second = p
            .parse("jane.txt", "text", "bob@example.com\nSkills\nJava")
            .unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert!(second.skills.contains(&"Java".to_string()));
    }
}
