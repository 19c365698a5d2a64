//! Skill vocabulary matching

use crate::config::HeuristicsConfig;
use crate::parsing::sections::Sections;
use regex::{Regex, RegexSet};
use std::collections::BTreeSet;

/// Sections scanned for skills, most reliable first.
const SKILL_SECTIONS: [&str; 3] = ["Skills", "Technical Skills", "Key Skills"];
const FALLBACK_SECTIONS: [&str; 3] = ["Experience", "Projects", "Education"];

pub struct SkillExtractor {
    labels: Vec<String>,
    matcher: RegexSet,
    categories: Vec<(String, Regex)>,
}

impl SkillExtractor {
    pub fn new(heuristics: &HeuristicsConfig) -> Self {
        let mut labels = Vec::new();
        let mut patterns = Vec::new();
        for entry in &heuristics.skill_vocabulary {
            // One whole-word alternation per canonical label.
            let alternation = entry.patterns.join("|");
            labels.push(entry.label.clone());
            patterns.push(format!(r"(?i)\b(?:{})\b", alternation));
        }
        let matcher = RegexSet::new(&patterns).expect("Invalid skill vocabulary patterns");

        let categories = heuristics
            .skill_categories
            .iter()
            .map(|cat| {
                let alternation = cat.patterns.join("|");
                let regex = Regex::new(&format!(r"(?i)\b(?:{})\b", alternation))
                    .expect("Invalid skill category patterns");
                (cat.name.clone(), regex)
            })
            .collect();

        Self {
            labels,
            matcher,
            categories,
        }
    }

    /// Extract the set of canonical skill labels present in the resume.
    /// Skills sections are scanned first, then experience-like sections
    /// for skills mentioned only in prose. Output is deduplicated and
    /// sorted.
    pub fn extract(&self, sections: &Sections) -> Vec<String> {
        let mut found: BTreeSet<&str> = BTreeSet::new();

        let skills_text = sections.join(&SKILL_SECTIONS);
        for idx in self.matcher.matches(&skills_text) {
            found.insert(&self.labels[idx]);
        }

        for section in FALLBACK_SECTIONS {
            if let Some(text) = sections.get(section) {
                for idx in self.matcher.matches(text) {
                    found.insert(&self.labels[idx]);
                }
            }
        }

        found.into_iter().map(|s| s.to_string()).collect()
    }

    /// Match the vocabulary against unsegmented text. Used for job
    /// descriptions, which have no resume-style sections.
    pub fn extract_from_text(&self, text: &str) -> Vec<String> {
        let mut found: BTreeSet<&str> = BTreeSet::new();
        for idx in self.matcher.matches(text) {
            found.insert(&self.labels[idx]);
        }
        found.into_iter().map(|s| s.to_string()).collect()
    }

    /// Group skill labels under their display categories.
    pub fn format_skills(&self, skills: &[String]) -> String {
        let mut lines = Vec::new();
        for (name, regex) in &self.categories {
            let mut in_category: BTreeSet<&str> = BTreeSet::new();
            for skill in skills {
                if regex.is_match(&skill.to_lowercase()) {
                    in_category.insert(skill);
                }
            }
            if !in_category.is_empty() {
                let joined = in_category.into_iter().collect::<Vec<_>>().join(", ");
                lines.push(format!("{}: {}", name, joined));
            }
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HeuristicsConfig;
    use crate::parsing::sections::Segmenter;

    fn extractor() -> SkillExtractor {
        SkillExtractor::new(&HeuristicsConfig::default())
    }

    fn parse_sections(text: &str) -> Sections {
        Segmenter::new(&HeuristicsConfig::default()).segment(text)
    }

    #[test]
    fn test_skills_from_skills_section() {
        let sections = parse_sections("me@x.com\nSkills\nPython, Docker and SQL");
        let skills = extractor().extract(&sections);

        assert!(skills.contains(&"Python".to_string()));
        assert!(skills.contains(&"Docker".to_string()));
        assert!(skills.contains(&"SQL".to_string()));
    }

    #[test]
    fn test_skills_from_fallback_sections() {
        let sections = parse_sections("me@x.com\nProjects\nBuilt a React dashboard with Git");
        let skills = extractor().extract(&sections);

        assert!(skills.contains(&"React".to_string()));
        assert!(skills.contains(&"Git".to_string()));
    }

    #[test]
    fn test_whole_word_matching() {
        // "javascript" must not trigger the "java" pattern boundary-free.
        let sections = parse_sections("me@x.com\nSkills\njavascript");
        let skills = extractor().extract(&sections);

        assert!(skills.contains(&"JavaScript".to_string()));
        assert!(!skills.contains(&"Java".to_string()));
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let sections = parse_sections("me@x.com\nSkills\nPython, Git, SQL, Python");
        let first = extractor().extract(&sections);
        let second = extractor().extract(&sections);

        assert_eq!(first, second);
        let mut sorted = first.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(first, sorted);
    }

    #[test]
    fn test_format_skills_groups_by_category() {
        let ext = extractor();
        let skills = vec!["Python".to_string(), "SQL".to_string(), "Git".to_string()];
        let formatted = ext.format_skills(&skills);

        assert!(formatted.contains("Programming Languages: Python"));
        assert!(formatted.contains("Databases: SQL"));
        assert!(formatted.contains("Tools: Git"));
    }

    #[test]
    fn test_empty_sections_yield_empty_skills() {
        let sections = parse_sections("just a profile line, nothing else");
        assert!(extractor().extract(&sections).is_empty());
    }
}
