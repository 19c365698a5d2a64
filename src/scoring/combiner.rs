//! Structured resume flattening
//!
//! Turns a parsed resume back into one scoring document, repeating
//! each field group in proportion to its section weight so the
//! vectorizers see skills more often than education.

use crate::config::MatchingConfig;
use crate::parsing::resume::ParsedResume;
use crate::scoring::normalize::normalize_text;
use std::collections::HashMap;

const WEIGHT_SCALE: f32 = 15.0;

pub struct StructuredCombiner {
    section_weights: HashMap<String, f32>,
}

impl StructuredCombiner {
    pub fn new(matching: &MatchingConfig) -> Self {
        Self {
            section_weights: matching.section_weights.clone(),
        }
    }

    /// Flatten a parsed resume into weighted normalized text. Field
    /// groups without a configured weight contribute nothing.
    pub fn combine(&self, resume: &ParsedResume) -> String {
        let mut groups: Vec<(&str, Vec<String>)> = Vec::new();

        groups.push(("skills", resume.skills.clone()));

        let mut experience = Vec::new();
        for internship in &resume.internships {
            experience.push(format!("company: {}", internship.company));
            if let Some(role) = &internship.role {
                experience.push(format!("role: {}", role));
            }
            if let Some(duration) = &internship.duration {
                experience.push(format!("duration: {}", duration));
            }
            if let Some(description) = &internship.description {
                experience.push(format!("description: {}", description));
            }
        }
        for section in ["Experience", "Work Experience", "Employment History"] {
            if let Some(text) = resume.sections.get(section) {
                experience.push(text.to_string());
            }
        }
        groups.push(("experience", experience));

        groups.push(("projects", resume.projects.clone()));

        let mut education = Vec::new();
        for entry in &resume.education {
            education.push(format!("degree: {}", entry.degree));
            if let Some(institution) = &entry.institution {
                education.push(format!("institution: {}", institution));
            }
            if let Some(dates) = &entry.dates {
                education.push(format!("dates: {}", dates));
            }
        }
        groups.push(("education", education));

        let mut weighted = Vec::new();
        for (name, parts) in groups {
            if parts.is_empty() {
                continue;
            }
            let weight = self.section_weights.get(name).copied().unwrap_or(0.0);
            let repeats = (weight * WEIGHT_SCALE).round() as usize;
            if repeats == 0 {
                continue;
            }
            let text = parts.join(" ");
            for _ in 0..repeats {
                weighted.push(text.clone());
            }
        }

        normalize_text(&weighted.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::parsing::resume::ResumeParser;
    use std::sync::Arc;

    fn parsed() -> Arc<ParsedResume> {
        let mut config = Config::default();
        config.models.ner_repo = "local/unavailable".to_string();
        config.models.models_dir = std::env::temp_dir().join("resume-matcher-test-models");
        let text = "\
me@x.com
Skills
Python, Docker

Education
B.Tech in CSE @ Vardhaman College (2020-2024)

Projects
\u{2022} Resume screening tool
";
        ResumeParser::new(&config).parse("cv.txt", "text", text).unwrap()
    }

    #[test]
    fn test_skills_repeated_more_than_education() {
        let combiner = StructuredCombiner::new(&Config::default().matching);
        let combined = combiner.combine(&parsed());

        let skills_hits = combined.matches("docker").count();
        let education_hits = combined.matches("b.tech").count();
        assert!(skills_hits > education_hits);
        assert!(education_hits >= 1);
    }

    #[test]
    fn test_zero_weight_group_dropped() {
        let mut matching = Config::default().matching;
        matching.section_weights.insert("projects".to_string(), 0.0);
        let combiner = StructuredCombiner::new(&matching);
        let combined = combiner.combine(&parsed());

        assert!(!combined.contains("screening"));
        assert!(combined.contains("python"));
    }

    #[test]
    fn test_output_is_normalized() {
        let combiner = StructuredCombiner::new(&Config::default().matching);
        let combined = combiner.combine(&parsed());
        assert_eq!(combined, combined.to_lowercase());
        assert!(!combined.contains(','));
    }
}
