//! Bullet-list extraction for projects and certifications

use crate::parsing::sections::Sections;
use once_cell::sync::Lazy;
use regex::Regex;

static PROJECT_SPLIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*•\s*|\n\s*\d+\.\s*").expect("Invalid project split regex"));
static CERT_SPLIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*•\s*").expect("Invalid certification split regex"));
static LEADING_BULLET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[•\-]\s*").expect("Invalid bullet regex"));
static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

fn split_items(text: &str, splitter: &Regex) -> Vec<String> {
    splitter
        .split(text)
        .map(|item| {
            let item = WHITESPACE.replace_all(item.trim(), " ");
            LEADING_BULLET.replace(&item, "").trim().to_string()
        })
        .filter(|item| !item.is_empty())
        .collect()
}

/// Project items from the Projects section, bullet markers stripped.
pub fn extract_projects(sections: &Sections) -> Vec<String> {
    sections
        .get("Projects")
        .map(|text| split_items(text, &PROJECT_SPLIT))
        .unwrap_or_default()
}

/// Certification items from the Certifications section.
pub fn extract_certifications(sections: &Sections) -> Vec<String> {
    sections
        .get("Certifications")
        .map(|text| split_items(text, &CERT_SPLIT))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HeuristicsConfig;
    use crate::parsing::sections::Segmenter;

    fn parse_sections(text: &str) -> Sections {
        Segmenter::new(&HeuristicsConfig::default()).segment(text)
    }

    #[test]
    fn test_bulleted_projects() {
        let sections = parse_sections(
            "me@x.com\nProjects\n• Face recognition app\n• Chat server\n  with reconnect logic",
        );
        let projects = extract_projects(&sections);

        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0], "Face recognition app");
        assert_eq!(projects[1], "Chat server with reconnect logic");
    }

    #[test]
    fn test_numbered_projects() {
        let sections = parse_sections("me@x.com\nProjects\n1. First thing\n2. Second thing");
        let projects = extract_projects(&sections);

        assert_eq!(projects, vec!["First thing", "Second thing"]);
    }

    #[test]
    fn test_certifications() {
        let sections =
            parse_sections("me@x.com\nCertifications\n• AWS Cloud Practitioner\n• Azure Basics");
        let certs = extract_certifications(&sections);

        assert_eq!(certs, vec!["AWS Cloud Practitioner", "Azure Basics"]);
    }

    #[test]
    fn test_missing_sections() {
        let sections = parse_sections("me@x.com\nSkills\nPython");
        assert!(extract_projects(&sections).is_empty());
        assert!(extract_certifications(&sections).is_empty());
    }
}
