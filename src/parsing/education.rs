//! Education entry extraction

use crate::parsing::sections::Sections;
use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub degree: String,
    pub institution: Option<String>,
    pub dates: Option<String>,
}

pub struct EducationExtractor {
    entry_regex: Regex,
    year_regex: Regex,
    whitespace_regex: Regex,
    comma_regex: Regex,
}

impl Default for EducationExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl EducationExtractor {
    pub fn new() -> Self {
        // Degree token from a fixed abbreviation set, then an
        // institution phrase, then an optional parenthesized or
        // dash-separated date.
        let entry_regex = Regex::new(
            r"(?i)((?:B\.?Tech|B\.?E|B\.?Sc|B\.?Com|B\.?A|M\.?Tech|M\.?Sc|M\.?Com|M\.?A|Ph\.?D|Bachelor|Master|Diploma|PGDM|MBA|MCA)\b[^@\n]*)(?:@|at|,)?\s*([^\n,()]*)(?:\(([^)\n]*)\)|-\s*(.*))?",
        )
        .expect("Invalid education regex");

        Self {
            entry_regex,
            year_regex: Regex::new(r"\b(20\d{2})\b").expect("Invalid year regex"),
            whitespace_regex: Regex::new(r"\s+").expect("Invalid whitespace regex"),
            comma_regex: Regex::new(r"\s*,\s*").expect("Invalid comma regex"),
        }
    }

    /// Extract education entries from the Education section. Missing
    /// section or unmatched text yields an empty list.
    pub fn extract(&self, sections: &Sections) -> Vec<Education> {
        let Some(edu_text) = sections.get("Education") else {
            return Vec::new();
        };

        let mut education = Vec::new();
        for caps in self.entry_regex.captures_iter(edu_text) {
            let degree = caps
                .get(1)
                .map(|m| m.as_str().trim().to_string())
                .unwrap_or_default();
            if degree.is_empty() {
                continue;
            }

            let institution = caps
                .get(2)
                .map(|m| m.as_str().trim())
                .filter(|s| !s.is_empty())
                .map(|s| {
                    let s = self.whitespace_regex.replace_all(s, " ").to_string();
                    self.comma_regex.replace_all(&s, ", ").to_string()
                });

            let mut dates = caps
                .get(3)
                .or_else(|| caps.get(4))
                .map(|m| m.as_str().trim().to_string())
                .filter(|s| !s.is_empty());

            // 4-digit-year fallback over the whole matched span.
            if dates.is_none() {
                if let Some(full) = caps.get(0) {
                    dates = self
                        .year_regex
                        .captures(full.as_str())
                        .and_then(|y| y.get(1))
                        .map(|y| y.as_str().to_string());
                }
            }

            education.push(Education {
                degree,
                institution,
                dates,
            });
        }

        education
    }
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
    fn test_degree_with_dates_in_parens() {
        let sections =
            parse_sections("me@x.com\nEducation\nB.Tech in CSE @ Vardhaman College (2020-2024)");
        let entries = EducationExtractor::new().extract(&sections);

        assert_eq!(entries.len(), 1);
        assert!(entries[0].degree.starts_with("B.Tech"));
        assert_eq!(entries[0].dates.as_deref(), Some("2020-2024"));
    }

    #[test]
    fn test_year_fallback() {
        let sections = parse_sections("me@x.com\nEducation\nMBA from Some Business School 2023");
        let entries = EducationExtractor::new().extract(&sections);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].dates.as_deref(), Some("2023"));
    }

    #[test]
    fn test_missing_section_yields_empty() {
        let sections = parse_sections("me@x.com\nSkills\nPython");
        assert!(EducationExtractor::new().extract(&sections).is_empty());
    }

    #[test]
    fn test_no_degree_token_yields_empty() {
        let sections = parse_sections("me@x.com\nEducation\nAttended some workshops");
        assert!(EducationExtractor::new().extract(&sections).is_empty());
    }
}
