//! Contact information extraction

use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
}

pub struct ContactExtractor {
    email_regex: Regex,
    phone_regex: Regex,
    linkedin_regex: Regex,
    github_regex: Regex,
}

impl Default for ContactExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactExtractor {
    pub fn new() -> Self {
        Self {
            email_regex: Regex::new(r"[\w.-]+@[\w.-]+\.\w+").expect("Invalid email regex"),
            phone_regex: Regex::new(r"(\+91[-\s]?)?[0-9]{10}").expect("Invalid phone regex"),
            linkedin_regex: Regex::new(r"(https?://)?(www\.)?linkedin\.com/in/[^\s]+")
                .expect("Invalid linkedin regex"),
            github_regex: Regex::new(r"(https?://)?(www\.)?github\.com/[^\s]+")
                .expect("Invalid github regex"),
        }
    }

    /// Extract contact details from full resume text. `person_entities`
    /// supplies a recognizer-based name fallback when the first line is
    /// not usable.
    pub fn extract(&self, text: &str, person_entities: &[String]) -> ContactInfo {
        let mut contact = ContactInfo::default();

        if let Some(first_line) = text.lines().map(str::trim).find(|l| !l.is_empty()) {
            let has_marker = ["@", "http", "://", "www."]
                .iter()
                .any(|marker| first_line.contains(marker));
            if !has_marker {
                contact.name = Some(first_line.to_string());
            }
        }

        if contact.name.is_none() && !person_entities.is_empty() {
            let name = person_entities
                .iter()
                .take(2)
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            contact.name = Some(name);
        }

        if let Some(m) = self.email_regex.find(text) {
            contact.email = Some(m.as_str().to_string());
        }
        if let Some(m) = self.phone_regex.find(text) {
            contact.phone = Some(m.as_str().trim().to_string());
        }
        if let Some(m) = self.linkedin_regex.find(text) {
            contact.linkedin = Some(m.as_str().to_string());
        }
        if let Some(m) = self.github_regex.find(text) {
            contact.github = Some(m.as_str().to_string());
        }

        contact
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_from_first_line() {
        let extractor = ContactExtractor::new();
        let contact = extractor.extract("Jane Doe\njane@example.com\n9876543210", &[]);
        assert_eq!(contact.name.as_deref(), Some("Jane Doe"));
        assert_eq!(contact.email.as_deref(), Some("jane@example.com"));
        assert_eq!(contact.phone.as_deref(), Some("9876543210"));
    }

    #[test]
    fn test_email_extracted_exactly() {
        let extractor = ContactExtractor::new();
        let contact = extractor.extract("Reach me at user@domain.tld for details", &[]);
        assert_eq!(contact.email.as_deref(), Some("user@domain.tld"));
    }

    #[test]
    fn test_name_fallback_to_person_entities() {
        let extractor = ContactExtractor::new();
        let persons = vec!["Ravi".to_string(), "Kumar".to_string(), "Extra".to_string()];
        let contact = extractor.extract("ravi.kumar@example.com\n...", &persons);
        assert_eq!(contact.name.as_deref(), Some("Ravi Kumar"));
    }

    #[test]
    fn test_links_extracted() {
        let extractor = ContactExtractor::new();
        let text = "Jane\nhttps://linkedin.com/in/janedoe\nhttps://github.com/janedoe";
        let contact = extractor.extract(text, &[]);
        assert_eq!(
            contact.linkedin.as_deref(),
            Some("https://linkedin.com/in/janedoe")
        );
        assert_eq!(contact.github.as_deref(), Some("https://github.com/janedoe"));
    }

    #[test]
    fn test_missing_fields_stay_none() {
        let extractor = ContactExtractor::new();
        let contact = extractor.extract("Just a plain line", &[]);
        assert!(contact.email.is_none());
        assert!(contact.phone.is_none());
        assert!(contact.linkedin.is_none());
    }

    #[test]
    fn test_phone_with_country_code() {
        let extractor = ContactExtractor::new();
        let contact = extractor.extract("Jane\n+91-9876543210", &[]);
        assert_eq!(contact.phone.as_deref(), Some("+91-9876543210"));
    }
}
