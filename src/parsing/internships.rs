//! Internship entry extraction

use crate::parsing::sections::Sections;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Internship {
    pub company: String,
    pub role: Option<String>,
    pub duration: Option<String>,
    pub description: Option<String>,
}

// "Company - Role (Duration) trailing description"
static DASH_PAREN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.+?)\s*[-–]\s*(.+?)\s*\((.+?)\)\s*(.*)$").expect("Invalid internship regex")
});
// "Company - Role [Duration]"
static DASH_BRACKET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.+?)\s*[-–]\s*(.+?)\s*\[(.+?)\]\s*(.*)$").expect("Invalid internship regex")
});
// "Company, Role, Duration, trailing description"
static COMMA_FORM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([^,]+),\s*([^,]+),\s*([^,]+?)(?:,\s*(.+))?$").expect("Invalid internship regex")
});

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

/// Extract internship entries from experience-like sections. One entry
/// per line that matches an anchored pattern; bullet lines are treated
/// as descriptions and skipped.
pub fn extract_internships(sections: &Sections) -> Vec<Internship> {
    let text = sections.join(&["Internships", "Internship Experience", "Experience"]);
    let mut internships = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('•') || line.starts_with('-') {
            continue;
        }

        if let Some(caps) = DASH_PAREN.captures(line).or_else(|| DASH_BRACKET.captures(line)) {
            internships.push(Internship {
                company: caps[1].trim().to_string(),
                role: non_empty(&caps[2]),
                duration: non_empty(&caps[3]),
                description: non_empty(&caps[4]),
            });
        } else if let Some(caps) = COMMA_FORM.captures(line) {
            internships.push(Internship {
                company: caps[1].trim().to_string(),
                role: non_empty(&caps[2]),
                duration: non_empty(&caps[3]),
                description: caps.get(4).and_then(|m| non_empty(m.as_str())),
            });
        }
    }

    internships
}
