//! Resume segmentation by section headers

use crate::config::HeuristicsConfig;
use crate::parsing::cache::{content_hash, BoundedCache};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;

const SEGMENT_CACHE_CAPACITY: usize = 64;

/// Ordered section-name -> section-text mapping. Keys are the canonical
/// header spellings; document order is preserved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sections {
    entries: Vec<(String, String)>,
}

impl Sections {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Concatenate several sections' text, first to last.
    pub fn join(&self, names: &[&str]) -> String {
        let mut out = String::new();
        for name in names {
            if let Some(text) = self.get(name) {
                out.push_str(text);
                out.push('\n');
            }
        }
        out
    }

    fn append(&mut self, name: &str, line: &str) {
        match self.entries.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => {
                v.push_str(line);
                v.push('\n');
            }
            None => self.entries.push((name.to_string(), format!("{}\n", line))),
        }
    }

    fn ensure(&mut self, name: &str) {
        if !self.contains(name) {
            self.entries.push((name.to_string(), String::new()));
        }
    }

    fn finalize(mut self) -> Self {
        for (_, v) in self.entries.iter_mut() {
            *v = v.trim().to_string();
        }
        self.entries.retain(|(_, v)| !v.is_empty());
        self
    }
}

/// Splits raw resume text into named sections using full-line header
/// detection. Segmentation is pure, so results are cached by content
/// hash and shared across the extractors.
pub struct Segmenter {
    /// Lowercased header (and its plural) -> canonical spelling.
    canonical: HashMap<String, String>,
    cache: Mutex<BoundedCache<String, Sections>>,
}

impl Segmenter {
    pub fn new(heuristics: &HeuristicsConfig) -> Self {
        let mut canonical = HashMap::new();
        for header in &heuristics.section_headers {
            let lower = header.to_lowercase();
            canonical.insert(format!("{}s", lower), header.clone());
            canonical.insert(lower, header.clone());
        }
        Self {
            canonical,
            cache: Mutex::new(BoundedCache::new(SEGMENT_CACHE_CAPACITY)),
        }
    }

    /// A line is a header iff the whole trimmed line equals a known
    /// synonym, optionally pluralized and/or followed by a colon.
    /// Synonyms appearing mid-sentence never match.
    fn match_header(&self, line: &str) -> Option<&str> {
        let trimmed = line.trim().trim_end_matches(':').trim();
        if trimmed.is_empty() {
            return None;
        }
        self.canonical
            .get(&trimmed.to_lowercase())
            .map(|s| s.as_str())
    }

    pub fn segment(&self, text: &str) -> Sections {
        let key = content_hash(text);
        if let Some(cached) = self.cache.lock().expect("segment cache poisoned").get(&key) {
            return cached;
        }

        let sections = self.segment_uncached(text);
        self.cache
            .lock()
            .expect("segment cache poisoned")
            .insert(key, sections.clone());
        sections
    }

    fn segment_uncached(&self, text: &str) -> Sections {
        let mut sections = Sections::default();
        let mut current = "Header".to_string();

        for line in text.lines() {
            let line = line.trim();
            if let Some(canonical) = self.match_header(line) {
                current = canonical.to_string();
                sections.ensure(&current);
            } else {
                sections.append(&current, line);
            }
        }

        let mut sections = sections.finalize();

        // Unlabeled leading text is contact info when it carries any
        // contact marker, otherwise a profile blurb.
        if let Some(header_text) = sections.get("Header").map(|s| s.to_string()) {
            sections.entries.retain(|(k, _)| k != "Header");
            let lower = header_text.to_lowercase();
            let is_contact = ["@", "http", "linkedin", "github", "phone"]
                .iter()
                .any(|marker| lower.contains(marker));
            let name = if is_contact { "Contact" } else { "Profile" };
            // Keys stay unique: when an explicit section with the same
            // name exists, the leading text is merged into it.
            match sections.entries.iter_mut().find(|(k, _)| k == name) {
                Some((_, existing)) => {
                    *existing = format!("{}\n{}", header_text, existing);
                }
                None => sections.entries.insert(0, (name.to_string(), header_text)),
            }
        }

        sections
    }
}
