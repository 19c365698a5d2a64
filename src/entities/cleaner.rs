//! Entity cleanup
//!
//! Recognizer output needs repair before it is usable: wordpiece
//! continuations must be merged back onto their base token, truncated
//! organization names expanded, and tokens that are really skills or
//! noise discarded.

use crate::config::HeuristicsConfig;
use aho_corasick::AhoCorasick;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

pub struct EntityCleaner {
    noise_tokens: HashSet<String>,
    org_aliases: HashMap<String, String>,
    org_drop: HashSet<String>,
    org_allowlist: HashSet<String>,
    institution_keywords: Vec<String>,
    /// Lowercased skill labels, matched as substrings.
    skill_matcher: AhoCorasick,
    generic_fragments: HashSet<String>,
}

impl EntityCleaner {
    pub fn new(heuristics: &HeuristicsConfig) -> Self {
        // Single-character labels ("C") are useless as substrings and
        // would reject almost everything, so only longer labels feed
        // the matcher.
        let skill_labels: Vec<String> = heuristics
            .skill_vocabulary
            .iter()
            .map(|entry| entry.label.to_lowercase())
            .filter(|label| label.chars().count() >= 2)
            .collect();
        let skill_matcher =
            AhoCorasick::new(&skill_labels).expect("Invalid skill label patterns");

        Self {
            noise_tokens: heuristics
                .noise_tokens
                .iter()
                .map(|t| t.to_lowercase())
                .collect(),
            org_aliases: heuristics.org_aliases.clone(),
            org_drop: heuristics.org_drop.iter().cloned().collect(),
            org_allowlist: heuristics.org_allowlist.iter().cloned().collect(),
            institution_keywords: heuristics
                .institution_keywords
                .iter()
                .map(|k| k.to_lowercase())
                .collect(),
            skill_matcher,
            generic_fragments: heuristics
                .generic_fragments
                .iter()
                .map(|f| f.to_lowercase())
                .collect(),
        }
    }

    /// Repair and filter raw recognizer output. Labels whose values all
    /// get filtered away are absent from the result. Values are
    /// deduplicated and sorted per label.
    pub fn clean(&self, raw: &HashMap<String, Vec<String>>) -> BTreeMap<String, Vec<String>> {
        let mut cleaned = BTreeMap::new();

        for (label, words) in raw {
            let merged = self.merge_continuations(label, words);

            let mut kept: BTreeSet<String> = BTreeSet::new();
            for entity in merged {
                let entity = entity.trim();
                if let Some(accepted) = self.filter(label, entity) {
                    kept.insert(accepted);
                }
            }

            if !kept.is_empty() {
                cleaned.insert(label.clone(), kept.into_iter().collect());
            }
        }

        cleaned
    }

    /// Rejoin "##" wordpiece continuations onto the preceding token.
    /// Merged tokens shorter than 3 characters are fragments and get
    /// dropped.
    fn merge_continuations(&self, label: &str, words: &[String]) -> Vec<String> {
        let mut merged = Vec::new();
        let mut buffer: Option<String> = None;

        for word in words {
            if self.noise_tokens.contains(&word.to_lowercase()) {
                continue;
            }

            let mut word = word.clone();
            if label == "ORG" {
                if self.org_drop.contains(&word) {
                    continue;
                }
                if let Some(full) = self.org_aliases.get(&word) {
                    word = full.clone();
                }
            }

            if let Some(rest) = word.strip_prefix("##") {
                if let Some(buf) = buffer.as_mut() {
                    buf.push_str(rest);
                }
                continue;
            }

            if let Some(buf) = buffer.take() {
                if buf.len() >= 3 {
                    merged.push(buf);
                }
            }
            if !word.trim().is_empty() {
                buffer = Some(word);
            }
        }

        if let Some(buf) = buffer {
            if buf.len() >= 3 {
                merged.push(buf);
            }
        }

        merged
    }

    fn filter(&self, label: &str, entity: &str) -> Option<String> {
        if entity.len() < 3 || entity.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        let lower = entity.to_lowercase();
        if entity.chars().any(|c| ":@()".contains(c)) || lower.contains("http") {
            return None;
        }

        if label == "PER" {
            if entity.split_whitespace().count() > 3 {
                return None;
            }
            return Some(entity.to_string());
        }

        if label == "ORG" {
            if self.institution_keywords.iter().any(|kw| lower.contains(kw)) {
                return Some(entity.to_string());
            }
            if self.org_allowlist.contains(entity) {
                return Some(entity.to_string());
            }
            // Unrecognized organizations still get a chance below.
        }

        if !self.skill_matcher.is_match(&lower) && !self.generic_fragments.contains(&lower) {
            return Some(entity.to_string());
        }
        None
    }
}
