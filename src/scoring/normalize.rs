//! Text normalization for similarity scoring
//!
//! Tech terminology survives normalization: +, #, . and @ are kept so
//! "c++", "c#" and ".net" stay recognizable long enough to be rewritten
//! to canonical spellings.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static STRIP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s+.#@-]").expect("Invalid strip regex"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("Invalid ws regex"));

/// Canonical rewrites applied after lowercasing, in order.
static REPLACEMENTS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"\bc\+\+\b", "cpp"),
        (r"\bc#\b", "csharp"),
        (r"\b\.net\b", "dotnet"),
        (r"\bjs\b", "javascript"),
        (r"\baws\b", "amazon web services"),
        (r"\bgcp\b", "google cloud"),
        (r"\bai\b", "artificial intelligence"),
        (r"\bml\b", "machine learning"),
    ]
    .iter()
    .map(|(pattern, repl)| {
        (
            Regex::new(pattern).expect("Invalid replacement regex"),
            *repl,
        )
    })
    .collect()
});

/// Normalize text for scoring: NFKC fold, strip punctuation that is
/// not tech-significant, collapse whitespace, lowercase, and rewrite
/// common abbreviations to their full forms.
pub fn normalize_text(text: &str) -> String {
    let folded: String = text.nfkc().collect();
    let stripped = STRIP.replace_all(&folded, "");
    let mut normalized = WHITESPACE
        .replace_all(&stripped, " ")
        .to_lowercase()
        .trim()
        .to_string();

    for (regex, replacement) in REPLACEMENTS.iter() {
        normalized = regex.replace_all(&normalized, *replacement).into_owned();
    }

    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_collapses() {
        assert_eq!(normalize_text("  Senior   PYTHON Dev "), "senior python dev");
    }

    #[test]
    fn test_abbreviations_expanded() {
        assert_eq!(normalize_text("AWS and GCP"), "amazon web services and google cloud");
        assert_eq!(normalize_text("ML, AI"), "machine learning artificial intelligence");
        assert_eq!(normalize_text("JS frameworks"), "javascript frameworks");
    }

    #[test]
    fn test_tech_symbols_preserved() {
        // "c#" keeps its hash through stripping and gets rewritten.
        assert_eq!(normalize_text("C# developer"), "csharp developer");
        assert_eq!(normalize_text("node.js"), "node.javascript");
    }

    #[test]
    fn test_punctuation_stripped() {
        assert_eq!(normalize_text("Python, SQL; Docker!"), "python sql docker");
    }
}
