//! Stopword list for lexical scoring
//!
//! Standard English stopwords plus recruiting boilerplate ("looking",
//! "experience", "stakeholders") that carries no signal when comparing
//! a job description against resumes.

use once_cell::sync::Lazy;
use std::collections::HashSet;

const ENGLISH: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

const DOMAIN: &[&str] = &[
    "would", "also", "work", "like", "using", "need", "looking", "good", "make", "want", "able",
    "help", "team", "strong", "experience", "role", "knowledge", "understanding", "familiarity",
    "etc", "including", "within", "various", "ability", "focus", "solutions", "leverage",
    "enable", "stakeholders", "align", "deliverables", "paradigm", "ecosystem", "holistic",
    "value-added", "best", "practices", "basic", "basics", "development", "grow", "frameworks",
];

static STOPWORDS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ENGLISH.iter().chain(DOMAIN).copied().collect());

pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_words_are_stopwords() {
        assert!(is_stopword("the"));
        assert!(is_stopword("with"));
        assert!(is_stopword("experience"));
        assert!(is_stopword("stakeholders"));
    }

    #[test]
    fn test_signal_words_are_kept() {
        assert!(!is_stopword("python"));
        assert!(!is_stopword("docker"));
        assert!(!is_stopword("engineer"));
    }
}
