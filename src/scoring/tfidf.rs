//! TF-IDF vectorization
//!
//! Word n-gram TF-IDF with smoothed inverse document frequency and
//! L2-normalized sparse vectors. Fitting learns the vocabulary from a
//! corpus; transforming maps any text onto that fixed vocabulary.

use crate::config::TfidfConfig;
use crate::scoring::stopwords::is_stopword;
use std::collections::HashMap;
use unicode_segmentation::UnicodeSegmentation;

pub struct TfidfVectorizer {
    ngram_range: (usize, usize),
    min_df: usize,
    max_features: usize,
}

/// Vocabulary and IDF weights learned from a corpus.
pub struct FittedTfidf {
    vocab: HashMap<String, usize>,
    idf: Vec<f32>,
    ngram_range: (usize, usize),
}

/// Sparse vector as sorted (index, value) pairs.
#[derive(Debug, Clone, Default)]
pub struct SparseVec(Vec<(usize, f32)>);

fn tokenize(text: &str) -> Vec<String> {
    text.unicode_words()
        .map(|w| w.to_lowercase())
        .filter(|w| w.chars().count() >= 2 && !is_stopword(w))
        .collect()
}

fn ngrams(tokens: &[String], range: (usize, usize)) -> Vec<String> {
    let mut terms = Vec::new();
    for n in range.0..=range.1 {
        if n == 0 || n > tokens.len() {
            continue;
        }
        for window in tokens.windows(n) {
            terms.push(window.join(" "));
        }
    }
    terms
}

impl TfidfVectorizer {
    pub fn new(config: &TfidfConfig) -> Self {
        Self {
            ngram_range: config.ngram_range,
            min_df: config.min_df,
            max_features: config.max_features,
        }
    }

    /// Learn vocabulary and IDF weights from `documents`. Terms below
    /// the document-frequency floor are discarded; if the vocabulary
    /// still exceeds `max_features`, the most frequent terms win.
    pub fn fit(&self, documents: &[String]) -> FittedTfidf {
        let n_docs = documents.len();
        // A floor above the corpus size would empty the vocabulary.
        let min_df = self.min_df.min(n_docs.max(1));

        let mut doc_freq: HashMap<String, usize> = HashMap::new();
        let mut total_freq: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            let tokens = tokenize(doc);
            let terms = ngrams(&tokens, self.ngram_range);
            let mut seen: HashMap<&str, usize> = HashMap::new();
            for term in &terms {
                *seen.entry(term.as_str()).or_insert(0) += 1;
            }
            for (term, count) in seen {
                *doc_freq.entry(term.to_string()).or_insert(0) += 1;
                *total_freq.entry(term.to_string()).or_insert(0) += count;
            }
        }

        let mut candidates: Vec<(String, usize)> = doc_freq
            .iter()
            .filter(|(_, df)| **df >= min_df)
            .map(|(term, _)| (term.clone(), total_freq[term]))
            .collect();

        // Highest corpus frequency first, alphabetical tie-break, then
        // cap the vocabulary size.
        candidates.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        candidates.truncate(self.max_features);
        candidates.sort_by(|a, b| a.0.cmp(&b.0));

        let mut vocab = HashMap::new();
        let mut idf = Vec::with_capacity(candidates.len());
        for (i, (term, _)) in candidates.into_iter().enumerate() {
            let df = doc_freq[&term] as f32;
            // Smoothed IDF, never zero.
            idf.push(((1.0 + n_docs as f32) / (1.0 + df)).ln() + 1.0);
            vocab.insert(term, i);
        }

        FittedTfidf {
            vocab,
            idf,
            ngram_range: self.ngram_range,
        }
    }
}

impl FittedTfidf {
    pub fn vocabulary_size(&self) -> usize {
        self.vocab.len()
    }

    /// Map text onto the learned vocabulary. Out-of-vocabulary terms
    /// vanish; the result is L2-normalized.
    pub fn transform(&self, text: &str) -> SparseVec {
        let tokens = tokenize(text);
        let mut counts: HashMap<usize, f32> = HashMap::new();
        for term in ngrams(&tokens, self.ngram_range) {
            if let Some(&idx) = self.vocab.get(&term) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut entries: Vec<(usize, f32)> = counts
            .into_iter()
            .map(|(idx, tf)| (idx, tf * self.idf[idx]))
            .collect();
        entries.sort_by_key(|(idx, _)| *idx);

        let norm: f32 = entries.iter().map(|(_, v)| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for (_, v) in entries.iter_mut() {
                *v /= norm;
            }
        }

        SparseVec(entries)
    }
}

impl SparseVec {
    pub fn is_zero(&self) -> bool {
        self.0.is_empty()
    }

    /// Dot product over sorted index lists. Both inputs are unit
    /// vectors, so this is their cosine similarity.
    pub fn cosine(&self, other: &SparseVec) -> f32 {
        let (mut i, mut j) = (0, 0);
        let mut dot = 0.0;
        while i < self.0.len() && j < other.0.len() {
            match self.0[i].0.cmp(&other.0[j].0) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    dot += self.0[i].1 * other.0[j].1;
                    i += 1;
                    j += 1;
                }
            }
        }
        dot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TfidfConfig;

    fn vectorizer() -> TfidfVectorizer {
        TfidfVectorizer::new(&TfidfConfig {
            ngram_range: (1, 3),
            min_df: 2,
            max_features: 5000,
        })
    }

    fn docs(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_identical_documents_have_unit_similarity() {
        let corpus = docs(&["python docker kubernetes", "python docker kubernetes"]);
        let fitted = vectorizer().fit(&corpus);
        let a = fitted.transform(&corpus[0]);
        let b = fitted.transform(&corpus[1]);
        assert!((a.cosine(&b) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_disjoint_documents_have_zero_similarity() {
        let corpus = docs(&[
            "python docker python docker",
            "python docker aws",
            "marketing sales outreach",
            "marketing sales branding",
        ]);
        let fitted = vectorizer().fit(&corpus);
        let tech = fitted.transform("python docker");
        let sales = fitted.transform("marketing sales");
        assert!(tech.cosine(&sales).abs() < 1e-6);
    }

    #[test]
    fn test_min_df_prunes_rare_terms() {
        let corpus = docs(&["python docker", "python kubernetes"]);
        let fitted = vectorizer().fit(&corpus);
        // "python" appears in both documents, the others in one each.
        assert_eq!(fitted.vocabulary_size(), 1);
    }

    #[test]
    fn test_stopwords_excluded() {
        let corpus = docs(&["the python experience", "the python experience"]);
        let fitted = vectorizer().fit(&corpus);
        let vec = fitted.transform("the experience");
        assert!(vec.is_zero());
    }

    #[test]
    fn test_max_features_caps_vocabulary() {
        let small = TfidfVectorizer::new(&TfidfConfig {
            ngram_range: (1, 1),
            min_df: 1,
            max_features: 2,
        });
        let corpus = docs(&["alpha beta gamma alpha beta alpha"]);
        let fitted = small.fit(&corpus);
        assert_eq!(fitted.vocabulary_size(), 2);
        // The least frequent term lost the cut.
        assert!(fitted.transform("gamma").is_zero());
    }

    #[test]
    fn test_out_of_vocabulary_transform_is_zero() {
        let corpus = docs(&["python docker", "python docker"]);
        let fitted = vectorizer().fit(&corpus);
        assert!(fitted.transform("haskell erlang").is_zero());
    }
}
