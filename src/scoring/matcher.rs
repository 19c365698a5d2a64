//! Hybrid resume-vs-job-description matcher
//!
//! Scores a batch of resumes against one job description. Lexical
//! state is fitted once per job description: the first batch defines
//! the TF-IDF vocabulary and the job vector, later batches reuse both.

use crate::config::{Config, MatchMethod};
use crate::error::Result;
use crate::parsing::resume::ParsedResume;
use crate::scoring::combiner::StructuredCombiner;
use crate::scoring::embedder::{cosine, Embedder};
use crate::scoring::normalize::normalize_text;
use crate::scoring::tfidf::{FittedTfidf, SparseVec, TfidfVectorizer};
use std::sync::{Arc, Mutex};

/// One resume to score: raw extracted text, or a parsed resume that
/// can be flattened with section weighting.
pub enum ResumeInput {
    Raw(String),
    Structured(Arc<ParsedResume>),
}

/// How structured inputs are turned into scoring text. `Raw` ignores
/// section weighting and scores the plain section text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreMode {
    Raw,
    Structured,
}

struct LexicalState {
    fitted: FittedTfidf,
    jd_vector: SparseVec,
}

pub struct ResumeMatcher {
    method: MatchMethod,
    semantic_weight: f32,
    lexical_weight: f32,
    combiner: StructuredCombiner,
    vectorizer: TfidfVectorizer,
    embedder: Option<Embedder>,
    lexical_state: Mutex<Option<Arc<LexicalState>>>,
}

impl ResumeMatcher {
    /// Build a matcher for the configured method. When the embedding
    /// model cannot be loaded the matcher degrades to pure TF-IDF
    /// instead of failing.
    pub fn new(config: &Config) -> Self {
        let mut method = config.matching.method;

        let embedder = if matches!(method, MatchMethod::Hybrid | MatchMethod::Embedding) {
            match Embedder::load(config.embedding_repo()) {
                Ok(embedder) => Some(embedder),
                Err(e) => {
                    log::warn!("{}; falling back to tfidf scoring", e);
                    method = MatchMethod::Tfidf;
                    None
                }
            }
        } else {
            None
        };

        Self {
            method,
            semantic_weight: config.matching.semantic_weight,
            lexical_weight: config.matching.lexical_weight,
            combiner: StructuredCombiner::new(&config.matching),
            vectorizer: TfidfVectorizer::new(&config.tfidf),
            embedder,
            lexical_state: Mutex::new(None),
        }
    }

    /// Build a matcher forced to pure TF-IDF, regardless of the
    /// configured method. Used by batch ranking where loading an
    /// embedding model per run is not worth it.
    pub fn lexical_only(config: &Config) -> Self {
        let mut config = config.clone();
        config.matching.method = MatchMethod::Tfidf;
        Self::new(&config)
    }

    pub fn method(&self) -> MatchMethod {
        self.method
    }

    /// Forget the fitted vocabulary and job vector. Call when scoring
    /// against a different job description.
    pub fn reset(&self) {
        *self.lexical_state.lock().expect("lexical state poisoned") = None;
    }

    fn prepare(&self, input: &ResumeInput, mode: ScoreMode) -> String {
        match (input, mode) {
            (ResumeInput::Raw(text), _) => normalize_text(text),
            (ResumeInput::Structured(parsed), ScoreMode::Structured) => {
                self.combiner.combine(parsed)
            }
            (ResumeInput::Structured(parsed), ScoreMode::Raw) => {
                let joined: Vec<&str> =
                    parsed.sections.iter().map(|(_, text)| text).collect();
                normalize_text(&joined.join(" "))
            }
        }
    }

    fn lexical_scores(&self, jd_clean: &str, resume_texts: &[String]) -> Vec<f32> {
        let state = {
            let mut guard = self.lexical_state.lock().expect("lexical state poisoned");
            match guard.as_ref() {
                Some(state) => state.clone(),
                None => {
                    let mut corpus = Vec::with_capacity(resume_texts.len() + 1);
                    corpus.push(jd_clean.to_string());
                    corpus.extend(resume_texts.iter().cloned());
                    let fitted = self.vectorizer.fit(&corpus);
                    let jd_vector = fitted.transform(jd_clean);
                    let state = Arc::new(LexicalState { fitted, jd_vector });
                    *guard = Some(state.clone());
                    state
                }
            }
        };

        resume_texts
            .iter()
            .map(|text| state.jd_vector.cosine(&state.fitted.transform(text)))
            .collect()
    }

    fn semantic_scores(&self, jd_clean: &str, resume_texts: &[String]) -> Vec<f32> {
        let Some(embedder) = &self.embedder else {
            return vec![0.0; resume_texts.len()];
        };

        let mut documents = Vec::with_capacity(resume_texts.len() + 1);
        documents.push(jd_clean.to_string());
        documents.extend(resume_texts.iter().cloned());

        match embedder.encode(&documents) {
            Ok(embeddings) => {
                let jd = &embeddings[0];
                embeddings[1..].iter().map(|e| cosine(jd, e)).collect()
            }
            Err(e) => {
                log::error!("Embedding scoring failed: {}", e);
                vec![0.0; resume_texts.len()]
            }
        }
    }

    /// Score every resume against the job description. Returns
    /// (input index, score) pairs in input order; scores are cosine
    /// similarities (or their blend) rounded to 4 decimals and clamped
    /// to [0, 1].
    pub fn score(
        &self,
        jd_text: &str,
        resumes: &[ResumeInput],
        mode: ScoreMode,
    ) -> Result<Vec<(usize, f32)>> {
        if jd_text.trim().is_empty() || resumes.is_empty() {
            return Ok(Vec::new());
        }

        let jd_clean = normalize_text(jd_text);
        let resume_texts: Vec<String> =
            resumes.iter().map(|r| self.prepare(r, mode)).collect();

        let scores = match self.method {
            MatchMethod::Tfidf => self.lexical_scores(&jd_clean, &resume_texts),
            MatchMethod::Embedding => self.semantic_scores(&jd_clean, &resume_texts),
            MatchMethod::Hybrid => {
                let lexical = self.lexical_scores(&jd_clean, &resume_texts);
                let semantic = self.semantic_scores(&jd_clean, &resume_texts);
                semantic
                    .iter()
                    .zip(&lexical)
                    .map(|(s, l)| self.semantic_weight * s + self.lexical_weight * l)
                    .collect()
            }
        };

        Ok(scores
            .into_iter()
            .map(|s| ((s * 10000.0).round() / 10000.0).clamp(0.0, 1.0))
            .enumerate()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn lexical_matcher() -> ResumeMatcher {
        let mut config = Config::default();
        config.matching.method = MatchMethod::Tfidf;
        ResumeMatcher::new(&config)
    }

    fn raw(texts: &[&str]) -> Vec<ResumeInput> {
        texts
            .iter()
            .map(|t| ResumeInput::Raw(t.to_string()))
            .collect()
    }

    const JD: &str = "Python developer with Docker and AWS deployment skills. \
                      Python scripting, Docker containers, AWS infrastructure.";

    #[test]
    fn test_matching_resume_outscores_unrelated() {
        let matcher = lexical_matcher();
        let resumes = raw(&[
            "Python engineer, built Docker images, deployed on AWS. Python and Docker daily.",
            "Retail manager handling inventory, staffing and seasonal promotions.",
        ]);

        let scores = matcher.score(JD, &resumes, ScoreMode::Raw).unwrap();
        assert_eq!(scores.len(), 2);
        assert_eq!(scores[0].0, 0);
        assert!(scores[0].1 > scores[1].1 + 0.3);
    }

    #[test]
    fn test_empty_jd_scores_nothing() {
        let matcher = lexical_matcher();
        let scores = matcher
            .score("   ", &raw(&["Python dev"]), ScoreMode::Raw)
            .unwrap();
        assert!(scores.is_empty());
    }

    #[test]
    fn test_scores_within_bounds() {
        let matcher = lexical_matcher();
        let resumes = raw(&["Python Docker AWS", "gardening and pottery"]);
        let scores = matcher.score(JD, &resumes, ScoreMode::Raw).unwrap();
        for (_, score) in scores {
            assert!((0.0..=1.0).contains(&score));
        }
    }

    #[test]
    fn test_lexical_state_survives_batches() {
        let matcher = lexical_matcher();
        let first = matcher
            .score(JD, &raw(&["Python Docker AWS engineer", "unrelated text here"]), ScoreMode::Raw)
            .unwrap();
        // Second batch reuses the fitted vocabulary, so an identical
        // resume gets an identical score.
        let second = matcher
            .score(JD, &raw(&["Python Docker AWS engineer"]), ScoreMode::Raw)
            .unwrap();
        assert!((first[0].1 - second[0].1).abs() < 1e-6);
    }

    #[test]
    fn test_scores_symmetric_under_input_order() {
        let a = "Python engineer, Docker images, AWS deployments daily.";
        let b = "Retail manager handling inventory and staffing.";

        let forward = lexical_matcher().score(JD, &raw(&[a, b]), ScoreMode::Raw).unwrap();
        let reversed = lexical_matcher().score(JD, &raw(&[b, a]), ScoreMode::Raw).unwrap();

        assert!((forward[0].1 - reversed[1].1).abs() < 1e-6);
        assert!((forward[1].1 - reversed[0].1).abs() < 1e-6);
    }

    #[test]
    fn test_reset_refits_vocabulary() {
        let matcher = lexical_matcher();
        matcher
            .score(JD, &raw(&["Python Docker AWS", "filler text document"]), ScoreMode::Raw)
            .unwrap();
        matcher.reset();
        let scores = matcher
            .score(
                "Kubernetes operator experience. Kubernetes controllers.",
                &raw(&["Kubernetes operator author", "Python Docker AWS"]),
                ScoreMode::Raw,
            )
            .unwrap();
        assert!(scores[0].1 > scores[1].1);
    }
}
