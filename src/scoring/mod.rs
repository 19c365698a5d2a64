//! Similarity scoring engine
//!
//! Lexical (TF-IDF) and semantic (static embedding) similarity between
//! a job description and resume texts, blended into a hybrid score.

pub mod combiner;
pub mod embedder;
pub mod matcher;
pub mod normalize;
pub mod stopwords;
pub mod tfidf;

pub use combiner::StructuredCombiner;
pub use matcher::{ResumeInput, ResumeMatcher, ScoreMode};
