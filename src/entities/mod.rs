//! Named entity recognition and cleanup
//!
//! Token classification runs through a BERT head loaded on first use;
//! its raw output is noisy (wordpiece fragments, truncated names) and
//! is repaired by the cleaner before anything downstream sees it.

pub mod bert;
pub mod cleaner;
pub mod recognizer;

pub use cleaner::EntityCleaner;
pub use recognizer::EntityRecognizer;
