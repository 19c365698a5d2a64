//! Resume matcher library
//!
//! Parses free-text resumes into structured records and scores them
//! against a job description with a hybrid lexical+semantic engine.

pub mod cli;
pub mod config;
pub mod entities;
pub mod error;
pub mod input;
pub mod parsing;
pub mod ranking;
pub mod scoring;

pub use config::Config;
pub use error::{Result, ResumeMatcherError};
