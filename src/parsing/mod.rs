//! Resume parsing module
//!
//! Splits raw resume text into sections and pulls structured fields
//! (contact, education, skills, projects, certifications, internships)
//! out of them.

pub mod cache;
pub mod contact;
pub mod education;
pub mod internships;
pub mod lists;
pub mod resume;
pub mod sections;
pub mod skills;

pub use resume::{ParsedResume, ResumeParser};
pub use sections::{Sections, Segmenter};
