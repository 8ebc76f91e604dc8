//! Resume Ranker - lexical ranking of resumes against a job description
//!
//! Extracts text from PDF, Word, RTF and plain-text resumes, normalizes it,
//! fits a per-request TF-IDF model over the job description and resumes, and
//! ranks resumes by cosine similarity to the description.

pub mod config;
pub mod core;
pub mod extraction;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use crate::core::{normalize, ResumeRanker, TfidfVectorizer};
pub use extraction::{extract, ExtractionError, TextExtractor};
pub use models::{display_filename, DocumentFormat, DocumentReference, RankRequest, RankResponse, RankedResult, ResumeUpload};
pub use services::{RankingError, RankingService};
