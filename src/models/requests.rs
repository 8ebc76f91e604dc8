use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::DocumentFormat;

/// A resume as handed over by the transport layer
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResumeUpload {
    #[validate(length(min = 1))]
    pub filename: String,
    #[serde(default)]
    pub content: Vec<u8>,
    /// Declared extension; falls back to the filename's extension when absent
    #[serde(default)]
    pub extension: Option<String>,
}

impl ResumeUpload {
    pub fn new(filename: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            content,
            extension: None,
        }
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(extension.into());
        self
    }

    pub fn format(&self) -> DocumentFormat {
        match &self.extension {
            Some(ext) if !ext.trim().is_empty() => DocumentFormat::from_extension(ext),
            _ => DocumentFormat::from_path(&self.filename),
        }
    }
}

/// Request to rank a batch of resumes against one job description
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RankRequest {
    #[serde(alias = "job_description", rename = "jobDescription")]
    pub job_description: String,
    #[validate(nested)]
    #[serde(default)]
    pub resumes: Vec<ResumeUpload>,
}
