use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use validator::Validate;

use crate::config::{RankingSettings, Settings};
use crate::core::ResumeRanker;
use crate::models::{RankRequest, RankResponse};
use crate::services::staging::{StagedBatch, StagingError};

/// Errors surfaced to the transport layer
///
/// Bad or empty documents are not errors; they are dropped from the ranking.
#[derive(Debug, Error)]
pub enum RankingError {
    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("Staging error: {0}")]
    Staging(#[from] StagingError),

    #[error("Ranking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Validates, stages and ranks upload batches
#[derive(Debug, Clone)]
pub struct RankingService {
    ranker: ResumeRanker,
    limits: RankingSettings,
    staging_root: Option<PathBuf>,
}

impl RankingService {
    pub fn new(ranker: ResumeRanker, limits: RankingSettings, staging_root: Option<PathBuf>) -> Self {
        Self {
            ranker,
            limits,
            staging_root,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.ranker(),
            settings.ranking.clone(),
            settings.staging.root.clone(),
        )
    }

    /// Rank a batch of uploads against a job description
    ///
    /// Staged files are removed before this returns, on every path.
    pub fn rank_request(&self, request: &RankRequest) -> Result<RankResponse, RankingError> {
        request.validate()?;
        self.check_limits(request)?;

        let mut batch = StagedBatch::create(self.staging_root.as_deref())?;
        for upload in &request.resumes {
            batch.stage(upload)?;
        }

        let result = self
            .ranker
            .rank_with_summary(&request.job_description, batch.documents());

        if let Err(e) = batch.close() {
            tracing::warn!("Failed to remove staging directory: {}", e);
        }

        Ok(RankResponse {
            ranked_documents: result.rankings.len(),
            results: result.rankings,
            total_documents: result.total_documents,
            ranked_at: chrono::Utc::now(),
        })
    }

    /// Run [`rank_request`](Self::rank_request) on the blocking pool
    pub async fn rank_request_blocking(
        self: Arc<Self>,
        request: RankRequest,
    ) -> Result<RankResponse, RankingError> {
        tokio::task::spawn_blocking(move || self.rank_request(&request)).await?
    }

    fn check_limits(&self, request: &RankRequest) -> Result<(), RankingError> {
        if request.resumes.len() > self.limits.max_documents {
            return Err(RankingError::LimitExceeded(format!(
                "{} resumes submitted, at most {} allowed",
                request.resumes.len(),
                self.limits.max_documents
            )));
        }

        if let Some(upload) = request
            .resumes
            .iter()
            .find(|u| u.content.len() > self.limits.max_document_bytes)
        {
            return Err(RankingError::LimitExceeded(format!(
                "{} is {} bytes, at most {} allowed",
                upload.filename,
                upload.content.len(),
                self.limits.max_document_bytes
            )));
        }

        Ok(())
    }
}
