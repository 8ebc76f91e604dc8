use std::sync::Arc;

use crate::core::{
    normalize::normalize,
    scoring::score,
    vectorizer::{TfidfVectorizer, VectorizerError},
};
use crate::extraction::extract;
use crate::models::{DocumentReference, RankedResult};

/// Result of one ranking pass
#[derive(Debug, Default)]
pub struct RankResult {
    pub rankings: Vec<RankedResult>,
    /// Documents submitted
    pub total_documents: usize,
    /// Documents whose extraction failed
    pub extraction_failures: usize,
    /// Documents dropped because no text survived normalization (failures included)
    pub excluded_documents: usize,
}

/// Ranking orchestrator
///
/// # Pipeline Stages
/// 1. Normalize the job description
/// 2. Extract and normalize each resume, order-preserving
/// 3. Drop resumes with no remaining text
/// 4. Fit a fresh TF-IDF model over [description, resumes...]
/// 5. Score against the description and sort
///
/// Stateless between calls: every call builds and discards its own model.
#[derive(Debug, Clone)]
pub struct ResumeRanker {
    vectorizer: TfidfVectorizer,
    max_results: Option<usize>,
}

impl ResumeRanker {
    pub fn new(vectorizer: TfidfVectorizer, max_results: Option<usize>) -> Self {
        Self {
            vectorizer,
            max_results,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(TfidfVectorizer::default(), None)
    }

    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }

    /// Rank resumes against a job description
    ///
    /// Never fails: a degenerate corpus (empty description, no usable resume,
    /// empty vocabulary) yields an empty list.
    pub fn rank(&self, job_description: &str, documents: &[DocumentReference]) -> Vec<RankedResult> {
        self.rank_with_summary(job_description, documents).rankings
    }

    /// Same as [`rank`](Self::rank), also reporting how many documents were dropped
    pub fn rank_with_summary(
        &self,
        job_description: &str,
        documents: &[DocumentReference],
    ) -> RankResult {
        let total_documents = documents.len();
        let cleaned_description = normalize(job_description);

        if cleaned_description.is_empty() {
            tracing::info!("Job description is empty after normalization, nothing to rank");
            return RankResult {
                total_documents,
                ..Default::default()
            };
        }

        let mut extraction_failures = 0;
        let usable: Vec<(&DocumentReference, String)> = documents
            .iter()
            .filter_map(|reference| {
                let extracted = extract(reference);
                if extracted.failed() {
                    extraction_failures += 1;
                }
                let text = normalize(&extracted.text);
                if text.is_empty() {
                    tracing::debug!("Excluding {}: no text after normalization", reference.id);
                    None
                } else {
                    Some((reference, text))
                }
            })
            .collect();

        let excluded_documents = total_documents - usable.len();
        let summary = |rankings: Vec<RankedResult>| RankResult {
            rankings,
            total_documents,
            extraction_failures,
            excluded_documents,
        };

        if usable.is_empty() {
            tracing::info!("No resume produced usable text ({} submitted)", total_documents);
            return summary(Vec::new());
        }

        let mut corpus: Vec<&str> = Vec::with_capacity(usable.len() + 1);
        corpus.push(&cleaned_description);
        corpus.extend(usable.iter().map(|(_, text)| text.as_str()));

        let matrix = match self.vectorizer.fit_transform(corpus.as_slice()) {
            Ok((_, matrix)) => matrix,
            Err(VectorizerError::DegenerateCorpus) | Err(VectorizerError::EmptyInput) => {
                tracing::info!("Degenerate corpus, returning no rankings");
                return summary(Vec::new());
            }
        };

        let mut rankings: Vec<RankedResult> = score(&matrix)
            .into_iter()
            .map(|(index, similarity_score)| {
                let reference = usable[index].0;
                RankedResult {
                    filename: reference.display_name(),
                    filepath: reference.id.clone(),
                    similarity_score,
                }
            })
            .collect();

        if let Some(limit) = self.max_results {
            rankings.truncate(limit);
        }

        tracing::info!(
            "Ranked {} of {} documents ({} excluded, {} extraction failures)",
            rankings.len(),
            total_documents,
            excluded_documents,
            extraction_failures
        );

        summary(rankings)
    }

    /// Run [`rank_with_summary`](Self::rank_with_summary) on the blocking pool
    ///
    /// Extraction does file I/O; this keeps a slow document from stalling the
    /// async executor.
    pub async fn rank_blocking(
        self: Arc<Self>,
        job_description: String,
        documents: Vec<DocumentReference>,
    ) -> Result<RankResult, tokio::task::JoinError> {
        tokio::task::spawn_blocking(move || self.rank_with_summary(&job_description, &documents)).await
    }
}

impl Default for ResumeRanker {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DocumentFormat;

    fn text_doc(id: &str, text: &str) -> DocumentReference {
        DocumentReference::from_bytes(id, text.as_bytes().to_vec(), DocumentFormat::PlainText)
    }

    #[test]
    fn test_rank_basic() {
        let ranker = ResumeRanker::with_defaults();
        let docs = vec![
            text_doc("chef.txt", "Chef with 10 years experience"),
            text_doc("dev.txt", "I am a Python Software Engineer"),
        ];

        let results = ranker.rank("Software Engineer Python", &docs);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].filename, "dev.txt");
        assert!(results[0].similarity_score > 0.99);
        assert_eq!(results[1].similarity_score, 0.0);
    }

    #[test]
    fn test_empty_documents_excluded() {
        let ranker = ResumeRanker::with_defaults();
        let docs = vec![
            text_doc("blank.txt", "1234 -- !!"),
            text_doc("dev.txt", "rust engineer"),
            DocumentReference::from_bytes("bad.txt", vec![0xff, 0xfe], DocumentFormat::PlainText),
        ];

        let result = ranker.rank_with_summary("rust", &docs);

        assert_eq!(result.rankings.len(), 1);
        assert_eq!(result.total_documents, 3);
        assert_eq!(result.excluded_documents, 2);
        assert_eq!(result.extraction_failures, 1);
    }

    #[test]
    fn test_respects_max_results() {
        let ranker = ResumeRanker::new(TfidfVectorizer::default(), Some(2));
        let docs: Vec<DocumentReference> = (0..5)
            .map(|i| text_doc(&format!("{i}.txt"), "kotlin android"))
            .collect();

        let results = ranker.rank("kotlin", &docs);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].filename, "0.txt");
        assert_eq!(results[1].filename, "1.txt");
    }

    #[test]
    fn test_stop_word_only_corpus_is_empty() {
        let ranker = ResumeRanker::with_defaults();
        let docs = vec![text_doc("a.txt", "the and of")];
        assert!(ranker.rank("with the", &docs).is_empty());
    }

    #[tokio::test]
    async fn test_rank_blocking() {
        let ranker = Arc::new(ResumeRanker::with_defaults());
        let docs = vec![text_doc("dev.txt", "rust engineer")];

        let result = ranker
            .rank_blocking("rust".to_string(), docs)
            .await
            .unwrap();

        assert_eq!(result.rankings.len(), 1);
    }
}
