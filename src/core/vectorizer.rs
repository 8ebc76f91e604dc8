use std::collections::BTreeMap;
use thiserror::Error;

use crate::core::stop_words::is_stop_word;

/// Errors that can occur while fitting the vector space
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VectorizerError {
    #[error("No documents to fit")]
    EmptyInput,

    #[error("Degenerate corpus: vocabulary is empty after stop-word filtering")]
    DegenerateCorpus,
}

/// Sparse row vector, entries sorted by column
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, v)| v * v).sum::<f64>().sqrt()
    }

    /// Dot product by merging the two sorted entry lists
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (ci, vi) = self.entries[i];
            let (cj, vj) = other.entries[j];
            match ci.cmp(&cj) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += vi * vj;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }
}

/// Vocabulary and idf weights fit over one request's documents
///
/// Never reused: idf only means something relative to the exact document set
/// it was fit on.
#[derive(Debug, Clone)]
pub struct CorpusModel {
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
    document_count: usize,
}

impl CorpusModel {
    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn document_count(&self) -> usize {
        self.document_count
    }

    /// Column of a term, if it made it into the vocabulary
    pub fn column(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.column(term).map(|c| self.idf[c])
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.vocabulary.keys().map(String::as_str)
    }
}

/// One L2-normalized row per fitted document, in input order
#[derive(Debug, Clone)]
pub struct TfidfMatrix {
    rows: Vec<SparseVector>,
}

impl TfidfMatrix {
    pub fn rows(&self) -> &[SparseVector] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&SparseVector> {
        self.rows.get(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Bag-of-words TF-IDF vectorizer
///
/// Weighting:
/// - tf: raw term count, or `1 + ln(tf)` when `sublinear_tf`
/// - idf: `ln((1 + n) / (1 + df)) + 1` when `smooth_idf`, else `ln(n / df) + 1`
/// - rows scaled to unit L2 norm
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TfidfVectorizer {
    pub stop_words: bool,
    pub smooth_idf: bool,
    pub sublinear_tf: bool,
    pub min_token_len: usize,
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self {
            stop_words: true,
            smooth_idf: true,
            sublinear_tf: false,
            min_token_len: 2,
        }
    }
}

impl TfidfVectorizer {
    /// Split normalized text into vocabulary candidates
    pub fn tokenize<'a>(&self, text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        let min_len = self.min_token_len;
        let stop_words = self.stop_words;
        text.split_whitespace()
            .filter(move |t| t.chars().count() >= min_len)
            .filter(move |t| !(stop_words && is_stop_word(t)))
    }

    /// Fit a vocabulary over `documents` and return their weighted rows
    ///
    /// `documents[0]` is the job description by convention; the vectorizer
    /// itself treats every document alike.
    pub fn fit_transform<S: AsRef<str>>(
        &self,
        documents: &[S],
    ) -> Result<(CorpusModel, TfidfMatrix), VectorizerError> {
        if documents.is_empty() {
            return Err(VectorizerError::EmptyInput);
        }

        // Term counts per document
        let counts: Vec<BTreeMap<&str, usize>> = documents
            .iter()
            .map(|doc| {
                let mut tf = BTreeMap::new();
                for token in self.tokenize(doc.as_ref()) {
                    *tf.entry(token).or_insert(0) += 1;
                }
                tf
            })
            .collect();

        // Document frequencies; BTreeMap keeps columns in alphabetical order
        let mut df: BTreeMap<&str, usize> = BTreeMap::new();
        for tf in &counts {
            for term in tf.keys() {
                *df.entry(*term).or_insert(0) += 1;
            }
        }

        if df.is_empty() {
            return Err(VectorizerError::DegenerateCorpus);
        }

        let n = documents.len() as f64;
        let mut vocabulary = BTreeMap::new();
        let mut idf = Vec::with_capacity(df.len());
        for (column, (term, freq)) in df.iter().enumerate() {
            vocabulary.insert((*term).to_string(), column);
            idf.push(self.idf(n, *freq as f64));
        }

        let rows = counts
            .iter()
            .map(|tf| {
                let mut entries: Vec<(usize, f64)> = tf
                    .iter()
                    .map(|(term, count)| {
                        let column = vocabulary[*term];
                        (column, self.tf(*count as f64) * idf[column])
                    })
                    .collect();
                entries.sort_by_key(|(column, _)| *column);

                let norm = entries.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
                if norm > 0.0 {
                    for (_, v) in entries.iter_mut() {
                        *v /= norm;
                    }
                }
                SparseVector { entries }
            })
            .collect();

        tracing::debug!(
            "Fitted TF-IDF over {} documents, vocabulary size {}",
            documents.len(),
            vocabulary.len()
        );

        Ok((
            CorpusModel {
                vocabulary,
                idf,
                document_count: documents.len(),
            },
            TfidfMatrix { rows },
        ))
    }

    #[inline]
    fn tf(&self, count: f64) -> f64 {
        if self.sublinear_tf {
            1.0 + count.ln()
        } else {
            count
        }
    }

    #[inline]
    fn idf(&self, n: f64, df: f64) -> f64 {
        if self.smooth_idf {
            ((1.0 + n) / (1.0 + df)).ln() + 1.0
        } else {
            (n / df).ln() + 1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_drops_short_and_stop_words() {
        let v = TfidfVectorizer::default();
        let tokens: Vec<&str> = v.tokenize("i am a python software engineer").collect();
        assert_eq!(tokens, vec!["python", "software", "engineer"]);
    }

    #[test]
    fn test_tokenize_without_stop_words() {
        let v = TfidfVectorizer {
            stop_words: false,
            ..Default::default()
        };
        let tokens: Vec<&str> = v.tokenize("i am the engineer").collect();
        assert_eq!(tokens, vec!["am", "the", "engineer"]);
    }

    #[test]
    fn test_vocabulary_is_alphabetical() {
        let v = TfidfVectorizer::default();
        let (model, _) = v.fit_transform(&["zebra python", "apple"]).unwrap();
        let terms: Vec<&str> = model.terms().collect();
        assert_eq!(terms, vec!["apple", "python", "zebra"]);
        assert_eq!(model.column("python"), Some(1));
        assert_eq!(model.document_count(), 2);
    }

    #[test]
    fn test_smooth_idf_values() {
        let v = TfidfVectorizer::default();
        let (model, _) = v.fit_transform(&["rust kotlin", "rust", "java"]).unwrap();
        // n = 3: rust df = 2, kotlin df = 1
        let rust = model.idf("rust").unwrap();
        let kotlin = model.idf("kotlin").unwrap();
        assert!((rust - ((4.0_f64 / 3.0).ln() + 1.0)).abs() < 1e-12);
        assert!((kotlin - (2.0_f64.ln() + 1.0)).abs() < 1e-12);
        assert!(kotlin > rust);
    }

    #[test]
    fn test_unsmoothed_idf() {
        let v = TfidfVectorizer {
            smooth_idf: false,
            ..Default::default()
        };
        let (model, _) = v.fit_transform(&["rust", "rust"]).unwrap();
        assert!((model.idf("rust").unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_rows_are_unit_length() {
        let v = TfidfVectorizer::default();
        let (_, matrix) = v
            .fit_transform(&["python python engineer", "chef kitchen", "python chef"])
            .unwrap();
        for row in matrix.rows() {
            assert!((row.norm() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_empty_document_gives_zero_row() {
        let v = TfidfVectorizer::default();
        let (_, matrix) = v.fit_transform(&["python", ""]).unwrap();
        assert!(matrix.row(1).unwrap().is_zero());
    }

    #[test]
    fn test_degenerate_corpus() {
        let v = TfidfVectorizer::default();
        assert_eq!(
            v.fit_transform(&["", "the and of", "a b c"]).unwrap_err(),
            VectorizerError::DegenerateCorpus
        );
    }

    #[test]
    fn test_empty_input() {
        let v = TfidfVectorizer::default();
        let docs: [&str; 0] = [];
        assert_eq!(v.fit_transform(&docs).unwrap_err(), VectorizerError::EmptyInput);
    }

    #[test]
    fn test_sparse_dot() {
        let a = SparseVector { entries: vec![(0, 0.6), (2, 0.8)] };
        let b = SparseVector { entries: vec![(1, 1.0), (2, 0.5)] };
        assert!((a.dot(&b) - 0.4).abs() < 1e-12);
        assert_eq!(a.dot(&SparseVector::default()), 0.0);
    }
}
