// Core algorithm exports
pub mod normalize;
pub mod ranker;
pub mod scoring;
pub mod stop_words;
pub mod vectorizer;

pub use normalize::normalize;
pub use ranker::{RankResult, ResumeRanker};
pub use scoring::score;
pub use vectorizer::{CorpusModel, SparseVector, TfidfMatrix, TfidfVectorizer, VectorizerError};
