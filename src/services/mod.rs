// Service exports
pub mod ranking;
pub mod staging;

pub use ranking::{RankingError, RankingService};
pub use staging::{staged_file_name, StagedBatch, StagingError};
