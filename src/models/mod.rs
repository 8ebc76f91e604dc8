// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{display_filename, DocumentFormat, DocumentReference, DocumentSource, ExtractedDocument, RankedResult, STAGED_NAME_SEPARATOR};
pub use requests::{RankRequest, ResumeUpload};
pub use responses::{ErrorResponse, RankResponse};
