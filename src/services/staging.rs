use std::path::{Path, PathBuf};
use tempfile::TempDir;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{DocumentReference, DocumentSource, ResumeUpload, STAGED_NAME_SEPARATOR};

/// Errors that can occur while staging uploads
#[derive(Debug, Error)]
pub enum StagingError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Request-scoped directory holding uploaded resumes
///
/// Each upload is written as `{uuid}?{filename}` so identical filenames never
/// collide. The directory and everything in it is removed when the batch is
/// dropped, whichever way the request ends.
pub struct StagedBatch {
    dir: TempDir,
    documents: Vec<DocumentReference>,
}

impl StagedBatch {
    /// Create an empty batch under `root`, or the system temp dir when `None`
    pub fn create(root: Option<&Path>) -> Result<Self, StagingError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("resume-batch-");
        let dir = match root {
            Some(root) => {
                std::fs::create_dir_all(root)?;
                builder.tempdir_in(root)?
            }
            None => builder.tempdir()?,
        };

        tracing::debug!("Created staging directory {}", dir.path().display());

        Ok(Self {
            dir,
            documents: Vec::new(),
        })
    }

    /// Write one upload to disk and record its reference
    pub fn stage(&mut self, upload: &ResumeUpload) -> Result<&DocumentReference, StagingError> {
        let path = self
            .dir
            .path()
            .join(staged_file_name(Uuid::new_v4(), &upload.filename));
        std::fs::write(&path, &upload.content)?;

        self.documents.push(DocumentReference {
            id: path.to_string_lossy().into_owned(),
            source: DocumentSource::Path(path),
            format: upload.format(),
        });

        // Just pushed
        Ok(&self.documents[self.documents.len() - 1])
    }

    pub fn documents(&self) -> &[DocumentReference] {
        &self.documents
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Remove the directory now, reporting any failure
    pub fn close(self) -> Result<(), StagingError> {
        let path: PathBuf = self.dir.path().to_path_buf();
        self.dir.close()?;
        tracing::debug!("Removed staging directory {}", path.display());
        Ok(())
    }
}

/// Staged name for an upload: unique prefix, separator, original basename
pub fn staged_file_name(id: Uuid, filename: &str) -> String {
    let base = Path::new(filename)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .unwrap_or("upload");
    format!("{id}{STAGED_NAME_SEPARATOR}{base}")
}
