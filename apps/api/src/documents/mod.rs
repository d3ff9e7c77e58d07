//! Document text extraction — the boundary to the PDF/Word parsing libraries.
//!
//! Handlers only see the [`DocumentParser`] trait. `AppState` carries an
//! `Arc<dyn DocumentParser>` so tests can swap in a fake.

pub mod docx;
pub mod upload;

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Doc,
    Docx,
}

impl DocumentKind {
    /// Derives the kind from the extension after the last `.` of a file name,
    /// compared case-insensitively. Only pdf, doc and docx are accepted.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let (_, ext) = filename.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "doc" => Some(DocumentKind::Doc),
            "docx" => Some(DocumentKind::Docx),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            DocumentKind::Pdf => "pdf",
            DocumentKind::Doc => "doc",
            DocumentKind::Docx => "docx",
        }
    }
}

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Failed to read uploaded file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to extract text from PDF: {0}")]
    Pdf(String),

    #[error("Failed to extract text from Word document: {0}")]
    Docx(String),

    #[error("Could not extract text from the resume")]
    Empty,
}

/// Turns a stored document into plain text.
#[async_trait]
pub trait DocumentParser: Send + Sync {
    async fn extract_text(&self, path: &Path, kind: DocumentKind)
        -> Result<String, ExtractionError>;
}

/// Default parser: `pdf-extract` for PDFs, the OOXML reader in [`docx`] for
/// Word files. Parsing runs on the blocking pool.
pub struct FileDocumentParser;

#[async_trait]
impl DocumentParser for FileDocumentParser {
    async fn extract_text(
        &self,
        path: &Path,
        kind: DocumentKind,
    ) -> Result<String, ExtractionError> {
        let path = path.to_path_buf();
        let text = tokio::task::spawn_blocking(move || extract_sync(&path, kind))
            .await
            .map_err(|e| join_failure(kind, e))??;
        debug!(chars = text.len(), ?kind, "Extracted document text");
        Ok(text)
    }
}

/// A parser panic is reported as a parse failure of that document kind.
fn join_failure(kind: DocumentKind, e: tokio::task::JoinError) -> ExtractionError {
    if !e.is_panic() {
        return ExtractionError::Io(std::io::Error::other(e));
    }
    tracing::error!(?kind, "Document parser panicked: {e}");
    match kind {
        DocumentKind::Pdf => ExtractionError::Pdf("parser panicked".to_string()),
        DocumentKind::Doc | DocumentKind::Docx => {
            ExtractionError::Docx("parser panicked".to_string())
        }
    }
}

fn extract_sync(path: &Path, kind: DocumentKind) -> Result<String, ExtractionError> {
    match kind {
        DocumentKind::Pdf => {
            let bytes = std::fs::read(path)?;
            pdf_extract::extract_text_from_mem(&bytes)
                .map_err(|e| ExtractionError::Pdf(e.to_string()))
        }
        // Legacy .doc files are only readable when they are OOXML underneath,
        // matching what the Word reader can handle.
        DocumentKind::Doc | DocumentKind::Docx => docx::extract_text(path),
    }
}
