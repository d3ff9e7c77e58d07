//! Single-resume upload pipeline: multipart parsing, file-type validation and
//! text extraction inside a scoped temporary directory.

use std::collections::HashMap;
use std::path::Path;

use axum::extract::Multipart;
use bytes::Bytes;
use tracing::{info, warn};

use crate::documents::{DocumentKind, DocumentParser, ExtractionError};
use crate::errors::AppError;

/// Multipart field carrying the résumé file.
pub const RESUME_FIELD: &str = "resume";

/// A validated résumé upload plus any plain form fields sent alongside it.
#[derive(Debug)]
pub struct ResumeUpload {
    pub filename: String,
    pub kind: DocumentKind,
    pub data: Bytes,
    pub fields: HashMap<String, String>,
}

impl ResumeUpload {
    /// Drains the multipart body. The body-size cap is enforced while reading,
    /// so nothing here reaches a parser when the upload is too large.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut file: Option<(String, Bytes)> = None;
        let mut fields = HashMap::new();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            if name == RESUME_FIELD {
                let filename = field.file_name().unwrap_or_default().to_string();
                let data = field.bytes().await?;
                file = Some((filename, data));
            } else {
                let value = field.text().await?;
                fields.insert(name, value);
            }
        }

        let (filename, data) =
            file.ok_or_else(|| AppError::Validation("No resume file provided".to_string()))?;
        if filename.is_empty() {
            return Err(AppError::Validation("No file selected".to_string()));
        }
        let kind = DocumentKind::from_filename(&filename).ok_or_else(|| {
            AppError::Validation(
                "Invalid file type. Only PDF, DOC, and DOCX files are allowed".to_string(),
            )
        })?;

        info!(filename = %filename, bytes = data.len(), "Received resume upload");

        Ok(Self {
            filename,
            kind,
            data,
            fields,
        })
    }

    /// A plain form field, falling back to `default` when absent.
    pub fn field_or(&self, name: &str, default: &str) -> String {
        self.fields
            .get(name)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }

    /// Writes the upload to a fresh directory under `upload_dir`, extracts its
    /// text and removes the directory again on every exit path.
    ///
    /// Fails with an extraction error when the parser fails or yields only
    /// whitespace.
    pub async fn extract_text(
        &self,
        parser: &dyn DocumentParser,
        upload_dir: &Path,
    ) -> Result<String, AppError> {
        let dir = tempfile::Builder::new()
            .prefix("resume-")
            .tempdir_in(upload_dir)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("failed to create upload dir: {e}")))?;

        // The client-supplied file name never touches the filesystem.
        let path = dir.path().join(format!("resume.{}", self.kind.extension()));

        let result = match tokio::fs::write(&path, &self.data).await {
            Ok(()) => parser.extract_text(&path, self.kind).await,
            Err(e) => Err(ExtractionError::Io(e)),
        };

        if let Err(e) = dir.close() {
            warn!("Failed to remove upload dir: {e}");
        }

        let text = result?;
        if text.trim().is_empty() {
            return Err(ExtractionError::Empty.into());
        }
        Ok(text.to_lowercase())
    }
}
