use axum::extract::Multipart;
use bytes::Bytes;

use crate::errors::RelayError;

/// Multipart field the upload form puts the file under.
pub const RESUME_FIELD: &str = "resume";

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// A resume received from the browser. Lives only as long as the request.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub content: Bytes,
}

impl UploadedFile {
    pub fn size(&self) -> usize {
        self.content.len()
    }
}

/// Pulls the `resume` file out of the multipart stream, reading it fully into memory.
///
/// Fails when the field is absent or carries plain text instead of a file.
/// Other fields are skipped.
pub async fn extract_resume(mut multipart: Multipart) -> Result<UploadedFile, RelayError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(RESUME_FIELD) {
            continue;
        }

        let file_name = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| {
                RelayError::InvalidInput("The resume field must contain a file".to_string())
            })?;
        let content_type = field
            .content_type()
            .unwrap_or(FALLBACK_CONTENT_TYPE)
            .to_string();
        let content = field.bytes().await?;

        return Ok(UploadedFile {
            file_name,
            content_type,
            content,
        });
    }

    Err(RelayError::InvalidInput("No resume file provided".to_string()))
}

/// Re-checks the declared media type against the accepted substrings.
/// An empty accepted list turns the check off.
pub fn validate_content_type(file: &UploadedFile, accepted: &[String]) -> Result<(), RelayError> {
    if accepted.is_empty() {
        return Ok(());
    }

    let declared = file.content_type.to_lowercase();
    if accepted.iter().any(|a| declared.contains(a.as_str())) {
        Ok(())
    } else {
        Err(RelayError::InvalidInput(format!(
            "Unsupported file type '{}'. Please upload a PDF or Word document",
            file.content_type
        )))
    }
}
