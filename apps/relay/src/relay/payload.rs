//! Outbound payload: the uploaded file re-wrapped as a JSON envelope with
//! base64 content, the shape the matching webhook consumes.

use base64::{engine::general_purpose, Engine as _};
use serde::Serialize;

use crate::relay::upload::UploadedFile;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundPayload {
    pub filename: String,
    pub file_type: String,
    pub file_size: usize,
    /// Standard alphabet, padded.
    pub content: String,
}

impl OutboundPayload {
    pub fn from_upload(file: &UploadedFile) -> Self {
        Self {
            filename: file.file_name.clone(),
            file_type: file.content_type.clone(),
            file_size: file.size(),
            content: general_purpose::STANDARD.encode(&file.content),
        }
    }
}
