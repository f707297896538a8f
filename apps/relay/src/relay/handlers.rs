//! Axum route handler for the resume relay.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    response::{IntoResponse, Response},
    Json,
};
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::errors::RelayError;
use crate::models::analysis::AnalysisResponse;
use crate::relay::payload::OutboundPayload;
use crate::relay::upload::{extract_resume, validate_content_type};
use crate::state::AppState;

/// POST /api/analyze-resume
///
/// Upload → validate → base64 envelope → one POST to the matching service →
/// normalized JSON. Every failure, including a non-multipart request, comes
/// back as a `RelayError` JSON body. The response is built inside the request
/// span so failure logs carry the request id.
pub async fn handle_analyze_resume(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let request_id = Uuid::new_v4();
    async move {
        let result = match multipart {
            Ok(multipart) => relay_resume(&state, multipart).await,
            Err(rejection) => Err(RelayError::from(rejection)),
        };
        result.map(Json).into_response()
    }
    .instrument(info_span!("analyze_resume", %request_id))
    .await
}

async fn relay_resume(
    state: &AppState,
    multipart: Multipart,
) -> Result<AnalysisResponse, RelayError> {
    let file = extract_resume(multipart).await?;
    validate_content_type(&file, &state.config.accepted_file_types)?;
    info!(
        filename = %file.file_name,
        content_type = %file.content_type,
        size = file.size(),
        "Resume received"
    );

    let payload = OutboundPayload::from_upload(&file);
    drop(file);

    let body = state.matcher.submit(&payload).await?;
    let response = AnalysisResponse::from_matcher_body(body)?;

    info!(matches = response.matches.len(), "Resume analysis relayed");
    Ok(response)
}
