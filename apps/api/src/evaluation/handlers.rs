//! Axum route handlers for the Evaluation API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tokio::task::JoinError;

use crate::errors::AppError;
use crate::evaluation::pipeline::Evaluation;
use crate::evaluation::requirements::RequirementRecord;
use crate::extraction::{self, ExtractedDocument, FileType, SectionMap};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct EvaluateTextRequest {
    pub jd_text: String,
    pub resume_text: String,
}

#[derive(Debug, Deserialize)]
pub struct StructureJdRequest {
    pub jd_text: String,
}

#[derive(Debug, Serialize)]
pub struct StructureJdResponse {
    pub requirements: RequirementRecord,
    pub sections: SectionMap,
}

struct UploadedFile {
    filename: String,
    data: Bytes,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/evaluate
///
/// Multipart upload with `jd_file` and `resume_file` parts (PDF or plain text).
pub async fn handle_evaluate_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Evaluation>, AppError> {
    let mut jd_file = None;
    let mut resume_file = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let filename = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read '{name}': {e}")))?;
        let upload = UploadedFile { filename, data };

        match name.as_str() {
            "jd_file" => jd_file = Some(upload),
            "resume_file" => resume_file = Some(upload),
            _ => {}
        }
    }

    let jd_file =
        jd_file.ok_or_else(|| AppError::Validation("jd_file is required".to_string()))?;
    let resume_file =
        resume_file.ok_or_else(|| AppError::Validation("resume_file is required".to_string()))?;

    let resume_filename = resume_file.filename.clone();
    let jd = extract_upload(jd_file).await?;
    let resume = extract_upload(resume_file).await?;

    let evaluation = state
        .evaluator
        .evaluate(&jd, &resume, Some(resume_filename))
        .await?;

    Ok(Json(evaluation))
}

/// POST /api/v1/evaluate/text
///
/// Same pipeline as the upload endpoint, for already-decoded text.
pub async fn handle_evaluate_text(
    State(state): State<AppState>,
    Json(request): Json<EvaluateTextRequest>,
) -> Result<Json<Evaluation>, AppError> {
    if request.jd_text.trim().is_empty() {
        return Err(AppError::Validation("jd_text cannot be empty".to_string()));
    }
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation("resume_text cannot be empty".to_string()));
    }

    let jd = ExtractedDocument::from_text(FileType::Txt, &request.jd_text);
    let resume = ExtractedDocument::from_text(FileType::Txt, &request.resume_text);

    let evaluation = state.evaluator.evaluate(&jd, &resume, None).await?;
    Ok(Json(evaluation))
}

/// POST /api/v1/jd/structure
///
/// Returns the requirement record and detected sections for a JD,
/// useful for previewing what the matcher will look for.
pub async fn handle_structure_jd(
    State(state): State<AppState>,
    Json(request): Json<StructureJdRequest>,
) -> Result<Json<StructureJdResponse>, AppError> {
    if request.jd_text.trim().is_empty() {
        return Err(AppError::Validation("jd_text cannot be empty".to_string()));
    }

    let jd = ExtractedDocument::from_text(FileType::Txt, &request.jd_text);
    let requirements = state.evaluator.structure_jd(&jd)?;

    Ok(Json(StructureJdResponse {
        requirements,
        sections: jd.sections,
    }))
}

/// Decodes an upload on the blocking pool (PDF and DOCX parsing are CPU-bound).
async fn extract_upload(upload: UploadedFile) -> Result<ExtractedDocument, AppError> {
    let UploadedFile { filename, data } = upload;
    let label = filename.clone();
    let document = tokio::task::spawn_blocking(move || extraction::extract(&filename, &data))
        .await
        .map_err(|e| join_error(&label, e))??;
    Ok(document)
}

/// A decoder panic means the document is malformed; cancellation is a server fault.
fn join_error(filename: &str, err: JoinError) -> AppError {
    if err.is_panic() {
        AppError::ExtractionFailed(format!("Could not decode '{filename}'"))
    } else {
        AppError::Internal(anyhow::anyhow!("extraction task failed: {err}"))
    }
}
