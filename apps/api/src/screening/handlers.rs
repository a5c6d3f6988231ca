//! Axum route handlers for the Screening API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AppError;
use crate::extraction::Document;
use crate::screening::pipeline::{scan, score_texts, screen, ScanReport, ScreeningReport};
use crate::state::AppState;

const JOB_DESCRIPTION_FIELD: &str = "job_description";
const RESUMES_FIELD: &str = "resumes";
const RESUME_FIELD: &str = "resume";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub reference: String,
    pub candidates: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    /// Match percentages aligned with the request's `candidates`.
    pub scores: Vec<f64>,
}

/// Parsed multipart upload.
#[derive(Debug, Default)]
struct UploadForm {
    job_description: String,
    documents: Vec<Document>,
}

async fn read_upload(mut multipart: Multipart, file_field: &str) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let field_name = field.name().unwrap_or_default().to_string();

        if field_name == JOB_DESCRIPTION_FIELD {
            form.job_description = field
                .text()
                .await
                .map_err(|e| AppError::Validation(format!("Unreadable job description: {e}")))?;
        } else if field_name == file_field {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let content_type = field.content_type().map(str::to_string);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Unreadable upload '{file_name}': {e}")))?;

            // Browsers send an empty part for an untouched file input.
            if file_name.is_empty() && bytes.is_empty() {
                continue;
            }
            let name = if file_name.is_empty() {
                format!("document-{}", form.documents.len() + 1)
            } else {
                file_name
            };
            form.documents
                .push(Document::from_upload(name, content_type.as_deref(), bytes));
        } else {
            debug!(field = %field_name, "Ignoring unexpected multipart field");
        }
    }

    Ok(form)
}

/// Runs CPU-bound pipeline work off the async executor.
async fn run_blocking<T, F>(work: F) -> Result<T, AppError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, AppError> + Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Screening task failed: {e}")))?
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/screen
///
/// Multipart: `job_description` text plus one or more `resumes` files (PDF or DOCX).
/// Returns candidates ranked by match percentage; unreadable files are listed under
/// `rejected` instead of failing the batch.
pub async fn handle_screen(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ScreeningReport>, AppError> {
    let form = read_upload(multipart, RESUMES_FIELD).await?;
    let ctx = state.screening.clone();

    let report = run_blocking(move || screen(&form.job_description, &form.documents, &ctx)).await?;
    Ok(Json(report))
}

/// POST /api/v1/scan
///
/// Multipart: `job_description` text plus exactly one `resume` file.
/// Returns the match percentage, candidate name, summary and gap report.
pub async fn handle_scan(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ScanReport>, AppError> {
    let UploadForm {
        job_description,
        mut documents,
    } = read_upload(multipart, RESUME_FIELD).await?;

    if documents.len() > 1 {
        return Err(AppError::Validation(format!(
            "Expected a single resume, got {}",
            documents.len()
        )));
    }
    let Some(document) = documents.pop() else {
        return Err(AppError::MissingInput(
            "Please upload a resume".to_string(),
        ));
    };
    let ctx = state.screening.clone();

    let report = run_blocking(move || scan(&job_description, &document, &ctx)).await?;
    Ok(Json(report))
}

/// POST /api/v1/score
///
/// Scores raw texts directly, no file extraction. Scores are aligned with `candidates`.
pub async fn handle_score(
    State(state): State<AppState>,
    Json(request): Json<ScoreRequest>,
) -> Result<Json<ScoreResponse>, AppError> {
    let ctx = state.screening.clone();

    let scores =
        run_blocking(move || score_texts(&request.reference, &request.candidates, &ctx)).await?;
    Ok(Json(ScoreResponse { scores }))
}
