use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::extract::AppQuery;
use crate::resumes::service;
use crate::state::AppState;
use crate::upload::MultipartForm;
use crate::validation::{optional, required};

#[derive(Debug, Serialize)]
pub struct UploadResumeResponse {
    pub message: String,
    pub resume: String,
}

#[derive(Debug, Deserialize)]
pub struct ResumeQuery {
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ResumeResponse {
    pub email: String,
    pub resume: String,
}

/// POST /upload-resume (multipart: email, resume)
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UploadResumeResponse>, AppError> {
    let mut form = MultipartForm::read(multipart).await?;

    let email = optional(form.text("email"))
        .ok_or_else(|| AppError::Validation("Email is required.".to_string()))?;
    let file = form
        .file("resume")
        .ok_or_else(|| AppError::Validation("No resume file uploaded.".to_string()))?;

    let stored =
        service::upload_resume(&state.repos, state.storage.as_ref(), &email, file).await?;

    Ok(Json(UploadResumeResponse {
        message: "Resume uploaded successfully".to_string(),
        resume: stored.resume,
    }))
}

/// GET /user-resume?email=
pub async fn handle_get_resume(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ResumeQuery>,
) -> Result<Json<ResumeResponse>, AppError> {
    let email = required(params.email, "email")?;
    let stored = service::get_resume(&state.repos, &email).await?;

    Ok(Json(ResumeResponse {
        email: stored.email,
        resume: stored.resume,
    }))
}
