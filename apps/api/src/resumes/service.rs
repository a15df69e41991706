use tracing::info;

use crate::errors::AppError;
use crate::models::resume::UserResume;
use crate::repository::Repositories;
use crate::storage::{resume_key, ObjectStore};
use crate::upload::UploadedFile;

/// Stores the file under the applicant's fixed key and points their resume
/// row at it. A failed upload leaves the existing row untouched.
pub async fn upload_resume(
    repos: &Repositories,
    storage: &dyn ObjectStore,
    email: &str,
    file: UploadedFile,
) -> Result<UserResume, AppError> {
    let key = resume_key(email);
    let url = storage
        .put(&key, file.bytes, &file.content_type)
        .await
        .map_err(|e| AppError::Upload(e.to_string()))?;

    let stored = repos.resumes.upsert(email, &url).await?;
    info!("Stored resume '{}' for {}", file.file_name, email);
    Ok(stored)
}

pub async fn get_resume(repos: &Repositories, email: &str) -> Result<UserResume, AppError> {
    repos
        .resumes
        .find_by_email(email)
        .await?
        .ok_or_else(|| AppError::NotFound("Resume not found.".to_string()))
}
