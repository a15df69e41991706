use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// The latest resume uploaded for an applicant email.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UserResume {
    pub id: i64,
    pub email: String,
    pub resume: String,
    pub uploaded_at: DateTime<Utc>,
}
