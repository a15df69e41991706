use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::company::CompanyProfile;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Job {
    #[serde(rename = "_id")]
    pub id: i64,
    pub title: String,
    pub location: String,
    pub level: String,
    pub company_id: i64,
    pub description: String,
    pub salary: i64,
    pub date: DateTime<Utc>,
    pub category: String,
    pub visible: bool,
}

/// Every column of a job except its id. Used for create and full replace.
#[derive(Debug, Clone)]
pub struct JobFields {
    pub title: String,
    pub location: String,
    pub level: String,
    pub company_id: i64,
    pub description: String,
    pub salary: i64,
    pub date: DateTime<Utc>,
    pub category: String,
    pub visible: bool,
}

/// Partial update; `None` leaves the column as is.
#[derive(Debug, Clone, Default)]
pub struct JobChanges {
    pub title: Option<String>,
    pub location: Option<String>,
    pub level: Option<String>,
    pub company_id: Option<i64>,
    pub description: Option<String>,
    pub salary: Option<i64>,
    pub date: Option<DateTime<Utc>>,
    pub category: Option<String>,
    pub visible: Option<bool>,
}

impl From<JobFields> for JobChanges {
    fn from(fields: JobFields) -> Self {
        JobChanges {
            title: Some(fields.title),
            location: Some(fields.location),
            level: Some(fields.level),
            company_id: Some(fields.company_id),
            description: Some(fields.description),
            salary: Some(fields.salary),
            date: Some(fields.date),
            category: Some(fields.category),
            visible: Some(fields.visible),
        }
    }
}

/// A job with its owning company, as served by the listing endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct JobView {
    #[serde(flatten)]
    pub job: Job,
    pub company: Option<CompanyProfile>,
}
