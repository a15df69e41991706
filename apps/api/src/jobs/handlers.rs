use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::errors::AppError;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::jobs::service;
use crate::models::job::{JobChanges, JobFields, JobView};
use crate::state::AppState;
use crate::validation::{max_len, optional, required, FlexibleId};

#[derive(Debug, Deserialize)]
pub struct JobsQuery {
    pub company_id: Option<String>,
}

impl JobsQuery {
    /// A blank `company_id` lists every job.
    pub fn company_id(self) -> Result<Option<i64>, AppError> {
        optional(self.company_id)
            .map(|raw| FlexibleId::Text(raw).into_id("company_id"))
            .transpose()
    }
}

/// Body of POST, PUT and PATCH on jobs. POST and PUT require every field but
/// `visible`; PATCH takes any subset.
#[derive(Debug, Default, Deserialize)]
pub struct JobPayload {
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

const TEXT_LIMITS: [(&str, usize); 4] = [
    ("title", 255),
    ("location", 255),
    ("level", 100),
    ("category", 100),
];

impl JobPayload {
    pub fn into_fields(self) -> Result<JobFields, AppError> {
        let fields = JobFields {
            title: required(self.title, "title")?,
            location: required(self.location, "location")?,
            level: required(self.level, "level")?,
            company_id: self.company_id.ok_or_else(|| AppError::missing("company_id"))?,
            description: required(self.description, "description")?,
            salary: self.salary.ok_or_else(|| AppError::missing("salary"))?,
            date: self.date.ok_or_else(|| AppError::missing("date"))?,
            category: required(self.category, "category")?,
            visible: self.visible.unwrap_or(true),
        };
        check_salary(fields.salary)?;
        check_lengths([
            &fields.title,
            &fields.location,
            &fields.level,
            &fields.category,
        ])?;
        Ok(fields)
    }

    pub fn into_changes(self) -> Result<JobChanges, AppError> {
        let text = |value: Option<String>, field: &str| -> Result<Option<String>, AppError> {
            value.map(|v| required(Some(v), field)).transpose()
        };

        let changes = JobChanges {
            title: text(self.title, "title")?,
            location: text(self.location, "location")?,
            level: text(self.level, "level")?,
            company_id: self.company_id,
            description: text(self.description, "description")?,
            salary: self.salary,
            date: self.date,
            category: text(self.category, "category")?,
            visible: self.visible,
        };
        if let Some(salary) = changes.salary {
            check_salary(salary)?;
        }
        for ((field, max), value) in TEXT_LIMITS.iter().zip([
            &changes.title,
            &changes.location,
            &changes.level,
            &changes.category,
        ]) {
            if let Some(value) = value {
                max_len(value, *max, field)?;
            }
        }
        Ok(changes)
    }
}

fn check_salary(salary: i64) -> Result<(), AppError> {
    if salary < 0 {
        return Err(AppError::Validation("salary must not be negative".to_string()));
    }
    Ok(())
}

fn check_lengths(values: [&String; 4]) -> Result<(), AppError> {
    for ((field, max), value) in TEXT_LIMITS.iter().zip(values) {
        max_len(value, *max, field)?;
    }
    Ok(())
}

/// GET /jobs?company_id=
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<JobsQuery>,
) -> Result<Json<Vec<JobView>>, AppError> {
    let company_id = params.company_id()?;
    Ok(Json(service::list_jobs(&state.repos, company_id).await?))
}

/// GET /jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<JobView>, AppError> {
    Ok(Json(service::get_job(&state.repos, id).await?))
}

/// POST /jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    AppJson(payload): AppJson<JobPayload>,
) -> Result<(StatusCode, Json<JobView>), AppError> {
    let fields = payload.into_fields()?;
    let view = service::create_job(&state.repos, fields).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// PUT /jobs/:id
pub async fn handle_replace_job(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<JobPayload>,
) -> Result<Json<JobView>, AppError> {
    let fields = payload.into_fields()?;
    Ok(Json(service::replace_job(&state.repos, id, fields).await?))
}

/// PATCH /jobs/:id
pub async fn handle_update_job(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<JobPayload>,
) -> Result<Json<JobView>, AppError> {
    let changes = payload.into_changes()?;
    Ok(Json(service::update_job(&state.repos, id, changes).await?))
}

/// DELETE /jobs/:id
pub async fn handle_delete_job(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<StatusCode, AppError> {
    service::delete_job(&state.repos, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
