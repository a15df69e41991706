use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::applications::service::{self, ApplyCommand, ApplyOutcome};
use crate::errors::AppError;
use crate::extract::{AppJson, AppQuery};
use crate::models::application::{ApplicationStatus, ApplicationView};
use crate::state::AppState;
use crate::validation::{max_len, optional, required, required_email, required_id, FlexibleId};

#[derive(Debug, Deserialize)]
pub struct ApplyRequest {
    pub user_email: Option<String>,
    pub user_name: Option<String>,
    pub user_img: Option<String>,
    pub job_id: Option<FlexibleId>,
    pub resume: Option<String>,
}

impl ApplyRequest {
    pub fn validate(self) -> Result<ApplyCommand, AppError> {
        let user_email = required_email(self.user_email, "user_email")?;
        let job_id = required_id(self.job_id, "job_id")?;
        let user_name = optional(self.user_name);
        if let Some(name) = &user_name {
            max_len(name, 100, "user_name")?;
        }

        Ok(ApplyCommand {
            user_email,
            user_name,
            user_img: optional(self.user_img),
            job_id,
            resume: optional(self.resume),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub application_id: Option<FlexibleId>,
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UpdateStatusResponse {
    pub message: String,
    pub new_status: ApplicationStatus,
}

#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// POST /apply
///
/// 201 with the new application, or 200 "Already applied" when this email
/// already has an application for the job.
pub async fn handle_apply(
    State(state): State<AppState>,
    AppJson(req): AppJson<ApplyRequest>,
) -> Result<Response, AppError> {
    let cmd = req.validate()?;

    match service::apply_to_job(&state.repos, cmd).await? {
        ApplyOutcome::Created(view) => Ok((StatusCode::CREATED, Json(view)).into_response()),
        ApplyOutcome::AlreadyApplied => Ok((
            StatusCode::OK,
            Json(MessageResponse {
                message: "Already applied".to_string(),
            }),
        )
            .into_response()),
    }
}

/// PATCH /update-application-status
pub async fn handle_update_status(
    State(state): State<AppState>,
    AppJson(req): AppJson<UpdateStatusRequest>,
) -> Result<Json<UpdateStatusResponse>, AppError> {
    let application_id = required_id(req.application_id, "application_id")?;
    let status = required(req.status, "status")?;

    let new_status = service::update_status(&state.repos, application_id, &status).await?;

    Ok(Json(UpdateStatusResponse {
        message: "Application status updated".to_string(),
        new_status,
    }))
}

/// GET /applications
pub async fn handle_list_applications(
    State(state): State<AppState>,
) -> Result<Json<Vec<ApplicationView>>, AppError> {
    Ok(Json(service::list_all_applications(&state.repos).await?))
}

/// GET /user-applications?email=
pub async fn handle_user_applications(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<EmailQuery>,
) -> Result<Json<Vec<ApplicationView>>, AppError> {
    let Some(email) = optional(params.email) else {
        return Ok(Json(Vec::new()));
    };
    Ok(Json(
        service::list_user_applications(&state.repos, &email).await?,
    ))
}

/// GET /company-applications?email=
pub async fn handle_company_applications(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<EmailQuery>,
) -> Result<Json<Vec<ApplicationView>>, AppError> {
    let Some(email) = optional(params.email) else {
        return Ok(Json(Vec::new()));
    };
    Ok(Json(
        service::list_company_applications(&state.repos, &email).await?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(json: serde_json::Value) -> ApplyRequest {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_apply_request_requires_email_and_job() {
        let no_email = request(serde_json::json!({ "job_id": 5 }));
        assert!(matches!(no_email.validate(), Err(AppError::MissingField(_))));

        let no_job = request(serde_json::json!({ "user_email": "a@x.com" }));
        assert!(matches!(no_job.validate(), Err(AppError::MissingField(_))));
    }

    #[test]
    fn test_apply_request_blank_resume_means_fallback() {
        let cmd = request(serde_json::json!({
            "user_email": "a@x.com",
            "job_id": "5",
            "resume": ""
        }))
        .validate()
        .unwrap();
        assert_eq!(cmd.job_id, 5);
        assert!(cmd.resume.is_none());
    }

    #[test]
    fn test_apply_request_rejects_malformed_email() {
        let req = request(serde_json::json!({ "user_email": "not-an-email", "job_id": 5 }));
        assert!(matches!(req.validate(), Err(AppError::Validation(_))));
    }
}
