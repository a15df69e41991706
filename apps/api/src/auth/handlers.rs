use axum::{extract::Multipart, extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::auth::service::{self, Registration};
use crate::errors::AppError;
use crate::extract::AppJson;
use crate::models::company::CompanyProfile;
use crate::state::AppState;
use crate::upload::MultipartForm;
use crate::validation::{max_len, required, required_email};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub recruiter: CompanyProfile,
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub email: Option<String>,
    pub new_password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SignUpResponse {
    pub message: String,
    pub recruiter: CompanyProfile,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Passwords are taken verbatim; only an empty value counts as missing.
fn password_field(value: Option<String>, field: &str) -> Result<String, AppError> {
    value
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::missing(field))
}

fn registration_from_form(mut form: MultipartForm) -> Result<Registration, AppError> {
    let email = required_email(form.text("email"), "email")?;
    let password = password_field(form.text("password"), "password")?;
    let company_name = required(form.text("company_name"), "company_name")?;
    max_len(&company_name, 100, "company_name")?;
    let logo = form.file("image").ok_or_else(|| AppError::missing("image"))?;

    Ok(Registration {
        company_name,
        email,
        password,
        logo,
    })
}

/// POST /sign-up (multipart: email, password, company_name, image)
pub async fn handle_sign_up(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<SignUpResponse>), AppError> {
    let form = MultipartForm::read(multipart).await?;
    let registration = registration_from_form(form)?;

    let company = service::register(&state.repos, state.storage.as_ref(), registration).await?;

    Ok((
        StatusCode::CREATED,
        Json(SignUpResponse {
            message: "User created".to_string(),
            recruiter: CompanyProfile::from(&company),
        }),
    ))
}

/// POST /login
pub async fn handle_login(
    State(state): State<AppState>,
    AppJson(req): AppJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let email = required(req.email, "email")?;
    let password = password_field(req.password, "password")?;

    let recruiter = service::login(&state.repos, &email, &password).await?;

    Ok(Json(LoginResponse {
        success: true,
        message: "Login successful".to_string(),
        recruiter,
    }))
}

/// POST /reset-password
pub async fn handle_reset_password(
    State(state): State<AppState>,
    AppJson(req): AppJson<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let email = required(req.email, "email")?;
    let new_password = password_field(req.new_password, "new_password")?;

    service::reset_password(&state.repos, &email, &new_password).await?;

    Ok(Json(MessageResponse {
        message: "Password reset successful".to_string(),
    }))
}
