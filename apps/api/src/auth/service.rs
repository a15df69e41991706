use tracing::{info, warn};

use crate::auth::password::{hash_password, verify_password};
use crate::errors::AppError;
use crate::models::company::{Company, CompanyProfile, NewCompany};
use crate::repository::Repositories;
use crate::storage::{logo_key, ObjectStore};
use crate::upload::UploadedFile;

/// Validated sign-up input.
#[derive(Debug)]
pub struct Registration {
    pub company_name: String,
    pub email: String,
    pub password: String,
    pub logo: UploadedFile,
}

/// Creates a company account. The email must be unused; the logo is stored
/// before the row is written so a failed upload leaves no account behind.
pub async fn register(
    repos: &Repositories,
    storage: &dyn ObjectStore,
    registration: Registration,
) -> Result<Company, AppError> {
    if repos
        .companies
        .find_by_email(&registration.email)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("User already exists".to_string()));
    }

    let logo = registration.logo;
    let logo_url = storage
        .put(&logo_key(&registration.email), logo.bytes, &logo.content_type)
        .await
        .map_err(|e| AppError::Upload(e.to_string()))?;

    let password_hash = hash_password(&registration.password)?;

    let company = repos
        .companies
        .create(NewCompany {
            company_name: registration.company_name,
            email: registration.email,
            password_hash,
            image: Some(logo_url),
        })
        .await?;

    info!("Registered company {} ({})", company.id, company.email);
    Ok(company)
}

pub async fn login(
    repos: &Repositories,
    email: &str,
    password: &str,
) -> Result<CompanyProfile, AppError> {
    let company = repos
        .companies
        .find_by_email(email)
        .await?
        .ok_or_else(|| AppError::NotFound("User does not exist".to_string()))?;

    if !verify_password(password, &company.password_hash) {
        warn!("Rejected login for company {}", company.id);
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    Ok(CompanyProfile::from(&company))
}

/// Overwrites the password hash for `email`. No proof of identity beyond the
/// address is required; see DESIGN.md.
pub async fn reset_password(
    repos: &Repositories,
    email: &str,
    new_password: &str,
) -> Result<(), AppError> {
    let company = repos
        .companies
        .find_by_email(email)
        .await?
        .ok_or_else(|| AppError::NotFound("Email not found".to_string()))?;

    let password_hash = hash_password(new_password)?;
    if !repos
        .companies
        .update_password(company.id, &password_hash)
        .await?
    {
        return Err(AppError::NotFound("Email not found".to_string()));
    }

    warn!(
        "Password reset for company {} without identity verification",
        company.id
    );
    Ok(())
}
