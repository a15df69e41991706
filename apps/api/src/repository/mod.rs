//! Storage seams, one trait per entity.
//!
//! Services only ever see `Arc<dyn ...Repo>`; `PgStore` backs them in
//! production and `MemoryStore` in tests.

pub mod postgres;

#[cfg(test)]
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::application::{Application, ApplicationStatus, InsertOutcome, NewApplication};
use crate::models::company::{Company, NewCompany};
use crate::models::job::{Job, JobChanges, JobFields};
use crate::models::resume::UserResume;

pub use postgres::PgStore;

#[async_trait]
pub trait CompanyRepo: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Company>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Company>, AppError>;
    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Company>, AppError>;
    /// Fails with `AppError::Conflict` if the email is already registered.
    async fn create(&self, company: NewCompany) -> Result<Company, AppError>;
    /// Returns false if no company has this id.
    async fn update_password(&self, id: i64, password_hash: &str) -> Result<bool, AppError>;
}

#[async_trait]
pub trait JobRepo: Send + Sync {
    async fn list(&self, company_id: Option<i64>) -> Result<Vec<Job>, AppError>;
    async fn find(&self, id: i64) -> Result<Option<Job>, AppError>;
    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Job>, AppError>;
    async fn create(&self, fields: JobFields) -> Result<Job, AppError>;
    async fn update(&self, id: i64, changes: JobChanges) -> Result<Option<Job>, AppError>;
    /// Deletes the job and, through the cascade, its applications.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}

#[async_trait]
pub trait ApplicationRepo: Send + Sync {
    async fn exists(&self, user_email: &str, job_id: i64) -> Result<bool, AppError>;
    /// Inserts unless an application for (user_email, job_id) is already stored.
    async fn insert(&self, application: NewApplication) -> Result<InsertOutcome, AppError>;
    async fn update_status(
        &self,
        id: i64,
        status: ApplicationStatus,
    ) -> Result<Option<Application>, AppError>;
    async fn list_all(&self) -> Result<Vec<Application>, AppError>;
    async fn list_by_email(&self, user_email: &str) -> Result<Vec<Application>, AppError>;
    async fn list_by_job_ids(&self, job_ids: &[i64]) -> Result<Vec<Application>, AppError>;
}

#[async_trait]
pub trait ResumeRepo: Send + Sync {
    /// Creates or overwrites the resume row for `email`, refreshing `uploaded_at`.
    async fn upsert(&self, email: &str, resume_url: &str) -> Result<UserResume, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<UserResume>, AppError>;
}

/// The full set of repositories handed to services.
#[derive(Clone)]
pub struct Repositories {
    pub companies: Arc<dyn CompanyRepo>,
    pub jobs: Arc<dyn JobRepo>,
    pub applications: Arc<dyn ApplicationRepo>,
    pub resumes: Arc<dyn ResumeRepo>,
}

impl Repositories {
    /// Uses one store for every entity.
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: CompanyRepo + JobRepo + ApplicationRepo + ResumeRepo + 'static,
    {
        Repositories {
            companies: store.clone(),
            jobs: store.clone(),
            applications: store.clone(),
            resumes: store,
        }
    }
}
