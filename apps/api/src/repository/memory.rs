use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::errors::AppError;
use crate::models::application::{Application, ApplicationStatus, InsertOutcome, NewApplication};
use crate::models::company::{Company, NewCompany};
use crate::models::job::{Job, JobChanges, JobFields};
use crate::models::resume::UserResume;
use crate::repository::{ApplicationRepo, CompanyRepo, JobRepo, ResumeRepo};

/// In-process store with the same constraints as the Postgres schema:
/// unique company email, unique (user_email, job_id), unique resume email,
/// company FK on jobs and cascading job deletes.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

#[derive(Default)]
struct Tables {
    next_id: i64,
    companies: Vec<Company>,
    jobs: Vec<Job>,
    applications: Vec<Application>,
    resumes: Vec<UserResume>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

impl MemoryStore {
    fn lock(&self) -> std::sync::MutexGuard<'_, Tables> {
        self.tables.lock().expect("memory store poisoned")
    }

    pub fn application_count(&self) -> usize {
        self.lock().applications.len()
    }

    pub fn resume_count(&self) -> usize {
        self.lock().resumes.len()
    }
}

fn apply_changes(job: &mut Job, changes: JobChanges) {
    if let Some(title) = changes.title {
        job.title = title;
    }
    if let Some(location) = changes.location {
        job.location = location;
    }
    if let Some(level) = changes.level {
        job.level = level;
    }
    if let Some(company_id) = changes.company_id {
        job.company_id = company_id;
    }
    if let Some(description) = changes.description {
        job.description = description;
    }
    if let Some(salary) = changes.salary {
        job.salary = salary;
    }
    if let Some(date) = changes.date {
        job.date = date;
    }
    if let Some(category) = changes.category {
        job.category = category;
    }
    if let Some(visible) = changes.visible {
        job.visible = visible;
    }
}

fn newest_first(mut rows: Vec<Application>) -> Vec<Application> {
    rows.sort_by(|a, b| b.applied_at.cmp(&a.applied_at).then(b.id.cmp(&a.id)));
    rows
}

#[async_trait]
impl CompanyRepo for MemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Company>, AppError> {
        Ok(self.lock().companies.iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Company>, AppError> {
        Ok(self.lock().companies.iter().find(|c| c.email == email).cloned())
    }

    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Company>, AppError> {
        Ok(self
            .lock()
            .companies
            .iter()
            .filter(|c| ids.contains(&c.id))
            .cloned()
            .collect())
    }

    async fn create(&self, company: NewCompany) -> Result<Company, AppError> {
        let mut tables = self.lock();
        if tables.companies.iter().any(|c| c.email == company.email) {
            return Err(AppError::Conflict(format!(
                "Company {} already exists",
                company.email
            )));
        }
        let created = Company {
            id: tables.next_id(),
            company_name: company.company_name,
            email: company.email,
            password_hash: company.password_hash,
            image: company.image,
        };
        tables.companies.push(created.clone());
        Ok(created)
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> Result<bool, AppError> {
        let mut tables = self.lock();
        match tables.companies.iter_mut().find(|c| c.id == id) {
            Some(company) => {
                company.password_hash = password_hash.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl JobRepo for MemoryStore {
    async fn list(&self, company_id: Option<i64>) -> Result<Vec<Job>, AppError> {
        Ok(self
            .lock()
            .jobs
            .iter()
            .filter(|j| company_id.map_or(true, |id| j.company_id == id))
            .cloned()
            .collect())
    }

    async fn find(&self, id: i64) -> Result<Option<Job>, AppError> {
        Ok(self.lock().jobs.iter().find(|j| j.id == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Job>, AppError> {
        Ok(self
            .lock()
            .jobs
            .iter()
            .filter(|j| ids.contains(&j.id))
            .cloned()
            .collect())
    }

    async fn create(&self, fields: JobFields) -> Result<Job, AppError> {
        let mut tables = self.lock();
        if !tables.companies.iter().any(|c| c.id == fields.company_id) {
            return Err(AppError::NotFound(format!(
                "Company {} not found",
                fields.company_id
            )));
        }
        let job = Job {
            id: tables.next_id(),
            title: fields.title,
            location: fields.location,
            level: fields.level,
            company_id: fields.company_id,
            description: fields.description,
            salary: fields.salary,
            date: fields.date,
            category: fields.category,
            visible: fields.visible,
        };
        tables.jobs.push(job.clone());
        Ok(job)
    }

    async fn update(&self, id: i64, changes: JobChanges) -> Result<Option<Job>, AppError> {
        let mut tables = self.lock();
        if let Some(company_id) = changes.company_id {
            if !tables.companies.iter().any(|c| c.id == company_id) {
                return Err(AppError::NotFound(format!("Company {company_id} not found")));
            }
        }
        let Some(job) = tables.jobs.iter_mut().find(|j| j.id == id) else {
            return Ok(None);
        };
        apply_changes(job, changes);
        Ok(Some(job.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut tables = self.lock();
        let before = tables.jobs.len();
        tables.jobs.retain(|j| j.id != id);
        if tables.jobs.len() == before {
            return Ok(false);
        }
        tables.applications.retain(|a| a.job_id != id);
        Ok(true)
    }
}

#[async_trait]
impl ApplicationRepo for MemoryStore {
    async fn exists(&self, user_email: &str, job_id: i64) -> Result<bool, AppError> {
        Ok(self
            .lock()
            .applications
            .iter()
            .any(|a| a.user_email == user_email && a.job_id == job_id))
    }

    async fn insert(&self, application: NewApplication) -> Result<InsertOutcome, AppError> {
        let mut tables = self.lock();
        if !tables.jobs.iter().any(|j| j.id == application.job_id) {
            return Err(AppError::NotFound("Job not found".to_string()));
        }
        if tables
            .applications
            .iter()
            .any(|a| a.user_email == application.user_email && a.job_id == application.job_id)
        {
            return Ok(InsertOutcome::AlreadyExists);
        }
        let created = Application {
            id: tables.next_id(),
            user_email: application.user_email,
            user_name: application.user_name,
            user_img: application.user_img,
            job_id: application.job_id,
            resume: application.resume,
            status: ApplicationStatus::Pending,
            applied_at: Utc::now(),
        };
        tables.applications.push(created.clone());
        Ok(InsertOutcome::Created(created))
    }

    async fn update_status(
        &self,
        id: i64,
        status: ApplicationStatus,
    ) -> Result<Option<Application>, AppError> {
        let mut tables = self.lock();
        let Some(application) = tables.applications.iter_mut().find(|a| a.id == id) else {
            return Ok(None);
        };
        application.status = status;
        Ok(Some(application.clone()))
    }

    async fn list_all(&self) -> Result<Vec<Application>, AppError> {
        Ok(newest_first(self.lock().applications.clone()))
    }

    async fn list_by_email(&self, user_email: &str) -> Result<Vec<Application>, AppError> {
        let rows = self
            .lock()
            .applications
            .iter()
            .filter(|a| a.user_email == user_email)
            .cloned()
            .collect();
        Ok(newest_first(rows))
    }

    async fn list_by_job_ids(&self, job_ids: &[i64]) -> Result<Vec<Application>, AppError> {
        let rows = self
            .lock()
            .applications
            .iter()
            .filter(|a| job_ids.contains(&a.job_id))
            .cloned()
            .collect();
        Ok(newest_first(rows))
    }
}

#[async_trait]
impl ResumeRepo for MemoryStore {
    async fn upsert(&self, email: &str, resume_url: &str) -> Result<UserResume, AppError> {
        let mut tables = self.lock();
        if let Some(existing) = tables.resumes.iter_mut().find(|r| r.email == email) {
            existing.resume = resume_url.to_string();
            existing.uploaded_at = Utc::now();
            return Ok(existing.clone());
        }
        let created = UserResume {
            id: tables.next_id(),
            email: email.to_string(),
            resume: resume_url.to_string(),
            uploaded_at: Utc::now(),
        };
        tables.resumes.push(created.clone());
        Ok(created)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserResume>, AppError> {
        Ok(self.lock().resumes.iter().find(|r| r.email == email).cloned())
    }
}
