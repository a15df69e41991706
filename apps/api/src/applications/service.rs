use std::collections::HashMap;

use tracing::{debug, info};

use crate::errors::AppError;
use crate::jobs::service::attach_companies;
use crate::models::application::{
    Application, ApplicationStatus, ApplicationView, InsertOutcome, NewApplication,
};
use crate::models::job::JobView;
use crate::repository::Repositories;

/// Validated apply-to-job input.
#[derive(Debug, Clone)]
pub struct ApplyCommand {
    pub user_email: String,
    pub user_name: Option<String>,
    pub user_img: Option<String>,
    pub job_id: i64,
    /// Falls back to the applicant's uploaded resume when absent.
    pub resume: Option<String>,
}

#[derive(Debug)]
pub enum ApplyOutcome {
    Created(ApplicationView),
    AlreadyApplied,
}

/// Creates the application for (email, job) at most once.
///
/// Ordering matters: an existing application wins over a missing resume, so a
/// repeat submission without a resume still reports "already applied".
pub async fn apply_to_job(
    repos: &Repositories,
    cmd: ApplyCommand,
) -> Result<ApplyOutcome, AppError> {
    let job = repos
        .jobs
        .find(cmd.job_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found".to_string()))?;

    if repos.applications.exists(&cmd.user_email, job.id).await? {
        debug!("{} already applied to job {}", cmd.user_email, job.id);
        return Ok(ApplyOutcome::AlreadyApplied);
    }

    let resume = match cmd.resume {
        Some(url) => url,
        None => repos
            .resumes
            .find_by_email(&cmd.user_email)
            .await?
            .map(|stored| stored.resume)
            .ok_or_else(|| AppError::Validation("No resume uploaded yet".to_string()))?,
    };

    let outcome = repos
        .applications
        .insert(NewApplication {
            user_email: cmd.user_email,
            user_name: cmd.user_name,
            user_img: cmd.user_img,
            job_id: job.id,
            resume,
        })
        .await?;

    match outcome {
        InsertOutcome::Created(application) => {
            info!(
                "Application {} created for job {} by {}",
                application.id, job.id, application.user_email
            );
            let job = attach_companies(repos, vec![job]).await?.pop();
            Ok(ApplyOutcome::Created(ApplicationView { application, job }))
        }
        // A concurrent submission got there between the check and the insert.
        InsertOutcome::AlreadyExists => Ok(ApplyOutcome::AlreadyApplied),
    }
}

/// Overwrites an application's status. Any status may follow any other.
/// The status string is checked before the application is looked up.
pub async fn update_status(
    repos: &Repositories,
    application_id: i64,
    status: &str,
) -> Result<ApplicationStatus, AppError> {
    let status: ApplicationStatus = status
        .parse()
        .map_err(|_| AppError::Validation("Invalid status value".to_string()))?;

    let updated = repos
        .applications
        .update_status(application_id, status)
        .await?
        .ok_or_else(|| AppError::NotFound("Application not found".to_string()))?;

    info!("Application {} is now {}", updated.id, updated.status);
    Ok(updated.status)
}

pub async fn list_all_applications(repos: &Repositories) -> Result<Vec<ApplicationView>, AppError> {
    let applications = repos.applications.list_all().await?;
    attach_jobs(repos, applications).await
}

pub async fn list_user_applications(
    repos: &Repositories,
    email: &str,
) -> Result<Vec<ApplicationView>, AppError> {
    let applications = repos.applications.list_by_email(email).await?;
    attach_jobs(repos, applications).await
}

/// Applications to any job of the company registered under `email`.
/// An unknown company yields an empty list.
pub async fn list_company_applications(
    repos: &Repositories,
    email: &str,
) -> Result<Vec<ApplicationView>, AppError> {
    let Some(company) = repos.companies.find_by_email(email).await? else {
        debug!("No company registered for {email}; returning no applications");
        return Ok(Vec::new());
    };

    let job_ids: Vec<i64> = repos
        .jobs
        .list(Some(company.id))
        .await?
        .iter()
        .map(|j| j.id)
        .collect();
    if job_ids.is_empty() {
        return Ok(Vec::new());
    }

    let applications = repos.applications.list_by_job_ids(&job_ids).await?;
    attach_jobs(repos, applications).await
}

async fn attach_jobs(
    repos: &Repositories,
    applications: Vec<Application>,
) -> Result<Vec<ApplicationView>, AppError> {
    let mut job_ids: Vec<i64> = applications.iter().map(|a| a.job_id).collect();
    job_ids.sort_unstable();
    job_ids.dedup();

    let jobs = repos.jobs.find_by_ids(&job_ids).await?;
    let jobs: HashMap<i64, JobView> = attach_companies(repos, jobs)
        .await?
        .into_iter()
        .map(|view| (view.job.id, view))
        .collect();

    Ok(applications
        .into_iter()
        .map(|application| ApplicationView {
            job: jobs.get(&application.job_id).cloned(),
            application,
        })
        .collect())
}
