use std::collections::HashMap;

use tracing::info;

use crate::errors::AppError;
use crate::models::company::CompanyProfile;
use crate::models::job::{Job, JobChanges, JobFields, JobView};
use crate::repository::Repositories;

/// Pairs each job with its company's public profile, loading the companies
/// in one query.
pub async fn attach_companies(
    repos: &Repositories,
    jobs: Vec<Job>,
) -> Result<Vec<JobView>, AppError> {
    let mut company_ids: Vec<i64> = jobs.iter().map(|j| j.company_id).collect();
    company_ids.sort_unstable();
    company_ids.dedup();

    let companies: HashMap<i64, CompanyProfile> = repos
        .companies
        .find_by_ids(&company_ids)
        .await?
        .iter()
        .map(|c| (c.id, CompanyProfile::from(c)))
        .collect();

    Ok(jobs
        .into_iter()
        .map(|job| JobView {
            company: companies.get(&job.company_id).cloned(),
            job,
        })
        .collect())
}

pub async fn list_jobs(
    repos: &Repositories,
    company_id: Option<i64>,
) -> Result<Vec<JobView>, AppError> {
    let jobs = repos.jobs.list(company_id).await?;
    attach_companies(repos, jobs).await
}

pub async fn get_job(repos: &Repositories, id: i64) -> Result<JobView, AppError> {
    let job = repos
        .jobs
        .find(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))?;
    single_view(repos, job).await
}

pub async fn create_job(repos: &Repositories, fields: JobFields) -> Result<JobView, AppError> {
    ensure_company_exists(repos, fields.company_id).await?;
    let job = repos.jobs.create(fields).await?;
    info!("Created job {} for company {}", job.id, job.company_id);
    single_view(repos, job).await
}

/// Full replace (PUT). Every field is overwritten.
pub async fn replace_job(
    repos: &Repositories,
    id: i64,
    fields: JobFields,
) -> Result<JobView, AppError> {
    update_job(repos, id, JobChanges::from(fields)).await
}

/// Partial update (PATCH). Only supplied fields change.
pub async fn update_job(
    repos: &Repositories,
    id: i64,
    changes: JobChanges,
) -> Result<JobView, AppError> {
    if let Some(company_id) = changes.company_id {
        ensure_company_exists(repos, company_id).await?;
    }
    let job = repos
        .jobs
        .update(id, changes)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))?;
    info!("Updated job {id}");
    single_view(repos, job).await
}

/// Deletes a job together with its applications.
pub async fn delete_job(repos: &Repositories, id: i64) -> Result<(), AppError> {
    if !repos.jobs.delete(id).await? {
        return Err(AppError::NotFound(format!("Job {id} not found")));
    }
    info!("Deleted job {id} and its applications");
    Ok(())
}

async fn ensure_company_exists(repos: &Repositories, company_id: i64) -> Result<(), AppError> {
    match repos.companies.find_by_id(company_id).await? {
        Some(_) => Ok(()),
        None => Err(AppError::NotFound(format!("Company {company_id} not found"))),
    }
}

async fn single_view(repos: &Repositories, job: Job) -> Result<JobView, AppError> {
    attach_companies(repos, vec![job])
        .await?
        .pop()
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("job view lost while attaching company")))
}
