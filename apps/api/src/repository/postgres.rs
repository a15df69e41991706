use async_trait::async_trait;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::application::{Application, ApplicationStatus, InsertOutcome, NewApplication};
use crate::models::company::{Company, NewCompany};
use crate::models::job::{Job, JobChanges, JobFields};
use crate::models::resume::UserResume;
use crate::repository::{ApplicationRepo, CompanyRepo, JobRepo, ResumeRepo};

const COMPANY_COLUMNS: &str = "id, company_name, email, password_hash, image";
const JOB_COLUMNS: &str =
    "id, title, location, level, company_id, description, salary, date, category, visible";
const APPLICATION_COLUMNS: &str =
    "id, user_email, user_name, user_img, job_id, resume, status, applied_at";

/// Postgres-backed implementation of every repository trait.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CompanyRepo for PgStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Company>, AppError> {
        Ok(sqlx::query_as::<_, Company>(&format!(
            "SELECT {COMPANY_COLUMNS} FROM companies WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Company>, AppError> {
        Ok(sqlx::query_as::<_, Company>(&format!(
            "SELECT {COMPANY_COLUMNS} FROM companies WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Company>, AppError> {
        Ok(sqlx::query_as::<_, Company>(&format!(
            "SELECT {COMPANY_COLUMNS} FROM companies WHERE id = ANY($1)"
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn create(&self, company: NewCompany) -> Result<Company, AppError> {
        sqlx::query_as::<_, Company>(&format!(
            r#"
            INSERT INTO companies (company_name, email, password_hash, image)
            VALUES ($1, $2, $3, $4)
            RETURNING {COMPANY_COLUMNS}
            "#
        ))
        .bind(&company.company_name)
        .bind(&company.email)
        .bind(&company.password_hash)
        .bind(&company.image)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::Conflict(format!("Company {} already exists", company.email))
            }
            other => AppError::Database(other),
        })
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE companies SET password_hash = $1 WHERE id = $2")
            .bind(password_hash)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl JobRepo for PgStore {
    async fn list(&self, company_id: Option<i64>) -> Result<Vec<Job>, AppError> {
        let rows = match company_id {
            Some(company_id) => {
                sqlx::query_as::<_, Job>(&format!(
                    "SELECT {JOB_COLUMNS} FROM jobs WHERE company_id = $1 ORDER BY id"
                ))
                .bind(company_id)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Job>(&format!("SELECT {JOB_COLUMNS} FROM jobs ORDER BY id"))
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        Ok(rows)
    }

    async fn find(&self, id: i64) -> Result<Option<Job>, AppError> {
        Ok(
            sqlx::query_as::<_, Job>(&format!("SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Job>, AppError> {
        Ok(sqlx::query_as::<_, Job>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE id = ANY($1) ORDER BY id"
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn create(&self, fields: JobFields) -> Result<Job, AppError> {
        sqlx::query_as::<_, Job>(&format!(
            r#"
            INSERT INTO jobs
                (title, location, level, company_id, description, salary, date, category, visible)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {JOB_COLUMNS}
            "#
        ))
        .bind(&fields.title)
        .bind(&fields.location)
        .bind(&fields.level)
        .bind(fields.company_id)
        .bind(&fields.description)
        .bind(fields.salary)
        .bind(fields.date)
        .bind(&fields.category)
        .bind(fields.visible)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_company_fk(e, fields.company_id))
    }

    async fn update(&self, id: i64, changes: JobChanges) -> Result<Option<Job>, AppError> {
        let company_id = changes.company_id;
        // COALESCE keeps the stored value for every column not supplied.
        sqlx::query_as::<_, Job>(&format!(
            r#"
            UPDATE jobs SET
                title = COALESCE($2, title),
                location = COALESCE($3, location),
                level = COALESCE($4, level),
                company_id = COALESCE($5, company_id),
                description = COALESCE($6, description),
                salary = COALESCE($7, salary),
                date = COALESCE($8, date),
                category = COALESCE($9, category),
                visible = COALESCE($10, visible)
            WHERE id = $1
            RETURNING {JOB_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(changes.title)
        .bind(changes.location)
        .bind(changes.level)
        .bind(changes.company_id)
        .bind(changes.description)
        .bind(changes.salary)
        .bind(changes.date)
        .bind(changes.category)
        .bind(changes.visible)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_company_fk(e, company_id.unwrap_or_default()))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn map_company_fk(err: sqlx::Error, company_id: i64) -> AppError {
    match err {
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
            AppError::NotFound(format!("Company {company_id} not found"))
        }
        other => AppError::Database(other),
    }
}

#[async_trait]
impl ApplicationRepo for PgStore {
    async fn exists(&self, user_email: &str, job_id: i64) -> Result<bool, AppError> {
        Ok(sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM applications WHERE user_email = $1 AND job_id = $2)",
        )
        .bind(user_email)
        .bind(job_id)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn insert(&self, application: NewApplication) -> Result<InsertOutcome, AppError> {
        // The unique (user_email, job_id) constraint settles concurrent duplicates.
        let row = sqlx::query_as::<_, Application>(&format!(
            r#"
            INSERT INTO applications (user_email, user_name, user_img, job_id, resume)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_email, job_id) DO NOTHING
            RETURNING {APPLICATION_COLUMNS}
            "#
        ))
        .bind(&application.user_email)
        .bind(&application.user_name)
        .bind(&application.user_img)
        .bind(application.job_id)
        .bind(&application.resume)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match e {
            // The job was deleted after the caller looked it up.
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                AppError::NotFound("Job not found".to_string())
            }
            other => AppError::Database(other),
        })?;

        Ok(match row {
            Some(created) => InsertOutcome::Created(created),
            None => InsertOutcome::AlreadyExists,
        })
    }

    async fn update_status(
        &self,
        id: i64,
        status: ApplicationStatus,
    ) -> Result<Option<Application>, AppError> {
        Ok(sqlx::query_as::<_, Application>(&format!(
            "UPDATE applications SET status = $1 WHERE id = $2 RETURNING {APPLICATION_COLUMNS}"
        ))
        .bind(status)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn list_all(&self) -> Result<Vec<Application>, AppError> {
        Ok(sqlx::query_as::<_, Application>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications ORDER BY applied_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?)
    }

    async fn list_by_email(&self, user_email: &str) -> Result<Vec<Application>, AppError> {
        Ok(sqlx::query_as::<_, Application>(&format!(
            r#"
            SELECT {APPLICATION_COLUMNS} FROM applications
            WHERE user_email = $1
            ORDER BY applied_at DESC, id DESC
            "#
        ))
        .bind(user_email)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn list_by_job_ids(&self, job_ids: &[i64]) -> Result<Vec<Application>, AppError> {
        Ok(sqlx::query_as::<_, Application>(&format!(
            r#"
            SELECT {APPLICATION_COLUMNS} FROM applications
            WHERE job_id = ANY($1)
            ORDER BY applied_at DESC, id DESC
            "#
        ))
        .bind(job_ids)
        .fetch_all(&self.pool)
        .await?)
    }
}

#[async_trait]
impl ResumeRepo for PgStore {
    async fn upsert(&self, email: &str, resume_url: &str) -> Result<UserResume, AppError> {
        Ok(sqlx::query_as::<_, UserResume>(
            r#"
            INSERT INTO user_resumes (email, resume)
            VALUES ($1, $2)
            ON CONFLICT (email) DO UPDATE
            SET resume = EXCLUDED.resume, uploaded_at = NOW()
            RETURNING id, email, resume, uploaded_at
            "#,
        )
        .bind(email)
        .bind(resume_url)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserResume>, AppError> {
        Ok(sqlx::query_as::<_, UserResume>(
            "SELECT id, email, resume, uploaded_at FROM user_resumes WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?)
    }
}
