use std::sync::Arc;

use chrono::{TimeZone, Utc};

use crate::config::Config;
use crate::models::company::{Company, NewCompany};
use crate::models::job::{Job, JobFields};
use crate::repository::memory::MemoryStore;
use crate::repository::Repositories;
use crate::state::AppState;
use crate::storage::memory::MemoryObjectStore;

/// `AppState` wired to in-memory backends, with handles kept for assertions.
pub struct TestApp {
    pub state: AppState,
    pub store: Arc<MemoryStore>,
    pub objects: Arc<MemoryObjectStore>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::default());
        let objects = Arc::new(MemoryObjectStore::default());
        let state = AppState {
            repos: Repositories::from_store(store.clone()),
            storage: objects.clone(),
            config: Config::for_tests(),
        };
        TestApp {
            state,
            store,
            objects,
        }
    }

    /// Inserts a company directly; its password hash is a placeholder.
    pub async fn seed_company(&self, email: &str) -> Company {
        self.state
            .repos
            .companies
            .create(NewCompany {
                company_name: format!("Company {email}"),
                email: email.to_string(),
                password_hash: "unused".to_string(),
                image: Some(format!("http://logos/{email}")),
            })
            .await
            .unwrap()
    }

    pub async fn seed_job(&self, company_id: i64) -> Job {
        self.state
            .repos
            .jobs
            .create(job_fields(company_id))
            .await
            .unwrap()
    }
}

pub fn job_fields(company_id: i64) -> JobFields {
    JobFields {
        title: "Backend Engineer".to_string(),
        location: "Remote".to_string(),
        level: "Senior".to_string(),
        company_id,
        description: "Build and run the hiring APIs".to_string(),
        salary: 120_000,
        date: Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap(),
        category: "Engineering".to_string(),
        visible: true,
    }
}
