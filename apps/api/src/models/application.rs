use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::job::JobView;

/// Review state of an application. Any state may move to any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "application_status")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 3] = [
        ApplicationStatus::Pending,
        ApplicationStatus::Accepted,
        ApplicationStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "Pending",
            ApplicationStatus::Accepted => "Accepted",
            ApplicationStatus::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl FromStr for ApplicationStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ApplicationStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Application {
    pub id: i64,
    pub user_email: String,
    pub user_name: Option<String>,
    pub user_img: Option<String>,
    pub job_id: i64,
    pub resume: String,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewApplication {
    pub user_email: String,
    pub user_name: Option<String>,
    pub user_img: Option<String>,
    pub job_id: i64,
    pub resume: String,
}

/// Result of a conflict-guarded insert on (user_email, job_id).
#[derive(Debug, Clone)]
pub enum InsertOutcome {
    Created(Application),
    AlreadyExists,
}

/// An application with its job (and the job's company) nested.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationView {
    #[serde(flatten)]
    pub application: Application,
    pub job: Option<JobView>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parses_exact_names() {
        assert_eq!("Pending".parse(), Ok(ApplicationStatus::Pending));
        assert_eq!("Accepted".parse(), Ok(ApplicationStatus::Accepted));
        assert_eq!("Rejected".parse(), Ok(ApplicationStatus::Rejected));
    }

    #[test]
    fn test_status_rejects_unknown_and_wrong_case() {
        assert!("Bogus".parse::<ApplicationStatus>().is_err());
        assert!("accepted".parse::<ApplicationStatus>().is_err());
        assert!("".parse::<ApplicationStatus>().is_err());
    }

    #[test]
    fn test_status_defaults_to_pending() {
        assert_eq!(ApplicationStatus::default(), ApplicationStatus::Pending);
    }

    #[test]
    fn test_status_serializes_as_display_name() {
        let json = serde_json::to_string(&ApplicationStatus::Accepted).unwrap();
        assert_eq!(json, "\"Accepted\"");
    }
}
