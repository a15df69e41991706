use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A company account. Not `Serialize`; the password hash must
/// never reach a response body. Use [`CompanyProfile`] for output.
#[derive(Debug, Clone, FromRow)]
pub struct Company {
    pub id: i64,
    pub company_name: String,
    pub email: String,
    pub password_hash: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewCompany {
    pub company_name: String,
    pub email: String,
    pub password_hash: String,
    pub image: Option<String>,
}

/// Public view of a company, embedded in job listings and returned on login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyProfile {
    #[serde(rename = "_id")]
    pub id: i64,
    pub company_name: String,
    pub email: String,
    pub image: String,
}

impl From<&Company> for CompanyProfile {
    fn from(company: &Company) -> Self {
        CompanyProfile {
            id: company.id,
            company_name: company.company_name.clone(),
            email: company.email.clone(),
            image: company.image.clone().unwrap_or_default(),
        }
    }
}
