use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A row of the `jobs` table as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRow {
    pub id: i64,
    pub recruiter_id: String,
    pub title: String,
    pub company_id: i64,
    pub description: String,
    pub location: String,
    pub requirements: String,
    #[serde(rename = "isOpen")]
    pub is_open: bool,
    pub created_at: Option<DateTime<Utc>>,
}

/// Insert payload for the `jobs` table. Built only from a validated form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewJob {
    pub recruiter_id: String,
    pub title: String,
    pub company_id: i64,
    pub description: String,
    pub location: String,
    pub requirements: String,
    #[serde(rename = "isOpen")]
    pub is_open: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyRow {
    pub id: i64,
    pub name: String,
    pub logo_url: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}
