//! Job store — the hosted backend behind the job board.
//!
//! `AppState` holds an `Arc<dyn JobStore>`. The default backend is a
//! Supabase project reached through its PostgREST interface.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Deserializer};
use thiserror::Error;
use tracing::debug;

use crate::models::job::{CompanyRow, JobRow, NewJob};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("backend returned no row for the insert")]
    EmptyInsert,
}

/// Optional filters for the job listing. Blank values mean "no filter".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobFilter {
    pub location: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub company_id: Option<i64>,
    pub search: Option<String>,
}

/// An empty select sends `company_id=`; treat it like an absent parameter.
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(id) => id.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

#[async_trait]
pub trait JobStore: Send + Sync {
    async fn create_job(&self, job: &NewJob) -> Result<JobRow, StoreError>;
    async fn list_jobs(&self, filter: &JobFilter) -> Result<Vec<JobRow>, StoreError>;
    async fn list_companies(&self) -> Result<Vec<CompanyRow>, StoreError>;
}

#[derive(Debug, Deserialize)]
struct PostgrestError {
    message: String,
}

#[derive(Clone)]
pub struct PostgrestJobStore {
    client: Client,
    base_url: String,
    api_key: String,
}

impl PostgrestJobStore {
    pub fn new(base_url: &str, api_key: String) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn table(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.base_url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn send<T: serde::de::DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, StoreError> {
        let response = self.authorized(request).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<PostgrestError>(&body)
                .map(|e| e.message)
                .unwrap_or(body);
            return Err(StoreError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl JobStore for PostgrestJobStore {
    async fn create_job(&self, job: &NewJob) -> Result<JobRow, StoreError> {
        let request = self
            .client
            .post(self.table("jobs"))
            .header("Prefer", "return=representation")
            .json(&[job]);

        let rows: Vec<JobRow> = self.send(request).await?;
        let row = rows.into_iter().next().ok_or(StoreError::EmptyInsert)?;
        debug!(job_id = row.id, "Job created");
        Ok(row)
    }

    async fn list_jobs(&self, filter: &JobFilter) -> Result<Vec<JobRow>, StoreError> {
        let mut query: Vec<(&str, String)> = vec![("select", "*".to_string())];
        if let Some(location) = filter.location.as_deref().filter(|l| !l.is_empty()) {
            query.push(("location", format!("eq.{location}")));
        }
        if let Some(company_id) = filter.company_id {
            query.push(("company_id", format!("eq.{company_id}")));
        }
        if let Some(search) = filter.search.as_deref().filter(|s| !s.trim().is_empty()) {
            query.push(("title", format!("ilike.*{}*", search.trim())));
        }

        let request = self.client.get(self.table("jobs")).query(&query);
        self.send(request).await
    }

    async fn list_companies(&self) -> Result<Vec<CompanyRow>, StoreError> {
        let request = self
            .client
            .get(self.table("companies"))
            .query(&[("select", "*")]);
        self.send(request).await
    }
}
