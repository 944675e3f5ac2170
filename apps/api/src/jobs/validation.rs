//! Post-job form validation.
//!
//! Every field is required. The form sends `company_id` as the selected
//! option's string value; it must parse to a positive id.

use serde::{Deserialize, Serialize};

use crate::models::job::NewJob;

/// The post-job form as submitted. Missing fields deserialize as empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PostJobForm {
    pub title: String,
    pub description: String,
    pub location: String,
    pub company_id: String,
    pub requirements: String,
    pub recruiter_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl PostJobForm {
    /// Validates the form and builds the insert payload. New jobs start open.
    pub fn validate(&self) -> Result<NewJob, Vec<FieldError>> {
        let mut errors = Vec::new();
        let mut require = |field: &'static str, value: &str, message: &'static str| {
            if value.trim().is_empty() {
                errors.push(FieldError { field, message });
            }
        };

        require("title", &self.title, "Title is required");
        require("description", &self.description, "Description is required");
        require("location", &self.location, "Select a location");
        require("company_id", &self.company_id, "Select or Add a new Company");
        require("requirements", &self.requirements, "Requirements are required");
        require("recruiter_id", &self.recruiter_id, "Recruiter is required");

        let company_id = match self.company_id.trim().parse::<i64>() {
            Ok(id) if id > 0 => Some(id),
            _ => {
                if !self.company_id.trim().is_empty() {
                    errors.push(FieldError {
                        field: "company_id",
                        message: "Select or Add a new Company",
                    });
                }
                None
            }
        };

        match company_id {
            Some(company_id) if errors.is_empty() => Ok(NewJob {
                recruiter_id: self.recruiter_id.trim().to_string(),
                title: self.title.trim().to_string(),
                company_id,
                description: self.description.trim().to_string(),
                location: self.location.trim().to_string(),
                requirements: self.requirements.clone(),
                is_open: true,
            }),
            _ => Err(errors),
        }
    }
}
