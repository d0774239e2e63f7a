//! Prediction request payload and validation
//!
//! The candidate lists mirror the form's select options; validation
//! happens server-side so the JSON surface cannot bypass them.

use crate::data::SalaryRecord;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Experience levels the model is trained on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperienceLevel {
    #[serde(rename = "Entry-level")]
    EntryLevel,
    #[serde(rename = "Mid-level")]
    MidLevel,
    Senior,
    Executive,
}

impl ExperienceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::EntryLevel => "Entry-level",
            ExperienceLevel::MidLevel => "Mid-level",
            ExperienceLevel::Senior => "Senior",
            ExperienceLevel::Executive => "Executive",
        }
    }

    pub const ALL: [ExperienceLevel; 4] = [
        ExperienceLevel::EntryLevel,
        ExperienceLevel::MidLevel,
        ExperienceLevel::Senior,
        ExperienceLevel::Executive,
    ];
}

/// Job titles offered by the form.
pub const JOB_TITLES: [&str; 23] = [
    "AI Engineer",
    "Analytics Engineer",
    "BI Developer",
    "Big Data Engineer",
    "Computer Vision Engineer",
    "Data Analyst",
    "Data Architect",
    "Data Engineer",
    "Data Science Consultant",
    "Data Scientist",
    "Deep Learning Engineer",
    "ETL Developer",
    "Financial Data Analyst",
    "Head of Data",
    "Lead Data Analyst",
    "Lead Data Scientist",
    "ML Engineer",
    "Machine Learning Engineer",
    "Principal Data Scientist",
    "Research Engineer",
    "Research Scientist",
    "Software Engineer",
    "Other",
];

/// Company locations offered by the form.
pub const COMPANY_LOCATIONS: [&str; 48] = [
    "AE", "AT", "AU", "BE", "BR", "CA", "CH", "CL", "CO", "CY", "CZ", "DE", "DK", "EE", "ES",
    "FI", "FR", "GB", "GH", "GR", "HR", "HU", "IE", "IN", "IR", "IT", "JP", "LU", "MT", "MX",
    "NG", "NL", "NZ", "PH", "PK", "PL", "PR", "PT", "RO", "RU", "SG", "SI", "SK", "TH", "TR",
    "UA", "US", "VN",
];

/// Inclusive work-year bounds accepted by the form.
pub const WORK_YEAR_MIN: i32 = 2020;
pub const WORK_YEAR_MAX: i32 = 2025;

/// Slider step of the remote-ratio widget.
pub const REMOTE_RATIO_STEP: u32 = 5;

/// Request-level validation failures.
///
/// A blank employee name is a warning (the submission is simply not
/// predicted); every other variant is an invalid field value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("please enter the employee name")]
    BlankEmployeeName,

    #[error("unknown job title: {0}")]
    UnknownJobTitle(String),

    #[error("company location must be a two-letter country code, got {0:?}")]
    MalformedCountryCode(String),

    #[error("remote ratio must be between 0 and 100 in steps of {REMOTE_RATIO_STEP}, got {0}")]
    InvalidRemoteRatio(u32),

    #[error("work year must be between {WORK_YEAR_MIN} and {WORK_YEAR_MAX}, got {0}")]
    InvalidWorkYear(i32),
}

/// One prediction submission, built fresh per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub employee_name: String,
    pub experience_level: ExperienceLevel,
    pub job_title: String,
    pub company_location: String,
    pub remote_ratio: u32,
    pub work_year: i32,
}

impl PredictionRequest {
    /// Validate the submission against the form's candidate lists and
    /// ranges. Checks the name first so a blank submission surfaces as
    /// a warning before any field error.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.employee_name.trim().is_empty() {
            return Err(ValidationError::BlankEmployeeName);
        }

        if !JOB_TITLES.contains(&self.job_title.as_str()) {
            return Err(ValidationError::UnknownJobTitle(self.job_title.clone()));
        }

        // Codes outside the select list are tolerated (currency lookup
        // falls back to USD), but they must at least look like codes.
        let code = self.company_location.as_str();
        if code.len() != 2 || !code.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(ValidationError::MalformedCountryCode(
                self.company_location.clone(),
            ));
        }

        if self.remote_ratio > 100 || self.remote_ratio % REMOTE_RATIO_STEP != 0 {
            return Err(ValidationError::InvalidRemoteRatio(self.remote_ratio));
        }

        if !(WORK_YEAR_MIN..=WORK_YEAR_MAX).contains(&self.work_year) {
            return Err(ValidationError::InvalidWorkYear(self.work_year));
        }

        Ok(())
    }

    /// The single-row feature table for this submission, in training
    /// column order.
    pub fn to_record(&self) -> SalaryRecord {
        SalaryRecord {
            experience_level: self.experience_level.as_str().to_string(),
            job_title: self.job_title.clone(),
            company_location: self.company_location.clone(),
            remote_ratio: Some(self.remote_ratio as f64),
            work_year: Some(self.work_year as f64),
            salary_in_usd: None,
        }
    }
}
