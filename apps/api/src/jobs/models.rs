use serde::{Deserialize, Serialize};

use crate::session::{SalaryRange, ValidationError};

/// Employment type filter offered on the search form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmploymentType {
    #[default]
    All,
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
    Contractor,
    #[serde(rename = "Entry Level")]
    EntryLevel,
}

impl EmploymentType {
    pub const ALL: [EmploymentType; 5] = [
        EmploymentType::All,
        EmploymentType::FullTime,
        EmploymentType::PartTime,
        EmploymentType::Contractor,
        EmploymentType::EntryLevel,
    ];

    /// Label shown on the form; doubles as the query suffix.
    pub fn label(self) -> &'static str {
        match self {
            EmploymentType::All => "All",
            EmploymentType::FullTime => "Full-time",
            EmploymentType::PartTime => "Part-time",
            EmploymentType::Contractor => "Contractor",
            EmploymentType::EntryLevel => "Entry Level",
        }
    }

    pub fn query_suffix(self) -> Option<&'static str> {
        match self {
            EmploymentType::All => None,
            other => Some(other.label()),
        }
    }
}

/// "Remote Jobs Only?" filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemoteFilter {
    #[default]
    All,
    Yes,
    No,
}

impl RemoteFilter {
    pub const ALL: [RemoteFilter; 3] = [RemoteFilter::All, RemoteFilter::Yes, RemoteFilter::No];

    pub fn label(self) -> &'static str {
        match self {
            RemoteFilter::All => "All",
            RemoteFilter::Yes => "Yes",
            RemoteFilter::No => "No",
        }
    }

    pub fn query_suffix(self) -> Option<&'static str> {
        match self {
            RemoteFilter::All => None,
            RemoteFilter::Yes => Some("remote"),
            RemoteFilter::No => Some("onsite"),
        }
    }
}

/// One search submission.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchCriteria {
    pub query: String,
    pub employment_type: EmploymentType,
    pub remote: RemoteFilter,
    pub salary_range: SalaryRange,
}

/// Raw `POST /search` form body.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchForm {
    pub query: String,
    #[serde(default)]
    pub employment_type: EmploymentType,
    #[serde(default)]
    pub remote: RemoteFilter,
    pub salary_min: u32,
    pub salary_max: u32,
}

impl TryFrom<SearchForm> for SearchCriteria {
    type Error = ValidationError;

    fn try_from(form: SearchForm) -> Result<Self, Self::Error> {
        let query = form.query.trim().to_string();
        if query.is_empty() {
            return Err(ValidationError::EmptyQuery);
        }
        Ok(SearchCriteria {
            query,
            employment_type: form.employment_type,
            remote: form.remote,
            salary_range: SalaryRange::new(form.salary_min, form.salary_max)?,
        })
    }
}

/// One result record from the job-search API. Every field is optional upstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub job_title: Option<String>,
    pub employer_name: Option<String>,
    pub job_location: Option<String>,
    pub job_employment_type: Option<String>,
    pub job_posted_at: Option<String>,
    pub job_apply_link: Option<String>,
    pub job_description: Option<String>,
}

/// Envelope of the job-search response. A missing or null `data` counts as empty.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub data: Option<Vec<JobPosting>>,
}

impl SearchResponse {
    pub fn into_postings(self) -> Vec<JobPosting> {
        self.data.unwrap_or_default()
    }
}

impl JobPosting {
    pub fn title(&self) -> &str {
        field_or(&self.job_title, "No Title")
    }

    pub fn employer(&self) -> &str {
        field_or(&self.employer_name, "N/A")
    }

    pub fn location(&self) -> &str {
        field_or(&self.job_location, "N/A")
    }

    pub fn employment_type(&self) -> &str {
        field_or(&self.job_employment_type, "N/A")
    }

    pub fn posted_at(&self) -> &str {
        field_or(&self.job_posted_at, "N/A")
    }

    pub fn apply_link(&self) -> &str {
        field_or(&self.job_apply_link, "#")
    }

    pub fn description(&self) -> &str {
        field_or(&self.job_description, "No description available.")
    }

    /// Description handed to the tailoring prompt; empty when absent.
    pub fn description_for_tailoring(&self) -> &str {
        self.job_description.as_deref().unwrap_or("")
    }
}

fn field_or<'a>(value: &'a Option<String>, fallback: &'a str) -> &'a str {
    value.as_deref().unwrap_or(fallback)
}
