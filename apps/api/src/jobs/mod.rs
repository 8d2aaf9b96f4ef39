// Job search: criteria, query construction, and the job-search API client.

pub mod client;
pub mod models;
pub mod query;

pub use client::{JSearchClient, JobSearch, JobSearchError};
pub use models::{EmploymentType, JobPosting, RemoteFilter, SearchCriteria, SearchForm};
pub use query::JobQuery;
