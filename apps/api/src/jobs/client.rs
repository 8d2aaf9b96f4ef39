//! Job search client — pluggable, trait-based access to the job-search API.
//!
//! Default: `JSearchClient` (RapidAPI JSearch over HTTP).
//! `AppState` holds an `Arc<dyn JobSearch>` so handlers can run against a double.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, warn};

use crate::jobs::models::{JobPosting, SearchResponse};
use crate::jobs::query::JobQuery;

#[derive(Debug, Error)]
pub enum JobSearchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Job search API returned status {status}")]
    Status { status: u16 },
}

#[async_trait]
pub trait JobSearch: Send + Sync {
    /// Returns the postings for `query`; an empty vec means the API found nothing.
    async fn search(&self, query: &JobQuery) -> Result<Vec<JobPosting>, JobSearchError>;
}

/// RapidAPI JSearch client.
#[derive(Clone)]
pub struct JSearchClient {
    client: Client,
    api_key: String,
    host: String,
    base_url: String,
}

impl JSearchClient {
    pub fn new(
        api_key: String,
        host: String,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, JobSearchError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            host,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn search_url(&self) -> String {
        format!("{}/search", self.base_url)
    }
}

#[async_trait]
impl JobSearch for JSearchClient {
    async fn search(&self, query: &JobQuery) -> Result<Vec<JobPosting>, JobSearchError> {
        debug!(query = %query.query, "Searching jobs");

        let response = self
            .client
            .get(self.search_url())
            .header("x-rapidapi-key", &self.api_key)
            .header("x-rapidapi-host", &self.host)
            .query(&query.params())
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() != 200 {
            warn!("Job search API returned {status}");
            return Err(JobSearchError::Status {
                status: status.as_u16(),
            });
        }

        let postings = response.json::<SearchResponse>().await?.into_postings();
        debug!("Job search returned {} postings", postings.len());
        Ok(postings)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Query, State},
        http::{HeaderMap, StatusCode},
        routing::get,
        Json, Router,
    };
    use serde_json::json;

    use super::*;

    type Seen = Arc<Mutex<Vec<(HeaderMap, HashMap<String, String>)>>>;

    /// Serves `app` on an ephemeral local port and returns its base URL.
    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        format!("http://{addr}")
    }

    fn client_for(base_url: &str) -> JSearchClient {
        JSearchClient::new(
            "secret-key".to_string(),
            "jsearch.p.rapidapi.com".to_string(),
            base_url,
            Duration::from_secs(5),
        )
        .unwrap()
    }

    fn query() -> JobQuery {
        JobQuery {
            query: "Rust developer Full-time remote".to_string(),
        }
    }

    #[tokio::test]
    async fn test_search_sends_rapidapi_headers_and_fixed_params() {
        let seen: Seen = Arc::default();
        let app = Router::new()
            .route(
                "/search",
                get(
                    |State(seen): State<Seen>,
                     headers: HeaderMap,
                     Query(params): Query<HashMap<String, String>>| async move {
                        seen.lock().unwrap().push((headers, params));
                        Json(json!({
                            "status": "OK",
                            "data": [{"job_title": "Rust Engineer", "employer_name": "Ferris Labs"}]
                        }))
                    },
                ),
            )
            .with_state(seen.clone());
        let base_url = serve(app).await;

        let jobs = client_for(&base_url).search(&query()).await.unwrap();

        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].title(), "Rust Engineer");

        let seen = seen.lock().unwrap();
        let (headers, params) = &seen[0];
        assert_eq!(headers["x-rapidapi-key"], "secret-key");
        assert_eq!(headers["x-rapidapi-host"], "jsearch.p.rapidapi.com");
        assert_eq!(params["query"], "Rust developer Full-time remote");
        assert_eq!(params["page"], "1");
        assert_eq!(params["num_pages"], "1");
        assert_eq!(params["country"], "us");
        assert_eq!(params["date_posted"], "all");
        assert_eq!(params.len(), 5);
    }

    #[tokio::test]
    async fn test_server_error_is_status_error_without_retry() {
        let calls: Arc<Mutex<u32>> = Arc::default();
        let app = Router::new()
            .route(
                "/search",
                get(|State(calls): State<Arc<Mutex<u32>>>| async move {
                    *calls.lock().unwrap() += 1;
                    StatusCode::INTERNAL_SERVER_ERROR
                }),
            )
            .with_state(calls.clone());
        let base_url = serve(app).await;

        let err = client_for(&base_url).search(&query()).await.unwrap_err();

        assert!(matches!(err, JobSearchError::Status { status: 500 }));
        assert_eq!(*calls.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_null_data_is_empty_result() {
        let app = Router::new().route(
            "/search",
            get(|| async { Json(json!({"status": "OK", "data": null})) }),
        );
        let base_url = serve(app).await;

        let jobs = client_for(&base_url).search(&query()).await.unwrap();

        assert!(jobs.is_empty());
    }

    #[test]
    fn test_search_url_joins_base() {
        let client = JSearchClient::new(
            "key".to_string(),
            "jsearch.p.rapidapi.com".to_string(),
            "https://jsearch.p.rapidapi.com/",
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(client.search_url(), "https://jsearch.p.rapidapi.com/search");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_http_error() {
        let client = JSearchClient::new(
            "key".to_string(),
            "localhost".to_string(),
            "http://127.0.0.1:9",
            Duration::from_millis(500),
        )
        .unwrap();
        let query = JobQuery {
            query: "Developer".to_string(),
        };
        let err = client.search(&query).await.unwrap_err();
        assert!(matches!(err, JobSearchError::Http(_)));
    }
}
