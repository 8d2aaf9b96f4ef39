pub mod health;
pub mod pages;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Multipart framing allowance on top of the resume size limit.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/", get(pages::handle_index))
        .route("/search", post(pages::handle_search))
        .route("/suggestions", post(pages::handle_suggestions))
        .route("/new-search", post(pages::handle_new_search))
        .route("/jobs/:index/resume", post(pages::handle_upload_resume))
        .route("/jobs/:index/cover-letter", post(pages::handle_cover_letter))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use tower::ServiceExt;

    use super::pages::SESSION_COOKIE;
    use super::*;
    use crate::config::Config;
    use crate::jobs::JobPosting;
    use crate::session::actions::doubles::{FakeAdvisor, FakeJobSearch};
    use crate::session::actions::{NO_JOBS_MESSAGE, SEARCH_FAILED_MESSAGE, TAILORING_FAILED_MESSAGE};
    use crate::session::SessionStore;

    const SEARCH_BODY: &str =
        "query=Rust+developer&employment_type=Full-time&remote=Yes&salary_min=50000&salary_max=100000";
    const BOUNDARY: &str = "jobtailor-test-boundary";

    fn app(search: FakeJobSearch, advisor: FakeAdvisor) -> Router {
        app_with_store(search, advisor).0
    }

    fn app_with_store(search: FakeJobSearch, advisor: FakeAdvisor) -> (Router, SessionStore) {
        let advisor = Arc::new(advisor);
        let sessions = SessionStore::new(60);
        let router = build_router(AppState {
            config: Config::for_tests(),
            sessions: sessions.clone(),
            job_search: Arc::new(search),
            tailor: advisor.clone(),
            suggester: advisor,
        });
        (router, sessions)
    }

    fn content_type(response: &Response) -> String {
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string()
    }

    fn one_job() -> Vec<JobPosting> {
        vec![JobPosting {
            job_title: Some("Senior Rust Engineer".to_string()),
            employer_name: Some("Ferris Labs".to_string()),
            job_description: Some("Own the storage engine.".to_string()),
            ..Default::default()
        }]
    }

    fn form_post(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn empty_post(uri: &str, cookie: &str) -> Request<Body> {
        Request::post(uri)
            .header(header::COOKIE, cookie)
            .body(Body::empty())
            .unwrap()
    }

    fn get(uri: &str, cookie: &str) -> Request<Body> {
        Request::get(uri)
            .header(header::COOKIE, cookie)
            .body(Body::empty())
            .unwrap()
    }

    fn upload(uri: &str, cookie: &str, file_name: &str, content: &str) -> Request<Body> {
        let body = format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"resume\"; filename=\"{file_name}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n\
             {content}\r\n\
             --{BOUNDARY}--\r\n"
        );
        Request::post(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .header(header::COOKIE, cookie)
            .body(Body::from(body))
            .unwrap()
    }

    /// `name=value` pair from the response's session cookie.
    fn session_cookie(response: &Response) -> String {
        let raw = response
            .headers()
            .get(header::SET_COOKIE)
            .expect("session cookie issued")
            .to_str()
            .unwrap();
        assert!(raw.starts_with(SESSION_COOKIE));
        raw.split(';').next().unwrap().to_string()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn search_into_results(app: &Router) -> String {
        let response = app
            .clone()
            .oneshot(form_post("/search", SEARCH_BODY, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        session_cookie(&response)
    }

    #[tokio::test]
    async fn test_index_starts_on_search_page() {
        let app = app(FakeJobSearch::returning(vec![]), FakeAdvisor::ok());
        let response = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::SET_COOKIE).is_some());
        let html = body_text(response).await;
        assert!(html.contains("Job Search"));
        assert!(html.contains("Developer jobs in Chicago"));
    }

    #[tokio::test]
    async fn test_search_with_results_shows_listing() {
        let app = app(FakeJobSearch::returning(one_job()), FakeAdvisor::ok());
        let cookie = search_into_results(&app).await;

        let response = app.oneshot(get("/", &cookie)).await.unwrap();
        let html = body_text(response).await;
        assert!(html.contains("Job Listings"));
        assert!(html.contains("Senior Rust Engineer"));
        assert!(html.contains("Ferris Labs"));
        assert!(html.contains("New Search"));
    }

    #[tokio::test]
    async fn test_empty_search_stays_on_search_page() {
        let app = app(FakeJobSearch::returning(vec![]), FakeAdvisor::ok());
        let response = app
            .clone()
            .oneshot(form_post("/search", SEARCH_BODY, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let cookie = session_cookie(&response);
        let html = body_text(response).await;
        assert!(html.contains(NO_JOBS_MESSAGE));
        assert!(html.contains("Rust developer"));

        let html = body_text(app.oneshot(get("/", &cookie)).await.unwrap()).await;
        assert!(!html.contains("Job Listings"));
    }

    #[tokio::test]
    async fn test_search_api_error_shows_retry_message() {
        let app = app(FakeJobSearch::failing(500), FakeAdvisor::ok());
        let response = app
            .oneshot(form_post("/search", SEARCH_BODY, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains(SEARCH_FAILED_MESSAGE));
    }

    #[tokio::test]
    async fn test_invalid_salary_is_bad_request() {
        let app = app(FakeJobSearch::returning(one_job()), FakeAdvisor::ok());
        let body = "query=Rust&employment_type=All&remote=All&salary_min=200000&salary_max=100000";
        let response = app.oneshot(form_post("/search", body, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_undecodable_search_form_is_bad_request_page() {
        let bodies = [
            "query=Rust&employment_type=All&remote=All&salary_min=-10000&salary_max=100000",
            "query=Rust&employment_type=All&remote=All&salary_min=abc&salary_max=100000",
            "query=Rust&employment_type=All&remote=All&salary_max=100000",
            "query=Rust&employment_type=Freelance&remote=All&salary_min=0&salary_max=100000",
        ];
        for body in bodies {
            let app = app(FakeJobSearch::returning(one_job()), FakeAdvisor::ok());
            let response = app.oneshot(form_post("/search", body, None)).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
            assert!(content_type(&response).starts_with("text/html"), "body: {body}");
        }
    }

    #[tokio::test]
    async fn test_suggestions_without_query_field_is_bad_request_page() {
        let app = app(FakeJobSearch::returning(vec![]), FakeAdvisor::ok());
        let response = app
            .oneshot(form_post("/suggestions", "title=Data+Engineer", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(content_type(&response).starts_with("text/html"));
    }

    #[tokio::test]
    async fn test_new_search_returns_to_search_page() {
        let app = app(FakeJobSearch::returning(one_job()), FakeAdvisor::ok());
        let cookie = search_into_results(&app).await;

        let response = app
            .clone()
            .oneshot(empty_post("/new-search", &cookie))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let html = body_text(app.oneshot(get("/", &cookie)).await.unwrap()).await;
        assert!(!html.contains("Senior Rust Engineer"));
        assert!(html.contains("Select Employment Type"));
    }

    #[tokio::test]
    async fn test_resume_upload_shows_advice() {
        let app = app(FakeJobSearch::returning(one_job()), FakeAdvisor::ok());
        let cookie = search_into_results(&app).await;

        let response = app
            .clone()
            .oneshot(upload("/jobs/0/resume", &cookie, "resume.txt", "Hello World"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let html = body_text(app.oneshot(get("/", &cookie)).await.unwrap()).await;
        assert!(html.contains("Tailored Resume Recommendations:"));
        assert!(html.contains("Advice for [Hello World] against [Own the storage engine.]"));
    }

    #[tokio::test]
    async fn test_tailoring_failure_is_shown_on_card() {
        let app = app(FakeJobSearch::returning(one_job()), FakeAdvisor::failing());
        let cookie = search_into_results(&app).await;

        let response = app
            .clone()
            .oneshot(upload("/jobs/0/resume", &cookie, "resume.txt", "Hello World"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let html = body_text(app.oneshot(get("/", &cookie)).await.unwrap()).await;
        assert!(html.contains(TAILORING_FAILED_MESSAGE));
    }

    #[tokio::test]
    async fn test_upload_to_missing_job_is_not_found() {
        let app = app(FakeJobSearch::returning(one_job()), FakeAdvisor::ok());
        let cookie = search_into_results(&app).await;

        let response = app
            .oneshot(upload("/jobs/5/resume", &cookie, "resume.txt", "Hello World"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_upload_of_unsupported_type_is_bad_request() {
        let app = app(FakeJobSearch::returning(one_job()), FakeAdvisor::ok());
        let cookie = search_into_results(&app).await;

        let response = app
            .oneshot(upload("/jobs/0/resume", &cookie, "resume.docx", "binary"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_rejected_upload_leaves_no_session_behind() {
        let (app, sessions) = app_with_store(FakeJobSearch::returning(one_job()), FakeAdvisor::ok());
        let body = format!("--{BOUNDARY}--\r\n");
        let request = Request::post("/jobs/0/resume")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
        assert_eq!(sessions.len().await, 0);
    }

    #[tokio::test]
    async fn test_cover_letter_reveals_profile_link() {
        let app = app(FakeJobSearch::returning(one_job()), FakeAdvisor::ok());
        let cookie = search_into_results(&app).await;

        let response = app
            .clone()
            .oneshot(empty_post("/jobs/0/cover-letter", &cookie))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let html = body_text(app.oneshot(get("/", &cookie)).await.unwrap()).await;
        assert!(html.contains("www.linkedin.com"));
        assert!(!html.contains("Request Cover Letter via LinkedIn"));
    }

    #[tokio::test]
    async fn test_suggestions_render_on_search_page() {
        let app = app(FakeJobSearch::returning(vec![]), FakeAdvisor::ok());
        let response = app
            .oneshot(form_post("/suggestions", "query=Data+Engineer", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Similar Job Titles"));
        assert!(html.contains("Staff Data Engineer"));
    }

    #[tokio::test]
    async fn test_health_reports_ok() {
        let app = app(FakeJobSearch::returning(vec![]), FakeAdvisor::ok());
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["sessions"], 0);
    }
}
