//! Axum handlers for the server-rendered job search pages.

use askama::Template;
use axum::{
    extract::{Multipart, Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::{
    cookie::{Cookie, CookieJar, SameSite},
    WithRejection,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::jobs::{SearchCriteria, SearchForm};
use crate::resume::ResumeFile;
use crate::session::{actions, Page, SharedSession};
use crate::state::AppState;
use crate::views::{render_current, SearchPage, Selection};

pub const SESSION_COOKIE: &str = "jobtailor_session";

const RESUME_FIELD: &str = "resume";

/// Resolves the caller's session from its cookie, issuing a new cookie when the
/// session had to be created.
async fn open_session(state: &AppState, jar: CookieJar) -> (CookieJar, SharedSession) {
    let requested = jar
        .get(SESSION_COOKIE)
        .and_then(|c| Uuid::parse_str(c.value()).ok());
    let (id, session) = state.sessions.load_or_create(requested, Utc::now()).await;

    if requested == Some(id) {
        return (jar, session);
    }
    let cookie = Cookie::build((SESSION_COOKIE, id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);
    (jar.add(cookie), session)
}

fn job_anchor(index: usize) -> Redirect {
    Redirect::to(&format!("/#job-{index}"))
}

/// GET /
///
/// Renders the page the session is currently on.
pub async fn handle_index(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Html<String>), AppError> {
    let (jar, session) = open_session(&state, jar).await;
    let session = session.lock().await;
    let html = render_current(&session, &state.config.profile_url, Selection::default(), None)?;
    Ok((jar, Html(html)))
}

/// POST /search
///
/// Runs the job search. A non-empty result redirects to the results page;
/// otherwise the search page is rendered again with a message.
pub async fn handle_search(
    State(state): State<AppState>,
    jar: CookieJar,
    WithRejection(Form(form), _): WithRejection<Form<SearchForm>, AppError>,
) -> Result<(CookieJar, Response), AppError> {
    let (jar, session) = open_session(&state, jar).await;
    let mut session = session.lock().await;

    if session.page() != Page::Search {
        debug!("Search submitted while on results page; ignoring");
        return Ok((jar, Redirect::to("/").into_response()));
    }

    let selection = Selection {
        employment_type: form.employment_type,
        remote: form.remote,
    };
    let criteria = SearchCriteria::try_from(form)?;

    let outcome = actions::submit_search(&mut session, state.job_search.as_ref(), criteria).await;
    match outcome.message() {
        None => Ok((jar, Redirect::to("/").into_response())),
        Some(message) => {
            let html = SearchPage::new(&session, selection, Some(message)).render()?;
            Ok((jar, Html(html).into_response()))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SuggestForm {
    pub query: String,
}

/// POST /suggestions
///
/// Asks the language model for similar job titles and shows them on the search page.
pub async fn handle_suggestions(
    State(state): State<AppState>,
    jar: CookieJar,
    WithRejection(Form(form), _): WithRejection<Form<SuggestForm>, AppError>,
) -> Result<(CookieJar, Response), AppError> {
    let (jar, session) = open_session(&state, jar).await;
    let mut session = session.lock().await;

    if session.page() != Page::Search {
        return Ok((jar, Redirect::to("/").into_response()));
    }

    let query = form.query.trim();
    if query.is_empty() {
        return Err(AppError::Validation("Search query cannot be empty".to_string()));
    }

    let message = actions::suggest_titles(&mut session, state.suggester.as_ref(), query).await;
    let html = SearchPage::new(&session, Selection::default(), message).render()?;
    Ok((jar, Html(html).into_response()))
}

/// POST /jobs/:index/resume
///
/// Accepts a `.pdf` or `.txt` resume for one job and generates tailoring advice.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    jar: CookieJar,
    multipart: Multipart,
) -> Result<(CookieJar, Redirect), AppError> {
    let file = read_resume_field(multipart, state.config.max_upload_bytes).await?;

    let (jar, session) = open_session(&state, jar).await;
    let mut session = session.lock().await;
    actions::upload_resume(&mut session, state.tailor.as_ref(), index, file).await?;
    Ok((jar, job_anchor(index)))
}

async fn read_resume_field(mut multipart: Multipart, max_bytes: usize) -> Result<ResumeFile, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid upload: {e}")))?
    {
        if field.name() != Some(RESUME_FIELD) {
            continue;
        }
        let name = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Invalid upload: {e}")))?;
        if bytes.len() > max_bytes {
            return Err(AppError::Validation(format!(
                "Resume is too large. Maximum size is {max_bytes} bytes"
            )));
        }
        return Ok(ResumeFile { name, bytes });
    }
    Err(AppError::Validation("No resume file was uploaded".to_string()))
}

/// POST /jobs/:index/cover-letter
///
/// Reveals the contact link offered instead of a generated cover letter.
pub async fn handle_cover_letter(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    jar: CookieJar,
) -> Result<(CookieJar, Redirect), AppError> {
    let (jar, session) = open_session(&state, jar).await;
    let mut session = session.lock().await;
    actions::request_cover_letter(&mut session, index)?;
    Ok((jar, job_anchor(index)))
}

/// POST /new-search
///
/// Discards the current results and returns to the search page.
pub async fn handle_new_search(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Redirect) {
    let (jar, session) = open_session(&state, jar).await;
    session.lock().await.new_search();
    (jar, Redirect::to("/"))
}
