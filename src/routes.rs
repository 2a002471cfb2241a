//! REST endpoints for form intake and the interview loop.
//!
//! One logical session: the interview state lives behind a single RwLock
//! owned here, created at intake and discarded on reset. No session means
//! interview routes answer 404.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;

use crate::error::{Error, InterviewError};
use crate::form::Form;
use crate::interview::{InterviewDriver, InterviewPhase, InterviewState, Turn};
use crate::store::FormStore;

/// Shared state for the interview routes.
#[derive(Clone)]
pub struct AppState {
    pub driver: Arc<InterviewDriver>,
    pub store: Arc<FormStore>,
    pub session: Arc<RwLock<Option<InterviewState>>>,
}

impl AppState {
    pub fn new(driver: Arc<InterviewDriver>, store: Arc<FormStore>) -> Self {
        Self {
            driver,
            store,
            session: Arc::new(RwLock::new(None)),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CreateFormRequest {
    goal: String,
    /// The raw multi-line question field, one question per line.
    questions: String,
}

#[derive(Debug, Serialize)]
struct CreateFormResponse {
    form_id: String,
}

#[derive(Debug, Deserialize)]
struct ReplyRequest {
    content: String,
}

/// Snapshot of the running interview for the transcript view.
#[derive(Debug, Serialize)]
struct InterviewView {
    form_id: String,
    goal: String,
    phase: InterviewPhase,
    transcript: Vec<Turn>,
    pending_question: Option<String>,
    cursor: usize,
    answered_count: usize,
    total_questions: usize,
    complete: bool,
}

impl InterviewView {
    fn from_state(state: &InterviewState) -> Self {
        Self {
            form_id: state.form.form_id.clone(),
            goal: state.form.goal.clone(),
            phase: state.phase(),
            transcript: state.transcript.clone(),
            pending_question: state.pending_question.clone(),
            cursor: state.cursor,
            answered_count: state.answered.len(),
            total_questions: state.form.questions.len(),
            complete: state.complete,
        }
    }
}

fn error_response(err: &Error) -> Response {
    let status = match err {
        Error::Intake(_) => StatusCode::UNPROCESSABLE_ENTITY,
        Error::Interview(InterviewError::EmptyReply) => StatusCode::UNPROCESSABLE_ENTITY,
        Error::Interview(_) => StatusCode::CONFLICT,
        Error::Llm(_) => StatusCode::BAD_GATEWAY,
        Error::Config(_) | Error::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "error": err.to_string() }))).into_response()
}

fn no_session_response() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "No form loaded yet. Create one first." })),
    )
        .into_response()
}

/// POST /api/forms
///
/// Intake: validate the question list, persist the form document, and
/// start a fresh interview session. Rejection leaves everything unchanged.
async fn create_form(
    State(state): State<AppState>,
    Json(req): Json<CreateFormRequest>,
) -> Response {
    let form = match Form::new(&req.goal, &req.questions) {
        Ok(form) => form,
        Err(e) => return error_response(&e.into()),
    };
    if let Err(e) = state.store.save_form(&form).await {
        return error_response(&e.into());
    }
    tracing::info!(form_id = %form.form_id, questions = form.questions.len(), "form created");

    let form_id = form.form_id.clone();
    *state.session.write().await = Some(InterviewState::new(form));
    (StatusCode::CREATED, Json(CreateFormResponse { form_id })).into_response()
}

/// POST /api/interview/question
///
/// Get or generate the pending assistant utterance. An LLM failure
/// answers 502 with the session untouched; re-invoking retries the step.
async fn next_question(State(state): State<AppState>) -> Response {
    let mut session = state.session.write().await;
    let Some(interview) = session.as_mut() else {
        return no_session_response();
    };

    let question = match state.driver.next_question(interview).await {
        Ok(question) => question,
        Err(e) => return error_response(&e),
    };
    if interview.complete {
        persist_transcript(&state.store, interview).await;
    }

    Json(json!({ "question": question, "complete": interview.complete })).into_response()
}

/// POST /api/interview/reply
async fn submit_reply(
    State(state): State<AppState>,
    Json(req): Json<ReplyRequest>,
) -> Response {
    let mut session = state.session.write().await;
    let Some(interview) = session.as_mut() else {
        return no_session_response();
    };

    if let Err(e) = state.driver.submit_reply(interview, &req.content) {
        return error_response(&e);
    }
    if interview.complete {
        persist_transcript(&state.store, interview).await;
    }

    Json(InterviewView::from_state(interview)).into_response()
}

/// GET /api/interview — the running transcript view.
async fn interview_status(State(state): State<AppState>) -> Response {
    let session = state.session.read().await;
    match session.as_ref() {
        Some(interview) => Json(InterviewView::from_state(interview)).into_response(),
        None => no_session_response(),
    }
}

/// GET /api/interview/export
///
/// The transcript as a downloadable JSON array of `{role, content}`.
async fn export_transcript(State(state): State<AppState>) -> Response {
    let session = state.session.read().await;
    let Some(interview) = session.as_ref() else {
        return no_session_response();
    };

    let body = match interview.export() {
        Ok(body) => body,
        Err(e) => return error_response(&Error::Store(e.into())),
    };
    let filename = format!("{}_conversation.json", interview.form.form_id);
    (
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    )
        .into_response()
}

/// POST /api/interview/reset — back to intake.
async fn reset(State(state): State<AppState>) -> Response {
    *state.session.write().await = None;
    StatusCode::NO_CONTENT.into_response()
}

/// Write the completed transcript to the responses directory. Failure is
/// logged, not surfaced — the in-memory transcript is still exportable.
async fn persist_transcript(store: &FormStore, interview: &InterviewState) {
    if let Err(e) = store
        .save_transcript(&interview.form.form_id, &interview.transcript)
        .await
    {
        tracing::warn!(form_id = %interview.form.form_id, "failed to persist transcript: {e}");
    }
}

/// Build the REST router.
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/forms", post(create_form))
        .route("/api/interview", get(interview_status))
        .route("/api/interview/question", post(next_question))
        .route("/api/interview/reply", post(submit_reply))
        .route("/api/interview/export", get(export_transcript))
        .route("/api/interview/reset", post(reset))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
