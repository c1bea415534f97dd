//! HTTP transport for the dialogue: turn submission carries audio, the
//! initial turn carries a language selection, and every response pairs
//! the assistant text with a rendered-audio reference. The engine never
//! sees any of this; transcription and synthesis happen here, around it.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};

use super::content::Language;
use super::engine::{DialogueEngine, TurnReply};
use super::session::{FieldSnapshot, SessionId};
use super::speech::{AudioHandle, Synthesizer, Transcriber};
use crate::applicants::{ApplicantRecord, ApplicantRepository};

/// Everything the IVR routes need: the engine plus the three
/// collaborators invoked around it.
pub struct IvrState<T, S, R> {
    pub engine: Arc<DialogueEngine>,
    pub transcriber: Arc<T>,
    pub synthesizer: Arc<S>,
    pub records: Arc<R>,
}

/// Routes for the voice intake flow.
pub fn ivr_router<T, S, R>(state: Arc<IvrState<T, S, R>>) -> Router
where
    T: Transcriber + 'static,
    S: Synthesizer + 'static,
    R: ApplicantRepository + 'static,
{
    Router::new()
        .route("/api/v1/ivr/start", post(start_handler::<T, S, R>))
        .route("/api/v1/ivr", post(turn_handler::<T, S, R>))
        .route("/api/v1/ivr/reset", post(reset_handler::<T, S, R>))
        .route("/audio/:handle", get(audio_handler::<T, S, R>))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub(crate) struct StartRequest {
    pub(crate) session_id: String,
    #[serde(default)]
    pub(crate) language: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct TurnResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) user_text: Option<String>,
    pub(crate) assistant_text: String,
    pub(crate) finished: bool,
    pub(crate) fields: FieldSnapshot,
    pub(crate) audio_url: String,
}

pub(crate) async fn start_handler<T, S, R>(
    State(state): State<Arc<IvrState<T, S, R>>>,
    Json(request): Json<StartRequest>,
) -> Response
where
    T: Transcriber + 'static,
    S: Synthesizer + 'static,
    R: ApplicantRepository + 'static,
{
    let language = match request.language.as_deref() {
        None => Language::default(),
        Some(code) => match Language::from_code(code) {
            Ok(language) => language,
            Err(err) => {
                return (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(json!({ "error": err.to_string() })),
                )
                    .into_response();
            }
        },
    };

    let session_id = SessionId(request.session_id);
    let reply = state.engine.initial_question(&session_id, language);
    respond_with_audio(&state, language, None, reply)
}

#[derive(Debug, Deserialize)]
pub(crate) struct TurnRequest {
    pub(crate) session_id: String,
    pub(crate) audio_base64: String,
}

pub(crate) async fn turn_handler<T, S, R>(
    State(state): State<Arc<IvrState<T, S, R>>>,
    Json(request): Json<TurnRequest>,
) -> Response
where
    T: Transcriber + 'static,
    S: Synthesizer + 'static,
    R: ApplicantRepository + 'static,
{
    let audio = match BASE64.decode(request.audio_base64.as_bytes()) {
        Ok(audio) => audio,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "audio_base64 is not valid base64" })),
            )
                .into_response();
        }
    };

    let session_id = SessionId(request.session_id);
    // Pick the transcription locale before the turn runs; a session that
    // does not exist yet transcribes in the default language, matching
    // the engine's defensive auto-start.
    let language = state
        .engine
        .store()
        .language_of(&session_id)
        .unwrap_or_default();

    let user_text = match state.transcriber.transcribe(&audio, language) {
        Ok(text) => text,
        Err(err) => {
            warn!(session = %session_id.0, error = %err, "transcription failed");
            return (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "error": err.to_string() })),
            )
                .into_response();
        }
    };
    debug!(session = %session_id.0, %language, user_text, "transcribed turn");

    let reply = state.engine.process_turn(&session_id, &user_text);

    if reply.finished {
        let record = ApplicantRecord::from_snapshot(&reply.fields);
        if let Err(err) = state.records.insert(record) {
            warn!(session = %session_id.0, error = %err, "failed to persist applicant record");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": err.to_string() })),
            )
                .into_response();
        }
    }

    respond_with_audio(&state, language, Some(user_text), reply)
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResetRequest {
    pub(crate) session_id: String,
}

pub(crate) async fn reset_handler<T, S, R>(
    State(state): State<Arc<IvrState<T, S, R>>>,
    Json(request): Json<ResetRequest>,
) -> Response
where
    T: Transcriber + 'static,
    S: Synthesizer + 'static,
    R: ApplicantRepository + 'static,
{
    state.engine.reset(&SessionId(request.session_id));
    (StatusCode::OK, Json(json!({ "status": "reset" }))).into_response()
}

pub(crate) async fn audio_handler<T, S, R>(
    State(state): State<Arc<IvrState<T, S, R>>>,
    Path(handle): Path<String>,
) -> Response
where
    T: Transcriber + 'static,
    S: Synthesizer + 'static,
    R: ApplicantRepository + 'static,
{
    match state.synthesizer.fetch(&AudioHandle(handle)) {
        Ok(Some(bytes)) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "audio/mpeg")],
            bytes,
        )
            .into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "unknown audio handle" })),
        )
            .into_response(),
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": err.to_string() })),
        )
            .into_response(),
    }
}

/// Synthesize the assistant text and attach the audio reference; every
/// engine response, including validation failures, gets a rendering.
fn respond_with_audio<T, S, R>(
    state: &IvrState<T, S, R>,
    language: Language,
    user_text: Option<String>,
    reply: TurnReply,
) -> Response
where
    T: Transcriber + 'static,
    S: Synthesizer + 'static,
    R: ApplicantRepository + 'static,
{
    match state.synthesizer.synthesize(&reply.assistant_text, language) {
        Ok(handle) => (
            StatusCode::OK,
            Json(TurnResponse {
                user_text,
                assistant_text: reply.assistant_text,
                finished: reply.finished,
                fields: reply.fields,
                audio_url: format!("/audio/{}", handle.0),
            }),
        )
            .into_response(),
        Err(err) => (
            StatusCode::BAD_GATEWAY,
            Json(json!({ "error": err.to_string() })),
        )
            .into_response(),
    }
}
