//! Public protocol structs for the HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::domain::{EssayOptions, QuizQuestion, TenseDetails};
use crate::gemini::GenerationError;
use crate::options::{Difficulty, GenerationOptions};

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

#[derive(Debug, Deserialize)]
pub struct ExplainIn {
    pub tense: String,
    /// When absent, the server's stored options are used.
    #[serde(default)]
    pub options: Option<GenerationOptions>,
}

#[derive(Serialize)]
pub struct ExplainOut {
    /// Dispatch sequence number; a client keeps only the highest one it has
    /// seen, which discards responses from superseded requests.
    pub seq: u64,
    pub details: TenseDetails,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizIn {
    pub topic: String,
    pub num_questions: u8,
    pub difficulty: Difficulty,
}

#[derive(Serialize)]
pub struct QuizOut {
    pub seq: u64,
    pub questions: Vec<QuizQuestion>,
}

pub type EssayIn = EssayOptions;

#[derive(Serialize)]
pub struct EssayOut {
    pub seq: u64,
    pub essay: String,
}

/// Error body sent for failed generation calls. `kind` is the tag callers
/// branch on; `message` is the generic user-facing text.
#[derive(Serialize)]
pub struct ErrorOut {
    pub kind: &'static str,
    pub message: &'static str,
}

/// Wrapper so handlers can `?` on dispatcher errors.
pub struct ApiError(pub GenerationError);

impl From<GenerationError> for ApiError {
    fn from(e: GenerationError) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            GenerationError::Service(_) | GenerationError::InvalidFormat => StatusCode::BAD_GATEWAY,
            GenerationError::EmptyResult => StatusCode::UNPROCESSABLE_ENTITY,
        };
        let body = ErrorOut {
            kind: self.0.kind(),
            message: self.0.user_message(),
        };
        (status, Json(body)).into_response()
    }
}
