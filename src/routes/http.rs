//! HTTP endpoint handlers. These are thin wrappers that forward to the Gemini
//! dispatcher and the options store. Each handler is instrumented; generation
//! failures surface as a tagged `{kind, message}` error body.

use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use tracing::{info, instrument};

use crate::options::GenerationOptions;
use crate::protocol::*;
use crate::state::AppState;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse {
  Json(HealthOut { ok: true })
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_options(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(state.current_options().await)
}

#[instrument(level = "info", skip(state, body))]
pub async fn http_put_options(
  State(state): State<Arc<AppState>>,
  Json(body): Json<GenerationOptions>,
) -> impl IntoResponse {
  state.update_options(body).await;
  Json(state.current_options().await)
}

#[instrument(level = "info", skip(state, body), fields(tense = %body.tense, has_options = body.options.is_some()))]
pub async fn http_post_explain(
  State(state): State<Arc<AppState>>,
  Json(body): Json<ExplainIn>,
) -> Result<Json<ExplainOut>, ApiError> {
  let options = match body.options {
    Some(o) => o,
    None => state.current_options().await,
  };
  let seq = state.next_seq();
  let details = state
    .gemini
    .explain_tense(&state.prompts, &body.tense, &options)
    .await?;
  info!(target: "tenseapp_backend", seq, tense = %details.tense_name, "Tense explanation served");
  Ok(Json(ExplainOut { seq, details }))
}

#[instrument(level = "info", skip(state, body), fields(topic = %body.topic, num = body.num_questions))]
pub async fn http_post_quiz(
  State(state): State<Arc<AppState>>,
  Json(body): Json<QuizIn>,
) -> Result<Json<QuizOut>, ApiError> {
  let seq = state.next_seq();
  let questions = state
    .gemini
    .practice_quiz(&state.prompts, &body.topic, body.num_questions, body.difficulty)
    .await?;
  info!(target: "tenseapp_backend", seq, count = questions.len(), "Quiz served");
  Ok(Json(QuizOut { seq, questions }))
}

#[instrument(level = "info", skip(state, body), fields(topic = %body.topic))]
pub async fn http_post_essay(
  State(state): State<Arc<AppState>>,
  Json(body): Json<EssayIn>,
) -> Result<Json<EssayOut>, ApiError> {
  let seq = state.next_seq();
  let essay = state.gemini.generate_essay(&state.prompts, &body).await?;
  info!(target: "tenseapp_backend", seq, essay_len = essay.len(), "Essay served");
  Ok(Json(EssayOut { seq, essay }))
}
