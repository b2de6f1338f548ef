//! Minimal Gemini client for our use-cases.
//!
//! We only call models/{model}:generateContent and request either plain text
//! or schema-constrained JSON. One attempt per dispatch: no retry, no repair
//! of malformed output. Calls are instrumented and log model names, latencies,
//! and token usage (not contents).
//!
//! NOTE: We never log the API key and we keep payload truncations short.

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{error, info, instrument};

use crate::config::Prompts;
use crate::domain::{EssayOptions, QuizQuestion, TenseDetails};
use crate::instruction::{essay_instruction, quiz_instruction, tense_instruction};
use crate::options::{Difficulty, GenerationOptions};
use crate::schema::{quiz_response_schema, required_fields, tense_response_schema};
use crate::util::trunc_for_log;

/// Tagged failure modes of a generation dispatch. Callers branch on the kind;
/// users only ever see `user_message()`.
#[derive(Debug, Error)]
pub enum GenerationError {
  /// The external call failed outright (network, auth, quota).
  #[error("generation service call failed: {0}")]
  Service(String),
  /// The service responded but the text could not be parsed as JSON.
  /// The offending payload is logged, never carried here.
  #[error("generation service returned an invalid response format")]
  InvalidFormat,
  /// Syntactically valid but semantically empty result (e.g. zero questions).
  #[error("generation service returned an empty result")]
  EmptyResult,
}

impl GenerationError {
  pub fn kind(&self) -> &'static str {
    match self {
      GenerationError::Service(_) => "service_error",
      GenerationError::InvalidFormat => "invalid_format",
      GenerationError::EmptyResult => "empty_result",
    }
  }

  /// Generic user-facing message; raw diagnostics stay in the logs.
  pub fn user_message(&self) -> &'static str {
    match self {
      GenerationError::Service(_) => "Failed to generate. Please try again.",
      GenerationError::InvalidFormat => "The AI returned an invalid response format.",
      GenerationError::EmptyResult => {
        "Received an empty result from the AI. Please try a different input."
      }
    }
  }
}

#[derive(Clone)]
pub struct Gemini {
  pub client: reqwest::Client,
  pub api_key: String,
  pub base_url: String,
  pub model: String,
}

impl Gemini {
  /// Construct the client if we find GEMINI_API_KEY; otherwise return None.
  /// A missing key is a startup-time fatal condition handled in main, not a
  /// per-request error.
  pub fn from_env() -> Option<Self> {
    let api_key = std::env::var("GEMINI_API_KEY").ok()?;
    let base_url = std::env::var("GEMINI_BASE_URL")
      .unwrap_or_else(|_| "https://generativelanguage.googleapis.com/v1beta".into());
    let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-2.5-flash".into());

    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(60))
      .build()
      .ok()?;

    Some(Self { client, api_key, base_url, model })
  }

  /// Single generateContent call. `schema` switches the response to strict
  /// JSON mode; the returned string is the first candidate's text.
  #[instrument(level = "info", skip(self, system, user, schema), fields(model = %self.model, structured = schema.is_some()))]
  async fn generate(
    &self,
    system: &str,
    user: &str,
    schema: Option<Value>,
    temperature: f32,
  ) -> Result<String, GenerationError> {
    let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
    let req = GenerateContentRequest {
      contents: vec![Content { role: Some("user".into()), parts: vec![Part { text: user.into() }] }],
      system_instruction: Content { role: None, parts: vec![Part { text: system.into() }] },
      generation_config: GenerationConfig {
        response_mime_type: schema.as_ref().map(|_| "application/json".into()),
        response_schema: schema,
        temperature,
      },
    };

    let res = self
      .client
      .post(&url)
      .header(USER_AGENT, "tenseapp-backend/0.1")
      .header(CONTENT_TYPE, "application/json")
      .header("x-goog-api-key", &self.api_key)
      .json(&req)
      .send()
      .await
      .map_err(|e| GenerationError::Service(e.to_string()))?;

    if !res.status().is_success() {
      let status = res.status();
      let body = res.text().await.unwrap_or_default();
      let msg = extract_gemini_error(&body).unwrap_or(body);
      return Err(GenerationError::Service(format!("Gemini HTTP {}: {}", status, msg)));
    }

    let body: GenerateContentResponse =
      res.json().await.map_err(|e| GenerationError::Service(e.to_string()))?;
    if let Some(usage) = &body.usage_metadata {
      info!(
        prompt_tokens = ?usage.prompt_token_count,
        candidate_tokens = ?usage.candidates_token_count,
        total_tokens = ?usage.total_token_count,
        "Gemini usage"
      );
    }

    let text = body
      .candidates
      .first()
      .and_then(|c| c.content.as_ref())
      .and_then(|c| c.parts.first())
      .and_then(|p| p.text.clone())
      .unwrap_or_default();

    Ok(text.trim().to_string())
  }

  // --- High-level dispatchers (one per tool) ---

  /// Explain a tense: build schema + instruction from the options, dispatch,
  /// parse. The parsed value is returned as-is; schema adherence is trusted.
  #[instrument(level = "info", skip(self, prompts, options), fields(%tense, model = %self.model))]
  pub async fn explain_tense(
    &self,
    prompts: &Prompts,
    tense: &str,
    options: &GenerationOptions,
  ) -> Result<TenseDetails, GenerationError> {
    let schema = tense_response_schema(options);
    let instruction = tense_instruction(&prompts.tense_preamble, options);
    info!(
      target: "tenseapp_backend",
      required = ?required_fields(&schema),
      instr_len = instruction.len(),
      "Dispatching tense explanation"
    );

    let start = std::time::Instant::now();
    let text = self.generate(&instruction, tense, Some(schema), 0.4).await?;
    info!(elapsed = ?start.elapsed(), response_len = text.len(), "Model response received");

    parse_structured::<TenseDetails>(&text)
  }

  /// Generate a practice quiz. A parseable but empty question list is a
  /// distinct failure: the caller should retry with a different topic.
  #[instrument(level = "info", skip(self, prompts), fields(%topic, num_questions, difficulty = difficulty.as_str(), model = %self.model))]
  pub async fn practice_quiz(
    &self,
    prompts: &Prompts,
    topic: &str,
    num_questions: u8,
    difficulty: Difficulty,
  ) -> Result<Vec<QuizQuestion>, GenerationError> {
    let schema = quiz_response_schema(num_questions, difficulty);
    let instruction = quiz_instruction(&prompts.quiz_preamble, num_questions, difficulty);

    let text = self.generate(&instruction, topic, Some(schema), 0.7).await?;
    let questions = parse_structured::<Vec<QuizQuestion>>(&text)?;
    if questions.is_empty() {
      return Err(GenerationError::EmptyResult);
    }
    Ok(questions)
  }

  /// Generate an essay as plain text (no response schema).
  #[instrument(level = "info", skip(self, prompts, options), fields(topic = %options.topic, model = %self.model))]
  pub async fn generate_essay(
    &self,
    prompts: &Prompts,
    options: &EssayOptions,
  ) -> Result<String, GenerationError> {
    let instruction = essay_instruction(&prompts.essay_preamble, options);
    let text = self.generate(&instruction, &options.topic, None, 0.8).await?;
    if text.is_empty() {
      return Err(GenerationError::EmptyResult);
    }
    Ok(text)
  }
}

/// Parse the service's raw text as the expected structured value. No repair,
/// no partial extraction; the offending text is logged truncated.
pub fn parse_structured<T: for<'a> Deserialize<'a>>(raw: &str) -> Result<T, GenerationError> {
  serde_json::from_str::<T>(raw.trim()).map_err(|e| {
    error!(
      target: "tenseapp_backend",
      error = %e,
      raw = %trunc_for_log(raw, 300),
      "Failed to parse model response as JSON"
    );
    GenerationError::InvalidFormat
  })
}

// --- Wire DTOs ---

#[derive(Serialize)]
struct GenerateContentRequest {
  contents: Vec<Content>,
  #[serde(rename = "systemInstruction")]
  system_instruction: Content,
  #[serde(rename = "generationConfig")]
  generation_config: GenerationConfig,
}
#[derive(Serialize)]
struct Content {
  #[serde(skip_serializing_if = "Option::is_none")]
  role: Option<String>,
  parts: Vec<Part>,
}
#[derive(Serialize)]
struct Part {
  text: String,
}
#[derive(Serialize)]
struct GenerationConfig {
  #[serde(rename = "responseMimeType", skip_serializing_if = "Option::is_none")]
  response_mime_type: Option<String>,
  #[serde(rename = "responseSchema", skip_serializing_if = "Option::is_none")]
  response_schema: Option<Value>,
  temperature: f32,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
  #[serde(default)]
  candidates: Vec<Candidate>,
  #[serde(rename = "usageMetadata", default)]
  usage_metadata: Option<UsageMetadata>,
}
#[derive(Deserialize)]
struct Candidate {
  content: Option<CandidateContent>,
}
#[derive(Deserialize)]
struct CandidateContent {
  #[serde(default)]
  parts: Vec<CandidatePart>,
}
#[derive(Deserialize)]
struct CandidatePart {
  #[serde(default)]
  text: Option<String>,
}
#[derive(Deserialize)]
struct UsageMetadata {
  #[serde(rename = "promptTokenCount", default)]
  prompt_token_count: Option<u32>,
  #[serde(rename = "candidatesTokenCount", default)]
  candidates_token_count: Option<u32>,
  #[serde(rename = "totalTokenCount", default)]
  total_token_count: Option<u32>,
}

/// Try to extract a clean error message from a Gemini error body.
fn extract_gemini_error(body: &str) -> Option<String> {
  #[derive(Deserialize)]
  struct EWrap {
    error: EObj,
  }
  #[derive(Deserialize)]
  struct EObj {
    message: String,
  }
  serde_json::from_str::<EWrap>(body).ok().map(|w| w.error.message)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn garbage_text_is_an_invalid_format_error() {
    let res = parse_structured::<TenseDetails>("I'm sorry, I can't do that.");
    assert!(matches!(res, Err(GenerationError::InvalidFormat)));
  }

  #[test]
  fn truncated_json_is_an_invalid_format_error() {
    let res = parse_structured::<TenseDetails>(r#"{"tenseName": "Present Perfect", "defin"#);
    assert!(matches!(res, Err(GenerationError::InvalidFormat)));
  }

  #[test]
  fn conforming_payload_parses_with_optional_sections_absent() {
    let details =
      parse_structured::<TenseDetails>(r#"{"tenseName": "Present Perfect Tense"}"#).expect("parse");
    assert_eq!(details.tense_name, "Present Perfect Tense");
    assert!(details.definition.is_none());
    assert!(details.detailed_examples.is_none());
  }

  #[test]
  fn full_payload_parses() {
    let raw = r#"{
      "tenseName": "Present Indefinite Tense",
      "definition": "Used for habits and general truths.",
      "urduIdentification": "تا ہے، تی ہے، تے ہیں",
      "activeVoice": {
        "formula": {
          "affirmative": "Subject + verb + Object",
          "negative": "Subject + H.V (do/does) + not + verb + Object",
          "interrogative": "H.V (do/does) + Subject + verb + Object + ?"
        },
        "examples": ["He plays cricket.", "He does not play cricket.", "Does he play cricket?"]
      },
      "detailedExamples": [
        {
          "activeVoice": {
            "urdu": "وہ کرکٹ کھیلتا ہے۔",
            "english": ["He plays cricket.", "He does not play cricket.", "Does he play cricket?"]
          },
          "passiveVoice": {
            "english": ["Cricket is played by him.", "Cricket is not played by him.", "Is cricket played by him?"]
          }
        }
      ]
    }"#;
    let details = parse_structured::<TenseDetails>(raw).expect("parse");
    assert_eq!(details.active_voice.expect("active").examples.len(), 3);
    let examples = details.detailed_examples.expect("examples");
    assert_eq!(examples.len(), 1);
    assert!(examples[0].passive_voice.is_some());
  }

  #[test]
  fn quiz_payload_parses_and_empty_is_detectable() {
    let questions = parse_structured::<Vec<QuizQuestion>>("[]").expect("parse");
    assert!(questions.is_empty());

    let raw = r#"[{
      "question": "Which sentence is in the Present Perfect Tense?",
      "options": ["He goes.", "He has gone.", "He went.", "He will go."],
      "correctAnswer": "He has gone.",
      "explanation": "'has' + third form marks the Present Perfect."
    }]"#;
    let questions = parse_structured::<Vec<QuizQuestion>>(raw).expect("parse");
    assert_eq!(questions[0].options.len(), 4);
    assert_eq!(questions[0].correct_answer, "He has gone.");
  }

  #[test]
  fn gemini_error_bodies_yield_clean_messages() {
    let body = r#"{"error": {"code": 429, "message": "Resource has been exhausted", "status": "RESOURCE_EXHAUSTED"}}"#;
    assert_eq!(extract_gemini_error(body).as_deref(), Some("Resource has been exhausted"));
    assert_eq!(extract_gemini_error("<html>502</html>"), None);
  }
}
