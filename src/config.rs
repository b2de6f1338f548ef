//! Loading prompt configuration from TOML.
//!
//! See `Prompts` for the expected schema. Everything has a sensible default;
//! a TOML file pointed at by TUTOR_CONFIG_PATH can override individual
//! preambles to tune tone without rebuilding.

use serde::Deserialize;
use tracing::{error, info};

use crate::instruction::TENSE_PREAMBLE;

#[derive(Clone, Debug, Deserialize, Default)]
pub struct TutorConfig {
  #[serde(default)]
  pub prompts: Prompts,
}

/// System preambles for the three generation tools. The obligation clauses
/// appended by the instruction builder are fixed; only the preambles are
/// configurable.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Prompts {
  pub tense_preamble: String,
  pub quiz_preamble: String,
  pub essay_preamble: String,
}

impl Default for Prompts {
  fn default() -> Self {
    Self {
      tense_preamble: TENSE_PREAMBLE.into(),
      quiz_preamble: "You are an expert quiz author for English learners. Your task is to produce a multiple-choice practice quiz on the given topic in a structured JSON format. Follow the provided JSON schema precisely.".into(),
      essay_preamble: "You are an expert essay writer helping Urdu-speaking students. Your task is to write a well-structured essay on the given topic.".into(),
    }
  }
}

/// Attempt to load `TutorConfig` from TUTOR_CONFIG_PATH. On any parsing/IO
/// error, returns None and the caller falls back to defaults.
pub fn load_tutor_config_from_env() -> Option<TutorConfig> {
  let path = std::env::var("TUTOR_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<TutorConfig>(&s) {
      Ok(cfg) => {
        info!(target: "tenseapp_backend", %path, "Loaded tutor config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "tenseapp_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "tenseapp_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn partial_toml_overrides_one_preamble() {
    let cfg: TutorConfig =
      toml::from_str("[prompts]\nessay_preamble = \"Write plainly.\"\n").expect("toml");
    assert_eq!(cfg.prompts.essay_preamble, "Write plainly.");
    assert_eq!(cfg.prompts.tense_preamble, TENSE_PREAMBLE);
  }
}
