//! Domain models: the structured result of a tense explanation, quiz questions,
//! and essay options. Wire names are camelCase to match the SPA's JSON.

use serde::{Deserialize, Serialize};

/// Formula triple for one voice, using placeholders like 'Subject', 'V1', 'H.V (do/does)'.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Formula {
  pub affirmative: String,
  pub negative: String,
  pub interrogative: String,
}

/// One voice (active or passive): its formula plus exactly 3 example sentences
/// (affirmative, negative, interrogative).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VoiceDetails {
  pub formula: Formula,
  pub examples: Vec<String>,
}

/// Active-voice half of a conversion example: an Urdu sentence and its English
/// translation in 3 forms (A/N/I).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ActiveConversion {
  pub urdu: String,
  pub english: Vec<String>,
}

/// Passive-voice half: the English translation in 3 forms only.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PassiveConversion {
  pub english: Vec<String>,
}

/// A full Urdu-to-English conversion example illustrating the tense in use.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedExample {
  pub active_voice: ActiveConversion,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub passive_voice: Option<PassiveConversion>,
}

/// Result of a tense explanation request. `tense_name` is always present;
/// every other section mirrors the `include*` flag that was set at request time.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenseDetails {
  pub tense_name: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub definition: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub urdu_identification: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub active_voice: Option<VoiceDetails>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub passive_voice: Option<VoiceDetails>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub detailed_examples: Option<Vec<DetailedExample>>,
}

/// One multiple-choice practice question.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
  pub question: String,
  pub options: Vec<String>,
  pub correct_answer: String,
  pub explanation: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EssayLanguage {
  English,
  Urdu,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EssayLength {
  VeryShort,
  Short,
  Medium,
  Long,
  ExtraLong,
}

impl EssayLength {
  /// Approximate word budget communicated to the model.
  pub fn word_target(self) -> u32 {
    match self {
      EssayLength::VeryShort => 150,
      EssayLength::Short => 250,
      EssayLength::Medium => 400,
      EssayLength::Long => 600,
      EssayLength::ExtraLong => 800,
    }
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EssayVocabulary {
  Simple,
  Intermediate,
  Advanced,
}

impl EssayVocabulary {
  pub fn as_str(self) -> &'static str {
    match self {
      EssayVocabulary::Simple => "simple",
      EssayVocabulary::Intermediate => "intermediate",
      EssayVocabulary::Advanced => "advanced",
    }
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EssayTone {
  Formal,
  Informal,
  Academic,
  Creative,
}

impl EssayTone {
  pub fn as_str(self) -> &'static str {
    match self {
      EssayTone::Formal => "formal",
      EssayTone::Informal => "informal",
      EssayTone::Academic => "academic",
      EssayTone::Creative => "creative",
    }
  }
}

/// Controls for the essay generator tool.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EssayOptions {
  pub topic: String,
  pub language: EssayLanguage,
  pub length: EssayLength,
  pub vocabulary: EssayVocabulary,
  pub tone: EssayTone,
}
