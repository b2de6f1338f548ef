//! Generation preferences for the tense explainer.
//!
//! Every field is a boolean or a closed enumeration picked through constrained
//! UI controls, so no validation beyond deserialization is done here. The
//! container-level serde default makes a partial persisted override merge over
//! the defaults field by field.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefinitionLength {
  Short,
  Medium,
  Long,
}

impl DefinitionLength {
  pub fn as_str(self) -> &'static str {
    match self {
      DefinitionLength::Short => "short",
      DefinitionLength::Medium => "medium",
      DefinitionLength::Long => "long",
    }
  }
}

/// Shared by detailed examples and the practice quiz.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
  Easy,
  Medium,
  Hard,
}

impl Difficulty {
  pub fn as_str(self) -> &'static str {
    match self {
      Difficulty::Easy => "easy",
      Difficulty::Medium => "medium",
      Difficulty::Hard => "hard",
    }
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentenceStructure {
  Simple,
  Compound,
  Complex,
}

impl SentenceStructure {
  pub fn as_str(self) -> &'static str {
    match self {
      SentenceStructure::Simple => "simple",
      SentenceStructure::Compound => "compound",
      SentenceStructure::Complex => "complex",
    }
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VocabularyLevel {
  Beginner,
  Intermediate,
  Advanced,
}

impl VocabularyLevel {
  pub fn as_str(self) -> &'static str {
    match self {
      VocabularyLevel::Beginner => "beginner",
      VocabularyLevel::Intermediate => "intermediate",
      VocabularyLevel::Advanced => "advanced",
    }
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExampleTone {
  Formal,
  Informal,
  Neutral,
}

impl ExampleTone {
  pub fn as_str(self) -> &'static str {
    match self {
      ExampleTone::Formal => "formal",
      ExampleTone::Informal => "informal",
      ExampleTone::Neutral => "neutral",
    }
  }
}

/// User-selectable preferences driving both the response schema and the
/// system instruction. Each `include_*` flag gates whether the matching
/// section is required in the schema AND whether the instruction says
/// "MUST provide" vs "MUST NOT provide" for it; the two never disagree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationOptions {
  pub include_definition: bool,
  pub definition_length: DefinitionLength,
  pub include_urdu_identification: bool,
  pub include_active_voice: bool,
  pub include_passive_voice: bool,
  pub include_detailed_examples: bool,
  /// 1..=3, constrained by the UI.
  pub number_of_examples: u8,
  pub detailed_example_difficulty: Difficulty,
  pub example_sentence_structure: SentenceStructure,
  pub example_vocabulary_level: VocabularyLevel,
  pub example_tone: ExampleTone,
}

impl Default for GenerationOptions {
  fn default() -> Self {
    Self {
      include_definition: true,
      definition_length: DefinitionLength::Short,
      include_urdu_identification: true,
      include_active_voice: true,
      include_passive_voice: true,
      include_detailed_examples: true,
      number_of_examples: 2,
      detailed_example_difficulty: Difficulty::Medium,
      example_sentence_structure: SentenceStructure::Simple,
      example_vocabulary_level: VocabularyLevel::Intermediate,
      example_tone: ExampleTone::Neutral,
    }
  }
}
