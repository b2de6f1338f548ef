//! Response-schema builder for Gemini structured output.
//!
//! Pure functions from generation options to the `responseSchema` JSON value
//! sent with a generateContent call (uppercase OBJECT/ARRAY/STRING type tags).
//! The shape rule: `tenseName` is always required; every optional section is a
//! required property exactly when its `include*` flag is set, and absent from
//! the schema otherwise. Numeric/enum knobs only change description text, not
//! the structural shape.

use serde_json::{json, Map, Value};

use crate::options::{DefinitionLength, Difficulty, GenerationOptions};

/// Sub-schema shared by active and passive voice: a formula triple plus an
/// examples array of exactly 3 sentences (A/N/I).
fn voice_details_schema() -> Value {
  json!({
    "type": "OBJECT",
    "properties": {
      "formula": {
        "type": "OBJECT",
        "properties": {
          "affirmative": { "type": "STRING", "description": "e.g., Subject + verb + Object. If there's a helping verb, include it using the format H.V (actual verb), e.g., 'Subject + H.V (is/am/are) + V-ing + Object'." },
          "negative": { "type": "STRING", "description": "e.g., Subject + H.V (do/does) + not + verb + Object" },
          "interrogative": { "type": "STRING", "description": "e.g., H.V (do/does) + Subject + verb + Object + ?" },
        },
        "required": ["affirmative", "negative", "interrogative"],
      },
      "examples": {
        "type": "ARRAY",
        "description": "Provide exactly 3 example sentences: one affirmative (A), one negative (N), and one interrogative (I).",
        "items": { "type": "STRING" },
      },
    },
    "required": ["formula", "examples"],
  })
}

/// Item schema for the detailed-examples array. The passive-voice sub-field is
/// required here exactly when the top-level passive flag is on; the nesting
/// rule is inherited, not independently configurable per example.
fn detailed_example_schema(include_passive_voice: bool) -> Value {
  let mut properties = Map::new();
  properties.insert(
    "activeVoice".into(),
    json!({
      "type": "OBJECT",
      "properties": {
        "urdu": { "type": "STRING", "description": "A full sentence in Urdu." },
        "english": {
          "type": "ARRAY",
          "description": "The English translation in 3 forms: affirmative (A), negative (N), and interrogative (I).",
          "items": { "type": "STRING" },
        },
      },
      "required": ["urdu", "english"],
    }),
  );
  let mut required = vec![Value::from("activeVoice")];
  if include_passive_voice {
    properties.insert(
      "passiveVoice".into(),
      json!({
        "type": "OBJECT",
        "properties": {
          "english": {
            "type": "ARRAY",
            "description": "The passive voice of the English translation in 3 forms: affirmative (A), negative (N), and interrogative (I).",
            "items": { "type": "STRING" },
          },
        },
        "required": ["english"],
      }),
    );
    required.push(Value::from("passiveVoice"));
  }
  json!({
    "type": "OBJECT",
    "properties": Value::Object(properties),
    "required": required,
  })
}

fn definition_description(length: DefinitionLength) -> String {
  let wording = match length {
    DefinitionLength::Short => "a short, clear definition (1-2 sentences)",
    DefinitionLength::Medium => "a medium-length definition (3-4 sentences)",
    DefinitionLength::Long => "a long, detailed definition (a full paragraph)",
  };
  format!("Provide {wording} explaining the primary use of the tense.")
}

/// Build the response schema for a tense explanation.
///
/// Starts from the mandatory `tenseName` field and folds the fixed-order list
/// of (flag, field, descriptor) pairs over it. With every flag off the result
/// is still a well-formed schema requiring only `tenseName`.
pub fn tense_response_schema(options: &GenerationOptions) -> Value {
  let sections: [(bool, &str, Value); 5] = [
    (
      options.include_definition,
      "definition",
      json!({ "type": "STRING", "description": definition_description(options.definition_length) }),
    ),
    (
      options.include_urdu_identification,
      "urduIdentification",
      json!({ "type": "STRING", "description": "Provide ONLY the 3-4 primary Urdu identification endings. For example, for Present Perfect Tense, provide only 'چکا ہے، چکی ہے، چکے ہیں، چکا ہوں' and nothing else." }),
    ),
    (options.include_active_voice, "activeVoice", voice_details_schema()),
    (options.include_passive_voice, "passiveVoice", voice_details_schema()),
    (
      options.include_detailed_examples,
      "detailedExamples",
      json!({
        "type": "ARRAY",
        "description": format!(
          "Provide exactly {} full Urdu-to-English conversion examples that are of {} difficulty.",
          options.number_of_examples,
          options.detailed_example_difficulty.as_str(),
        ),
        "items": detailed_example_schema(options.include_passive_voice),
      }),
    ),
  ];

  let mut properties = Map::new();
  properties.insert(
    "tenseName".into(),
    json!({ "type": "STRING", "description": "The full name of the tense, e.g., 'Present Indefinite Tense'." }),
  );
  let mut required = vec![Value::from("tenseName")];
  for (enabled, name, descriptor) in sections {
    if enabled {
      properties.insert(name.to_string(), descriptor);
      required.push(Value::from(name));
    }
  }

  json!({
    "type": "OBJECT",
    "properties": Value::Object(properties),
    "required": required,
  })
}

/// Build the response schema for a practice quiz: an array of multiple-choice
/// question objects. Cardinality and difficulty live in the description only.
pub fn quiz_response_schema(num_questions: u8, difficulty: Difficulty) -> Value {
  json!({
    "type": "ARRAY",
    "description": format!(
      "Provide exactly {} multiple-choice questions of {} difficulty about the given topic.",
      num_questions,
      difficulty.as_str(),
    ),
    "items": {
      "type": "OBJECT",
      "properties": {
        "question": { "type": "STRING", "description": "The question text." },
        "options": {
          "type": "ARRAY",
          "description": "Exactly 4 plausible answer choices.",
          "items": { "type": "STRING" },
        },
        "correctAnswer": { "type": "STRING", "description": "Must exactly match one of the options." },
        "explanation": { "type": "STRING", "description": "A brief explanation of why the correct answer is right." },
      },
      "required": ["question", "options", "correctAnswer", "explanation"],
    },
  })
}

/// Required property names at the top level of a built schema. Test helper,
/// also handy for logging.
pub fn required_fields(schema: &Value) -> Vec<String> {
  schema["required"]
    .as_array()
    .map(|a| a.iter().filter_map(|v| v.as_str().map(str::to_string)).collect())
    .unwrap_or_default()
}
