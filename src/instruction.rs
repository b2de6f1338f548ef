//! System-instruction builder.
//!
//! Deterministic string composition, not generation: a fixed teacher preamble
//! followed by one obligation clause per optional section, in a fixed order
//! (definition, Urdu identification, active voice, passive voice, detailed
//! examples). Clause polarity always matches schema requiredness, and the
//! configured enum values appear verbatim so the directive stays falsifiable
//! by substring checks.

use crate::domain::{EssayLanguage, EssayOptions};
use crate::options::{Difficulty, GenerationOptions};

/// Default preamble for tense explanations. Overridable via the prompts TOML.
pub const TENSE_PREAMBLE: &str = "You are an expert English grammar teacher specializing in teaching English to Urdu speakers. Your task is to provide a detailed breakdown of a given English tense in a structured JSON format. Ensure all explanations are clear, concise, and accurate. Follow the provided JSON schema precisely. For formulas, use placeholders like 'Subject', 'Object', 'V1' (First Form of Verb), 'V2' (Second Form), 'V3' (Third Form), 'V-ing' (Present Participle). For helping verbs, you must use the format 'H.V (actual helping verb)'. For example, for Present Indefinite, the negative formula would contain 'H.V (do/does)'.";

/// Compose the strict directive for a tense explanation.
pub fn tense_instruction(preamble: &str, options: &GenerationOptions) -> String {
  let mut instruction = preamble.to_string();

  if options.include_definition {
    instruction.push_str(&format!(
      " You MUST provide a definition of {} length.",
      options.definition_length.as_str()
    ));
  } else {
    instruction.push_str(" You MUST NOT provide a definition.");
  }

  if options.include_urdu_identification {
    instruction.push_str(" You MUST provide the primary Urdu identification endings (3-4 only). For 'Present Perfect Tense', only return 'چکا ہے، چکی ہے، چکے ہیں، چکا ہوں'. Do NOT include secondary identifications like 'لیا ہے' or 'دیا ہے'.");
  } else {
    instruction.push_str(" You MUST NOT provide Urdu identification.");
  }

  if options.include_active_voice {
    instruction.push_str(" You MUST provide details for the active voice.");
  } else {
    instruction.push_str(" You MUST NOT provide details for the active voice.");
  }

  if options.include_passive_voice {
    instruction.push_str(" You MUST provide details for the passive voice. In passive voice formulas, do not append '(as Agent)' to the 'Subject'.");
  } else {
    instruction.push_str(" You MUST NOT provide any details for the passive voice.");
  }

  if options.include_detailed_examples {
    instruction.push_str(&format!(
      " You MUST provide exactly {} detailed Urdu-to-English conversion examples. The examples should be of {} difficulty for a learner.",
      options.number_of_examples,
      options.detailed_example_difficulty.as_str()
    ));
    instruction.push_str(&format!(
      " The examples MUST use {} sentence structures, {} level vocabulary, and a {} tone.",
      options.example_sentence_structure.as_str(),
      options.example_vocabulary_level.as_str(),
      options.example_tone.as_str()
    ));
  } else {
    instruction.push_str(" You MUST NOT provide any detailed Urdu-to-English conversion examples.");
  }

  instruction
}

/// Compose the strict directive for quiz generation.
pub fn quiz_instruction(preamble: &str, num_questions: u8, difficulty: Difficulty) -> String {
  format!(
    "{} You MUST provide exactly {} multiple-choice questions of {} difficulty. Each question MUST have exactly 4 answer choices, and correctAnswer MUST exactly match one of them.",
    preamble,
    num_questions,
    difficulty.as_str()
  )
}

/// Compose the strict directive for essay generation (plain text, no schema).
pub fn essay_instruction(preamble: &str, options: &EssayOptions) -> String {
  let language = match options.language {
    EssayLanguage::English => "English",
    EssayLanguage::Urdu => "Urdu",
  };
  format!(
    "{} You MUST write the essay in {}. The essay MUST be approximately {} words long, use {} vocabulary, and keep a {} tone. Output ONLY the essay text, with no title and no commentary.",
    preamble,
    language,
    options.length.word_target(),
    options.vocabulary.as_str(),
    options.tone.as_str()
  )
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::schema::{required_fields, tense_response_schema};

  /// (schema field, affirmative clause marker) per section, in directive order.
  const SECTIONS: [(&str, &str); 5] = [
    ("definition", "You MUST provide a definition"),
    ("urduIdentification", "You MUST provide the primary Urdu identification endings"),
    ("activeVoice", "You MUST provide details for the active voice"),
    ("passiveVoice", "You MUST provide details for the passive voice"),
    ("detailedExamples", "You MUST provide exactly"),
  ];

  fn with_flags(bits: u32) -> GenerationOptions {
    GenerationOptions {
      include_definition: bits & 1 != 0,
      include_urdu_identification: bits & 2 != 0,
      include_active_voice: bits & 4 != 0,
      include_passive_voice: bits & 8 != 0,
      include_detailed_examples: bits & 16 != 0,
      ..GenerationOptions::default()
    }
  }

  #[test]
  fn schema_and_instruction_agree_for_every_flag_combination() {
    for bits in 0..32u32 {
      let opts = with_flags(bits);
      let required = required_fields(&tense_response_schema(&opts));
      let instruction = tense_instruction(TENSE_PREAMBLE, &opts);
      for (field, marker) in SECTIONS {
        let schema_requires = required.iter().any(|f| f == field);
        let instruction_obliges = instruction.contains(marker);
        assert_eq!(
          schema_requires, instruction_obliges,
          "disagreement on '{field}' for flag combination {bits:#07b}"
        );
      }
    }
  }

  #[test]
  fn every_section_is_mentioned_in_fixed_order() {
    for bits in 0..32u32 {
      let opts = with_flags(bits);
      let instruction = tense_instruction(TENSE_PREAMBLE, &opts);
      let mut last = 0usize;
      for (field, needle) in [
        ("definition", "definition"),
        ("urduIdentification", "Urdu identification"),
        ("activeVoice", "active voice"),
        ("passiveVoice", "passive voice"),
        ("detailedExamples", "detailed Urdu-to-English conversion examples"),
      ] {
        let pos = instruction[last..]
          .find(needle)
          .unwrap_or_else(|| panic!("'{field}' missing or out of order for {bits:#07b}"));
        last += pos + needle.len();
      }
    }
  }

  #[test]
  fn cardinality_appears_as_a_literal_token() {
    for n in 1..=3u8 {
      let mut opts = GenerationOptions::default();
      opts.number_of_examples = n;
      let instruction = tense_instruction(TENSE_PREAMBLE, &opts);
      assert!(instruction.contains(&format!("exactly {n} detailed")));
    }
  }

  #[test]
  fn builder_is_pure() {
    let opts = GenerationOptions::default();
    let a = tense_instruction(TENSE_PREAMBLE, &opts);
    let b = tense_instruction(TENSE_PREAMBLE, &opts);
    assert_eq!(a, b);
  }

  #[test]
  fn default_options_produce_the_expected_directive() {
    let opts = GenerationOptions::default();
    let instruction = tense_instruction(TENSE_PREAMBLE, &opts);
    assert!(instruction.contains("MUST provide a definition of short length"));
    assert!(instruction.contains("MUST provide the primary Urdu identification endings"));
    assert!(instruction.contains("MUST provide exactly 2 detailed Urdu-to-English conversion examples"));
    assert!(instruction.contains("medium difficulty"));
    assert!(instruction.contains("simple sentence structures"));
    assert!(instruction.contains("intermediate level vocabulary"));
    assert!(instruction.contains("neutral tone"));
  }

  #[test]
  fn essay_directive_embeds_every_knob() {
    let opts = EssayOptions {
      topic: "My School".into(),
      language: crate::domain::EssayLanguage::Urdu,
      length: crate::domain::EssayLength::Short,
      vocabulary: crate::domain::EssayVocabulary::Simple,
      tone: crate::domain::EssayTone::Formal,
    };
    let instruction = essay_instruction("You are an essay writer.", &opts);
    assert!(instruction.contains("in Urdu"));
    assert!(instruction.contains("approximately 250 words"));
    assert!(instruction.contains("simple vocabulary"));
    assert!(instruction.contains("formal tone"));
  }
}
