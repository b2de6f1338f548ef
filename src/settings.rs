//! Durable user settings: a small JSON key-value file.
//!
//! Generation options live under the namespaced key `tenseAppOptions`; other
//! keys in the file are preserved untouched on save. Read and write failures
//! are never fatal — we log and fall back to the in-memory value.

use std::path::PathBuf;

use serde_json::{Map, Value};
use tracing::{error, info, warn};

use crate::options::GenerationOptions;

pub const OPTIONS_KEY: &str = "tenseAppOptions";
const DEFAULT_PATH: &str = "./settings.json";

#[derive(Clone, Debug)]
pub struct SettingsStore {
  path: PathBuf,
}

impl SettingsStore {
  /// Store at SETTINGS_PATH, or ./settings.json when unset.
  pub fn from_env() -> Self {
    let path = std::env::var("SETTINGS_PATH")
      .map(PathBuf::from)
      .unwrap_or_else(|_| PathBuf::from(DEFAULT_PATH));
    Self { path }
  }

  pub fn at(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  fn read_map(&self) -> Map<String, Value> {
    let raw = match std::fs::read_to_string(&self.path) {
      Ok(s) => s,
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Map::new(),
      Err(e) => {
        error!(target: "tenseapp_backend", path = %self.path.display(), error = %e, "Failed to read settings file");
        return Map::new();
      }
    };
    match serde_json::from_str::<Value>(&raw) {
      Ok(Value::Object(map)) => map,
      Ok(_) => {
        warn!(target: "tenseapp_backend", path = %self.path.display(), "Settings file is not a JSON object; ignoring");
        Map::new()
      }
      Err(e) => {
        warn!(target: "tenseapp_backend", path = %self.path.display(), error = %e, "Malformed settings file; ignoring");
        Map::new()
      }
    }
  }

  /// Load options: defaults merged with any persisted partial override.
  /// Malformed persisted data is ignored (and logged), never fatal.
  pub fn load_options(&self) -> GenerationOptions {
    let map = self.read_map();
    match map.get(OPTIONS_KEY) {
      Some(v) => match serde_json::from_value::<GenerationOptions>(v.clone()) {
        Ok(opts) => {
          info!(target: "tenseapp_backend", path = %self.path.display(), "Loaded persisted generation options");
          opts
        }
        Err(e) => {
          warn!(target: "tenseapp_backend", error = %e, "Persisted options do not deserialize; using defaults");
          GenerationOptions::default()
        }
      },
      None => GenerationOptions::default(),
    }
  }

  /// Persist the full options object. Failures are logged and swallowed; the
  /// caller keeps operating on its in-memory state.
  pub fn save_options(&self, options: &GenerationOptions) {
    let mut map = self.read_map();
    let value = match serde_json::to_value(options) {
      Ok(v) => v,
      Err(e) => {
        error!(target: "tenseapp_backend", error = %e, "Failed to serialize options");
        return;
      }
    };
    map.insert(OPTIONS_KEY.to_string(), value);
    let body = match serde_json::to_string_pretty(&Value::Object(map)) {
      Ok(s) => s,
      Err(e) => {
        error!(target: "tenseapp_backend", error = %e, "Failed to serialize settings file");
        return;
      }
    };
    if let Err(e) = std::fs::write(&self.path, body) {
      error!(target: "tenseapp_backend", path = %self.path.display(), error = %e, "Failed to write settings file");
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::options::{
    DefinitionLength, Difficulty, ExampleTone, SentenceStructure, VocabularyLevel,
  };

  fn store_in(dir: &tempfile::TempDir) -> SettingsStore {
    SettingsStore::at(dir.path().join("settings.json"))
  }

  #[test]
  fn save_then_load_round_trips() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = store_in(&dir);

    let mut opts = GenerationOptions::default();
    opts.include_definition = false;
    opts.include_passive_voice = false;
    opts.number_of_examples = 1;
    opts.detailed_example_difficulty = Difficulty::Hard;
    opts.example_tone = ExampleTone::Formal;

    store.save_options(&opts);
    assert_eq!(store.load_options(), opts);
  }

  #[test]
  fn round_trip_holds_for_every_flag_combination() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = store_in(&dir);

    for bits in 0..32u32 {
      let i = bits as usize;
      let opts = GenerationOptions {
        include_definition: bits & 1 != 0,
        include_urdu_identification: bits & 2 != 0,
        include_active_voice: bits & 4 != 0,
        include_passive_voice: bits & 8 != 0,
        include_detailed_examples: bits & 16 != 0,
        number_of_examples: (bits % 3) as u8 + 1,
        definition_length: [
          DefinitionLength::Short,
          DefinitionLength::Medium,
          DefinitionLength::Long,
        ][i % 3],
        detailed_example_difficulty: [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
          [(i + 1) % 3],
        example_sentence_structure: [
          SentenceStructure::Simple,
          SentenceStructure::Compound,
          SentenceStructure::Complex,
        ][(i + 2) % 3],
        example_vocabulary_level: [
          VocabularyLevel::Beginner,
          VocabularyLevel::Intermediate,
          VocabularyLevel::Advanced,
        ][i % 3],
        example_tone: [ExampleTone::Formal, ExampleTone::Informal, ExampleTone::Neutral]
          [(i + 1) % 3],
      };

      store.save_options(&opts);
      assert_eq!(store.load_options(), opts, "round-trip failed for flags {bits:#07b}");
    }
  }

  #[test]
  fn missing_file_yields_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = store_in(&dir);
    assert_eq!(store.load_options(), GenerationOptions::default());
  }

  #[test]
  fn malformed_file_yields_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "not json {{{").expect("write");
    let store = SettingsStore::at(&path);
    assert_eq!(store.load_options(), GenerationOptions::default());
  }

  #[test]
  fn unrelated_keys_survive_save() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{"theme": "dark"}"#).expect("write");
    let store = SettingsStore::at(&path);

    store.save_options(&GenerationOptions::default());

    let raw = std::fs::read_to_string(&path).expect("read");
    let v: Value = serde_json::from_str(&raw).expect("json");
    assert_eq!(v["theme"], "dark");
    assert!(v.get(OPTIONS_KEY).is_some());
  }

  #[test]
  fn unknown_keys_in_persisted_options_are_ignored() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("settings.json");
    std::fs::write(
      &path,
      r#"{"tenseAppOptions": {"includeActiveVoice": false, "someFutureKnob": 42}}"#,
    )
    .expect("write");
    let store = SettingsStore::at(&path);

    let opts = store.load_options();
    assert!(!opts.include_active_voice);
    assert!(opts.include_definition);
  }
}
