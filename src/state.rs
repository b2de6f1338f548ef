//! Application state: the Gemini client, prompt preambles, the current
//! generation options with their durable store, and the dispatch sequence.
//!
//! Options are read from disk once at startup and rewritten wholesale after
//! every change; persistence failures leave the in-memory value authoritative.
//! The sequence counter tags every generation response so clients can discard
//! a stale response that resolves after a later request's.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;
use tracing::{info, instrument};

use crate::config::{load_tutor_config_from_env, Prompts};
use crate::gemini::Gemini;
use crate::options::GenerationOptions;
use crate::settings::SettingsStore;

pub struct AppState {
    pub gemini: Gemini,
    pub prompts: Prompts,
    pub options: RwLock<GenerationOptions>,
    pub settings: SettingsStore,
    seq: AtomicU64,
}

impl AppState {
    /// Build state from env: prompts config, persisted options, Gemini client.
    /// Returns an error when GEMINI_API_KEY is absent; the process must not
    /// start without its credential.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Result<Self, &'static str> {
        let prompts = load_tutor_config_from_env()
            .map(|c| c.prompts)
            .unwrap_or_default();

        let settings = SettingsStore::from_env();
        let options = settings.load_options();

        let gemini = Gemini::from_env().ok_or("GEMINI_API_KEY environment variable is not set")?;
        info!(
            target: "tenseapp_backend",
            base_url = %gemini.base_url,
            model = %gemini.model,
            "Gemini enabled."
        );

        Ok(Self {
            gemini,
            prompts,
            options: RwLock::new(options),
            settings,
            seq: AtomicU64::new(0),
        })
    }

    /// Next dispatch sequence number (monotonically increasing per process).
    pub fn next_seq(&self) -> u64 {
        self.seq.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub async fn current_options(&self) -> GenerationOptions {
        self.options.read().await.clone()
    }

    #[cfg(test)]
    fn for_tests(settings: SettingsStore) -> Self {
        Self {
            gemini: Gemini {
                client: reqwest::Client::new(),
                api_key: "test-key".into(),
                base_url: "http://localhost:0".into(),
                model: "gemini-2.5-flash".into(),
            },
            prompts: Prompts::default(),
            options: RwLock::new(GenerationOptions::default()),
            settings,
            seq: AtomicU64::new(0),
        }
    }

    /// Replace the stored options and persist them. A failed write is logged
    /// by the store; the in-memory value still wins.
    ///
    /// The write guard is held across the file write: concurrent updates must
    /// not interleave their read-modify-write of the settings file, or an
    /// older update could land on disk after a newer one and be resurrected
    /// on the next startup.
    #[instrument(level = "info", skip_all)]
    pub async fn update_options(&self, new: GenerationOptions) {
        let mut guard = self.options.write().await;
        *guard = new.clone();
        self.settings.save_options(&new);
        drop(guard);
        info!(target: "tenseapp_backend", "Generation options updated");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::options::Difficulty;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_updates_leave_disk_matching_memory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let state = Arc::new(AppState::for_tests(SettingsStore::at(
            dir.path().join("settings.json"),
        )));

        let mut handles = Vec::new();
        for n in 1..=3u8 {
            for diff in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
                let state = state.clone();
                handles.push(tokio::spawn(async move {
                    let mut opts = GenerationOptions::default();
                    opts.number_of_examples = n;
                    opts.detailed_example_difficulty = diff;
                    opts.include_passive_voice = n % 2 == 0;
                    state.update_options(opts).await;
                }));
            }
        }
        for h in handles {
            h.await.expect("join");
        }

        // Whichever update won in memory must be the one on disk; a stale
        // file write would desynchronize the two and survive a restart.
        assert_eq!(state.settings.load_options(), state.current_options().await);
    }

    #[tokio::test]
    async fn update_persists_and_reloads() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = SettingsStore::at(dir.path().join("settings.json"));
        let state = AppState::for_tests(store.clone());

        let mut opts = GenerationOptions::default();
        opts.include_definition = false;
        state.update_options(opts.clone()).await;

        assert_eq!(state.current_options().await, opts);
        assert_eq!(store.load_options(), opts);
    }

    #[test]
    fn seq_is_monotonically_increasing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let state = AppState::for_tests(SettingsStore::at(dir.path().join("settings.json")));
        let a = state.next_seq();
        let b = state.next_seq();
        assert!(b > a);
    }
}
