//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across threads.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;

// ---------------------------------------------------------------------------
// GraderConfig
// ---------------------------------------------------------------------------

/// Settings for the grading oracle client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraderConfig {
    /// Base URL of an OpenAI-compatible chat-completions endpoint.
    pub base_url: String,
    /// API key — `None` for local providers that need no authentication.
    pub api_key: Option<String>,
    /// Ordered candidate models: primary first, then fallbacks.  Each gets
    /// exactly one attempt per grading request.
    pub models: Vec<String>,
    /// Sampling temperature.  Kept low — grading must be near-deterministic.
    pub temperature: f32,
    /// Maximum seconds to wait for one grading response.
    pub timeout_secs: u64,
}

impl Default for GraderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://openrouter.ai/api".into(),
            api_key: None,
            models: vec![
                "google/gemini-2.0-flash-001".into(),
                "meta-llama/llama-3.3-70b-instruct".into(),
                "mistralai/mistral-small-24b-instruct".into(),
                "openai/gpt-4o-mini".into(),
            ],
            temperature: 0.1,
            timeout_secs: 60,
        }
    }
}

// ---------------------------------------------------------------------------
// SttConfig
// ---------------------------------------------------------------------------

/// Settings for the speech-to-text oracle and clip transcoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SttConfig {
    /// Base URL of the recognition service.
    pub base_url: String,
    /// API key — `None` for local deployments.
    pub api_key: Option<String>,
    /// Recognition language passed to the oracle.
    pub language: String,
    /// Maximum seconds to wait for a recognition response.
    pub timeout_secs: u64,
    /// Path to the `ffmpeg` binary used for clip transcoding.
    pub ffmpeg_path: String,
}

impl Default for SttConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:9000".into(),
            api_key: None,
            language: "en-US".into(),
            timeout_secs: 30,
            ffmpeg_path: "ffmpeg".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// LookupConfig
// ---------------------------------------------------------------------------

/// Settings for the dictionary / translation helpers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupConfig {
    /// Base URL of the dictionary service.
    pub dictionary_url: String,
    /// Base URL of the translation service.
    pub translate_url: String,
    /// Maximum seconds to wait for a lookup response.
    pub timeout_secs: u64,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            dictionary_url: "https://api.dictionaryapi.dev".into(),
            translate_url: "https://translate.googleapis.com".into(),
            timeout_secs: 15,
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use speaking_zone::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Grading oracle settings.
    pub grader: GraderConfig,
    /// Speech-to-text settings.
    pub stt: SttConfig,
    /// Dictionary / translation settings.
    pub lookup: LookupConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet
    /// (first-run scenario) so callers never need to special-case a missing
    /// file.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    /// Verify that a default `AppConfig` can be serialised to TOML and
    /// deserialised back without any data loss.
    #[test]
    fn round_trip_toml() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");

        let original = AppConfig::default();
        original.save_to(&path).expect("save");

        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(original.grader.base_url, loaded.grader.base_url);
        assert_eq!(original.grader.models, loaded.grader.models);
        assert_eq!(original.grader.timeout_secs, loaded.grader.timeout_secs);
        assert_eq!(original.stt.language, loaded.stt.language);
        assert_eq!(original.stt.ffmpeg_path, loaded.stt.ffmpeg_path);
        assert_eq!(original.lookup.dictionary_url, loaded.lookup.dictionary_url);
    }

    /// `load_from` on a non-existent path must return `Default` without error.
    #[test]
    fn load_missing_returns_default() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nonexistent.toml");

        let config = AppConfig::load_from(&path).expect("should not error");
        let default = AppConfig::default();

        assert_eq!(config.grader.models, default.grader.models);
        assert_eq!(config.stt.language, default.stt.language);
    }

    #[test]
    fn default_values_are_sane() {
        let cfg = AppConfig::default();

        // Up to four grading candidates, primary first.
        assert!(!cfg.grader.models.is_empty());
        assert!(cfg.grader.models.len() <= 4);
        // Grading must be near-deterministic.
        assert!(cfg.grader.temperature <= 0.2);
        assert!(cfg.grader.api_key.is_none());
        assert_eq!(cfg.stt.language, "en-US");
        assert_eq!(cfg.stt.ffmpeg_path, "ffmpeg");
        assert!(cfg.lookup.timeout_secs > 0);
    }

    /// Verify that modified non-default values survive a round trip.
    #[test]
    fn round_trip_modified_values() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("modified.toml");

        let mut cfg = AppConfig::default();
        cfg.grader.base_url = "http://localhost:11434".into();
        cfg.grader.api_key = Some("sk-test".into());
        cfg.grader.models = vec!["qwen2.5:7b".into()];
        cfg.stt.language = "en-GB".into();
        cfg.stt.ffmpeg_path = "/usr/local/bin/ffmpeg".into();

        cfg.save_to(&path).expect("save");
        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(loaded.grader.base_url, "http://localhost:11434");
        assert_eq!(loaded.grader.api_key, Some("sk-test".into()));
        assert_eq!(loaded.grader.models, vec!["qwen2.5:7b".to_string()]);
        assert_eq!(loaded.stt.language, "en-GB");
        assert_eq!(loaded.stt.ffmpeg_path, "/usr/local/bin/ffmpeg");
    }
}
