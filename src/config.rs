//! Service credentials, from the environment or ~/.finedust/config.json.
//!
//! Environment variables override file values key by key. Both providers
//! require a key: Kakao for TM transcoding, data.go.kr for AirKorea.

use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::PathBuf;

pub const KAKAO_KEY_ENV: &str = "KAKAO_REST_API_KEY";
pub const AIRKOREA_KEY_ENV: &str = "AIRKOREA_SERVICE_KEY";

/// Resolved credentials for both providers.
#[derive(Debug, Clone)]
pub struct Config {
    pub kakao_rest_api_key: String,
    pub airkorea_service_key: String,
}

#[derive(Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    kakao_rest_api_key: Option<String>,
    #[serde(default)]
    airkorea_service_key: Option<String>,
}

impl Config {
    /// Load from the environment, falling back to the default config file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Self::default_path())
    }

    /// Load with an explicit config file path (for testing).
    pub fn load_from(path: PathBuf) -> Result<Self, ConfigError> {
        let file = Self::read_file(&path).unwrap_or_default();

        let kakao = std::env::var(KAKAO_KEY_ENV)
            .ok()
            .filter(|v| !v.is_empty())
            .or(file.kakao_rest_api_key)
            .ok_or(ConfigError::MissingKey {
                env: KAKAO_KEY_ENV,
                file_key: "kakao_rest_api_key",
            })?;

        let airkorea = std::env::var(AIRKOREA_KEY_ENV)
            .ok()
            .filter(|v| !v.is_empty())
            .or(file.airkorea_service_key)
            .ok_or(ConfigError::MissingKey {
                env: AIRKOREA_KEY_ENV,
                file_key: "airkorea_service_key",
            })?;

        Ok(Self {
            kakao_rest_api_key: kakao,
            airkorea_service_key: airkorea,
        })
    }

    fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".finedust")
            .join("config.json")
    }

    fn read_file(path: &PathBuf) -> Option<ConfigFile> {
        let data = fs::read_to_string(path).ok()?;
        serde_json::from_str(&data).ok()
    }
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    MissingKey {
        env: &'static str,
        file_key: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingKey { env, file_key } => write!(
                f,
                "Missing API key: set {} or put \"{}\" in ~/.finedust/config.json",
                env, file_key
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, MutexGuard};
    use tempfile::TempDir;

    // Process env is shared across test threads; serialize every test that
    // touches it.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn clear_env() -> MutexGuard<'static, ()> {
        let guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        std::env::remove_var(KAKAO_KEY_ENV);
        std::env::remove_var(AIRKOREA_KEY_ENV);
        guard
    }

    #[test]
    fn test_load_from_file() {
        let _env = clear_env();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"kakao_rest_api_key": "kakao-abc", "airkorea_service_key": "air-xyz"}"#,
        )
        .unwrap();

        let config = Config::load_from(path).unwrap();
        assert_eq!(config.kakao_rest_api_key, "kakao-abc");
        assert_eq!(config.airkorea_service_key, "air-xyz");
    }

    #[test]
    fn test_env_overrides_file() {
        let _env = clear_env();
        std::env::set_var(KAKAO_KEY_ENV, "kakao-from-env");
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"kakao_rest_api_key": "kakao-from-file", "airkorea_service_key": "air-xyz"}"#,
        )
        .unwrap();

        let config = Config::load_from(path).unwrap();
        std::env::remove_var(KAKAO_KEY_ENV);
        assert_eq!(config.kakao_rest_api_key, "kakao-from-env");
        assert_eq!(config.airkorea_service_key, "air-xyz");
    }

    #[test]
    fn test_missing_file_is_missing_key() {
        let _env = clear_env();
        let dir = TempDir::new().unwrap();
        let result = Config::load_from(dir.path().join("nope.json"));
        assert!(matches!(result, Err(ConfigError::MissingKey { .. })));
    }

    #[test]
    fn test_partial_file_names_the_missing_key() {
        let _env = clear_env();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"kakao_rest_api_key": "kakao-abc"}"#).unwrap();

        match Config::load_from(path) {
            Err(ConfigError::MissingKey { env, .. }) => assert_eq!(env, AIRKOREA_KEY_ENV),
            other => panic!("expected MissingKey, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_malformed_file_ignored() {
        let _env = clear_env();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json at all").unwrap();
        assert!(Config::load_from(path).is_err());
    }

    #[test]
    fn test_error_display_names_remedies() {
        let e = ConfigError::MissingKey {
            env: KAKAO_KEY_ENV,
            file_key: "kakao_rest_api_key",
        };
        let msg = e.to_string();
        assert!(msg.contains(KAKAO_KEY_ENV));
        assert!(msg.contains("config.json"));
    }
}
