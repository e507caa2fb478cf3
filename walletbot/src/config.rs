//! Startup configuration loaded from `.env` and the process environment.

use std::collections::HashMap;
use std::path::Path;

use crate::client::Client;
use crate::error::{Error, Result};

pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
pub const MODEL_VAR: &str = "GEMINI_MODEL";
pub const BASE_URL_VAR: &str = "GENAI_BASE_URL";
pub const API_VERSION_VAR: &str = "GENAI_API_VERSION";
pub const TIMEOUT_VAR: &str = "GENAI_TIMEOUT_SECS";

/// 默认对话模型。
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// 进程级配置，启动时构建一次后传给各构造函数。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_key: String,
    pub model: String,
    pub base_url: Option<String>,
    pub api_version: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// 加载当前目录（或上级目录）的 `.env`，再从进程环境读取配置。
    ///
    /// `.env` 不覆盖已存在的环境变量；找不到 `.env` 不算错误。
    ///
    /// # Errors
    /// 当 `.env` 格式错误或缺少 API Key 时返回错误。
    pub fn from_env() -> Result<Self> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
            Err(err) if err.not_found() => tracing::debug!("no .env file found"),
            Err(err) => return Err(err.into()),
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从指定 dotenv 文件读取配置，不修改进程环境。
    ///
    /// 进程环境中已存在的变量优先于文件内容。
    ///
    /// # Errors
    /// 当文件不存在、格式错误或缺少 API Key 时返回错误。
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self> {
        let mut entries = HashMap::new();
        for item in dotenvy::from_path_iter(path.as_ref())? {
            let (key, value) = item?;
            entries.insert(key, value);
        }
        Self::from_lookup(|key| {
            std::env::var(key)
                .ok()
                .or_else(|| entries.get(key).cloned())
        })
    }

    /// 通过查找函数构建配置。
    ///
    /// # Errors
    /// 当缺少 API Key 或超时设置无效时返回错误。
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let api_key = non_blank(API_KEY_VAR).ok_or_else(|| Error::InvalidConfig {
            message: format!("{API_KEY_VAR} not found. Please add it to your .env file"),
        })?;
        let model = non_blank(MODEL_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let timeout_secs = non_blank(TIMEOUT_VAR)
            .map(|value| parse_timeout(&value))
            .transpose()?;

        Ok(Self {
            api_key,
            model,
            base_url: non_blank(BASE_URL_VAR),
            api_version: non_blank(API_VERSION_VAR),
            timeout_secs,
        })
    }

    /// 按配置构建 Gemini 客户端。
    ///
    /// # Errors
    /// 当配置值无效或构建 HTTP 客户端失败时返回错误。
    pub fn client(&self) -> Result<Client> {
        Client::from_config(self)
    }
}

fn parse_timeout(value: &str) -> Result<u64> {
    match value.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(Error::InvalidConfig {
            message: format!("{TIMEOUT_VAR} must be a positive number of seconds, got {value:?}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{lookup, with_env, with_env_in_dir};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn missing_api_key_is_a_config_error() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert!(
            matches!(err, Error::InvalidConfig { ref message } if message.contains("GEMINI_API_KEY not found"))
        );
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let err = Config::from_lookup(lookup(&[("GEMINI_API_KEY", "  ")])).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { .. }));
    }

    #[test]
    fn defaults_apply_when_only_key_is_set() {
        let config = Config::from_lookup(lookup(&[("GEMINI_API_KEY", "key")])).unwrap();
        assert_eq!(config.api_key, "key");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert!(config.base_url.is_none());
        assert!(config.api_version.is_none());
        assert!(config.timeout_secs.is_none());
    }

    #[test]
    fn overrides_are_read_and_blank_values_ignored() {
        let config = Config::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "key"),
            ("GEMINI_MODEL", "gemini-2.0-flash"),
            ("GENAI_BASE_URL", "https://env.example.com"),
            ("GENAI_API_VERSION", ""),
            ("GENAI_TIMEOUT_SECS", "45"),
        ]))
        .unwrap();
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.base_url.as_deref(), Some("https://env.example.com"));
        assert!(config.api_version.is_none());
        assert_eq!(config.timeout_secs, Some(45));
    }

    #[test]
    fn invalid_timeout_is_rejected() {
        for value in ["0", "soon", "-3"] {
            let err = Config::from_lookup(lookup(&[
                ("GEMINI_API_KEY", "key"),
                ("GENAI_TIMEOUT_SECS", value),
            ]))
            .unwrap_err();
            assert!(matches!(err, Error::InvalidConfig { .. }), "{value}");
        }
    }

    #[test]
    fn env_file_supplies_missing_values() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "GEMINI_API_KEY=file-key").unwrap();
        writeln!(file, "GEMINI_MODEL=gemini-file-model").unwrap();

        with_env(&[("GEMINI_API_KEY", None), ("GEMINI_MODEL", None)], || {
            let config = Config::from_env_file(file.path()).unwrap();
            assert_eq!(config.api_key, "file-key");
            assert_eq!(config.model, "gemini-file-model");
        });
    }

    #[test]
    fn ambient_environment_wins_over_env_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "GEMINI_API_KEY=file-key").unwrap();

        with_env(
            &[("GEMINI_API_KEY", Some("ambient-key")), ("GEMINI_MODEL", None)],
            || {
                let config = Config::from_env_file(file.path()).unwrap();
                assert_eq!(config.api_key, "ambient-key");
            },
        );
    }

    #[test]
    fn env_file_without_key_fails() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "GEMINI_MODEL=gemini-file-model").unwrap();

        with_env(&[("GEMINI_API_KEY", None)], || {
            let err = Config::from_env_file(file.path()).unwrap_err();
            assert!(matches!(err, Error::InvalidConfig { .. }));
        });
    }

    #[test]
    fn from_env_without_key_or_dotenv_fails() {
        let dir = tempfile::tempdir().unwrap();
        with_env_in_dir(dir.path(), &[("GEMINI_API_KEY", None)], || {
            let err = Config::from_env().unwrap_err();
            assert!(
                matches!(err, Error::InvalidConfig { ref message } if message.contains("GEMINI_API_KEY not found"))
            );
        });
    }

    #[test]
    fn from_env_reads_key_from_ambient_environment() {
        let dir = tempfile::tempdir().unwrap();
        with_env_in_dir(
            dir.path(),
            &[("GEMINI_API_KEY", Some("ambient-key")), ("GEMINI_MODEL", None)],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.api_key, "ambient-key");
                assert_eq!(config.model, DEFAULT_MODEL);
            },
        );
    }

    #[test]
    fn from_env_rejects_malformed_dotenv() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".env"), "GEMINI_API_KEY='unterminated\n").unwrap();
        with_env_in_dir(dir.path(), &[("GEMINI_API_KEY", None)], || {
            let err = Config::from_env().unwrap_err();
            assert!(matches!(err, Error::Dotenv { .. }));
        });
    }

    #[test]
    fn missing_env_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::from_env_file(dir.path().join("absent.env")).unwrap_err();
        assert!(matches!(err, Error::Dotenv { .. }));
    }
}
