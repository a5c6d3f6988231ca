use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

use crate::analysis::facts::DEFAULT_SUMMARY_WORDS;

/// Where stopwords are stripped. Fixed per deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StopwordPolicy {
    /// The normalizer drops stopwords; everything downstream sees filtered text.
    #[default]
    PreFilter,
    /// The normalizer keeps stopwords; the vectorizer ignores them when building its vocabulary.
    VectorizerFilter,
}

impl FromStr for StopwordPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pre-filter" | "prefilter" => Ok(StopwordPolicy::PreFilter),
            "vectorizer-filter" | "vectorizer" => Ok(StopwordPolicy::VectorizerFilter),
            other => bail!("unknown stopword policy '{other}' (expected 'pre-filter' or 'vectorizer-filter')"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Fails at startup if any value is malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub stopword_policy: StopwordPolicy,
    /// Optional curated stopword list, one word per line. Built-in English list when unset.
    pub stopwords_path: Option<PathBuf>,
    pub summary_word_limit: usize,
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            stopword_policy: StopwordPolicy::default(),
            stopwords_path: None,
            summary_word_limit: DEFAULT_SUMMARY_WORDS,
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();

        Ok(Config {
            port: parse_env("PORT", defaults.port)
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            stopword_policy: parse_env("STOPWORD_POLICY", defaults.stopword_policy)?,
            stopwords_path: optional_env("STOPWORDS_PATH").map(PathBuf::from),
            summary_word_limit: parse_env("SUMMARY_WORD_LIMIT", defaults.summary_word_limit)
                .context("SUMMARY_WORD_LIMIT must be a non-negative integer")?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", defaults.max_upload_bytes)
                .context("MAX_UPLOAD_BYTES must be a byte count")?,
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("Invalid value '{raw}' for '{key}': {e}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_parses_both_spellings() {
        assert_eq!(
            "pre-filter".parse::<StopwordPolicy>().unwrap(),
            StopwordPolicy::PreFilter
        );
        assert_eq!(
            "Vectorizer-Filter".parse::<StopwordPolicy>().unwrap(),
            StopwordPolicy::VectorizerFilter
        );
    }

    #[test]
    fn test_policy_rejects_unknown() {
        assert!("sometimes".parse::<StopwordPolicy>().is_err());
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.summary_word_limit, 50);
        assert_eq!(config.stopword_policy, StopwordPolicy::PreFilter);
        assert!(config.stopwords_path.is_none());
    }
}
