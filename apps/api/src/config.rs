use std::str::FromStr;

use anyhow::{Context, Result};

use crate::embedding::hashing::DEFAULT_DIMENSION;
use crate::evaluation::scoring::WeightConfig;

const DEFAULT_EMBEDDING_MODEL: &str = "all-MiniLM-L6-v2";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Fails at startup if a set variable cannot be parsed.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Suggestions are disabled when unset.
    pub anthropic_api_key: Option<String>,
    /// OpenAI-compatible embeddings endpoint. Feature hashing is used when unset.
    pub embedding_url: Option<String>,
    pub embedding_model: String,
    pub embedding_api_key: Option<String>,
    pub hash_embedding_dim: usize,
    pub max_upload_bytes: usize,
    pub weights: WeightConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = WeightConfig::default();
        let weights = WeightConfig::new(
            env_or("WEIGHT_MUST_HAVE", 40.0)?,
            env_or("WEIGHT_NICE_TO_HAVE", 10.0)?,
            env_or("WEIGHT_DEGREE", 5.0)?,
            env_or("WEIGHT_EXPERIENCE", 10.0)?,
            env_or("WEIGHT_SEMANTIC", 35.0)?,
        )
        .with_context(|| format!("Invalid score weights (defaults: {defaults:?})"))?;

        Ok(Config {
            port: env_or("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            embedding_url: optional_env("EMBEDDING_URL"),
            embedding_model: optional_env("EMBEDDING_MODEL")
                .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string()),
            embedding_api_key: optional_env("EMBEDDING_API_KEY"),
            hash_embedding_dim: env_or("HASH_EMBEDDING_DIM", DEFAULT_DIMENSION)?,
            max_upload_bytes: env_or("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            weights,
        })
    }
}

/// Set and non-blank, otherwise `None`.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => parse_value(key, &raw),
        None => Ok(default),
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse::<T>()
        .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value_accepts_numbers() {
        assert_eq!(parse_value::<u16>("PORT", " 9000 ").unwrap(), 9000);
        assert_eq!(parse_value::<f64>("WEIGHT_SEMANTIC", "12.5").unwrap(), 12.5);
    }

    #[test]
    fn test_parse_value_error_names_the_variable() {
        let err = parse_value::<u16>("PORT", "eighty").unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }
}
