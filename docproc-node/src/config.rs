use crate::error::ConfigError;
use secrecy::{ExposeSecret, SecretString};
use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;
pub const DEFAULT_URL_PROXY_PREFIX: &str = "https://r.jina.ai/";
pub const DEFAULT_SAMPLE_CHARS: usize = 3000;
pub const DEFAULT_SERVICE_NAME: &str = "modern-doc-processing-stack";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Process-wide settings, read once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: SecretString,
    pub max_file_size: u64,
    pub host: String,
    pub port: u16,
    pub url_proxy_prefix: String,
    pub language_sample_chars: usize,
    pub llm_provider: Option<String>,
    pub llm_model: Option<String>,
    pub service_name: String,
    pub log_format: LogFormat,
}

impl Settings {
    /// Loads `.env` (if present) and then reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = non_empty("API_KEY").ok_or(ConfigError::Missing("API_KEY"))?;

        let log_format = match non_empty("LOG_FORMAT").as_deref() {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "LOG_FORMAT",
                    value: other.to_string(),
                    reason: "expected `pretty` or `json`".to_string(),
                })
            }
        };

        Ok(Self {
            api_key: SecretString::new(api_key),
            max_file_size: parse_or(
                "MAX_FILE_SIZE",
                non_empty("MAX_FILE_SIZE"),
                DEFAULT_MAX_FILE_SIZE,
            )?,
            host: non_empty("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or("PORT", non_empty("PORT"), 8000)?,
            url_proxy_prefix: non_empty("URL_PROXY_PREFIX")
                .unwrap_or_else(|| DEFAULT_URL_PROXY_PREFIX.to_string()),
            language_sample_chars: parse_or(
                "LANGUAGE_SAMPLE_CHARS",
                non_empty("LANGUAGE_SAMPLE_CHARS"),
                DEFAULT_SAMPLE_CHARS,
            )?,
            llm_provider: non_empty("LLM_PROVIDER"),
            llm_model: non_empty("LLM_MODEL"),
            service_name: non_empty("SERVICE_NAME")
                .unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_string()),
            log_format,
        })
    }

    /// Settings suitable for tests and embedding: everything at its default.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            host: "127.0.0.1".to_string(),
            port: 8000,
            url_proxy_prefix: DEFAULT_URL_PROXY_PREFIX.to_string(),
            language_sample_chars: DEFAULT_SAMPLE_CHARS,
            llm_provider: None,
            llm_model: None,
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            log_format: LogFormat::Pretty,
        }
    }

    pub fn api_key_matches(&self, candidate: &str) -> bool {
        constant_time_eq(self.api_key.expose_secret().as_bytes(), candidate.as_bytes())
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse().map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
            key: "HOST",
            value: raw.clone(),
            reason: e.to_string(),
        })
    }
}

/// Compares without short-circuiting on the first differing byte.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

fn parse_or<T>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
            value,
        }),
    }
}
