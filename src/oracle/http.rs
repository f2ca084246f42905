//! HTTP adapters for the public word services.
//!
//! - Random word API: `GET <url>` returns a JSON array of strings.
//! - Dictionary API: `GET <base>/<word>` returns a JSON array of entries
//!   for known words, and a 404 with `{"title": "No Definitions Found"}`
//!   otherwise.

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use super::{Dictionary, OracleError, WordSource};

const NO_DEFINITIONS: &str = "No Definitions Found";

/// HTTP adapter configuration.
#[derive(Clone, Debug)]
pub struct HttpOracleConfig {
    /// Endpoint returning a JSON array of words.
    pub word_source_url: String,
    /// Base URL; the word is appended as a path segment.
    pub dictionary_url: String,
    /// Per-request timeout enforced by the HTTP client.
    pub request_timeout: Duration,
}

impl Default for HttpOracleConfig {
    fn default() -> Self {
        Self {
            word_source_url: "https://random-word-api.herokuapp.com/all".to_string(),
            dictionary_url: "https://api.dictionaryapi.dev/api/v2/entries/en".to_string(),
            request_timeout: Duration::from_secs(5),
        }
    }
}

impl HttpOracleConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            word_source_url: std::env::var("WORD_SOURCE_URL").unwrap_or(defaults.word_source_url),
            dictionary_url: std::env::var("DICTIONARY_URL").unwrap_or(defaults.dictionary_url),
            request_timeout: std::env::var("HTTP_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.request_timeout),
        }
    }

    /// Build a client with this config's timeout.
    pub fn client(&self) -> Result<reqwest::Client, OracleError> {
        Ok(reqwest::Client::builder()
            .timeout(self.request_timeout)
            .build()?)
    }
}

/// Random word API client.
#[derive(Clone, Debug)]
pub struct RandomWordApi {
    client: reqwest::Client,
    url: String,
}

impl RandomWordApi {
    /// Create a client for `config.word_source_url`.
    pub fn new(config: &HttpOracleConfig) -> Result<Self, OracleError> {
        Ok(Self {
            client: config.client()?,
            url: config.word_source_url.clone(),
        })
    }
}

impl WordSource for RandomWordApi {
    async fn fetch_candidate_words(&self) -> Result<Vec<String>, OracleError> {
        let response = self.client.get(&self.url).send().await?.error_for_status()?;
        let words: Vec<String> = response.json().await?;
        debug!(count = words.len(), "fetched candidate words");
        Ok(words)
    }
}

/// Dictionary API client.
#[derive(Clone, Debug)]
pub struct DictionaryApi {
    client: reqwest::Client,
    base_url: String,
}

impl DictionaryApi {
    /// Create a client for `config.dictionary_url`.
    pub fn new(config: &HttpOracleConfig) -> Result<Self, OracleError> {
        Ok(Self {
            client: config.client()?,
            base_url: config.dictionary_url.trim_end_matches('/').to_string(),
        })
    }
}

impl Dictionary for DictionaryApi {
    async fn is_real_word(&self, word: &str) -> Result<bool, OracleError> {
        let url = format!("{}/{}", self.base_url, word);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            debug!(word, status = %response.status(), "dictionary lookup negative");
            return Ok(false);
        }

        let body: Value = response.json().await?;
        let found = has_definitions(&body);
        if !found {
            warn!(word, "dictionary returned success without entries");
        }
        Ok(found)
    }
}

/// Interpret a successful dictionary body.
///
/// A non-empty array of entries means the word exists. Anything else,
/// including the "no definitions" object, counts as not found.
pub fn has_definitions(body: &Value) -> bool {
    match body {
        Value::Array(entries) => !entries.is_empty(),
        Value::Object(map) => {
            let no_definitions = map.get("title").and_then(Value::as_str) == Some(NO_DEFINITIONS);
            !no_definitions && !map.is_empty()
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_has_definitions() {
        assert!(has_definitions(&json!([{ "word": "code" }])));
        assert!(!has_definitions(&json!([])));
        assert!(!has_definitions(&json!({ "title": "No Definitions Found" })));
        assert!(!has_definitions(&json!("code")));
        assert!(!has_definitions(&json!(null)));
    }

    #[test]
    fn test_default_config() {
        let config = HttpOracleConfig::default();
        assert!(config.word_source_url.starts_with("https://"));
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_dictionary_base_url_trimmed() {
        let config = HttpOracleConfig {
            dictionary_url: "http://localhost:9/entries/".into(),
            ..Default::default()
        };
        let api = DictionaryApi::new(&config).unwrap();
        assert_eq!(api.base_url, "http://localhost:9/entries");
    }
}
