use std::time::Duration;

use anyhow::{bail, Context, Result};
use reqwest::Url;

const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
const DEFAULT_ACCEPTED_FILE_TYPES: &str = "pdf,word,document";

/// Application configuration loaded from environment variables.
/// Startup fails if the webhook URL is missing or any value is malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub matcher_webhook_url: Url,
    pub matcher_timeout: Duration,
    pub max_upload_bytes: usize,
    /// Substrings one of which the declared content type must contain.
    /// Empty disables the server-side type check.
    pub accepted_file_types: Vec<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Config {
            matcher_webhook_url: parse_webhook_url(&require(&lookup, "MATCHER_WEBHOOK_URL")?)?,
            matcher_timeout: parse_timeout_secs(&var(
                "MATCHER_TIMEOUT_SECS",
                &DEFAULT_TIMEOUT_SECS.to_string(),
            ))?,
            max_upload_bytes: var("MAX_UPLOAD_BYTES", &DEFAULT_MAX_UPLOAD_BYTES.to_string())
                .parse::<usize>()
                .context("MAX_UPLOAD_BYTES must be a byte count")?,
            accepted_file_types: parse_accepted_types(&var(
                "ACCEPTED_FILE_TYPES",
                DEFAULT_ACCEPTED_FILE_TYPES,
            )),
            port: var("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: var("RUST_LOG", "info"),
        })
    }
}

fn require(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    lookup(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_timeout_secs(raw: &str) -> Result<Duration> {
    let secs = raw
        .trim()
        .parse::<u64>()
        .context("MATCHER_TIMEOUT_SECS must be a whole number of seconds")?;
    if secs == 0 {
        bail!("MATCHER_TIMEOUT_SECS must be greater than zero");
    }
    Ok(Duration::from_secs(secs))
}

fn parse_webhook_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())
        .with_context(|| format!("MATCHER_WEBHOOK_URL is not a valid URL: '{raw}'"))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => bail!("MATCHER_WEBHOOK_URL must use http or https, got '{other}'"),
    }
}

fn parse_accepted_types(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_missing_webhook_url_aborts() {
        let err = Config::from_lookup(lookup_from(&[("PORT", "9000")])).unwrap_err();
        assert!(err.to_string().contains("MATCHER_WEBHOOK_URL"));
    }

    #[test]
    fn test_defaults_apply_when_only_url_is_set() {
        let config = Config::from_lookup(lookup_from(&[(
            "MATCHER_WEBHOOK_URL",
            "https://hooks.example.com/webhook/match-resume",
        )]))
        .unwrap();
        assert_eq!(config.matcher_timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(config.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
        assert_eq!(config.accepted_file_types, vec!["pdf", "word", "document"]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
    }

    #[test]
    fn test_zero_timeout_aborts() {
        let err = Config::from_lookup(lookup_from(&[
            ("MATCHER_WEBHOOK_URL", "https://hooks.example.com/hook"),
            ("MATCHER_TIMEOUT_SECS", "0"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("greater than zero"));
    }

    #[test]
    fn test_timeout_parsing() {
        assert_eq!(parse_timeout_secs("30").unwrap(), Duration::from_secs(30));
        assert_eq!(parse_timeout_secs(" 5 ").unwrap(), Duration::from_secs(5));
        assert!(parse_timeout_secs("0").is_err());
        assert!(parse_timeout_secs("abc").is_err());
        assert!(parse_timeout_secs("-1").is_err());
    }

    #[test]
    fn test_webhook_url_accepts_https() {
        let url = parse_webhook_url("https://hooks.example.com/webhook/match-resume").unwrap();
        assert_eq!(url.path(), "/webhook/match-resume");
    }

    #[test]
    fn test_webhook_url_rejects_garbage() {
        assert!(parse_webhook_url("not a url").is_err());
        assert!(parse_webhook_url("").is_err());
    }

    #[test]
    fn test_webhook_url_rejects_non_http_scheme() {
        assert!(parse_webhook_url("ftp://hooks.example.com/upload").is_err());
    }

    #[test]
    fn test_accepted_types_trimmed_and_lowercased() {
        assert_eq!(
            parse_accepted_types(" PDF , word,,document "),
            vec!["pdf", "word", "document"]
        );
    }

    #[test]
    fn test_empty_accepted_types_disables_check() {
        assert!(parse_accepted_types("").is_empty());
        assert!(parse_accepted_types(" , ").is_empty());
    }
}
