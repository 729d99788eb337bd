use crate::use_cases::SubmitSettings;
use serde::Deserialize;
use std::{env, fmt, fs, path::PathBuf, time::Duration};
use url::Url;

// Runtime constants and environment lookups for the client.

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_SUBMIT_TIMEOUT_MS: u64 = 60_000;
pub const DEFAULT_VERIFICATION_SCRIPT_URL: &str = "https://www.google.com/recaptcha/api.js";
pub const DEFAULT_PROFILE_BASE_URL: &str = "https://twitter.com/";

// Optional TOML file; every key can be overridden by its env var.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub api_url: Option<String>,
    pub submit_timeout_ms: Option<u64>,
    pub verification_script_url: Option<String>,
    pub profile_base_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub api_url: String,
    pub submit_timeout: Duration,
    pub verification_script_url: String,
    pub profile_base_url: String,
    pub auto_agree: bool,
    // Preset widget token; prompted for when absent.
    pub verification_token: Option<String>,
}

#[derive(Debug)]
pub enum ConfigError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(toml::de::Error),
    InvalidUrl {
        key: &'static str,
        source: url::ParseError,
    },
    InvalidNumber {
        key: &'static str,
        value: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
            ConfigError::Parse(err) => write!(f, "invalid config file: {err}"),
            ConfigError::InvalidUrl { key, source } => write!(f, "{key} is not a valid url: {source}"),
            ConfigError::InvalidNumber { key, value } => {
                write!(f, "{key} must be a positive whole number, got {value:?}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl ClientConfig {
    // Reads `PERSONALITY_CLIENT_CONFIG` (if set) and then the env overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let file = match lookup("PERSONALITY_CLIENT_CONFIG") {
            Some(path) => load_file(PathBuf::from(path))?,
            None => FileConfig::default(),
        };
        Self::resolve(file, lookup)
    }

    pub fn resolve(
        file: FileConfig,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let api_url = lookup("PERSONALITY_API_URL")
            .or(file.api_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        validate_url("PERSONALITY_API_URL", &api_url)?;

        let timeout_ms = match lookup("SUBMIT_TIMEOUT_MS") {
            Some(value) => match value.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => ms,
                _ => {
                    return Err(ConfigError::InvalidNumber {
                        key: "SUBMIT_TIMEOUT_MS",
                        value,
                    });
                }
            },
            None => match file.submit_timeout_ms {
                Some(0) => {
                    return Err(ConfigError::InvalidNumber {
                        key: "submit_timeout_ms",
                        value: "0".to_string(),
                    });
                }
                Some(ms) => ms,
                None => DEFAULT_SUBMIT_TIMEOUT_MS,
            },
        };

        let verification_script_url = lookup("VERIFICATION_SCRIPT_URL")
            .or(file.verification_script_url)
            .unwrap_or_else(|| DEFAULT_VERIFICATION_SCRIPT_URL.to_string());
        validate_url("VERIFICATION_SCRIPT_URL", &verification_script_url)?;

        let profile_base_url = lookup("PROFILE_BASE_URL")
            .or(file.profile_base_url)
            .unwrap_or_else(|| DEFAULT_PROFILE_BASE_URL.to_string());
        validate_url("PROFILE_BASE_URL", &profile_base_url)?;

        // Consent can be pre-given for unattended runs.
        let auto_agree = matches!(
            lookup("AUTO_AGREE").as_deref(),
            Some("1") | Some("true") | Some("yes")
        );
        let verification_token = lookup("VERIFICATION_TOKEN").filter(|token| !token.is_empty());

        Ok(Self {
            api_url,
            submit_timeout: Duration::from_millis(timeout_ms),
            verification_script_url,
            profile_base_url,
            auto_agree,
            verification_token,
        })
    }

    pub fn submit_settings(&self) -> SubmitSettings {
        SubmitSettings {
            timeout: self.submit_timeout,
            verification_script_url: self.verification_script_url.clone(),
            profile_base_url: self.profile_base_url.clone(),
        }
    }
}

pub fn load_file(path: PathBuf) -> Result<FileConfig, ConfigError> {
    let raw = fs::read_to_string(&path).map_err(|source| ConfigError::Read { path, source })?;
    toml::from_str(&raw).map_err(ConfigError::Parse)
}

fn validate_url(key: &'static str, value: &str) -> Result<(), ConfigError> {
    Url::parse(value)
        .map(|_| ())
        .map_err(|source| ConfigError::InvalidUrl { key, source })
}
