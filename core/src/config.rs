//! Client configuration.
//!
//! Settings can be built in code or read from `NANMANAGER_*` environment
//! variables. Retry settings are carried for callers that wrap the client in
//! their own retry loop; the client itself sends every request exactly once.

use std::env;
use std::time::Duration;

use url::Url;

use crate::error::ConfigError;

/// SDK version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default `User-Agent` header value.
pub const USER_AGENT: &str = concat!("NewNanManager-Rust-SDK/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub token: String,
    pub timeout: Duration,
    pub user_agent: String,
    pub max_retries: u32,
    pub retry_delay: Duration,
    /// Log request and response bodies at debug level.
    pub debug: bool,
    /// Skip TLS certificate verification.
    pub insecure_skip_verify: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            token: String::new(),
            timeout: Duration::from_secs(30),
            user_agent: USER_AGENT.to_string(),
            max_retries: 3,
            retry_delay: Duration::from_secs(1),
            debug: false,
            insecure_skip_verify: false,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: &str, token: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            token: token.to_string(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = user_agent.to_string();
        self
    }

    pub fn with_retries(mut self, max_retries: u32, retry_delay: Duration) -> Self {
        self.max_retries = max_retries;
        self.retry_delay = retry_delay;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_insecure_skip_verify(mut self, skip: bool) -> Self {
        self.insecure_skip_verify = skip;
        self
    }

    /// Load settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load settings through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("NANMANAGER_BASE_URL").ok_or(ConfigError::Missing("NANMANAGER_BASE_URL"))?;
        let token = lookup("NANMANAGER_TOKEN").ok_or(ConfigError::Missing("NANMANAGER_TOKEN"))?;
        let mut config = Self::new(&base_url, &token);

        if let Some(secs) = lookup("NANMANAGER_TIMEOUT_SECS") {
            config.timeout = Duration::from_secs(parse_number("NANMANAGER_TIMEOUT_SECS", &secs)?);
        }
        if let Some(user_agent) = lookup("NANMANAGER_USER_AGENT") {
            config.user_agent = user_agent;
        }
        if let Some(retries) = lookup("NANMANAGER_MAX_RETRIES") {
            config.max_retries = parse_number("NANMANAGER_MAX_RETRIES", &retries)?;
        }
        if let Some(ms) = lookup("NANMANAGER_RETRY_DELAY_MS") {
            config.retry_delay = Duration::from_millis(parse_number("NANMANAGER_RETRY_DELAY_MS", &ms)?);
        }
        if let Some(debug) = lookup("NANMANAGER_DEBUG") {
            config.debug = parse_flag("NANMANAGER_DEBUG", &debug)?;
        }
        if let Some(skip) = lookup("NANMANAGER_INSECURE_SKIP_VERIFY") {
            config.insecure_skip_verify = parse_flag("NANMANAGER_INSECURE_SKIP_VERIFY", &skip)?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Missing("base_url"));
        }
        if self.token.is_empty() {
            return Err(ConfigError::Missing("token"));
        }

        let url = Url::parse(&self.base_url).map_err(|e| ConfigError::Invalid {
            name: "base_url",
            reason: e.to_string(),
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::Invalid {
                name: "base_url",
                reason: format!("unsupported scheme `{}`", url.scheme()),
            });
        }

        if self.timeout.is_zero() {
            return Err(ConfigError::Invalid {
                name: "timeout",
                reason: "must be positive".to_string(),
            });
        }
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(name: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::Invalid {
        name,
        reason: format!("`{raw}` is not a number"),
    })
}

fn parse_flag(name: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::Invalid {
            name,
            reason: format!("`{raw}` is not a boolean"),
        }),
    }
}
