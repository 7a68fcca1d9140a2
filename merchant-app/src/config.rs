//! Configuration loading from environment.

use std::env;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_RATE_LIMIT_PER_MINUTE: u32 = 100;

/// Console log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

impl LogFormat {
    fn parse(raw: &str) -> anyhow::Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" | "" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => anyhow::bail!("invalid LOG_FORMAT {:?}: expected text or json", other),
        }
    }
}

/// Application configuration.
#[derive(Debug)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    /// Requests allowed per merchant per minute
    pub rate_limit_per_minute: u32,
    pub log_format: LogFormat,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|e| anyhow::anyhow!("invalid PORT {:?}: {}", raw, e))?,
            None => DEFAULT_PORT,
        };

        let database_url = lookup("DATABASE_URL")
            .ok_or_else(|| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let rate_limit_per_minute = match lookup("RATE_LIMIT_PER_MINUTE") {
            Some(raw) => raw
                .parse()
                .map_err(|e| anyhow::anyhow!("invalid RATE_LIMIT_PER_MINUTE {:?}: {}", raw, e))?,
            None => DEFAULT_RATE_LIMIT_PER_MINUTE,
        };

        let log_format = match lookup("LOG_FORMAT") {
            Some(raw) => LogFormat::parse(&raw)?,
            None => LogFormat::default(),
        };

        Ok(Self {
            port,
            database_url,
            rate_limit_per_minute,
            log_format,
        })
    }

    /// The database URL with any password masked, for logging.
    pub fn redacted_database_url(&self) -> String {
        let url = &self.database_url;
        let Some(scheme_end) = url.find("://").map(|i| i + 3) else {
            return url.clone();
        };
        let Some(at) = url[scheme_end..].find('@').map(|i| scheme_end + i) else {
            return url.clone();
        };
        match url[scheme_end..at].find(':') {
            Some(colon) => format!("{}:***{}", &url[..scheme_end + colon], &url[at..]),
            None => url.clone(),
        }
    }
}
