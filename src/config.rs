use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_STORAGE_URL: &str = "sqlite:weeklog.db";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_STORAGE_TIMEOUT_SECS: u64 = 5;

/// Where workout records live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageUrl {
    /// SQLite database file, or `:memory:`.
    Sqlite(String),
    /// Single JSON document keyed by day.
    JsonFile(PathBuf),
}

impl StorageUrl {
    pub fn parse(url: &str) -> Self {
        if let Some(path) = url.strip_prefix("file:") {
            return StorageUrl::JsonFile(PathBuf::from(path));
        }

        let path = url.strip_prefix("sqlite:").unwrap_or(url);
        // Drop query parameters such as ?mode=rwc
        let path = path.split('?').next().unwrap_or(path);
        StorageUrl::Sqlite(path.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuntimeMode {
    Development,
    #[default]
    Production,
}

impl RuntimeMode {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => RuntimeMode::Development,
            _ => RuntimeMode::Production,
        }
    }

    /// Internal error detail is only sent to clients in development.
    pub fn exposes_error_detail(&self) -> bool {
        matches!(self, RuntimeMode::Development)
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub storage_url: StorageUrl,
    pub host: String,
    pub port: u16,
    pub mode: RuntimeMode,
    pub storage_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let storage_url = lookup("STORAGE_URL")
            .or_else(|| lookup("DATABASE_URL"))
            .unwrap_or_else(|| DEFAULT_STORAGE_URL.to_string());

        Self {
            storage_url: StorageUrl::parse(&storage_url),
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            mode: lookup("APP_ENV")
                .map(|m| RuntimeMode::parse(&m))
                .unwrap_or_default(),
            storage_timeout: Duration::from_secs(
                lookup("STORAGE_TIMEOUT_SECS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_STORAGE_TIMEOUT_SECS),
            ),
        }
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
