//! Process configuration from `.env` and environment variables.
//!
//! Built once at startup and passed down explicitly. Every reader goes
//! through a lookup closure so tests can feed a plain map instead of
//! mutating the process environment.

use std::fmt;
use std::time::Duration;

use tracing::{debug, info};

use crate::db::{HostCandidate, PoolBounds};
use crate::error::{Error, Result};

const DEFAULT_DB_HOST: &str = "localhost";
const DEFAULT_DB_PORT: u16 = 5432;
const DEFAULT_CONTAINER_NAME: &str = "contactdir-db-1";
const DEFAULT_SERVICE_NAME: &str = "db";
const NIMBLE_API_KEY_LEN: usize = 30;

/// Load `.env` from the current directory if present.
///
/// Variables already set in the environment are not overwritten.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => info!("Loaded configuration from {}", path.display()),
        Err(e) => debug!("No .env loaded: {}", e),
    }
}

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub nimble: NimbleApiConfig,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            database: DatabaseConfig::from_lookup(&lookup)?,
            nimble: NimbleApiConfig::from_lookup(&lookup)?,
        })
    }
}

/// Database connection settings (`DB_*`)
#[derive(Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password: String,
    pub container_name: String,
    pub service_name: String,
    pub pool: PoolBounds,
}

impl DatabaseConfig {
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Prefixed::new("DB_", &lookup);

        let host = env.string_or("HOST", DEFAULT_DB_HOST);
        env.min_len("HOST", &host, 1)?;

        let port: u16 = env.parsed_or("PORT", DEFAULT_DB_PORT)?;
        if port == 0 {
            return Err(env.invalid("PORT", "must be between 1 and 65535"));
        }

        let name = env.required("NAME")?;
        env.min_len("NAME", &name, 3)?;
        let user = env.required("USER")?;
        env.min_len("USER", &user, 3)?;
        let password = env.required("PASSWORD")?;
        env.min_len("PASSWORD", &password, 8)?;

        let defaults = PoolBounds::default();
        let min = env.parsed_or("POOL_MIN", defaults.min_connections)?;
        let max = env.parsed_or("POOL_MAX", defaults.max_connections)?;
        if max == 0 || max < min {
            return Err(env.invalid("POOL_MAX", "must be at least 1 and not below DB_POOL_MIN"));
        }
        let timeout_secs =
            env.parsed_or("ACQUIRE_TIMEOUT_SECS", defaults.acquire_timeout.as_secs())?;

        Ok(Self {
            host,
            port,
            name,
            user,
            password,
            container_name: env.string_or("CONTAINER_NAME", DEFAULT_CONTAINER_NAME),
            service_name: env.string_or("SERVICE_NAME", DEFAULT_SERVICE_NAME),
            pool: PoolBounds {
                min_connections: min,
                max_connections: max,
                acquire_timeout: Duration::from_secs(timeout_secs),
            },
        })
    }

    /// Host identities for the same database, most specific first.
    ///
    /// Exact duplicates are dropped, keeping the earliest position.
    pub fn candidates(&self) -> Vec<HostCandidate> {
        let all = [
            HostCandidate::direct(&self.host),
            HostCandidate::container_alias(&self.container_name),
            HostCandidate::service_name(&self.service_name),
        ];

        let mut out: Vec<HostCandidate> = Vec::with_capacity(all.len());
        for candidate in all {
            if candidate.host.is_empty() || out.iter().any(|c| c.host == candidate.host) {
                continue;
            }
            out.push(candidate);
        }
        out
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("name", &self.name)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("container_name", &self.container_name)
            .field("service_name", &self.service_name)
            .field("pool", &self.pool)
            .finish()
    }
}

/// Nimble CRM API settings (`NIMBLE_API_*`)
#[derive(Clone)]
pub struct NimbleApiConfig {
    pub api_key: String,
    pub url: url::Url,
}

impl NimbleApiConfig {
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Prefixed::new("NIMBLE_API_", &lookup);

        let api_key = env.required("KEY")?;
        if api_key.chars().count() != NIMBLE_API_KEY_LEN {
            return Err(env.invalid(
                "KEY",
                &format!("must be exactly {} characters", NIMBLE_API_KEY_LEN),
            ));
        }

        let raw_url = env.required("URL")?;
        let url = url::Url::parse(&raw_url)
            .map_err(|e| env.invalid("URL", &format!("not a valid URL: {}", e)))?;
        if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
            return Err(env.invalid("URL", "must be an absolute http(s) URL"));
        }

        Ok(Self { api_key, url })
    }
}

impl fmt::Debug for NimbleApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NimbleApiConfig")
            .field("api_key", &"<redacted>")
            .field("url", &self.url.as_str())
            .finish()
    }
}

/// Prefixed view over a lookup function
struct Prefixed<'a, F> {
    prefix: &'static str,
    lookup: &'a F,
}

impl<'a, F> Prefixed<'a, F>
where
    F: Fn(&str) -> Option<String>,
{
    fn new(prefix: &'static str, lookup: &'a F) -> Self {
        Self { prefix, lookup }
    }

    fn key(&self, name: &str) -> String {
        format!("{}{}", self.prefix, name)
    }

    fn get(&self, name: &str) -> Option<String> {
        (self.lookup)(&self.key(name))
    }

    fn invalid(&self, name: &str, reason: &str) -> Error {
        Error::config(self.key(name), reason)
    }

    fn required(&self, name: &str) -> Result<String> {
        self.get(name).ok_or_else(|| self.invalid(name, "not set"))
    }

    fn string_or(&self, name: &str, default: &str) -> String {
        self.get(name).unwrap_or_else(|| default.to_string())
    }

    fn parsed_or<T>(&self, name: &str, default: T) -> Result<T>
    where
        T: std::str::FromStr,
        T::Err: fmt::Display,
    {
        match self.get(name) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|e| self.invalid(name, &format!("'{}': {}", raw, e))),
            None => Ok(default),
        }
    }

    fn min_len(&self, name: &str, value: &str, min: usize) -> Result<()> {
        if value.chars().count() < min {
            return Err(self.invalid(name, &format!("must be at least {} characters", min)));
        }
        Ok(())
    }
}
