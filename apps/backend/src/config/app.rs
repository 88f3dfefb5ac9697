//! Process configuration read from the environment.
//!
//! `AppConfig::load` first merges `.env.<ENV>` and then `.env` into the
//! process environment (existing variables always win), then parses every
//! setting. Parsing goes through a lookup function so tests can feed a map
//! instead of mutating the real environment.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use rand::rngs::OsRng;
use rand::TryRngCore;
use tracing::{debug, info, warn};

use super::db::{DbKind, DEFAULT_DATABASE_URL};
use crate::error::AppError;
use crate::state::security_config::{
    SecurityConfig, DEFAULT_ACCESS_TTL, DEFAULT_AUDIENCE, DEFAULT_ISSUER, DEFAULT_REFRESH_TTL,
};

const EPHEMERAL_SECRET_BYTES: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Test,
    Production,
}

impl AppEnv {
    pub fn as_str(self) -> &'static str {
        match self {
            AppEnv::Development => "development",
            AppEnv::Test => "test",
            AppEnv::Production => "production",
        }
    }

    /// Whether a missing `JWT_SECRET` may be replaced by a per-process secret.
    pub fn allows_ephemeral_secret(self) -> bool {
        !matches!(self, AppEnv::Production)
    }
}

impl FromStr for AppEnv {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(AppEnv::Development),
            "test" => Ok(AppEnv::Test),
            "production" | "prod" => Ok(AppEnv::Production),
            other => Err(AppError::config(format!(
                "ENV must be development, test or production (got '{other}')"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: AppEnv,
    pub server: ServerConfig,
    pub database_url: String,
    pub security: SecurityConfig,
}

impl AppConfig {
    /// Load env files, then read the process environment.
    pub fn load() -> Result<Self, AppError> {
        load_env_files();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let env = match get("ENV") {
            Some(v) => v.parse()?,
            None => AppEnv::Development,
        };

        let server = ServerConfig {
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or("PORT", get("PORT"), 8080u16)?,
        };

        let database_url =
            get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        DbKind::from_url(&database_url)?;

        let jwt_secret = match get("JWT_SECRET") {
            Some(secret) => secret.into_bytes(),
            None if env.allows_ephemeral_secret() => {
                warn!(
                    env = env.as_str(),
                    "JWT_SECRET not set; using a random per-process secret, tokens will not survive a restart"
                );
                ephemeral_secret()?
            }
            None => {
                return Err(AppError::config(format!(
                    "JWT_SECRET must be set when ENV={}",
                    env.as_str()
                )))
            }
        };

        let access_ttl = parse_ttl(
            "ACCESS_TOKEN_EXPIRE_TIME",
            get("ACCESS_TOKEN_EXPIRE_TIME"),
            DEFAULT_ACCESS_TTL,
        )?;
        let refresh_ttl = parse_ttl(
            "REFRESH_TOKEN_EXPIRE_TIME",
            get("REFRESH_TOKEN_EXPIRE_TIME"),
            DEFAULT_REFRESH_TTL,
        )?;

        let security = SecurityConfig::new(jwt_secret)
            .with_issuer(get("ISSUER").unwrap_or_else(|| DEFAULT_ISSUER.to_string()))
            .with_audience(get("AUDIENCE").unwrap_or_else(|| DEFAULT_AUDIENCE.to_string()))
            .with_ttls(access_ttl, refresh_ttl);

        Ok(Self {
            env,
            server,
            database_url,
            security,
        })
    }
}

fn load_env_files() {
    let env_name = env::var("ENV").unwrap_or_else(|_| AppEnv::Development.as_str().to_string());
    let candidates = [format!(".env.{env_name}"), ".env".to_string()];

    for file in &candidates {
        match dotenvy::from_filename(file) {
            Ok(path) => info!(path = %path.display(), "loaded env file"),
            Err(e) if e.not_found() => debug!(file = %file, "env file not present"),
            Err(e) => warn!(file = %file, error = %e, "failed to parse env file"),
        }
    }
}

fn parse_or<T: FromStr>(key: &str, raw: Option<String>, default: T) -> Result<T, AppError> {
    match raw {
        None => Ok(default),
        Some(v) => v
            .trim()
            .parse()
            .map_err(|_| AppError::config(format!("{key} has an invalid value '{v}'"))),
    }
}

fn parse_ttl(key: &str, raw: Option<String>, default: Duration) -> Result<Duration, AppError> {
    let secs: u64 = parse_or(key, raw, default.as_secs())?;
    if secs == 0 {
        return Err(AppError::config(format!(
            "{key} must be a positive number of seconds"
        )));
    }
    Ok(Duration::from_secs(secs))
}

fn ephemeral_secret() -> Result<Vec<u8>, AppError> {
    let mut secret = vec![0u8; EPHEMERAL_SECRET_BYTES];
    OsRng
        .try_fill_bytes(&mut secret)
        .map_err(|e| AppError::config(format!("cannot generate an ephemeral JWT secret: {e}")))?;
    Ok(secret)
}
