use anyhow::{Context, Result};
use std::str::FromStr;

use crate::security::Argon2Config;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub session: SessionConfig,
    pub argon2: Argon2Config,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: String,
    pub pool_size: u32,
}

#[derive(Clone)]
pub struct SessionConfig {
    /// Process-lifetime secret the session cookie signing key is derived from.
    pub secret_key: Vec<u8>,
}

impl std::fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionConfig")
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

impl SessionConfig {
    pub fn random() -> Self {
        use rand::RngCore;
        let mut secret_key = vec![0u8; 64];
        rand::rng().fill_bytes(&mut secret_key);
        Self { secret_key }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let server = ServerConfig {
            host: env_or("SERVER_HOST", "127.0.0.1"),
            port: parse_env("SERVER_PORT", 5000)?,
        };
        let database = DatabaseConfig {
            url: env_or("DATABASE_URL", "tasks.db"),
            pool_size: parse_env("DATABASE_POOL_SIZE", 8)?,
        };
        let session = match std::env::var("SECRET_KEY") {
            Ok(secret) if !secret.is_empty() => SessionConfig {
                secret_key: secret.into_bytes(),
            },
            _ => {
                log::info!("SECRET_KEY not set, using a generated per-process secret");
                SessionConfig::random()
            }
        };
        let defaults = Argon2Config::default();
        let argon2 = Argon2Config {
            memory_cost_kib: parse_env("ARGON2_MEMORY_KIB", defaults.memory_cost_kib)?,
            time_cost: parse_env("ARGON2_TIME_COST", defaults.time_cost)?,
            parallelism: parse_env("ARGON2_PARALLELISM", defaults.parallelism)?,
            output_length: defaults.output_length,
        };
        Ok(Self {
            server,
            database,
            session,
            argon2,
        })
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Invalid value for {}: {:?}", key, raw)),
        _ => Ok(default),
    }
}
