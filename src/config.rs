//! Process configuration, read once at startup from the environment.

use std::fmt;

use actix_web::cookie::Key;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use thiserror::Error;

use crate::crypto::{CipherError, CredentialCipher};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_POOL_SIZE: u32 = 10;
const MIN_SESSION_KEY_LEN: usize = 64;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} is not valid: {reason}")]
    Invalid { name: &'static str, reason: String },

    #[error("STOREFRONT_ENCRYPTION_KEY: {0}")]
    EncryptionKey(#[from] CipherError),
}

pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub db_pool_size: u32,
    pub cipher: CredentialCipher,
    pub session_key: Key,
    pub session_cookie_secure: bool,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("db_pool_size", &self.db_pool_size)
            .field("cipher", &self.cipher)
            .field("session_cookie_secure", &self.session_cookie_secure)
            .finish_non_exhaustive()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from any variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let database_url = var("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let host = var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = parse_or(var("PORT"), "PORT", DEFAULT_PORT)?;
        let db_pool_size = parse_or(var("DB_POOL_SIZE"), "DB_POOL_SIZE", DEFAULT_POOL_SIZE)?;
        if db_pool_size == 0 {
            return Err(ConfigError::Invalid {
                name: "DB_POOL_SIZE",
                reason: "must be at least 1".to_string(),
            });
        }

        let encryption_key = var("STOREFRONT_ENCRYPTION_KEY")
            .ok_or(ConfigError::Missing("STOREFRONT_ENCRYPTION_KEY"))?;
        let cipher = CredentialCipher::from_base64(encryption_key.trim())?;

        // Must match the key of the service that writes the session cookies.
        let session_key = var("SESSION_KEY").ok_or(ConfigError::Missing("SESSION_KEY"))?;
        let session_key = session_key_from_base64(session_key.trim())?;

        let session_cookie_secure =
            parse_or(var("SESSION_COOKIE_SECURE"), "SESSION_COOKIE_SECURE", true)?;

        Ok(Self {
            database_url,
            host,
            port,
            db_pool_size,
            cipher,
            session_key,
            session_cookie_secure,
        })
    }
}

fn parse_or<T>(raw: Option<String>, name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(v) => v.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            reason: e.to_string(),
        }),
    }
}

fn session_key_from_base64(encoded: &str) -> Result<Key, ConfigError> {
    let bytes = STANDARD.decode(encoded).map_err(|e| ConfigError::Invalid {
        name: "SESSION_KEY",
        reason: e.to_string(),
    })?;
    if bytes.len() < MIN_SESSION_KEY_LEN {
        return Err(ConfigError::Invalid {
            name: "SESSION_KEY",
            reason: format!(
                "expected at least {} bytes, got {}",
                MIN_SESSION_KEY_LEN,
                bytes.len()
            ),
        });
    }
    Key::try_from(bytes.as_slice()).map_err(|e| ConfigError::Invalid {
        name: "SESSION_KEY",
        reason: e.to_string(),
    })
}
