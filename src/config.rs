/*
 * Responsibility
 * - read environment / .env (PORT, SUPABASE_URL, service role key, upstream URL)
 * - validate values (startup fails when something is missing)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use url::Url;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_RANDOM_DOG_URL: &str = "https://dog.ceo/api/breeds/image/random";

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,

    // identity backend (GoTrue) and the elevated-privilege key used against it
    pub supabase_url: Url,
    pub service_role_key: String,

    pub random_dog_url: Url,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = match lookup("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => DEFAULT_PORT,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let supabase_url = lookup("SUPABASE_URL")
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::Missing("SUPABASE_URL"))?;
        let supabase_url =
            Url::parse(supabase_url.trim()).map_err(|_| ConfigError::Invalid("SUPABASE_URL"))?;

        let service_role_key = lookup("SUPABASE_SERVICE_ROLE_KEY")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("SUPABASE_SERVICE_ROLE_KEY"))?;

        let random_dog_url = lookup("RANDOM_DOG_UPSTREAM_URL")
            .unwrap_or_else(|| DEFAULT_RANDOM_DOG_URL.to_string());
        let random_dog_url = Url::parse(random_dog_url.trim())
            .map_err(|_| ConfigError::Invalid("RANDOM_DOG_UPSTREAM_URL"))?;

        Ok(Self {
            addr,
            supabase_url,
            service_role_key,
            random_dog_url,
        })
    }
}
