//! Runtime configuration, read from the environment (and `.env` via dotenv).

use anyhow::{format_err, Context, Result};
use std::path::PathBuf;
use std::str::FromStr;

use crate::constants::MAX_TOKEN_TTL_HOURS;

/// Connection settings for the relational store.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Client credentials of one OAuth provider.
#[derive(Debug, Clone)]
pub struct ProviderCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub callback_url: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// The address the HTTP server binds to.
    pub addr: String,
    pub database: DatabaseConfig,
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    /// Origin of the SPA; used for CORS and OAuth redirects.
    pub frontend_url: String,
    /// Registered emails must end in `@<allowed_email_domain>`.
    pub allowed_email_domain: String,
    pub static_dir: PathBuf,
    /// Built SPA served for every unmatched path, if set.
    pub frontend_dir: Option<PathBuf>,
    /// Drop every table before syncing the schema.
    pub reset_database: bool,
    pub seed_database: bool,
    pub google: Option<ProviderCredentials>,
    pub linkedin: Option<ProviderCredentials>,
}

const DEFAULT_JWT_SECRET: &str = "default_jwt_secret_key";

impl Config {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Config> {
        Config::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port: u16 = parse_or(get("PORT"), "PORT", 5000)?;
        let addr = get("ADDR").unwrap_or_else(|| format!("0.0.0.0:{}", port));
        let api_url = get("API_URL").unwrap_or_else(|| format!("http://localhost:{}", port));

        let database = DatabaseConfig {
            url: get("DATABASE_URL").unwrap_or_else(|| {
                let user = get("DB_USER").unwrap_or_else(|| "postgres".into());
                let credentials = match get("DB_PASSWORD") {
                    Some(password) => format!("{}:{}", user, password),
                    None => user,
                };
                format!(
                    "postgres://{}@{}:{}/{}",
                    credentials,
                    get("DB_HOST").unwrap_or_else(|| "localhost".into()),
                    get("DB_PORT").unwrap_or_else(|| "5432".into()),
                    get("DB_NAME").unwrap_or_else(|| "cadenza".into()),
                )
            }),
            max_connections: parse_or(get("DB_MAX_CONNECTIONS"), "DB_MAX_CONNECTIONS", 5)?,
            min_connections: parse_or(get("DB_MIN_CONNECTIONS"), "DB_MIN_CONNECTIONS", 0)?,
        };

        let jwt_secret = get("JWT_SECRET").unwrap_or_else(|| {
            tracing::warn!("JWT_SECRET is not set, falling back to the development secret");
            DEFAULT_JWT_SECRET.into()
        });

        let provider = |name: &str| -> Option<ProviderCredentials> {
            let upper = name.to_uppercase();
            let client_id = get(&format!("{}_CLIENT_ID", upper))?;
            let client_secret = get(&format!("{}_CLIENT_SECRET", upper))?;
            let callback_url = get(&format!("{}_CALLBACK_URL", upper))
                .unwrap_or_else(|| format!("{}/api/auth/{}/callback", api_url, name));
            Some(ProviderCredentials {
                client_id,
                client_secret,
                callback_url,
            })
        };

        let token_ttl_hours: i64 = parse_or(get("TOKEN_TTL_HOURS"), "TOKEN_TTL_HOURS", 24)?;
        if !(1..=MAX_TOKEN_TTL_HOURS).contains(&token_ttl_hours) {
            return Err(format_err!(
                "TOKEN_TTL_HOURS must be between 1 and {}, got {}",
                MAX_TOKEN_TTL_HOURS,
                token_ttl_hours
            ));
        }

        Ok(Config {
            addr,
            database,
            jwt_secret,
            token_ttl_hours,
            frontend_url: get("FRONTEND_URL")
                .map(|url| url.trim_end_matches('/').to_owned())
                .unwrap_or_else(|| "http://localhost:3000".into()),
            allowed_email_domain: get("ALLOWED_EMAIL_DOMAIN")
                .map(|domain| domain.trim_start_matches('@').to_lowercase())
                .unwrap_or_else(|| "gmail.com".into()),
            static_dir: get("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("static/images")),
            frontend_dir: get("FRONTEND_DIR").map(PathBuf::from),
            reset_database: parse_flag(get("DB_RESET"), "DB_RESET", false)?,
            seed_database: parse_flag(get("DB_SEED"), "DB_SEED", true)?,
            google: provider("google"),
            linkedin: provider("linkedin"),
        })
    }
}

fn parse_or<T>(value: Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match value {
        Some(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: {:?}", key, value)),
        None => Ok(default),
    }
}

fn parse_flag(value: Option<String>, key: &str, default: bool) -> Result<bool> {
    match value.as_deref().map(|v| v.trim().to_lowercase()) {
        None => Ok(default),
        Some(v) if matches!(v.as_str(), "1" | "true" | "yes" | "on") => Ok(true),
        Some(v) if matches!(v.as_str(), "0" | "false" | "no" | "off") => Ok(false),
        Some(v) => Err(format_err!("{} must be a boolean, got {:?}", key, v)),
    }
}
