use std::env;
use std::path::PathBuf;

use crate::auth::adapter::outgoing::security::bcrypt_hasher::DEFAULT_BCRYPT_COST;

pub const DEFAULT_PORT: u16 = 4000;
pub const DEFAULT_UPLOAD_DIR: &str = "uploads";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set in .env file")]
    Missing(&'static str),

    #[error("Invalid {key} value: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Outbound mail transport settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SmtpSettings {
    /// Authenticated relay (production).
    Relay {
        server: String,
        username: String,
        password: String,
    },
    /// Unauthenticated local catcher (Mailpit, MailHog, ...).
    Local { host: String, port: u16 },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: String,
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub base_url: String,
    pub email_from: String,
    pub smtp: SmtpSettings,
    pub upload_dir: PathBuf,
    pub bcrypt_cost: u32,
}

impl AppConfig {
    /// Load `.env.{RUST_ENV}` (falling back to `.env`) and read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());

        let env_file = format!(".env.{}", environment);
        if dotenvy::from_filename(&env_file).is_err() {
            dotenvy::dotenv().ok();
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &'static str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &'static str| var(key).ok_or(ConfigError::Missing(key));

        let environment = var("RUST_ENV").unwrap_or_else(|| "development".to_string());
        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = match var("PORT") {
            Some(raw) => parse_number("PORT", &raw)?,
            None => DEFAULT_PORT,
        };

        let database_url = required("DATABASE_URL")?;
        let base_url = var("BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| format!("http://localhost:{port}"));
        let email_from = required("EMAIL_FROM")?;

        let smtp = if environment == "test" {
            let port = match var("SMTP_PORT") {
                Some(raw) => parse_number("SMTP_PORT", &raw)?,
                None => 1025,
            };
            SmtpSettings::Local {
                host: var("SMTP_HOST").unwrap_or_else(|| "localhost".to_string()),
                port,
            }
        } else {
            SmtpSettings::Relay {
                server: required("SMTP_SERVER")?,
                username: required("SMTP_USERNAME")?,
                password: required("SMTP_PASSWORD")?,
            }
        };

        let upload_dir = var("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_UPLOAD_DIR));

        let bcrypt_cost = match var("BCRYPT_COST") {
            Some(raw) => parse_number("BCRYPT_COST", &raw)?,
            None => DEFAULT_BCRYPT_COST,
        };
        // bcrypt only accepts 4..=31
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::Invalid {
                key: "BCRYPT_COST",
                value: bcrypt_cost.to_string(),
            });
        }

        Ok(Self {
            environment,
            host,
            port,
            database_url,
            base_url,
            email_from,
            smtp,
            upload_dir,
            bcrypt_cost,
        })
    }

    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_number<T: std::str::FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse::<T>().map_err(|_| ConfigError::Invalid {
        key,
        value: raw.to_string(),
    })
}
