use std::{env, fmt};

use dotenvy::dotenv;

use crate::error::ConfigError;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5432;

/// Connection settings resolved from the environment.
///
/// `DATABASE_URL` wins when present. Otherwise the URL is composed from
/// `DB_HOST`, `DB_PORT`, `DB_NAME`, `DB_USER` and `DB_PASSWORD`.
#[derive(Clone)]
pub struct DatabaseConfig {
    url: String,
    redacted: String,
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(url) = non_empty("DATABASE_URL") {
            let redacted = redact(&url);
            return Ok(Self { url, redacted });
        }

        let host = non_empty("DB_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match non_empty("DB_PORT") {
            Some(value) => value
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidVar {
                    name: "DB_PORT",
                    value,
                })?,
            None => DEFAULT_PORT,
        };
        let name = non_empty("DB_NAME").ok_or(ConfigError::MissingVar("DB_NAME"))?;
        let user = non_empty("DB_USER").ok_or(ConfigError::MissingVar("DB_USER"))?;
        let password = non_empty("DB_PASSWORD");

        let (url, redacted) = match password {
            Some(password) => (
                format!("postgres://{user}:{password}@{host}:{port}/{name}"),
                format!("postgres://{user}:***@{host}:{port}/{name}"),
            ),
            None => {
                let url = format!("postgres://{user}@{host}:{port}/{name}");
                (url.clone(), url)
            }
        };
        Ok(Self { url, redacted })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// The URL with any password masked, safe to log.
    pub fn redacted(&self) -> &str {
        &self.redacted
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &self.redacted)
            .finish()
    }
}

fn redact(url: &str) -> String {
    let Some(scheme_end) = url.find("://").map(|i| i + 3) else {
        return url.to_string();
    };
    let Some(at) = url[scheme_end..].find('@').map(|i| i + scheme_end) else {
        return url.to_string();
    };
    match url[scheme_end..at].find(':') {
        Some(colon) => format!("{}:***{}", &url[..scheme_end + colon], &url[at..]),
        None => url.to_string(),
    }
}
