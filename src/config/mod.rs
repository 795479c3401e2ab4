use anyhow::{Result, bail};
use dotenvy::dotenv;
use serde::Deserialize;

/// Configuration for the application
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Database connection URL
    pub database_url: String,

    /// Pool size; one connection is reused by default
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Schema used as the search path for every connection
    #[serde(default)]
    pub database_schema: Option<String>,
}

fn default_max_connections() -> u32 {
    1
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// This function will:
    /// 1. Load variables from .env file if it exists
    /// 2. Deserialize environment variables into Config struct
    /// 3. Reject a schema name that is not a plain SQL identifier
    pub fn load() -> Result<Self> {
        dotenv().ok();

        let config = envy::from_env::<Config>()?;
        config.validate()?;

        Ok(config)
    }

    /// Config for a given URL with every other setting at its default
    pub fn with_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: default_max_connections(),
            database_schema: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_connections == 0 {
            bail!("MAX_CONNECTIONS must be at least 1");
        }
        if let Some(schema) = &self.database_schema {
            if !is_identifier(schema) {
                bail!("DATABASE_SCHEMA '{schema}' is not a valid identifier");
            }
        }
        Ok(())
    }

    /// Get a direct reference to the database URL
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn database_schema(&self) -> Option<&str> {
        self.database_schema.as_deref()
    }
}

// Schema names are interpolated into SQL, so only [A-Za-z_][A-Za-z0-9_]* is allowed.
pub(crate) fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    name.len() <= 63 && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Initialize environment variables and load configuration
pub fn init() -> Result<Config> {
    Config::load()
}
