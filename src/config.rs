use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub default_model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openai.com/v1".into(),
            default_model: "gpt-3.5-turbo".into(),
            max_tokens: 1000,
            temperature: 0.7,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub openai: OpenAiConfig,
    /// Directory holding the CSV files read by the bulk loaders.
    pub data_dir: PathBuf,
}

/// Discrete connection settings, used when `DATABASE_URL` is not set.
#[derive(Debug, Clone, Default)]
pub struct DbParts {
    pub host: Option<String>,
    pub port: Option<String>,
    pub name: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
}

impl DbParts {
    fn from_env() -> Self {
        Self {
            host: std::env::var("DB_HOST").ok(),
            port: std::env::var("DB_PORT").ok(),
            name: std::env::var("DB_NAME").ok(),
            user: std::env::var("DB_USER").ok(),
            password: std::env::var("DB_PASSWORD").ok(),
        }
    }

    /// Builds a postgres URL; names the missing variables on failure.
    pub fn to_url(&self) -> anyhow::Result<String> {
        let missing: Vec<&str> = [
            ("DB_HOST", &self.host),
            ("DB_NAME", &self.name),
            ("DB_USER", &self.user),
            ("DB_PASSWORD", &self.password),
        ]
        .into_iter()
        .filter(|(_, v)| v.as_deref().map_or(true, str::is_empty))
        .map(|(k, _)| k)
        .collect();
        if !missing.is_empty() {
            anyhow::bail!(
                "DATABASE_URL not set and missing database parameters: {}",
                missing.join(", ")
            );
        }

        Ok(format!(
            "postgres://{}:{}@{}:{}/{}",
            self.user.as_deref().unwrap_or_default(),
            self.password.as_deref().unwrap_or_default(),
            self.host.as_deref().unwrap_or_default(),
            self.port.as_deref().unwrap_or("5432"),
            self.name.as_deref().unwrap_or_default(),
        ))
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = match std::env::var("DATABASE_URL") {
            Ok(url) => url,
            Err(_) => DbParts::from_env().to_url()?,
        };
        let max_connections = std::env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(10);

        let defaults = OpenAiConfig::default();
        let openai = OpenAiConfig {
            api_key: std::env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()),
            base_url: std::env::var("OPENAI_BASE_URL").unwrap_or(defaults.base_url),
            default_model: std::env::var("OPENAI_MODEL").unwrap_or(defaults.default_model),
            max_tokens: std::env::var("OPENAI_MAX_TOKENS")
                .ok()
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(defaults.max_tokens),
            temperature: std::env::var("OPENAI_TEMPERATURE")
                .ok()
                .and_then(|v| v.parse::<f32>().ok())
                .unwrap_or(defaults.temperature),
        };

        let data_dir = std::env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("fakeData"));

        Ok(Self {
            database_url,
            max_connections,
            openai,
            data_dir,
        })
    }
}
