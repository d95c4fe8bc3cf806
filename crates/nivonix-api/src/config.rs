use config::{Config as ConfigLoader, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub mongodb: MongoDbConfig,
    pub llm: LlmConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,

    // Secrets (from ENV only)
    #[serde(default)]
    pub mongodb_uri: String,
    #[serde(default)]
    pub gemini_api_key: String,
    #[serde(default)]
    pub jwt_secret: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    pub enabled: bool,
    pub origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MongoDbConfig {
    pub database: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    pub model: String,
    /// Hard cap on one generation attempt, seconds.
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// OAuth client id the federated verifier checks token audiences against.
    pub google_client_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Config {
    /// Load configuration from TOML files and environment variables
    ///
    /// Hierarchy (weakest to strongest):
    /// 1. config/default.toml
    /// 2. config/{ENV}.toml (if ENV is set)
    /// 3. Environment variables (with SERVER_, MONGODB_, LLM_, etc. prefixes)
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("ENV").unwrap_or_else(|_| "dev".to_string());

        let builder = ConfigLoader::builder()
            // 1. Load default config
            .add_source(File::with_name("config/default").required(false))
            // 2. Load environment-specific config
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            // 3. Environment variables override everything
            .add_source(
                Environment::default()
                    .prefix("SERVER")
                    .separator("_")
                    .try_parsing(true),
            )
            .add_source(
                Environment::default()
                    .prefix("MONGODB")
                    .separator("_")
                    .try_parsing(true),
            )
            .add_source(
                Environment::default()
                    .prefix("LLM")
                    .separator("_")
                    .try_parsing(true),
            )
            .add_source(
                Environment::default()
                    .prefix("AUTH")
                    .separator("_")
                    .try_parsing(true),
            )
            .add_source(
                Environment::default()
                    .prefix("LOG")
                    .separator("_")
                    .try_parsing(true),
            );

        let config = builder.build()?;

        let mut cfg: Config = config.try_deserialize()?;

        // Load secrets from ENV (not in TOML)
        cfg.mongodb_uri = std::env::var("MONGODB_URI").map_err(|_| {
            ConfigError::Message("MONGODB_URI environment variable is required".to_string())
        })?;
        cfg.gemini_api_key = std::env::var("GEMINI_API_KEY").map_err(|_| {
            ConfigError::Message("GEMINI_API_KEY environment variable is required".to_string())
        })?;
        cfg.jwt_secret = std::env::var("JWT_SECRET").map_err(|_| {
            ConfigError::Message("JWT_SECRET environment variable is required".to_string())
        })?;

        Ok(cfg)
    }

    /// Load config from a specific path (useful for testing)
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let builder = ConfigLoader::builder().add_source(File::from(path.as_ref()));

        let config = builder.build()?;
        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_structure() {
        let toml = r#"
            [server]
            host = "127.0.0.1"
            port = 8080

            [cors]
            enabled = true
            origins = ["http://localhost:5173"]

            [mongodb]
            database = "nivonix_test"

            [llm]
            model = "gemini-2.5-flash"
            request_timeout_secs = 60

            [auth]
            google_client_id = "test-client-id"

            [logging]
            level = "debug"
            format = "json"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.mongodb.database, "nivonix_test");
        assert_eq!(config.llm.request_timeout_secs, 60);
    }
}
