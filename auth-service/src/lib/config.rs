use std::env;
use std::path::Path;
use std::time::Duration;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Longest session token lifetime accepted from configuration (one year).
const MAX_TOKEN_TTL_MINUTES: i64 = 365 * 24 * 60;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub env: String,
    pub storage: StorageConfig,
    pub token: TokenConfig,
    pub grpc: GrpcConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TokenConfig {
    pub ttl_minutes: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GrpcConfig {
    pub port: u16,
    pub timeout_ms: u64,
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (STORAGE__URL, GRPC__PORT, etc.)
    /// 2. File named by CONFIG_PATH, if set
    /// 3. Environment-specific config file (config/{RUN_MODE}.toml)
    /// 4. Default config file (config/default.toml)
    /// 5. Built-in defaults (everything except storage.url)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());
        let config_path = env::var("CONFIG_PATH").ok();

        Self::load_from(
            Path::new("config"),
            &run_mode,
            config_path.as_deref(),
            // Example: STORAGE__URL=sqlite://auth.db overrides storage.url
            Environment::default().separator("__").try_parsing(true),
        )
    }

    fn load_from(
        config_dir: &Path,
        run_mode: &str,
        config_path: Option<&str>,
        environment: Environment,
    ) -> Result<Self, ConfigError> {
        let default_file = config_dir.join("default");
        let run_mode_file = config_dir.join(run_mode);

        let mut builder = ConfigBuilder::builder()
            .set_default("env", "local")?
            .set_default("token.ttl_minutes", 60)?
            .set_default("grpc.port", 44044)?
            .set_default("grpc.timeout_ms", 5000)?
            .add_source(File::from(default_file).required(false))
            .add_source(File::from(run_mode_file).required(false));

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        let config: Self = builder.add_source(environment).build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_TOKEN_TTL_MINUTES).contains(&self.token.ttl_minutes) {
            return Err(ConfigError::Message(format!(
                "token.ttl_minutes must be between 1 and {}, got {}",
                MAX_TOKEN_TTL_MINUTES, self.token.ttl_minutes
            )));
        }

        if self.grpc.timeout_ms == 0 {
            return Err(ConfigError::Message(
                "grpc.timeout_ms must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    pub fn is_local(&self) -> bool {
        self.env == "local"
    }

    pub fn is_prod(&self) -> bool {
        self.env == "prod"
    }

    /// Validity period of issued session tokens.
    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.token.ttl_minutes)
    }

    /// Per-request deadline applied by the gRPC server.
    pub fn grpc_timeout(&self) -> Duration {
        Duration::from_millis(self.grpc.timeout_ms)
    }
}
