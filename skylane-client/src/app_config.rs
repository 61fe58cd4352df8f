use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub provider: ProviderConfig,
}

/// Connection details for the flight-data provider.
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    pub base_url: String,
    pub api_host: String,
    #[serde(default)]
    pub api_key: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Fatal startup precondition: the process must not come up without a
    /// provider credential.
    #[error("provider api key is not configured")]
    MissingApiKey,
    #[error("invalid provider configuration: {0}")]
    Invalid(String),
    #[error(transparent)]
    Load(#[from] config::ConfigError),
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default"))
            // Add in the current environment file, optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in to git
            .add_source(config::File::with_name("config/local").required(false))
            // Eg. `SKYLANE__PROVIDER__API_KEY=...` sets the provider api key
            .add_source(config::Environment::with_prefix("SKYLANE").separator("__"))
            .build()?;

        Ok(s.try_deserialize::<Config>()?)
    }
}
