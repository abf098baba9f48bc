use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Runtime settings, layered as defaults < `catalog.toml` < environment.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub pool_size: u32,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_env(Environment::default().try_parsing(true))
    }

    fn from_env(env: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("host", "127.0.0.1")?
            .set_default("port", 3000_i64)?
            .set_default("pool_size", 10_i64)?
            .add_source(File::with_name("catalog").required(false))
            .add_source(env)
            .build()?
            .try_deserialize()
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}
