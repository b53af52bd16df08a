use std::path::PathBuf;

use config::{ConfigBuilder, ConfigError, Environment, File, builder::AsyncState};
use factory::factories::observability::ObservabilityConfig;
use serde::Deserialize;

pub const DEFAULT_MESSAGE: &str = "Hello World";

#[derive(Deserialize, Clone, Debug)]
pub struct HelloWorldConfig {
    #[serde(default = "default_message")]
    pub message: String,
}

impl Default for HelloWorldConfig {
    fn default() -> Self {
        Self {
            message: default_message(),
        }
    }
}

fn default_message() -> String {
    DEFAULT_MESSAGE.to_string()
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct Config {
    #[serde(default)]
    pub hello_world: HelloWorldConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Settings file, then `.env` next to it, then `APP_` prefixed variables
    /// such as `APP_HELLO_WORLD__MESSAGE`.
    pub async fn init(path: PathBuf) -> Result<Self, ConfigError> {
        if let Some(dir) = path.parent() {
            dotenvy::from_path(dir.join(".env")).ok();
        }

        let cfg = ConfigBuilder::<AsyncState>::default()
            .add_source(File::from(path).required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .await?;

        cfg.try_deserialize()
    }
}
