use std::path::PathBuf;

use common_utils::{consts, errors::ValidationError, fp_utils::when};
use epp_models::WireFormat;
use masking::{PeekInterface, Secret};
use serde::Deserialize;

use crate::logger::config::Log;

/// Env variable that selects Development/Sandbox/Production settings
pub const RUN_ENV: &str = "RUN_ENV";

/// Directory holding one `<environment>.toml` per [`Env`]
pub const CONFIG_DIR: &str = "config";

#[derive(Debug, Default, Deserialize, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum Env {
    #[default]
    Development,
    Sandbox,
    Production,
}

impl Env {
    pub fn current_env() -> Self {
        std::env::var(RUN_ENV).map_or_else(|_| Self::default(), |env| env.parse().unwrap_or_default())
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub merchant: MerchantSettings,
    /// Format assumed by [`crate::ResponseMapper::map`]
    pub default_format: WireFormat,
    pub log: Log,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct MerchantSettings {
    /// Shared secret used to verify notification signatures
    pub secret_key: Option<Secret<String>>,
}

impl MerchantSettings {
    pub fn validate(&self) -> Result<(), ValidationError> {
        when(
            self.secret_key
                .as_ref()
                .is_some_and(|secret| secret.peek().trim().is_empty()),
            || {
                Err(ValidationError::InvalidValue {
                    message: "merchant secret key must not be empty".into(),
                })
            },
        )
    }
}

impl Settings {
    /// Function to build the configuration by picking it from default locations
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::new_with_config_path(None)
    }

    pub fn new_with_config_path(
        explicit_config_path: Option<PathBuf>,
    ) -> Result<Self, config::ConfigError> {
        let env = Env::current_env();
        let config_path = Self::config_path(env, explicit_config_path);

        let config = config::Config::builder()
            .add_source(config::File::from(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(consts::ENV_PREFIX)
                    .try_parsing(true)
                    .separator("__"),
            )
            .build()?;

        let settings: Self = serde_path_to_error::deserialize(config).map_err(|error| {
            config::ConfigError::Message(format!(
                "Unable to deserialize settings at {}: {}",
                error.path(),
                error.inner()
            ))
        })?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn config_path(environment: Env, explicit_config_path: Option<PathBuf>) -> PathBuf {
        explicit_config_path
            .unwrap_or_else(|| PathBuf::from(CONFIG_DIR).join(format!("{environment}.toml")))
    }

    pub fn validate(&self) -> Result<(), config::ConfigError> {
        self.merchant
            .validate()
            .map_err(|error| config::ConfigError::Message(error.to_string()))
    }
}
