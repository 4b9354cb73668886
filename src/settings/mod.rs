//! Configuration for the emulated service.
//!
//! Settings load from multiple sources with priority:
//! 1. Default values (hardcoded)
//! 2. Optional TOML file (explicit path, or `KEEPER_CONFIG_PATH`)
//! 3. Environment variables (highest priority)


use std::env;

use config::Config;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;
use serde::Serialize;

use crate::Result;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EmulatorSettings {
    /// Connection string `init` calls must present; anything else is
    /// refused with an address mismatch
    #[serde(default = "default_connection_string")]
    pub connection_string: String,

    /// Seed the standard fixture tree when no import tree is supplied
    #[serde(default = "default_seed_default_tree")]
    pub seed_default_tree: bool,
}

impl Default for EmulatorSettings {
    fn default() -> Self {
        Self {
            connection_string: default_connection_string(),
            seed_default_tree: default_seed_default_tree(),
        }
    }
}

impl EmulatorSettings {
    pub fn new() -> Result<Self> {
        Self::load(None)
    }

    /// Load settings with priority: defaults, optional file, environment.
    ///
    /// # Arguments
    /// * `config_path` - Optional path to a TOML settings file
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder =
            Config::builder().add_source(Config::try_from(&EmulatorSettings::default())?);

        // 1. Explicit file
        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // 2. File named by the environment
        if let Ok(path) = env::var("KEEPER_CONFIG_PATH") {
            builder = builder.add_source(File::with_name(&path));
        }

        // 3. Environment variables (highest priority)
        builder = builder.add_source(
            Environment::with_prefix("KEEPER")
                .separator("__")
                .ignore_empty(true)
                .try_parsing(true),
        );

        let settings: EmulatorSettings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Rejects connection strings a real client could never dial.
    pub fn validate(&self) -> Result<()> {
        let Some((host, port)) = self.connection_string.rsplit_once(':') else {
            return Err(ConfigError::Message(format!(
                "connection_string must be host:port, got {:?}",
                self.connection_string
            ))
            .into());
        };
        if host.is_empty() {
            return Err(
                ConfigError::Message("connection_string host must not be empty".into()).into(),
            );
        }
        if port.parse::<u16>().is_err() {
            return Err(ConfigError::Message(format!(
                "connection_string port is not a port number: {port:?}"
            ))
            .into());
        }
        Ok(())
    }
}

fn default_connection_string() -> String {
    "zookeeper.example.com:2181".to_owned()
}

fn default_seed_default_tree() -> bool {
    true
}
