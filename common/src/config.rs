use std::io::Read;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::{
    CLOSE_JOIN_TIMEOUT, CONFIG_ENV, DEFAULT_CONNECTION, DEFAULT_TITLE, HEARTBEAT_TIMEOUT,
    SHUTDOWN_POLL, UI_TICK_PERIOD,
};
use crate::errors::ConfigError;
use crate::types::checklist::{default_tabs, TabDefinition};

/// Load and validate a config from a TOML file.
pub fn load_from_file_path(path: &str) -> Result<InstructorConfig, ConfigError> {
    let mut file = std::fs::File::open(path)?;
    let mut string = String::with_capacity(1024);
    file.read_to_string(&mut string)?;
    InstructorConfig::from_toml(&string)
}

/// Load the file named by the config environment variable, or fall back to
/// the defaults if it is not set.
pub fn load_from_env() -> Result<InstructorConfig, ConfigError> {
    match std::env::var(CONFIG_ENV) {
        Ok(path) => {
            info!("config: Loading <{}>", path);
            load_from_file_path(&path)
        }
        Err(_) => Ok(InstructorConfig::default()),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstructorConfig {
    /// Window title of the checklist
    pub title: String,
    /// MAVLink address, as understood by `mavlink::connect`
    pub connection: String,
    pub tick_period_ms: u64,
    pub shutdown_poll_ms: u64,
    pub close_timeout_ms: u64,
    pub heartbeat_timeout_ms: u64,
    pub tabs: Vec<TabDefinition>,
}

impl Default for InstructorConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.into(),
            connection: DEFAULT_CONNECTION.into(),
            tick_period_ms: UI_TICK_PERIOD.as_millis() as u64,
            shutdown_poll_ms: SHUTDOWN_POLL.as_millis() as u64,
            close_timeout_ms: CLOSE_JOIN_TIMEOUT.as_millis() as u64,
            heartbeat_timeout_ms: HEARTBEAT_TIMEOUT.as_millis() as u64,
            tabs: default_tabs(),
        }
    }
}

impl InstructorConfig {
    pub fn from_toml(string: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(string)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_period_ms == 0 {
            return Err(ConfigError::ZeroTickPeriod);
        }
        if self.tabs.is_empty() {
            return Err(ConfigError::NoTabs);
        }
        Ok(())
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }

    pub fn shutdown_poll(&self) -> Duration {
        Duration::from_millis(self.shutdown_poll_ms)
    }

    pub fn close_timeout(&self) -> Duration {
        Duration::from_millis(self.close_timeout_ms)
    }

    pub fn heartbeat_timeout(&self) -> Duration {
        Duration::from_millis(self.heartbeat_timeout_ms)
    }
}
