use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::core::{ChatSettings, SessionOptions};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub session: SessionSettings,
    #[serde(default)]
    pub discover: DiscoverSettings,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub verification: VerificationSettings,
    #[serde(default)]
    pub simulation: SimulationSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 8080 }

/// Session-scoped key-value storage
#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    #[serde(default = "default_session_ttl")]
    pub ttl_secs: u64,
    #[serde(default = "default_session_capacity")]
    pub capacity: u64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            ttl_secs: default_session_ttl(),
            capacity: default_session_capacity(),
        }
    }
}

fn default_session_ttl() -> u64 { 86_400 }
fn default_session_capacity() -> u64 { 256 }

#[derive(Debug, Clone, Deserialize)]
pub struct DiscoverSettings {
    #[serde(default = "default_transition_ms")]
    pub transition_ms: u64,
}

impl Default for DiscoverSettings {
    fn default() -> Self {
        Self {
            transition_ms: default_transition_ms(),
        }
    }
}

fn default_transition_ms() -> u64 { 300 }

#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    #[serde(default = "default_typing_delay_ms")]
    pub typing_delay_ms: u64,
    #[serde(default = "default_response_min_ms")]
    pub response_min_ms: u64,
    #[serde(default = "default_response_max_ms")]
    pub response_max_ms: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            typing_delay_ms: default_typing_delay_ms(),
            response_min_ms: default_response_min_ms(),
            response_max_ms: default_response_max_ms(),
        }
    }
}

fn default_typing_delay_ms() -> u64 { 500 }
fn default_response_min_ms() -> u64 { 1000 }
fn default_response_max_ms() -> u64 { 3000 }

#[derive(Debug, Clone, Deserialize)]
pub struct VerificationSettings {
    /// Simulated round trip of each verification step
    #[serde(default = "default_verification_delay_ms")]
    pub delay_ms: u64,
    #[serde(default = "default_code_ttl")]
    pub code_ttl_secs: u64,
    /// Return issued codes in the API response (no mail backend exists)
    #[serde(default = "default_true")]
    pub reveal_codes: bool,
}

impl Default for VerificationSettings {
    fn default() -> Self {
        Self {
            delay_ms: default_verification_delay_ms(),
            code_ttl_secs: default_code_ttl(),
            reveal_codes: default_true(),
        }
    }
}

fn default_verification_delay_ms() -> u64 { 1500 }
fn default_code_ttl() -> u64 { 600 }
fn default_true() -> bool { true }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SimulationSettings {
    /// Fixed RNG seed for reproducible counterparts and codes
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with HACKCONNECT_)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., HACKCONNECT__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("HACKCONNECT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("HACKCONNECT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            transition: Duration::from_millis(self.discover.transition_ms),
            chat: ChatSettings {
                typing_delay: Duration::from_millis(self.chat.typing_delay_ms),
                response_min: Duration::from_millis(self.chat.response_min_ms),
                response_max: Duration::from_millis(self.chat.response_max_ms),
            },
            rng_seed: self.simulation.seed,
        }
    }

    pub fn verification_delay(&self) -> Duration {
        Duration::from_millis(self.verification.delay_ms)
    }
}
