// Runtime configuration, deserialized from shado.toml in the working directory.

use std::path::Path;
use std::sync::OnceLock;

use serde::Deserialize;

use crate::error::{ShadoError, ShadoResult};

/// File name looked up at init.
pub const CONFIG_FILE: &str = "shado.toml";

/// Top-level config file. Every section is optional.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RuntimeConfig {
    pub logging: LoggingConfig,
    pub hierarchy: HierarchyConfig,
    pub scripts: ScriptsConfig,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive, e.g. `"info,shado_runtime=debug"`.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig { filter: "info".to_string() }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct HierarchyConfig {
    /// Upper bound on parent-chain walks before they are treated as cycles.
    pub max_depth: usize,
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        HierarchyConfig { max_depth: 256 }
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ScriptsConfig {
    /// Disable a script instance after this many consecutive failing hooks.
    /// 0 keeps failing scripts running forever.
    pub max_consecutive_failures: u32,
}

impl RuntimeConfig {
    pub fn from_toml(text: &str) -> ShadoResult<Self> {
        toml::from_str(text).map_err(|e| ShadoError::Config(e.to_string()))
    }

    /// Read `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> ShadoResult<Self> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_toml(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(ShadoError::Config(format!("{}: {e}", path.display()))),
        }
    }
}

static CONFIG: OnceLock<RuntimeConfig> = OnceLock::new();

/// Install the process-wide config. Returns false if one was already set.
pub fn install(config: RuntimeConfig) -> bool {
    CONFIG.set(config).is_ok()
}

/// The installed config, or the defaults when init has not installed one.
pub fn get() -> &'static RuntimeConfig {
    CONFIG.get_or_init(RuntimeConfig::default)
}
