//! Schema table path discovery.
//!
//! Resolution order: CLI argument → environment variables → XDG config → system config → built-in.

use std::path::{Path, PathBuf};

/// Where the schema table was found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly provided via CLI argument.
    CliArgument,

    /// Set via environment variable.
    Environment,

    /// Found in XDG config directory.
    XdgConfig,

    /// Found in /etc/assessment-report/.
    SystemConfig,

    /// Using the embedded schemas.
    #[default]
    BuiltinDefault,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::CliArgument => write!(f, "CLI argument"),
            ConfigSource::Environment => write!(f, "environment variable"),
            ConfigSource::XdgConfig => write!(f, "XDG config"),
            ConfigSource::SystemConfig => write!(f, "system config"),
            ConfigSource::BuiltinDefault => write!(f, "builtin default"),
        }
    }
}

/// Discovered schema table path.
#[derive(Debug, Clone, Default)]
pub struct SchemaPath {
    /// Path to schemas.json (None means built-in).
    pub path: Option<PathBuf>,

    /// Source of the path (for diagnostics).
    pub source: ConfigSource,
}

/// Environment variable names.
pub const ENV_SCHEMAS_PATH: &str = "AR_SCHEMAS";
pub const ENV_CONFIG_DIR: &str = "AR_CONFIG_DIR";

/// Standard schema file name.
pub const SCHEMAS_FILENAME: &str = "schemas.json";

/// Application name for XDG directories.
const APP_NAME: &str = "assessment-report";

/// Resolve the schema table path.
///
/// 1. Explicit CLI path (if it exists)
/// 2. `AR_SCHEMAS`
/// 3. `AR_CONFIG_DIR` + `schemas.json`
/// 4. XDG config directory (`~/.config/assessment-report/`)
/// 5. System config (`/etc/assessment-report/`)
/// 6. Built-in (None)
pub fn resolve_schema_path(cli_path: Option<&Path>) -> SchemaPath {
    if let Some(path) = cli_path {
        if path.exists() {
            return found(path.to_path_buf(), ConfigSource::CliArgument);
        }
    }

    if let Ok(env_path) = std::env::var(ENV_SCHEMAS_PATH) {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return found(path, ConfigSource::Environment);
        }
    }

    if let Ok(config_dir) = std::env::var(ENV_CONFIG_DIR) {
        let path = PathBuf::from(config_dir).join(SCHEMAS_FILENAME);
        if path.exists() {
            return found(path, ConfigSource::Environment);
        }
    }

    if let Some(dir) = xdg_config_dir() {
        let path = dir.join(SCHEMAS_FILENAME);
        if path.exists() {
            return found(path, ConfigSource::XdgConfig);
        }
    }

    let system_path = system_config_dir().join(SCHEMAS_FILENAME);
    if system_path.exists() {
        return found(system_path, ConfigSource::SystemConfig);
    }

    SchemaPath::default()
}

fn found(path: PathBuf, source: ConfigSource) -> SchemaPath {
    SchemaPath {
        path: Some(path),
        source,
    }
}

/// Get the XDG config directory for assessment-report.
pub fn xdg_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_NAME))
}

/// Get the system config directory.
pub fn system_config_dir() -> PathBuf {
    PathBuf::from("/etc").join(APP_NAME)
}
