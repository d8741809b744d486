//! Runtime configuration resolution.
//!
//! # Responsibility
//! - Decide where the journal database and log files live, and at which
//!   level to log.
//!
//! # Invariants
//! - Precedence: explicit override, then environment, then platform default.
//! - Blank values count as unset.
//! - `log_dir` is always absolute.

use crate::logging::{default_log_level, normalize_level};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const ENV_DB_PATH: &str = "DEVOTION_DB_PATH";
pub const ENV_LOG_DIR: &str = "DEVOTION_LOG_DIR";
pub const ENV_LOG_LEVEL: &str = "DEVOTION_LOG_LEVEL";

const APP_DIR_NAME: &str = "devotion";
const DB_FILE_NAME: &str = "devotion.sqlite3";
const LOG_DIR_NAME: &str = "logs";

/// Values supplied by the caller (CLI flags, FFI arguments).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub db_path: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
    pub log_level: Option<String>,
}

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalConfig {
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: &'static str,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidLogLevel(String),
    CurrentDir(std::io::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLogLevel(message) => write!(f, "{message}"),
            Self::CurrentDir(err) => write!(f, "cannot resolve current directory: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidLogLevel(_) => None,
            Self::CurrentDir(err) => Some(err),
        }
    }
}

impl JournalConfig {
    /// Resolves against the process environment and platform data dir.
    pub fn resolve(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        let data_dir = dirs::data_local_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join(APP_DIR_NAME);
        Self::resolve_with(overrides, |name| std::env::var(name).ok(), &data_dir)
    }

    /// Resolution with injected environment lookup and data dir.
    pub fn resolve_with(
        overrides: ConfigOverrides,
        env: impl Fn(&str) -> Option<String>,
        data_dir: &Path,
    ) -> Result<Self, ConfigError> {
        let from_env = |name: &str| {
            env(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let non_blank_path = |path: Option<PathBuf>| path.filter(|p| !p.as_os_str().is_empty());

        let db_path = non_blank_path(overrides.db_path)
            .or_else(|| from_env(ENV_DB_PATH).map(PathBuf::from))
            .unwrap_or_else(|| data_dir.join(DB_FILE_NAME));

        let log_dir = non_blank_path(overrides.log_dir)
            .or_else(|| from_env(ENV_LOG_DIR).map(PathBuf::from))
            .unwrap_or_else(|| data_dir.join(LOG_DIR_NAME));
        let log_dir = absolutize(log_dir)?;

        let log_level = match overrides
            .log_level
            .filter(|level| !level.trim().is_empty())
            .or_else(|| from_env(ENV_LOG_LEVEL))
        {
            Some(level) => normalize_level(&level).map_err(ConfigError::InvalidLogLevel)?,
            None => default_log_level(),
        };

        Ok(Self {
            db_path,
            log_dir,
            log_level,
        })
    }
}

fn absolutize(path: PathBuf) -> Result<PathBuf, ConfigError> {
    if path.is_absolute() {
        return Ok(path);
    }
    let cwd = std::env::current_dir().map_err(ConfigError::CurrentDir)?;
    Ok(cwd.join(path))
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, ConfigOverrides, JournalConfig, ENV_DB_PATH, ENV_LOG_LEVEL};
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};

    fn resolve(
        overrides: ConfigOverrides,
        env: &[(&str, &str)],
    ) -> Result<JournalConfig, ConfigError> {
        let env: HashMap<String, String> = env
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        JournalConfig::resolve_with(
            overrides,
            |name| env.get(name).cloned(),
            Path::new("/data/devotion"),
        )
    }

    #[test]
    fn defaults_live_under_data_dir() {
        let config = resolve(ConfigOverrides::default(), &[]).unwrap();
        assert_eq!(
            config.db_path,
            PathBuf::from("/data/devotion/devotion.sqlite3")
        );
        assert_eq!(config.log_dir, PathBuf::from("/data/devotion/logs"));
    }

    #[test]
    fn override_beats_environment_beats_default() {
        let env = [(ENV_DB_PATH, "/env/journal.db"), (ENV_LOG_LEVEL, "WARNING")];

        let from_env = resolve(ConfigOverrides::default(), &env).unwrap();
        assert_eq!(from_env.db_path, PathBuf::from("/env/journal.db"));
        assert_eq!(from_env.log_level, "warn");

        let overridden = resolve(
            ConfigOverrides {
                db_path: Some(PathBuf::from("/cli/journal.db")),
                log_level: Some("trace".to_string()),
                ..ConfigOverrides::default()
            },
            &env,
        )
        .unwrap();
        assert_eq!(overridden.db_path, PathBuf::from("/cli/journal.db"));
        assert_eq!(overridden.log_level, "trace");
    }

    #[test]
    fn blank_environment_values_are_ignored() {
        let config = resolve(ConfigOverrides::default(), &[(ENV_DB_PATH, "   ")]).unwrap();
        assert_eq!(
            config.db_path,
            PathBuf::from("/data/devotion/devotion.sqlite3")
        );
    }

    #[test]
    fn relative_log_dir_is_made_absolute() {
        let config = resolve(
            ConfigOverrides {
                log_dir: Some(PathBuf::from("logs/dev")),
                ..ConfigOverrides::default()
            },
            &[],
        )
        .unwrap();
        assert!(config.log_dir.is_absolute());
        assert!(config.log_dir.ends_with("logs/dev"));
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let err = resolve(
            ConfigOverrides {
                log_level: Some("verbose".to_string()),
                ..ConfigOverrides::default()
            },
            &[],
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLogLevel(_)));
    }
}
