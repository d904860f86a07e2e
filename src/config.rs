use std::{
    env, fs, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;

pub const CONFIG_ENV: &str = "FORKSH_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "forksh.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config {}", .path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub prompt: String,
    pub jobs: JobsConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JobsConfig {
    /// Forget a background job once `myjobs` has shown it finished.
    pub prune_finished: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    pub directory: PathBuf,
    pub file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prompt: "forksh> ".into(),
            jobs: JobsConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for JobsConfig {
    fn default() -> Self {
        Self {
            prune_finished: true,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            file: "forksh.log".into(),
        }
    }
}

impl Config {
    /// Reads `$FORKSH_CONFIG`, or `forksh.toml` if present. A missing default
    /// file means defaults; a missing explicit file is an error.
    pub fn load() -> Result<Self, ConfigError> {
        match env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path)),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::from_file(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;

        toml::from_str(&raw).map_err(|source| ConfigError::Toml {
            path: path.to_owned(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn empty_file_is_all_defaults() {
        let config: Config = toml::from_str("").unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.prompt, "forksh> ");
        assert!(config.jobs.prune_finished);
    }

    #[test]
    fn partial_tables_keep_other_defaults() {
        let config: Config = toml::from_str(
            r#"
            prompt = "$ "

            [jobs]
            prune_finished = false
            "#,
        )
        .unwrap();

        assert_eq!(config.prompt, "$ ");
        assert!(!config.jobs.prune_finished);
        assert_eq!(config.log, LogConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(toml::from_str::<Config>("colour = true").is_err());
    }

    #[test]
    fn from_file_reports_path() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");

        let err = Config::from_file(&missing).unwrap_err();
        assert!(matches!(err, ConfigError::Io { ref path, .. } if path == &missing));

        let broken = dir.path().join("broken.toml");
        fs::write(&broken, "prompt = ").unwrap();
        assert!(matches!(
            Config::from_file(&broken),
            Err(ConfigError::Toml { .. })
        ));

        let good = dir.path().join("forksh.toml");
        fs::write(&good, "[log]\nfile = \"shell.log\"\n").unwrap();
        assert_eq!(Config::from_file(&good).unwrap().log.file, "shell.log");
    }
}
