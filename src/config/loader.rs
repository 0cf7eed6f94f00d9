use crate::config::schema::{MotionConfig, ValidationError};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File looked up in the working directory, then the home directory.
pub const CONFIG_FILE_NAME: &str = ".motion.toml";

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Toml {
        path: Option<PathBuf>,
        source: toml_edit::de::Error,
    },
    Validation {
        path: Option<PathBuf>,
        source: ValidationError,
    },
}

impl ConfigError {
    fn with_path(self, path: &Path) -> Self {
        let path = path.to_path_buf();
        match self {
            ConfigError::Io { .. } => self,
            ConfigError::Toml { path: None, source } => ConfigError::Toml {
                path: Some(path),
                source,
            },
            ConfigError::Validation { path: None, source } => ConfigError::Validation {
                path: Some(path),
                source,
            },
            other => other,
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "cannot read {}: {}", path.display(), source)
            }
            ConfigError::Toml { path, source } => match path {
                Some(path) => {
                    write!(f, "{} is not a valid motion config: {}", path.display(), source)
                }
                None => write!(f, "invalid motion config TOML: {}", source),
            },
            ConfigError::Validation { path, source } => match path {
                Some(path) => write!(f, "{}: {}", path.display(), source),
                None => write!(f, "{}", source),
            },
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Toml { source, .. } => Some(source),
            ConfigError::Validation { source, .. } => Some(source),
        }
    }
}

pub fn load_from_str(input: &str) -> Result<MotionConfig, ConfigError> {
    let config: MotionConfig = toml_edit::de::from_str(input)
        .map_err(|source| ConfigError::Toml { path: None, source })?;
    config
        .validate()
        .map_err(|source| ConfigError::Validation { path: None, source })?;
    Ok(config)
}

pub fn load_from_path(path: impl AsRef<Path>) -> Result<MotionConfig, ConfigError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_str(&contents).map_err(|error| error.with_path(path))
}

/// Candidate config files, most specific first.
pub fn candidate_paths(cwd: Option<&Path>) -> Vec<PathBuf> {
    cwd.map(|dir| dir.join(CONFIG_FILE_NAME))
        .into_iter()
        .chain(home::home_dir().map(|home| home.join(CONFIG_FILE_NAME)))
        .collect()
}

/// Load `explicit` if given, else the first existing candidate, else the
/// defaults.
pub fn load(explicit: Option<&Path>, cwd: Option<&Path>) -> Result<MotionConfig, ConfigError> {
    if let Some(path) = explicit {
        return load_from_path(path);
    }

    match candidate_paths(cwd).into_iter().find(|path| path.is_file()) {
        Some(path) => {
            debug!(path = %path.display(), "loading motion config");
            load_from_path(&path)
        }
        None => Ok(MotionConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::Format;

    #[test]
    fn partial_tables_keep_defaults() {
        let config = load_from_str("format = \"vim\"\n").unwrap();
        assert_eq!(config.format, Format::Vim);
        assert!(config.parse_comments);
        assert_eq!(config.includes, vec!["func"]);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = load_from_str("colour = \"red\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Toml { path: None, .. }));
    }

    #[test]
    fn validation_errors_carry_the_path() {
        let err = load_from_str("includes = [\"var\"]\n")
            .unwrap_err()
            .with_path(Path::new("/tmp/.motion.toml"));
        assert!(err
            .to_string()
            .starts_with("/tmp/.motion.toml: unknown include 'var'"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn cwd_candidate_comes_first() {
        let paths = candidate_paths(Some(Path::new("/work")));
        assert_eq!(paths[0], PathBuf::from("/work/.motion.toml"));
    }
}
