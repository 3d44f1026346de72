//! Configuration: which record source to use and list defaults.
//!
//! ```yaml
//! # consulta.yaml
//! source:
//!   kind: file        # memory | file
//!   path: ./data      # directory with <collection>.json|yaml, or one file
//!   delay_ms: 0       # memory sources only
//! default_page_size: 6
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::record::Record;
use crate::source::{FileSource, MemorySource, RecordSource};

/// Page size used when neither the config nor the caller picks one.
pub const DEFAULT_PAGE_SIZE: usize = 6;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Built-in seed data.
    #[default]
    Memory,
    /// JSON or YAML files on disk.
    File,
}

/// Record source selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceConfig {
    pub kind: SourceKind,
    /// Artificial latency for memory sources, in milliseconds.
    pub delay_ms: u64,
    /// A directory holding `<collection>.json|yaml|yml`, or a single record file.
    pub path: Option<PathBuf>,
}

impl SourceConfig {
    /// Builds the source for record shape `R`.
    pub fn build<R: Record>(&self) -> Result<Box<dyn RecordSource<R>>, ConfigError> {
        match self.kind {
            SourceKind::Memory => {
                let source =
                    MemorySource::new(R::seed()).with_delay(Duration::from_millis(self.delay_ms));
                Ok(Box::new(source))
            }
            SourceKind::File => {
                let path = self.path.as_deref().ok_or(ConfigError::MissingPath)?;
                let source = if path.is_dir() {
                    FileSource::<R>::in_dir(path, R::COLLECTION)?
                } else {
                    FileSource::<R>::new(path)?
                };
                Ok(Box::new(source))
            }
        }
    }
}

/// Top-level configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub source: SourceConfig,
    pub default_page_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            source: SourceConfig::default(),
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Config {
    /// Parses a YAML document. `origin` names it in errors.
    pub fn from_yaml(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        let mut config: Config =
            serde_yaml::from_str(content).map_err(|source| ConfigError::Parse {
                path: origin.to_path_buf(),
                source,
            })?;
        // Relative source paths resolve against the config file's directory.
        if let (Some(path), Some(base)) = (&config.source.path, origin.parent()) {
            if path.is_relative() && !base.as_os_str().is_empty() {
                config.source.path = Some(base.join(path));
            }
        }
        Ok(config)
    }

    /// Reads and parses a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Config::from_yaml(&content, path)?;
        debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let config = Config::from_yaml("{}", Path::new("consulta.yaml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.default_page_size, 6);
        assert_eq!(config.source.kind, SourceKind::Memory);
    }

    #[test]
    fn parses_file_source() {
        let yaml = "source:\n  kind: file\n  path: data\ndefault_page_size: 10\n";
        let config = Config::from_yaml(yaml, Path::new("/etc/consulta/consulta.yaml")).unwrap();
        assert_eq!(config.source.kind, SourceKind::File);
        assert_eq!(
            config.source.path.as_deref(),
            Some(Path::new("/etc/consulta/data"))
        );
        assert_eq!(config.default_page_size, 10);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = Config::from_yaml("sauce: {}", Path::new("c.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("c.yaml"));
    }

    #[test]
    fn file_kind_needs_path() {
        let source = SourceConfig {
            kind: SourceKind::File,
            ..SourceConfig::default()
        };
        let err = source.build::<crate::Therapist>().err().unwrap();
        assert!(matches!(err, ConfigError::MissingPath));
    }
}
