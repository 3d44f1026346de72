//! Record sources.
//!
//! A [`RecordSource`] supplies the full collection a list screen queries.
//! Fetching is the only asynchronous step; the engine runs on whatever the
//! source returned.
//!
//! - [`MemorySource`]: records held in memory, optionally answered after an
//!   artificial delay to mimic a network round trip.
//! - [`FileSource`]: a JSON or YAML array read from disk, the format chosen
//!   by file extension.

use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::error::SourceError;

/// Supplies a collection of records.
#[async_trait]
pub trait RecordSource<R>: Send + Sync {
    /// Fetches the whole collection.
    async fn fetch(&self) -> Result<Vec<R>, SourceError>;

    /// Short human-readable description, used in logs.
    fn describe(&self) -> String;
}

// ============================================================================
// Memory
// ============================================================================

/// In-memory records, optionally delayed.
#[derive(Debug, Clone)]
pub struct MemorySource<R> {
    records: Vec<R>,
    delay: Option<Duration>,
}

impl<R> MemorySource<R> {
    pub fn new(records: Vec<R>) -> Self {
        MemorySource {
            records,
            delay: None,
        }
    }

    /// Answers every fetch after `delay`.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = (!delay.is_zero()).then_some(delay);
        self
    }

    pub fn delay(&self) -> Option<Duration> {
        self.delay
    }
}

#[async_trait]
impl<R> RecordSource<R> for MemorySource<R>
where
    R: Clone + Send + Sync,
{
    async fn fetch(&self) -> Result<Vec<R>, SourceError> {
        if let Some(delay) = self.delay {
            debug!(delay_ms = delay.as_millis() as u64, "delaying in-memory fetch");
            tokio::time::sleep(delay).await;
        }
        debug!(count = self.records.len(), "served records from memory");
        Ok(self.records.clone())
    }

    fn describe(&self) -> String {
        match self.delay {
            Some(delay) => format!("memory ({} ms delay)", delay.as_millis()),
            None => "memory".to_string(),
        }
    }
}

// ============================================================================
// File
// ============================================================================

/// On-disk record file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Yaml,
}

impl FileFormat {
    /// Extensions probed, in order, when looking up a collection file.
    pub const EXTENSIONS: [&'static str; 3] = ["json", "yaml", "yml"];

    /// Picks the format from a path's extension.
    pub fn from_path(path: &Path) -> Result<Self, SourceError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("json") => Ok(FileFormat::Json),
            Some("yaml") | Some("yml") => Ok(FileFormat::Yaml),
            _ => Err(SourceError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Records loaded from a JSON or YAML file on every fetch.
#[derive(Debug)]
pub struct FileSource<R> {
    path: PathBuf,
    format: FileFormat,
    _records: PhantomData<fn() -> R>,
}

impl<R> FileSource<R> {
    /// Creates a source for `path`, rejecting unknown extensions.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, SourceError> {
        let path = path.into();
        let format = FileFormat::from_path(&path)?;
        Ok(FileSource {
            path,
            format,
            _records: PhantomData,
        })
    }

    /// Finds `<collection>.json`, `.yaml` or `.yml` inside `dir`.
    pub fn in_dir(dir: &Path, collection: &str) -> Result<Self, SourceError> {
        FileFormat::EXTENSIONS
            .iter()
            .map(|ext| dir.join(format!("{collection}.{ext}")))
            .find(|candidate| candidate.is_file())
            .ok_or_else(|| SourceError::MissingCollection {
                dir: dir.to_path_buf(),
                collection: collection.to_string(),
            })
            .and_then(FileSource::new)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> FileFormat {
        self.format
    }

    fn parse(&self, content: &str) -> Result<Vec<R>, SourceError>
    where
        R: DeserializeOwned,
    {
        match self.format {
            FileFormat::Json => serde_json::from_str(content).map_err(|source| SourceError::Json {
                path: self.path.clone(),
                source,
            }),
            FileFormat::Yaml => serde_yaml::from_str(content).map_err(|source| SourceError::Yaml {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

#[async_trait]
impl<R> RecordSource<R> for FileSource<R>
where
    R: DeserializeOwned + Send + Sync,
{
    async fn fetch(&self) -> Result<Vec<R>, SourceError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| SourceError::Io {
                path: self.path.clone(),
                source,
            })?;
        let records = self.parse(&content)?;
        info!(path = %self.path.display(), count = records.len(), "loaded records from file");
        Ok(records)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_extension() {
        assert_eq!(FileFormat::from_path(Path::new("a.json")).unwrap(), FileFormat::Json);
        assert_eq!(FileFormat::from_path(Path::new("a.YML")).unwrap(), FileFormat::Yaml);
        assert_eq!(FileFormat::from_path(Path::new("a.yaml")).unwrap(), FileFormat::Yaml);
        assert!(matches!(
            FileFormat::from_path(Path::new("a.toml")),
            Err(SourceError::UnsupportedFormat { .. })
        ));
        assert!(FileFormat::from_path(Path::new("noext")).is_err());
    }

    #[test]
    fn zero_delay_is_no_delay() {
        let source = MemorySource::new(vec![1, 2, 3]).with_delay(Duration::ZERO);
        assert_eq!(source.delay(), None);
        assert_eq!(RecordSource::<i32>::describe(&source), "memory");
    }

    #[tokio::test]
    async fn memory_source_returns_copy() {
        let source = MemorySource::new(vec!["a".to_string(), "b".to_string()]);
        let first = source.fetch().await.unwrap();
        let second = source.fetch().await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn memory_source_waits_for_delay() {
        let source = MemorySource::new(vec![1u8]).with_delay(Duration::from_millis(400));
        let started = tokio::time::Instant::now();
        let records = source.fetch().await.unwrap();
        assert_eq!(records, vec![1]);
        assert!(started.elapsed() >= Duration::from_millis(400));
    }
}
