//! Dataset source backed by a JSON file on disk.

use std::path::{Path, PathBuf};

use tracing::info;

use super::DatasetSource;
use crate::error::FetchError;
use crate::models::Area;

/// Reads and decodes the world tree from a local file on every call
pub struct FileDatasetSource {
    path: PathBuf,
}

impl FileDatasetSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DatasetSource for FileDatasetSource {
    async fn fetch(&self) -> Result<Area, FetchError> {
        info!("Reading data from {}", self.path.display());

        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| FetchError::Io {
                path: self.path.clone(),
                source,
            })?;

        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_reads_tree_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"name":"world","areas":[{{"name":"Japan","areas":[{{"name":"Tokyo"}}]}}]}}"#
        )
        .unwrap();

        let source = FileDatasetSource::new(file.path());
        let root = source.fetch().await.unwrap();
        assert_eq!(root.child_names(), vec!["Japan"]);
        assert_eq!(root.areas[0].child_names(), vec!["Tokyo"]);
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileDatasetSource::new(dir.path().join("absent.json"));

        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, FetchError::Io { .. }));
        assert!(err.to_string().contains("absent.json"));
    }
}
