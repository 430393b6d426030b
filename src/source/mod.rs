//! Dataset sources that produce the world area tree.
//!
//! The handler only sees the [`DatasetSource`] trait, so tests can swap in a
//! [`StaticDatasetSource`] while the server fetches over HTTP or from disk.

mod file;
mod http;

use std::future::Future;

pub use file::FileDatasetSource;
pub use http::HttpDatasetSource;

use crate::error::FetchError;
use crate::models::Area;

/// Asynchronous provider of a complete area tree rooted at "world"
pub trait DatasetSource: Send + Sync + 'static {
    /// Fetch a fresh copy of the tree
    fn fetch(&self) -> impl Future<Output = Result<Area, FetchError>> + Send;
}

/// In-memory dataset; every fetch hands out a clone
#[derive(Debug, Clone)]
pub struct StaticDatasetSource {
    root: Area,
}

impl StaticDatasetSource {
    pub fn new(root: Area) -> Self {
        Self { root }
    }
}

impl DatasetSource for StaticDatasetSource {
    async fn fetch(&self) -> Result<Area, FetchError> {
        Ok(self.root.clone())
    }
}

/// Source selected at startup from configuration
pub enum ConfiguredSource {
    Http(HttpDatasetSource),
    File(FileDatasetSource),
}

impl DatasetSource for ConfiguredSource {
    async fn fetch(&self) -> Result<Area, FetchError> {
        match self {
            ConfiguredSource::Http(source) => source.fetch().await,
            ConfiguredSource::File(source) => source.fetch().await,
        }
    }
}

impl std::fmt::Display for ConfiguredSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfiguredSource::Http(source) => write!(f, "{}", source.url()),
            ConfiguredSource::File(source) => write!(f, "{}", source.path().display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_source_hands_out_fresh_trees() {
        let source = StaticDatasetSource::new(Area::new("world").with_child(Area::new("Peru")));

        let mut first = source.fetch().await.unwrap();
        first.areas.clear();

        let second = source.fetch().await.unwrap();
        assert_eq!(second.child_names(), vec!["Peru"]);
    }
}
