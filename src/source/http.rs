//! Dataset source that downloads the area tree as JSON over HTTP.

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info};
use url::Url;

use super::DatasetSource;
use crate::error::FetchError;
use crate::models::Area;

/// Fetches the world tree from a JSON endpoint on every call
pub struct HttpDatasetSource {
    client: Client,
    url: Url,
}

impl HttpDatasetSource {
    pub fn new(url: Url, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(concat!("covid-areas/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self { client, url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl DatasetSource for HttpDatasetSource {
    async fn fetch(&self) -> Result<Area, FetchError> {
        info!("Downloading data from {}", self.url);

        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await?
            .error_for_status()?;

        let body = response.bytes().await?;
        debug!("Received {} bytes of dataset", body.len());

        let root: Area = serde_json::from_slice(&body)?;
        Ok(root)
    }
}
