//! Dataset sources
//!
//! Where the raw dataset bytes come from: the published workbook over HTTP,
//! or a local copy on disk.

use super::error::{DatasetError, DatasetResult};
use async_trait::async_trait;
use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;

/// A place the raw dataset can be fetched from
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Human-readable location, used in logs and the dataset summary
    fn describe(&self) -> String;

    /// Fetch the full file contents
    async fn fetch(&self) -> DatasetResult<Vec<u8>>;
}

/// Dataset published at a fixed URL
pub struct HttpSource {
    client: Client,
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> DatasetResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("oralscope/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl DatasetSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> DatasetResult<Vec<u8>> {
        tracing::debug!(url = %self.url, "Downloading dataset");

        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DatasetError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        tracing::debug!(bytes = bytes.len(), "Dataset downloaded");
        Ok(bytes.to_vec())
    }
}

/// Dataset stored on the local filesystem
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DatasetSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> DatasetResult<Vec<u8>> {
        Ok(tokio::fs::read(&self.path).await?)
    }
}
