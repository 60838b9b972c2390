//! Download-once asset fetching.

use apod_error::{ApodResult, StorageError, StorageErrorKind};
use apod_interface::AssetFetcher;
use reqwest::blocking::Client;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Blocking HTTP asset fetcher.
///
/// Downloads land in a `.part` file next to the destination and are renamed
/// into place, so an interrupted transfer never leaves a file that a later
/// run would skip as already present.
#[derive(Debug, Clone, Default)]
pub struct HttpAssetFetcher {
    client: Client,
}

impl HttpAssetFetcher {
    /// Create a fetcher with a fresh HTTP client.
    pub fn new() -> Self {
        Self::default()
    }

    fn download(&self, url: &str) -> ApodResult<Vec<u8>> {
        let bytes = self
            .client
            .get(url)
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.bytes())
            .map_err(|e| {
                StorageError::new(StorageErrorKind::Download(format!("{}: {}", url, e)))
            })?;
        Ok(bytes.to_vec())
    }
}

impl AssetFetcher for HttpAssetFetcher {
    #[instrument(skip(self, destination), fields(destination = %destination.display()))]
    fn ensure_downloaded(&self, url: &str, destination: &Path) -> ApodResult<()> {
        if destination.exists() {
            debug!("Asset already present, skipping download");
            return Ok(());
        }

        if let Some(parent) = destination.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }

        let data = self.download(url)?;

        let mut temp_name = destination.as_os_str().to_owned();
        temp_name.push(".part");
        let temp_path = Path::new(&temp_name);

        std::fs::write(temp_path, &data).map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        std::fs::rename(temp_path, destination).map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                destination.display(),
                e
            )))
        })?;

        info!(size = data.len(), "Downloaded asset");
        Ok(())
    }
}
