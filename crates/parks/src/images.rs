use std::path::{Path, PathBuf};

use tracing::debug;

use crate::client::ParksClient;
use crate::error::{ParkError, Result};

/// Directory where park photographs are downloaded.
///
/// Files are named by their position in `park_images` (`0.jpg`, `1.jpg`, ...)
/// and are overwritten by the next park.
#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, index: usize) -> PathBuf {
        self.dir.join(format!("{}.jpg", index))
    }

    /// Download every URL in order. The first failure aborts.
    pub async fn fetch_all(&self, client: &ParksClient, urls: &[String]) -> Result<Vec<PathBuf>> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| ParkError::Io {
                path: self.dir.clone(),
                source,
            })?;

        let mut paths = Vec::with_capacity(urls.len());
        for (index, url) in urls.iter().enumerate() {
            let bytes = client.fetch_bytes(url).await?;
            let path = self.path_for(index);

            tokio::fs::write(&path, &bytes)
                .await
                .map_err(|source| ParkError::Io {
                    path: path.clone(),
                    source,
                })?;

            debug!(url = %url, path = ?path, bytes = bytes.len(), "Saved image");
            paths.push(path);
        }

        Ok(paths)
    }
}
