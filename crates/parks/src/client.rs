use std::time::Duration;

use rand::Rng;
use tracing::debug;

use crate::error::{ParkError, Result};
use crate::sampler::select_sample;
use crate::schema::{ParkRecord, ParkStub};

pub const DEFAULT_BASE_URL: &str = "https://mn-state-parks.herokuapp.com/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Clone)]
pub struct ParksClient {
    base_url: String,
    client: reqwest::Client,
}

impl ParksClient {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self> {
        reqwest::Url::parse(&base_url)
            .map_err(|e| ParkError::ClientSetup(format!("invalid base URL '{}': {}", base_url, e)))?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ParkError::ClientSetup(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the complete park list.
    pub async fn list_parks(&self) -> Result<Vec<ParkStub>> {
        let url = format!("{}/list", self.base_url);
        let unreachable_err = |reason: String| ParkError::UnreachableService {
            url: url.clone(),
            reason,
        };

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| unreachable_err(e.to_string()))?;

        if !response.status().is_success() {
            return Err(unreachable_err(format!("status {}", response.status())));
        }

        let parks: Vec<ParkStub> = response
            .json()
            .await
            .map_err(|e| unreachable_err(format!("invalid park list: {}", e)))?;

        debug!(count = parks.len(), "Fetched park list");
        Ok(parks)
    }

    /// Fetch the list once and pick `count` distinct parks at random.
    pub async fn sample_parks<R: Rng + ?Sized>(
        &self,
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<ParkStub>> {
        let parks = self.list_parks().await?;
        if parks.is_empty() {
            return Err(ParkError::EmptyParkList);
        }
        Ok(select_sample(&parks, count, rng))
    }

    /// Fetch the full record for one park.
    pub async fn park_detail(&self, park_id: &str) -> Result<ParkRecord> {
        let url = format!("{}/{}", self.base_url, park_id);
        let failed = |reason: String| ParkError::DetailFetch {
            park_id: park_id.to_string(),
            reason,
        };

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| failed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(failed(format!("status {}", response.status())));
        }

        // Decode from text so a missing key reports the serde message.
        let body = response.text().await.map_err(|e| failed(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| failed(format!("invalid park record: {}", e)))
    }

    /// Download raw bytes, used for park photographs.
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let failed = |reason: String| ParkError::ImageFetch {
            url: url.to_string(),
            reason,
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| failed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(failed(format!("status {}", response.status())));
        }

        let bytes = response.bytes().await.map_err(|e| failed(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}
