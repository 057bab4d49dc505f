use rand::Rng;
use tracing::{info, warn};

use crate::client::ParksClient;
use crate::error::{ParkError, Result};
use crate::schema::ParkRecord;

/// A sampled park whose detail fetch failed.
#[derive(Debug)]
pub struct FailedPark {
    pub park_id: String,
    pub name: String,
    pub error: ParkError,
}

/// Outcome of turning a sample of stubs into detail records.
#[derive(Debug)]
pub struct Aggregation {
    /// Number of parks actually sampled.
    pub requested: usize,
    /// Successful records, in sample order.
    pub records: Vec<ParkRecord>,
    pub failures: Vec<FailedPark>,
}

impl Aggregation {
    pub fn succeeded(&self) -> usize {
        self.records.len()
    }

    pub fn failed_ids(&self) -> Vec<String> {
        self.failures.iter().map(|f| f.park_id.clone()).collect()
    }
}

/// Sample `sample_size` parks and fetch each one's details in order.
///
/// Individual detail failures are kept in `failures`. Fails with
/// [`ParkError::NoData`] only when no park could be fetched.
pub async fn collect_parks<R: Rng + ?Sized>(
    client: &ParksClient,
    sample_size: usize,
    rng: &mut R,
) -> Result<Aggregation> {
    let stubs = client.sample_parks(sample_size, rng).await?;
    let requested = stubs.len();

    let mut records = Vec::with_capacity(requested);
    let mut failures = Vec::new();

    for stub in stubs {
        match client.park_detail(&stub.park_id).await {
            Ok(record) => records.push(record),
            Err(error) => {
                warn!(park_id = %stub.park_id, name = %stub.name, error = %error, "Skipping park");
                failures.push(FailedPark {
                    park_id: stub.park_id,
                    name: stub.name,
                    error,
                });
            }
        }
    }

    if records.is_empty() {
        return Err(ParkError::NoData { requested });
    }

    info!(succeeded = records.len(), requested, "Aggregated park details");
    println!(
        "Successfully retrieved data for {} out of {} park(s).",
        records.len(),
        requested
    );

    Ok(Aggregation {
        requested,
        records,
        failures,
    })
}
