use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ParkError>;

/// Failures of the park data pipeline.
///
/// `UnreachableService`, `EmptyParkList` and `NoData` end the run.
/// `DetailFetch` is recovered by the aggregator, which drops the park.
#[derive(Debug, Error)]
pub enum ParkError {
    #[error("failed to reach park API at {url}: {reason}")]
    UnreachableService { url: String, reason: String },

    #[error("failed to set up HTTP client: {0}")]
    ClientSetup(String),

    #[error("park API returned an empty park list")]
    EmptyParkList,

    #[error("failed to fetch details for park '{park_id}': {reason}")]
    DetailFetch { park_id: String, reason: String },

    #[error("failed to retrieve data for any of the {requested} sampled park(s)")]
    NoData { requested: usize },

    #[error("failed to download image {url}: {reason}")]
    ImageFetch { url: String, reason: String },

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
