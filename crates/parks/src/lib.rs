//! Client and aggregation pipeline for the state park API.

pub mod aggregate;
pub mod client;
pub mod error;
pub mod images;
pub mod sampler;
pub mod schema;

pub use aggregate::{Aggregation, FailedPark, collect_parks};
pub use client::ParksClient;
pub use error::{ParkError, Result};
pub use images::ImageStore;
pub use sampler::{DEFAULT_SAMPLE_SIZE, select_sample};
pub use schema::{Location, ParkRecord, ParkStub};
