use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Entry of the park list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParkStub {
    pub park_id: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

/// Full detail record for one park.
///
/// Every field is required; a response missing any of them is rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParkRecord {
    pub name: String,
    pub address: String,
    pub url: String,
    pub location: Location,
    pub highlights: Vec<String>,
    /// Section title -> description, in the order the API sent them.
    pub park_information: IndexMap<String, String>,
    pub park_images: Vec<String>,
}
