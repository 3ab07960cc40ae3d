//! Traits and wire types for the external services the rater consumes.
//!
//! The core pipeline only depends on these traits; the concrete HTTP
//! clients live in [`super::maps`] and [`super::walkscore`].

use crate::error::Result;
use crate::location::TravelMode;
use chrono::{DateTime, Local};
use serde::Deserialize;

/// Resolves a street address to coordinates.
pub trait GeocodeApi {
    /// Returns `(lat, lon)` for the best match. Zero results is an error,
    /// not an empty answer.
    fn geocode(&self, address: &str) -> Result<(f64, f64)>;
}

/// Queries travel durations for all origins against a set of destination
/// addresses sharing one travel mode.
pub trait DistanceApi {
    fn distance_matrix(
        &self,
        origins: &[String],
        destinations: &[String],
        mode: TravelMode,
        departure: DateTime<Local>,
    ) -> Result<DistanceResponse>;
}

/// Queries walkability and transit scores for one location.
pub trait ScoreApi {
    fn score(&self, address: &str, lat: f64, lon: f64) -> Result<ScoreResponse>;
}

/// Distance matrix response. `status` is the overall API status; callers
/// must treat anything other than `"OK"` as a failed fetch.
#[derive(Debug, Clone, Deserialize)]
pub struct DistanceResponse {
    pub status: String,
    #[serde(default)]
    pub rows: Vec<DistanceRow>,
}

/// Durations from one origin to every destination in the query, in query
/// order.
#[derive(Debug, Clone, Deserialize)]
pub struct DistanceRow {
    pub elements: Vec<DistanceElement>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DistanceElement {
    pub duration: Option<DurationValue>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DurationValue {
    /// Travel time in seconds.
    pub value: i64,
}

/// Walkability response. Score fields are null when the service has no
/// data for the location; null is distinct from a score of zero.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoreResponse {
    pub walkscore: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub ws_link: Option<String>,
    #[serde(default)]
    pub transit: Option<SubScore>,
    #[serde(default)]
    pub bike: Option<SubScore>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubScore {
    pub score: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
}
