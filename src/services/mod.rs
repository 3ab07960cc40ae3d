//! Clients for the external geocoding, distance, and walkability services.

pub mod api;
pub mod maps;
pub mod walkscore;

pub use api::{DistanceApi, GeocodeApi, ScoreApi};
pub use maps::MapsClient;
pub use walkscore::WalkScoreClient;
