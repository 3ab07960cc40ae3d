// Error types for the commute rater.
// Covers configuration, external service, and stored data failures.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RaterError {
    #[error("Missing {0} environment variable")]
    MissingCredential(&'static str),

    #[error("{service} returned status {status}")]
    ServiceStatus {
        service: &'static str,
        status: String,
    },

    #[error("No geocoding result for address: {0}")]
    NoGeocodeResult(String),

    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Stored matrix is malformed: {0}")]
    DataIntegrity(String),

    #[error("Precondition failed: {0}")]
    Precondition(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RaterError>;
