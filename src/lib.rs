pub mod aggregate;
pub mod config;
pub mod distance;
pub mod error;
pub mod fetch;
pub mod input;
pub mod location;
pub mod matrix;
pub mod output;
pub mod scores;
pub mod services;
pub mod staleness;
pub mod summary;
