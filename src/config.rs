//! API credentials, resolved once at startup.
//!
//! Every external service requires a key. A missing key is a configuration
//! error before any call is made, never a per-call failure.

use crate::error::{RaterError, Result};

pub const GOOGLE_API_KEY: &str = "GOOGLE_API_KEY";
pub const WALKSCORE_API_KEY: &str = "WALKSCORE_API_KEY";

/// Credentials for the external services, passed explicitly into each
/// client constructor.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub google_api_key: String,
    pub walkscore_api_key: String,
}

impl ApiConfig {
    /// Reads credentials from the environment. `dotenvy` should already have
    /// run so `.env` entries are visible here.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            google_api_key: require(&lookup, GOOGLE_API_KEY)?,
            walkscore_api_key: require(&lookup, WALKSCORE_API_KEY)?,
        })
    }
}

fn require<F>(lookup: &F, name: &'static str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(RaterError::MissingCredential(name)),
    }
}
