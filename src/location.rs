//! Origins and destinations, plus the travel mode preference attached to
//! each destination.

use crate::error::RaterError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Travel mode used when querying the distance matrix API.
///
/// Destinations default to [`TravelMode::Transit`] when the input file does
/// not specify one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    Driving,
    Walking,
    Bicycling,
    #[default]
    Transit,
}

impl TravelMode {
    /// Wire name expected by the distance matrix API `mode` parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Driving => "driving",
            TravelMode::Walking => "walking",
            TravelMode::Bicycling => "bicycling",
            TravelMode::Transit => "transit",
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TravelMode {
    type Err = RaterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "driving" => Ok(TravelMode::Driving),
            "walking" => Ok(TravelMode::Walking),
            "bicycling" => Ok(TravelMode::Bicycling),
            "transit" => Ok(TravelMode::Transit),
            other => Err(RaterError::InvalidInput(format!(
                "unknown travel mode: {other}"
            ))),
        }
    }
}

/// A candidate apartment (origin) or a point of interest (destination).
///
/// `weight` and `mode` are only meaningful for destinations; `lat`/`lon` are
/// only populated for origins, by geocoding.
#[derive(Debug, Clone)]
pub struct Location {
    pub address: String,
    pub name: String,
    pub comment: Option<String>,
    pub weight: f64,
    pub mode: TravelMode,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

impl Location {
    /// An origin identified only by its address.
    pub fn origin(address: &str) -> Self {
        Self {
            address: address.to_string(),
            name: address.to_string(),
            comment: None,
            weight: 1.0,
            mode: TravelMode::default(),
            lat: None,
            lon: None,
        }
    }

    /// A weighted destination with a travel mode preference.
    pub fn destination(
        name: &str,
        address: &str,
        comment: Option<String>,
        weight: f64,
        mode: TravelMode,
    ) -> Self {
        Self {
            address: address.to_string(),
            name: if name.is_empty() {
                address.to_string()
            } else {
                name.to_string()
            },
            comment,
            weight,
            mode,
            lat: None,
            lon: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_round_trip() {
        for mode in [
            TravelMode::Driving,
            TravelMode::Walking,
            TravelMode::Bicycling,
            TravelMode::Transit,
        ] {
            assert_eq!(mode.as_str().parse::<TravelMode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_mode_parse_is_case_insensitive() {
        assert_eq!("Transit".parse::<TravelMode>().unwrap(), TravelMode::Transit);
        assert_eq!(" DRIVING ".parse::<TravelMode>().unwrap(), TravelMode::Driving);
    }

    #[test]
    fn test_mode_parse_rejects_unknown() {
        assert!("teleport".parse::<TravelMode>().is_err());
    }

    #[test]
    fn test_destination_name_defaults_to_address() {
        let d = Location::destination("", "1 Main St", None, 2.0, TravelMode::Transit);
        assert_eq!(d.name, "1 Main St");
    }
}
