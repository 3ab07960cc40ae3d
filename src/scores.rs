//! Walk/transit score lookup for a single address.

use crate::error::Result;
use crate::services::api::{GeocodeApi, ScoreApi};
use tracing::debug;

/// Walk and transit scores for one location. `None` means the upstream
/// service reported no data, which is not the same as a score of zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scores {
    pub walk: Option<f64>,
    pub transit: Option<f64>,
}

/// Geocodes `address` and queries the walkability service with both the
/// address and its coordinates.
pub fn fetch_scores<G, S>(geocoder: &G, scorer: &S, address: &str) -> Result<Scores>
where
    G: GeocodeApi,
    S: ScoreApi,
{
    let (lat, lon) = geocoder.geocode(address)?;
    let response = scorer.score(address, lat, lon)?;

    let scores = Scores {
        walk: response.walkscore,
        transit: response.transit.and_then(|t| t.score),
    };
    debug!(address, walk = ?scores.walk, transit = ?scores.transit, "Scores fetched");
    Ok(scores)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RaterError;
    use crate::services::api::{ScoreResponse, SubScore};

    struct FakeGeocoder {
        result: Option<(f64, f64)>,
    }

    impl GeocodeApi for FakeGeocoder {
        fn geocode(&self, address: &str) -> Result<(f64, f64)> {
            self.result
                .ok_or_else(|| RaterError::NoGeocodeResult(address.to_string()))
        }
    }

    struct FakeScorer {
        walk: Option<f64>,
        transit: Option<f64>,
    }

    impl ScoreApi for FakeScorer {
        fn score(&self, _address: &str, _lat: f64, _lon: f64) -> Result<ScoreResponse> {
            Ok(ScoreResponse {
                walkscore: self.walk,
                description: None,
                ws_link: None,
                transit: Some(SubScore {
                    score: self.transit,
                    description: None,
                }),
                bike: None,
            })
        }
    }

    #[test]
    fn test_scores_pass_through() {
        let geocoder = FakeGeocoder {
            result: Some((42.35, -71.06)),
        };
        let scorer = FakeScorer {
            walk: Some(88.0),
            transit: Some(72.0),
        };

        let scores = fetch_scores(&geocoder, &scorer, "12 Oak St").unwrap();
        assert_eq!(scores.walk, Some(88.0));
        assert_eq!(scores.transit, Some(72.0));
    }

    #[test]
    fn test_null_scores_stay_absent() {
        let geocoder = FakeGeocoder {
            result: Some((42.35, -71.06)),
        };
        let scorer = FakeScorer {
            walk: None,
            transit: None,
        };

        let scores = fetch_scores(&geocoder, &scorer, "12 Oak St").unwrap();
        assert_eq!(scores.walk, None);
        assert_eq!(scores.transit, None);
    }

    #[test]
    fn test_geocode_failure_propagates() {
        let geocoder = FakeGeocoder { result: None };
        let scorer = FakeScorer {
            walk: Some(88.0),
            transit: Some(72.0),
        };

        let result = fetch_scores(&geocoder, &scorer, "nowhere");
        assert!(matches!(result, Err(RaterError::NoGeocodeResult(_))));
    }
}
