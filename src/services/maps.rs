//! Client for the Google Maps geocoding and distance matrix endpoints.

use crate::error::{RaterError, Result};
use crate::fetch::{self, BasicClient, HttpClient, Retry};
use crate::location::TravelMode;
use chrono::{DateTime, Local};
use serde::Deserialize;
use tracing::debug;

use super::api::{DistanceApi, DistanceResponse, GeocodeApi};

const GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";
const DISTANCE_MATRIX_URL: &str = "https://maps.googleapis.com/maps/api/distancematrix/json";

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

pub struct MapsClient<C = Retry<BasicClient>> {
    client: C,
    api_key: String,
}

impl MapsClient {
    /// Builds a client with the default retrying HTTP stack. The key comes
    /// from [`crate::config::ApiConfig`], never from the environment here.
    pub fn new(api_key: String) -> Self {
        Self {
            client: Retry::new(BasicClient::new()),
            api_key,
        }
    }
}

impl<C: HttpClient> MapsClient<C> {
    pub fn with_client(client: C, api_key: String) -> Self {
        Self { client, api_key }
    }

    fn url(&self, base: &str, params: &[(&str, &str)]) -> Result<reqwest::Url> {
        let mut pairs: Vec<(&str, &str)> = params.to_vec();
        pairs.push(("key", self.api_key.as_str()));
        reqwest::Url::parse_with_params(base, &pairs)
            .map_err(|e| RaterError::InvalidInput(format!("invalid request url: {e}")))
    }
}

impl<C: HttpClient> GeocodeApi for MapsClient<C> {
    fn geocode(&self, address: &str) -> Result<(f64, f64)> {
        let url = self.url(GEOCODE_URL, &[("address", address)])?;
        let resp: GeocodeResponse = fetch::get_json(&self.client, url)?;

        match resp.status.as_str() {
            "OK" => {}
            "ZERO_RESULTS" => return Err(RaterError::NoGeocodeResult(address.to_string())),
            other => {
                return Err(RaterError::ServiceStatus {
                    service: "geocoding",
                    status: other.to_string(),
                });
            }
        }

        let first = resp
            .results
            .first()
            .ok_or_else(|| RaterError::NoGeocodeResult(address.to_string()))?;
        let location = &first.geometry.location;
        debug!(address, lat = location.lat, lon = location.lng, "Geocoded");
        Ok((location.lat, location.lng))
    }
}

impl<C: HttpClient> DistanceApi for MapsClient<C> {
    fn distance_matrix(
        &self,
        origins: &[String],
        destinations: &[String],
        mode: TravelMode,
        departure: DateTime<Local>,
    ) -> Result<DistanceResponse> {
        let departure_time = departure.timestamp().to_string();
        let origins = origins.join("|");
        let destinations = destinations.join("|");
        let url = self.url(
            DISTANCE_MATRIX_URL,
            &[
                ("units", "imperial"),
                ("mode", mode.as_str()),
                ("departure_time", departure_time.as_str()),
                ("origins", origins.as_str()),
                ("destinations", destinations.as_str()),
            ],
        )?;

        fetch::get_json(&self.client, url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_appends_key_last() {
        let client = MapsClient::new("secret".to_string());
        let url = client
            .url(GEOCODE_URL, &[("address", "12 Oak St, Boston MA")])
            .unwrap();

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("address".to_string(), "12 Oak St, Boston MA".to_string()),
                ("key".to_string(), "secret".to_string()),
            ]
        );
    }

    #[test]
    fn test_geocode_response_parses() {
        let body = r#"{
            "status": "OK",
            "results": [{"geometry": {"location": {"lat": 42.35, "lng": -71.06}}}]
        }"#;
        let resp: GeocodeResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.status, "OK");
        assert_eq!(resp.results[0].geometry.location.lat, 42.35);
    }

    #[test]
    fn test_distance_response_parses() {
        let body = r#"{
            "status": "OK",
            "rows": [{"elements": [{"status": "OK", "duration": {"value": 1800}}]}]
        }"#;
        let resp: DistanceResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.rows[0].elements[0].duration.as_ref().unwrap().value, 1800);
    }
}
