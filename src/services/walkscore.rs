//! Client for the WalkScore API.
//!
//! Documentation: <https://www.walkscore.com/professional/api.php>

use crate::error::{RaterError, Result};
use crate::fetch::{self, BasicClient, HttpClient, Retry};

use super::api::{ScoreApi, ScoreResponse};

const SCORE_URL: &str = "https://api.walkscore.com/score";

pub struct WalkScoreClient<C = Retry<BasicClient>> {
    client: C,
    api_key: String,
}

impl WalkScoreClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Retry::new(BasicClient::new()),
            api_key,
        }
    }
}

impl<C: HttpClient> WalkScoreClient<C> {
    pub fn with_client(client: C, api_key: String) -> Self {
        Self { client, api_key }
    }
}

impl<C: HttpClient> ScoreApi for WalkScoreClient<C> {
    /// Coordinates are required alongside the address; the service matches
    /// more accurately on them. Transit and bike scores are requested in
    /// the same call.
    fn score(&self, address: &str, lat: f64, lon: f64) -> Result<ScoreResponse> {
        let lat = lat.to_string();
        let lon = lon.to_string();
        let url = reqwest::Url::parse_with_params(
            SCORE_URL,
            &[
                ("format", "json"),
                ("transit", "1"),
                ("bike", "1"),
                ("address", address),
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("wsapikey", self.api_key.as_str()),
            ],
        )
        .map_err(|e| RaterError::InvalidInput(format!("invalid request url: {e}")))?;

        fetch::get_json(&self.client, url)
    }
}

#[cfg(test)]
mod tests {
    use crate::services::api::ScoreResponse;

    #[test]
    fn test_null_scores_stay_null() {
        let body = r#"{
            "walkscore": null,
            "description": null,
            "ws_link": "https://www.walkscore.com/score/x",
            "transit": {"score": null, "description": null},
            "bike": {"score": 55, "description": "Bikeable"}
        }"#;
        let resp: ScoreResponse = serde_json::from_str(body).unwrap();

        assert!(resp.walkscore.is_none());
        assert!(resp.transit.unwrap().score.is_none());
        assert_eq!(resp.bike.unwrap().score, Some(55.0));
    }

    #[test]
    fn test_zero_score_is_a_score() {
        let body = r#"{"walkscore": 0, "transit": {"score": 0}}"#;
        let resp: ScoreResponse = serde_json::from_str(body).unwrap();

        assert_eq!(resp.walkscore, Some(0.0));
        assert_eq!(resp.transit.unwrap().score, Some(0.0));
    }
}
