mod basic;
mod client;
mod retry;

pub use basic::BasicClient;
pub use client::HttpClient;
pub use retry::Retry;

use crate::error::Result;
use serde::de::DeserializeOwned;

/// Issues a GET request through `client` and deserializes the JSON body.
///
/// Non-2xx HTTP statuses are transport errors; API-level status fields
/// inside the body are the caller's concern.
pub fn get_json<C: HttpClient, T: DeserializeOwned>(client: &C, url: reqwest::Url) -> Result<T> {
    let req = reqwest::blocking::Request::new(reqwest::Method::GET, url);
    let resp = client.execute(req)?.error_for_status()?;
    Ok(resp.json()?)
}
