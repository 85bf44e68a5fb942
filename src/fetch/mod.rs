mod client;
mod basic;
pub mod auth;

pub use client::HttpClient;
pub use basic::BasicClient;

use anyhow::{Result, bail};
use bytes::Bytes;
use std::time::Duration;

/// Per-request deadline. A stuck feed blocks the refresh until this fires.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches one feed's payload, treating non-2xx statuses as errors.
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Bytes> {
    let mut req = reqwest::Request::new(reqwest::Method::GET, url.parse()?);
    *req.timeout_mut() = Some(FETCH_TIMEOUT);

    let resp = client.execute(req).await?;
    if !resp.status().is_success() {
        bail!("HTTP {} from {url}", resp.status());
    }
    Ok(resp.bytes().await?)
}
