//! Synchronous HTTP fetch.
//!
//! Every external source is fetched through here: one blocking GET with a
//! User-Agent and a timeout. A stalled source therefore fails the call after
//! `DEFAULT_TIMEOUT` instead of hanging the caller forever.

use crate::error::GeoError;
use std::time::Duration;

const USER_AGENT: &str = "EpiGeo/0.3 (geographic-standardization)";

/// Default per-request timeout. Override with [`get_with_timeout`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetch a URL body as text with the default timeout.
pub fn get(url: &str) -> Result<String, GeoError> {
    get_with_timeout(url, DEFAULT_TIMEOUT)
}

/// Fetch a URL body as text with a caller-configurable timeout.
pub fn get_with_timeout(url: &str, timeout: Duration) -> Result<String, GeoError> {
    let response = ureq::get(url)
        .set("User-Agent", USER_AGENT)
        .timeout(timeout)
        .call()
        .map_err(|e| GeoError::Network(e.to_string()))?;

    response
        .into_string()
        .map_err(|e| GeoError::InvalidResponse(e.to_string()))
}
