//! Approximate origin from the caller's public IP.
//!
//! Used as the last resort of the origin fallback chain when there is no
//! device fix and no postal code. City-level accuracy at best; good enough
//! to center a first search.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use swipedine_core::geo::Coordinate;

use crate::client::normalize_base_url;
use crate::error::PlacesError;

const DEFAULT_BASE_URL: &str = "https://ipapi.co";

/// Client for an ipapi.co-style IP geolocation endpoint.
pub struct IpLookupClient {
    client: Client,
    base_url: String,
}

/// The two fields we use from the `/json/` payload; everything else (city,
/// org, timezone, ...) is ignored.
#[derive(Debug, Deserialize)]
struct IpLookupResponse {
    latitude: f64,
    longitude: f64,
}

impl IpLookupClient {
    /// Creates an `IpLookupClient` against the production endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the `reqwest::Client` cannot be
    /// constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, PlacesError> {
        Self::with_base_url(timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates an `IpLookupClient` against an explicit base URL (tests).
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::InvalidBaseUrl`] if `base_url` does not parse,
    /// or [`PlacesError::Http`] if the `reqwest::Client` cannot be built.
    pub fn with_base_url(
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        let base_url = normalize_base_url(base_url)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client, base_url })
    }

    /// Resolves the caller's approximate coordinate from its public IP.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Http`] — network or TLS failure.
    /// - [`PlacesError::UnexpectedStatus`] — non-2xx HTTP status.
    /// - [`PlacesError::Deserialize`] — body without numeric
    ///   latitude/longitude.
    pub async fn lookup(&self) -> Result<Coordinate, PlacesError> {
        let url = format!("{}/json/", self.base_url);
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PlacesError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        let parsed = serde_json::from_str::<IpLookupResponse>(&body).map_err(|e| {
            PlacesError::Deserialize {
                context: "ip geolocation response".to_string(),
                source: e,
            }
        })?;

        tracing::debug!(
            lat = parsed.latitude,
            lng = parsed.longitude,
            "resolved origin from ip"
        );
        Ok(Coordinate::new(parsed.latitude, parsed.longitude))
    }
}
