//! Forward and reverse geocoding against the Geocoding API wire format.
//!
//! Same envelope discipline as the legacy search endpoint: a 2xx response
//! carries a top-level `status`, with `"OK"` and `"ZERO_RESULTS"` counting
//! as successes.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use swipedine_core::geo::Coordinate;

use crate::client::normalize_base_url;
use crate::error::PlacesError;

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com";
const GEOCODE_PATH: &str = "/maps/api/geocode/json";

/// Client for the geocoding boundary: postal code to coordinate and back.
pub struct GeocodeClient {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: GeocodeGeometry,
    #[serde(default)]
    address_components: Vec<AddressComponent>,
}

#[derive(Debug, Deserialize)]
struct GeocodeGeometry {
    location: GeocodeLatLng,
}

#[derive(Debug, Deserialize)]
struct GeocodeLatLng {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct AddressComponent {
    #[serde(default)]
    long_name: String,
    #[serde(default)]
    types: Vec<String>,
}

impl GeocodeClient {
    /// Creates a `GeocodeClient` against the production endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the `reqwest::Client` cannot be
    /// constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, PlacesError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a `GeocodeClient` against an explicit base URL (tests).
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::InvalidBaseUrl`] if `base_url` does not parse,
    /// or [`PlacesError::Http`] if the `reqwest::Client` cannot be built.
    pub fn with_base_url(
        api_key: &str,
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
        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Resolves a postal code to a coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::NoGeocodeMatch`] when the provider knows no
    /// such postal code, plus the usual transport, status, and
    /// deserialization errors.
    pub async fn forward(&self, postal_code: &str) -> Result<Coordinate, PlacesError> {
        let response = self
            .request(&[("address", postal_code), ("key", &self.api_key)])
            .await?;

        match response.results.first() {
            Some(result) => {
                let location = &result.geometry.location;
                tracing::debug!(postal_code, lat = location.lat, lng = location.lng, "geocoded");
                Ok(Coordinate::new(location.lat, location.lng))
            }
            None => Err(PlacesError::NoGeocodeMatch {
                query: postal_code.to_owned(),
            }),
        }
    }

    /// Resolves a coordinate back to a postal code, when the address has
    /// one. Absence is `Ok(None)`, not an error: plenty of places reverse
    /// geocode to addresses without postal codes.
    ///
    /// # Errors
    ///
    /// Returns the usual transport, status, and deserialization errors.
    pub async fn reverse(&self, coordinate: Coordinate) -> Result<Option<String>, PlacesError> {
        let latlng = format!("{},{}", coordinate.latitude, coordinate.longitude);
        let response = self
            .request(&[("latlng", latlng.as_str()), ("key", &self.api_key)])
            .await?;

        Ok(postal_code_from(&response.results))
    }

    async fn request(&self, params: &[(&str, &str)]) -> Result<GeocodeResponse, PlacesError> {
        let url = format!("{}{GEOCODE_PATH}", self.base_url);
        let response = self.client.get(&url).query(params).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PlacesError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        let parsed = serde_json::from_str::<GeocodeResponse>(&body).map_err(|e| {
            PlacesError::Deserialize {
                context: "geocode response".to_string(),
                source: e,
            }
        })?;

        match parsed.status.as_str() {
            "OK" | "ZERO_RESULTS" => Ok(parsed),
            other => Err(PlacesError::ProviderStatus {
                status: other.to_string(),
                message: parsed.error_message,
            }),
        }
    }
}

/// Scans geocode results for the first postal-code address component.
fn postal_code_from(results: &[GeocodeResult]) -> Option<String> {
    results
        .iter()
        .flat_map(|result| &result.address_components)
        .find(|component| component.types.iter().any(|t| t == "postal_code"))
        .map(|component| component.long_name.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_result(components: Vec<AddressComponent>) -> GeocodeResult {
        GeocodeResult {
            geometry: GeocodeGeometry {
                location: GeocodeLatLng {
                    lat: 38.7223,
                    lng: -9.1393,
                },
            },
            address_components: components,
        }
    }

    fn make_component(long_name: &str, kind: &str) -> AddressComponent {
        AddressComponent {
            long_name: long_name.to_string(),
            types: vec![kind.to_string()],
        }
    }

    #[test]
    fn postal_code_found_in_later_result() {
        let results = vec![
            make_result(vec![make_component("Lisboa", "locality")]),
            make_result(vec![
                make_component("Portugal", "country"),
                make_component("1100-341", "postal_code"),
            ]),
        ];
        assert_eq!(postal_code_from(&results), Some("1100-341".to_string()));
    }

    #[test]
    fn postal_code_first_match_wins() {
        let results = vec![make_result(vec![
            make_component("1100-341", "postal_code"),
            make_component("1100-999", "postal_code"),
        ])];
        assert_eq!(postal_code_from(&results), Some("1100-341".to_string()));
    }

    #[test]
    fn postal_code_absent_is_none() {
        let results = vec![make_result(vec![make_component("Lisboa", "locality")])];
        assert_eq!(postal_code_from(&results), None);
    }

    #[test]
    fn postal_code_empty_results() {
        assert_eq!(postal_code_from(&[]), None);
    }
}
