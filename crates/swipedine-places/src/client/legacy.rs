//! Legacy Nearby Search page fetch for `PlacesClient`.

use swipedine_core::query::SearchQuery;

use crate::error::PlacesError;
use crate::types::{LegacySearchResponse, RawPlace, ResultPage};

use super::PlacesClient;

const NEARBY_SEARCH_PATH: &str = "/maps/api/place/nearbysearch/json";

impl PlacesClient {
    pub(super) async fn fetch_legacy_page(
        &self,
        query: &SearchQuery,
        page_token: Option<&str>,
    ) -> Result<ResultPage, PlacesError> {
        let url = format!("{}{NEARBY_SEARCH_PATH}", self.base_url);
        let params = build_legacy_params(query, page_token, &self.api_key);

        let response = self.client.get(&url).query(&params).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PlacesError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        let parsed =
            serde_json::from_str::<LegacySearchResponse>(&body).map_err(|e| {
                PlacesError::Deserialize {
                    context: "legacy nearby search page".to_string(),
                    source: e,
                }
            })?;

        match parsed.status.as_str() {
            "OK" | "ZERO_RESULTS" => {}
            other => {
                return Err(PlacesError::ProviderStatus {
                    status: other.to_string(),
                    message: parsed.error_message,
                });
            }
        }

        tracing::debug!(
            count = parsed.results.len(),
            has_next = parsed.next_page_token.is_some(),
            "fetched legacy nearby page"
        );

        Ok(ResultPage {
            places: parsed.results.into_iter().map(RawPlace::Legacy).collect(),
            next_token: parsed.next_page_token,
        })
    }
}

/// Builds the query parameters for one legacy request.
///
/// A continuation request carries only `key` and `pagetoken`: the provider
/// documents that every other parameter is ignored once a token is present,
/// and the token must be replayed verbatim.
pub(super) fn build_legacy_params(
    query: &SearchQuery,
    page_token: Option<&str>,
    api_key: &str,
) -> Vec<(String, String)> {
    if let Some(token) = page_token {
        return vec![
            ("key".to_string(), api_key.to_string()),
            ("pagetoken".to_string(), token.to_string()),
        ];
    }

    let mut params = vec![
        ("key".to_string(), api_key.to_string()),
        (
            "location".to_string(),
            format!("{},{}", query.origin.latitude, query.origin.longitude),
        ),
        (
            "radius".to_string(),
            query.max_distance_meters.round().to_string(),
        ),
        ("type".to_string(), "restaurant".to_string()),
    ];
    if let Some(max_price) = query.max_price_level {
        params.push(("maxprice".to_string(), max_price.to_string()));
    }
    params
}
