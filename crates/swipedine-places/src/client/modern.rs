//! Places API v1 `searchNearby` fetch for `PlacesClient`.

use serde_json::json;
use swipedine_core::query::SearchQuery;

use crate::error::PlacesError;
use crate::types::{ModernSearchResponse, RawPlace, ResultPage};

use super::PlacesClient;

const SEARCH_NEARBY_PATH: &str = "/v1/places:searchNearby";

/// The exact set of fields the normalizer consumes. v1 rejects requests
/// without a field mask, and anything not listed here is never returned.
pub(super) const FIELD_MASK: &str = "places.id,places.displayName,places.formattedAddress,\
places.rating,places.priceLevel,places.types,places.currentOpeningHours,places.photos,\
places.websiteUri,places.reviews,places.primaryTypeDisplayName,places.location";

/// Upper bound the v1 endpoint accepts for `maxResultCount`.
const MAX_RESULT_COUNT: u32 = 20;

impl PlacesClient {
    pub(super) async fn fetch_modern_page(
        &self,
        query: &SearchQuery,
    ) -> Result<ResultPage, PlacesError> {
        let url = format!("{}{SEARCH_NEARBY_PATH}", self.base_url);
        let body = build_modern_body(query);

        let response = self
            .client
            .post(&url)
            .header("X-Goog-Api-Key", &self.api_key)
            .header("X-Goog-FieldMask", FIELD_MASK)
            .json(&body)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PlacesError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        let parsed =
            serde_json::from_str::<ModernSearchResponse>(&body).map_err(|e| {
                PlacesError::Deserialize {
                    context: "places:searchNearby response".to_string(),
                    source: e,
                }
            })?;

        tracing::debug!(count = parsed.places.len(), "fetched searchNearby page");

        // This backend has no continuation token: one page is the search.
        Ok(ResultPage {
            places: parsed.places.into_iter().map(RawPlace::Modern).collect(),
            next_token: None,
        })
    }
}

/// Builds the `searchNearby` request body for `query`.
pub(super) fn build_modern_body(query: &SearchQuery) -> serde_json::Value {
    let mut body = json!({
        "includedTypes": ["restaurant"],
        "maxResultCount": MAX_RESULT_COUNT,
        "locationRestriction": {
            "circle": {
                "center": {
                    "latitude": query.origin.latitude,
                    "longitude": query.origin.longitude,
                },
                "radius": query.max_distance_meters,
            }
        },
    });
    if let Some(max_price) = query.max_price_level {
        body["priceLevels"] = json!(price_levels_up_to(max_price));
    }
    body
}

/// Expands a canonical price cap into the v1 `priceLevels` filter values.
///
/// The filter accepts only the four symbolic paid tiers; `PRICE_LEVEL_FREE`
/// is not a valid filter value, so a cap of 0 degrades to the cheapest
/// filterable tier.
pub(super) fn price_levels_up_to(max_price: u8) -> Vec<&'static str> {
    const TIERS: [&str; 4] = [
        "PRICE_LEVEL_INEXPENSIVE",
        "PRICE_LEVEL_MODERATE",
        "PRICE_LEVEL_EXPENSIVE",
        "PRICE_LEVEL_VERY_EXPENSIVE",
    ];
    let top = usize::from(max_price.clamp(1, 4));
    TIERS[..top].to_vec()
}
