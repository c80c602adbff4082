//! Wire types for the two Google place-search backends.
//!
//! ## Observed shape, legacy Nearby Search (`/maps/api/place/nearbysearch/json`)
//!
//! ### Status envelope
//! Every response carries a top-level `status` string. `"OK"` and
//! `"ZERO_RESULTS"` are successes (the latter with an empty or absent
//! `results` array); anything else (`"REQUEST_DENIED"`, `"INVALID_REQUEST"`,
//! `"OVER_QUERY_LIMIT"`, ...) is a rejection, sometimes accompanied by an
//! `error_message` string. Notably, a freshly issued `next_page_token` that
//! has not warmed up yet comes back as `"INVALID_REQUEST"`.
//!
//! ### Pagination
//! `next_page_token` appears in the body when more results exist and is
//! replayed verbatim as the `pagetoken` query parameter.
//!
//! ### Fields
//! snake_case throughout. `price_level` is an integer 0–4. Coordinates sit
//! under `geometry.location.{lat,lng}`. The nearby endpoint itself omits
//! `website` and `reviews` (those belong to the details endpoint, which
//! shares this place shape), so every field except `place_id` is defaulted.
//!
//! ## Observed shape, Places API v1 (`/v1/places:searchNearby`)
//!
//! camelCase throughout, no status envelope (errors arrive as non-2xx with an
//! RPC error body), no pagination. A search with zero matches returns a bare
//! `{}` rather than an empty `places` array. `priceLevel` is a symbolic
//! string (`"PRICE_LEVEL_MODERATE"`), display strings are wrapped in
//! localized-text objects (`{"text": ..., "languageCode": ...}`), and
//! coordinates sit under `location.{latitude,longitude}`.

use serde::Deserialize;

/// One page of raw places plus the continuation token, if any. Places stay
/// provider-shaped here; normalization happens after pagination completes.
#[derive(Debug)]
pub struct ResultPage {
    pub places: Vec<RawPlace>,
    pub next_token: Option<String>,
}

/// A provider place before normalization, tagged by backend. Consumed only
/// by [`crate::normalize::normalize_place`]; nothing downstream of that sees
/// which variant it was.
#[derive(Debug)]
pub enum RawPlace {
    Legacy(LegacyPlace),
    Modern(ModernPlace),
}

// ---------------------------------------------------------------------------
// Legacy Nearby Search
// ---------------------------------------------------------------------------

/// Top-level response from the legacy nearby search endpoint.
#[derive(Debug, Deserialize)]
pub struct LegacySearchResponse {
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub results: Vec<LegacyPlace>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// A single place from the legacy endpoint family.
#[derive(Debug, Deserialize)]
pub struct LegacyPlace {
    pub place_id: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Short address, e.g. `"Av. Almirante Reis 1, Lisboa"`. The nearby
    /// endpoint uses `vicinity` where details uses `formatted_address`.
    #[serde(default)]
    pub vicinity: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    /// Integer 0–4; absent for unrated or free places.
    #[serde(default)]
    pub price_level: Option<i64>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub photos: Vec<LegacyPhoto>,
    #[serde(default)]
    pub geometry: Option<LegacyGeometry>,
    #[serde(default)]
    pub opening_hours: Option<LegacyOpeningHours>,
    /// Details-endpoint field; absent from nearby responses.
    #[serde(default)]
    pub website: Option<String>,
    /// Details-endpoint field; absent from nearby responses.
    #[serde(default)]
    pub reviews: Vec<LegacyReview>,
}

#[derive(Debug, Deserialize)]
pub struct LegacyPhoto {
    pub photo_reference: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}

#[derive(Debug, Deserialize)]
pub struct LegacyGeometry {
    pub location: LegacyLatLng,
}

#[derive(Debug, Deserialize)]
pub struct LegacyLatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Deserialize)]
pub struct LegacyOpeningHours {
    #[serde(default)]
    pub open_now: Option<bool>,
    #[serde(default)]
    pub weekday_text: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct LegacyReview {
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub text: Option<String>,
}

// ---------------------------------------------------------------------------
// Places API v1
// ---------------------------------------------------------------------------

/// Top-level response from `places:searchNearby`. Zero matches arrive as a
/// bare `{}`, which the default covers.
#[derive(Debug, Deserialize)]
pub struct ModernSearchResponse {
    #[serde(default)]
    pub places: Vec<ModernPlace>,
}

/// A single place from the v1 endpoint, limited to the fields our field mask
/// requests.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModernPlace {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<LocalizedText>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    /// Symbolic name, e.g. `"PRICE_LEVEL_INEXPENSIVE"`; absent when unknown.
    #[serde(default)]
    pub price_level: Option<String>,
    #[serde(default)]
    pub types: Vec<String>,
    /// Localized human-readable category, e.g. `"Seafood restaurant"`.
    #[serde(default)]
    pub primary_type_display_name: Option<LocalizedText>,
    #[serde(default)]
    pub current_opening_hours: Option<ModernOpeningHours>,
    #[serde(default)]
    pub photos: Vec<ModernPhoto>,
    #[serde(default)]
    pub website_uri: Option<String>,
    #[serde(default)]
    pub reviews: Vec<ModernReview>,
    #[serde(default)]
    pub location: Option<ModernLatLng>,
}

/// v1 wraps display strings as `{"text": ..., "languageCode": ...}`; only
/// the text matters here.
#[derive(Debug, Deserialize)]
pub struct LocalizedText {
    #[serde(default)]
    pub text: String,
}

/// v1 photo resource. `name` is the opaque reference used to fetch bytes.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModernPhoto {
    pub name: String,
    #[serde(default)]
    pub width_px: u32,
    #[serde(default)]
    pub height_px: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModernOpeningHours {
    #[serde(default)]
    pub open_now: Option<bool>,
    #[serde(default)]
    pub weekday_descriptions: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModernReview {
    #[serde(default)]
    pub author_attribution: Option<ModernAuthorAttribution>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub text: Option<LocalizedText>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModernAuthorAttribution {
    #[serde(default)]
    pub display_name: String,
}

#[derive(Debug, Deserialize)]
pub struct ModernLatLng {
    pub latitude: f64,
    pub longitude: f64,
}
