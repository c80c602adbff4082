//! HTTP client for the place-search provider backends.

mod fetch_all;
mod legacy;
mod modern;

use std::time::Duration;

use reqwest::Client;
use swipedine_core::app_config::ProviderKind;
use swipedine_core::query::SearchQuery;

use crate::error::PlacesError;
use crate::types::ResultPage;

// Re-export for test visibility via `use super::*`
#[cfg(test)]
use legacy::build_legacy_params;
#[cfg(test)]
use modern::{build_modern_body, price_levels_up_to};

pub(super) const DEFAULT_LEGACY_BASE_URL: &str = "https://maps.googleapis.com";
pub(super) const DEFAULT_MODERN_BASE_URL: &str = "https://places.googleapis.com";

/// Searches one backend of the places provider, one session's worth of
/// pagination at a time.
///
/// The backend is fixed at construction; [`PlacesClient::fetch_page`]
/// dispatches to it so callers never branch on provider kind. Failures are
/// returned as typed errors and never retried here: whether to try again is
/// the caller's decision.
pub struct PlacesClient {
    pub(super) client: Client,
    pub(super) api_key: String,
    pub(super) provider: ProviderKind,
    /// Origin of the provider endpoint, no trailing slash.
    pub(super) base_url: String,
    /// Pagination cap; exceeding it fails the whole search.
    pub(super) max_pages: usize,
    /// Pacing delay between page requests. The legacy backend rejects a
    /// continuation token used too soon (`INVALID_REQUEST`), so this is a
    /// correctness requirement, not throttling.
    pub(super) inter_page_delay_ms: u64,
}

impl PlacesClient {
    /// Creates a `PlacesClient` against the backend's production base URL.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(
        api_key: &str,
        provider: ProviderKind,
        timeout_secs: u64,
        user_agent: &str,
        max_pages: usize,
        inter_page_delay_ms: u64,
    ) -> Result<Self, PlacesError> {
        let base_url = match provider {
            ProviderKind::Legacy => DEFAULT_LEGACY_BASE_URL,
            ProviderKind::Modern => DEFAULT_MODERN_BASE_URL,
        };
        Self::with_base_url(
            api_key,
            provider,
            timeout_secs,
            user_agent,
            max_pages,
            inter_page_delay_ms,
            base_url,
        )
    }

    /// Creates a `PlacesClient` against an explicit base URL, used by tests
    /// to point at a local mock server.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::InvalidBaseUrl`] if `base_url` does not parse,
    /// or [`PlacesError::Http`] if the `reqwest::Client` cannot be built.
    pub fn with_base_url(
        api_key: &str,
        provider: ProviderKind,
        timeout_secs: u64,
        user_agent: &str,
        max_pages: usize,
        inter_page_delay_ms: u64,
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
            provider,
            base_url,
            max_pages,
            inter_page_delay_ms,
        })
    }

    /// Fetches one page of raw places for `query`.
    ///
    /// `page_token`, when present, is a continuation token from the previous
    /// page and is replayed verbatim. The modern backend has no pagination
    /// and ignores it.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Http`] — network or TLS failure.
    /// - [`PlacesError::UnexpectedStatus`] — non-2xx HTTP status.
    /// - [`PlacesError::ProviderStatus`] — 2xx with a rejecting body envelope
    ///   (legacy backend only).
    /// - [`PlacesError::Deserialize`] — body is not the documented shape.
    pub async fn fetch_page(
        &self,
        query: &SearchQuery,
        page_token: Option<&str>,
    ) -> Result<ResultPage, PlacesError> {
        match self.provider {
            ProviderKind::Legacy => self.fetch_legacy_page(query, page_token).await,
            ProviderKind::Modern => self.fetch_modern_page(query).await,
        }
    }
}

/// Validates the base URL and strips any trailing slash so path joins are
/// uniform. Shared by every HTTP client in this crate.
pub(crate) fn normalize_base_url(base_url: &str) -> Result<String, PlacesError> {
    reqwest::Url::parse(base_url).map_err(|e| PlacesError::InvalidBaseUrl {
        base_url: base_url.to_owned(),
        reason: e.to_string(),
    })?;
    Ok(base_url.trim_end_matches('/').to_owned())
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
