//! Full-search pagination loop for `PlacesClient`.

use std::time::Duration;

use swipedine_core::query::SearchQuery;

use crate::error::PlacesError;
use crate::types::RawPlace;

use super::PlacesClient;

impl PlacesClient {
    /// Runs one complete search: fetches page 1, follows continuation tokens
    /// until none remains, and returns every raw place in provider order.
    ///
    /// Restartable by construction: each call begins at page 1 with no
    /// token. Pages are fetched strictly sequentially, with the configured
    /// pacing delay before every request after the first (the legacy
    /// backend refuses tokens that have not warmed up).
    ///
    /// **All-or-nothing semantics**: a failure on any page discards the
    /// places already collected and returns the error, so callers never see
    /// a partially paginated result set.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::fetch_page`]. Returns
    /// [`PlacesError::PageLimit`] if the provider keeps handing out tokens
    /// past the configured page cap.
    pub async fn fetch_all_places(
        &self,
        query: &SearchQuery,
    ) -> Result<Vec<RawPlace>, PlacesError> {
        let mut all_places: Vec<RawPlace> = Vec::new();
        let mut token: Option<String> = None;
        let mut is_first_page = true;
        let mut page_count = 0usize;

        loop {
            page_count += 1;
            if page_count > self.max_pages {
                return Err(PlacesError::PageLimit {
                    max_pages: self.max_pages,
                });
            }

            if !is_first_page && self.inter_page_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.inter_page_delay_ms)).await;
            }
            is_first_page = false;

            let page = self.fetch_page(query, token.as_deref()).await?;

            all_places.extend(page.places);

            token = page.next_token;
            if token.is_none() {
                break;
            }
        }

        tracing::debug!(
            pages = page_count,
            places = all_places.len(),
            provider = %self.provider,
            "search pagination complete"
        );

        Ok(all_places)
    }
}
