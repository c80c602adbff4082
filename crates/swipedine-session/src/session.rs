//! The swipe-session state machine.
//!
//! One session owns the provider clients, the injected decision store, and
//! the in-memory candidate queue. There is a single logical thread of
//! control: every method takes `&mut self` and pipeline entry points gate on
//! the current state instead of a lock.

use std::collections::VecDeque;

use swipedine_core::app_config::AppConfig;
use swipedine_core::decision::{SwipeDecision, SwipeVerdict};
use swipedine_core::geo::{annotate_distances, Coordinate};
use swipedine_core::query::SearchQuery;
use swipedine_core::restaurant::Restaurant;
use swipedine_places::normalize::normalize_place;
use swipedine_places::{GeocodeClient, IpLookupClient, PlacesClient};

use crate::error::SessionError;
use crate::filter::filter_candidates;
use crate::shuffle::shuffle_queue;
use crate::store::{DecisionStore, JsonFileDecisionStore};

/// Where the session should get its origin coordinate from.
///
/// The original product tries device geolocation first, then IP lookup, then
/// a user-typed postal code; the embedder drives that chain by picking the
/// hint for each [`Session::start`] call.
#[derive(Debug, Clone)]
pub enum OriginHint {
    /// A device fix the embedder already has.
    Device(Coordinate),
    /// A user-supplied postal code, resolved through the geocoder.
    PostalCode(String),
    /// No hint available: fall back to IP-based geolocation.
    Automatic,
}

/// Search preferences applied to every search this session runs. Defaults
/// mirror the original UI: 1 km radius, minimum rating 4.0, no price cap.
#[derive(Debug, Clone)]
pub struct SearchPrefs {
    pub radius_meters: f64,
    pub min_rating: Option<f64>,
    pub max_price_level: Option<u8>,
}

impl Default for SearchPrefs {
    fn default() -> Self {
        Self {
            radius_meters: 1_000.0,
            min_rating: Some(4.0),
            max_price_level: None,
        }
    }
}

impl SearchPrefs {
    fn to_query(&self, origin: Coordinate) -> SearchQuery {
        let mut query = SearchQuery::new(origin, self.radius_meters);
        if let Some(min_rating) = self.min_rating {
            query = query.with_min_rating(min_rating);
        }
        if let Some(max_price) = self.max_price_level {
            query = query.with_max_price_level(max_price);
        }
        query
    }
}

/// Observable session state.
///
/// `LocatingOrigin`, `Searching`, and `Swiping` are the busy states; entry
/// points that would start another pipeline fail with
/// [`SessionError::SearchInFlight`] while one is set. `Exhausted` is the
/// no-more-candidates terminal state, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    LocatingOrigin,
    Searching,
    Ready,
    Swiping,
    Exhausted,
    Error { message: String },
}

/// The session orchestrator: resolves an origin, runs the provider pipeline,
/// and hands out candidates one swipe at a time.
pub struct Session<S: DecisionStore> {
    places: PlacesClient,
    geocoder: GeocodeClient,
    ip_lookup: IpLookupClient,
    store: S,
    prefs: SearchPrefs,
    state: SessionState,
    origin: Option<Coordinate>,
    last_hint: Option<OriginHint>,
    queue: VecDeque<Restaurant>,
}

impl Session<JsonFileDecisionStore> {
    /// Wires a ready-to-start session from an [`AppConfig`]: provider,
    /// geocoder, and IP-lookup clients against their production endpoints,
    /// plus a JSON file decision store at the configured path.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::ProviderUnavailable`] if an HTTP client cannot
    /// be constructed.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, SessionError> {
        let places = PlacesClient::new(
            &config.google_api_key,
            config.places_api,
            config.request_timeout_secs,
            &config.user_agent,
            config.max_search_pages,
            config.inter_page_delay_ms,
        )
        .map_err(SessionError::from_places)?;
        let geocoder = GeocodeClient::new(
            &config.google_api_key,
            config.request_timeout_secs,
            &config.user_agent,
        )
        .map_err(SessionError::from_places)?;
        let ip_lookup = IpLookupClient::new(config.request_timeout_secs, &config.user_agent)
            .map_err(SessionError::from_places)?;
        let store = JsonFileDecisionStore::new(&config.decisions_path);
        Ok(Self::new(
            places,
            geocoder,
            ip_lookup,
            store,
            SearchPrefs::default(),
        ))
    }
}

impl<S: DecisionStore> Session<S> {
    #[must_use]
    pub fn new(
        places: PlacesClient,
        geocoder: GeocodeClient,
        ip_lookup: IpLookupClient,
        store: S,
        prefs: SearchPrefs,
    ) -> Self {
        Self {
            places,
            geocoder,
            ip_lookup,
            store,
            prefs,
            state: SessionState::Idle,
            origin: None,
            last_hint: None,
            queue: VecDeque::new(),
        }
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The candidate currently on top of the queue, present only in `Ready`.
    #[must_use]
    pub fn current(&self) -> Option<&Restaurant> {
        match self.state {
            SessionState::Ready => self.queue.front(),
            _ => None,
        }
    }

    /// How many candidates are left in the queue, including the current one.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    /// The resolved search origin, once one exists.
    #[must_use]
    pub fn origin(&self) -> Option<Coordinate> {
        self.origin
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Resolves an origin from `hint` and runs the full search pipeline.
    ///
    /// On success the session lands in `Ready` (or `Exhausted` when nothing
    /// survives filtering). On failure it lands in `Error` with a user-facing
    /// message and any previously built queue stays intact.
    ///
    /// # Errors
    ///
    /// - [`SessionError::SearchInFlight`] — a pipeline is already running.
    /// - [`SessionError::OriginUnavailable`] — the hint did not resolve.
    /// - [`SessionError::ProviderUnavailable`] /
    ///   [`SessionError::ProviderResponseInvalid`] — the search itself failed.
    /// - [`SessionError::Store`] — the decision log could not be read.
    pub async fn start(&mut self, hint: OriginHint) -> Result<(), SessionError> {
        self.ensure_not_busy()?;
        self.set_state(SessionState::LocatingOrigin);
        self.last_hint = Some(hint.clone());

        let origin = match self.resolve_origin(&hint).await {
            Ok(origin) => origin,
            Err(source) => {
                let err = SessionError::OriginUnavailable {
                    reason: source.to_string(),
                };
                tracing::warn!(error = %source, "origin resolution failed");
                self.set_state(SessionState::Error {
                    message: err.user_message(),
                });
                return Err(err);
            }
        };
        tracing::info!(
            lat = origin.latitude,
            lng = origin.longitude,
            "origin resolved"
        );
        self.origin = Some(origin);
        self.run_search().await
    }

    /// Records the swipe on the current candidate and advances the queue.
    ///
    /// The swiped card is removed from the in-memory queue; nothing is
    /// re-fetched. If the store append fails, the candidate is put back so no
    /// card is lost.
    ///
    /// # Errors
    ///
    /// - [`SessionError::NoActiveCandidate`] — queue exhausted or no search
    ///   has completed yet.
    /// - [`SessionError::SearchInFlight`] — a pipeline is running.
    /// - [`SessionError::Store`] — the decision could not be persisted.
    pub fn swipe(&mut self, verdict: SwipeVerdict) -> Result<(), SessionError> {
        match self.state {
            SessionState::Ready => {}
            SessionState::LocatingOrigin | SessionState::Searching | SessionState::Swiping => {
                return Err(SessionError::SearchInFlight);
            }
            _ => return Err(SessionError::NoActiveCandidate),
        }
        let Some(candidate) = self.queue.pop_front() else {
            return Err(SessionError::NoActiveCandidate);
        };
        self.set_state(SessionState::Swiping);

        let decision = SwipeDecision::new(candidate.place_id.clone(), verdict);
        if let Err(source) = self.store.append(decision) {
            self.queue.push_front(candidate);
            self.set_state(SessionState::Ready);
            return Err(source.into());
        }

        tracing::debug!(
            place_id = %candidate.place_id,
            verdict = ?verdict,
            remaining = self.queue.len(),
            "swipe recorded"
        );
        self.settle_queue_state();
        Ok(())
    }

    /// Re-runs the search with the known origin, or re-resolves the last
    /// origin hint when none was ever obtained. The manual recovery path out
    /// of `Error`, also usable as a refresh from `Ready` or `Exhausted`.
    ///
    /// # Errors
    ///
    /// Same failure surface as [`Self::start`], plus
    /// [`SessionError::NoOrigin`] when the session was never started.
    pub async fn retry(&mut self) -> Result<(), SessionError> {
        self.ensure_not_busy()?;
        if self.origin.is_some() {
            return self.run_search().await;
        }
        let Some(hint) = self.last_hint.clone() else {
            return Err(SessionError::NoOrigin);
        };
        self.start(hint).await
    }

    /// Clears every stored decision and re-runs the search with the last
    /// known origin, making previously swiped places eligible again.
    ///
    /// # Errors
    ///
    /// - [`SessionError::SearchInFlight`] — a pipeline is running.
    /// - [`SessionError::NoOrigin`] — no origin was ever resolved.
    /// - [`SessionError::Store`] — the decision log could not be cleared.
    /// - Plus the search failure surface of [`Self::start`].
    pub async fn reset(&mut self) -> Result<(), SessionError> {
        self.ensure_not_busy()?;
        if self.origin.is_none() {
            return Err(SessionError::NoOrigin);
        }
        self.store.clear()?;
        tracing::info!("decision log cleared");
        self.run_search().await
    }

    /// Reverse geocodes the resolved origin for display, e.g. to pre-fill a
    /// postal-code input. `None` when the origin's address has no postal
    /// code.
    ///
    /// # Errors
    ///
    /// - [`SessionError::NoOrigin`] — no origin was ever resolved.
    /// - Provider failures, classified as for any other geocoder call.
    pub async fn origin_postal_code(&self) -> Result<Option<String>, SessionError> {
        let origin = self.origin.ok_or(SessionError::NoOrigin)?;
        self.geocoder
            .reverse(origin)
            .await
            .map_err(SessionError::from_places)
    }

    async fn resolve_origin(
        &self,
        hint: &OriginHint,
    ) -> Result<Coordinate, swipedine_places::PlacesError> {
        match hint {
            OriginHint::Device(coordinate) => Ok(*coordinate),
            OriginHint::PostalCode(code) => self.geocoder.forward(code).await,
            OriginHint::Automatic => self.ip_lookup.lookup().await,
        }
    }

    /// The pipeline proper: fetch all pages, normalize, annotate distances,
    /// filter against the freshly loaded decision log, shuffle, and install
    /// the queue. Any failure leaves the previous queue untouched and moves
    /// the state to `Error`.
    async fn run_search(&mut self) -> Result<(), SessionError> {
        let origin = self.origin.ok_or(SessionError::NoOrigin)?;
        self.set_state(SessionState::Searching);

        let query = self.prefs.to_query(origin);
        let raw = match self.places.fetch_all_places(&query).await {
            Ok(raw) => raw,
            Err(source) => {
                let err = SessionError::from_places(source);
                tracing::warn!(error = %err, "search failed");
                self.set_state(SessionState::Error {
                    message: err.user_message(),
                });
                return Err(err);
            }
        };

        let mut candidates: Vec<Restaurant> = raw.into_iter().map(normalize_place).collect();
        annotate_distances(&mut candidates, origin);

        let decided_ids = match self.store.load() {
            Ok(ids) => ids,
            Err(source) => {
                let err = SessionError::from(source);
                self.set_state(SessionState::Error {
                    message: err.user_message(),
                });
                return Err(err);
            }
        };

        let kept = filter_candidates(candidates, &decided_ids, self.prefs.min_rating);
        tracing::info!(
            candidates = kept.len(),
            excluded = decided_ids.len(),
            "search pipeline complete"
        );

        self.queue = shuffle_queue(&kept).into();
        self.settle_queue_state();
        Ok(())
    }

    fn ensure_not_busy(&self) -> Result<(), SessionError> {
        match self.state {
            SessionState::LocatingOrigin | SessionState::Searching | SessionState::Swiping => {
                Err(SessionError::SearchInFlight)
            }
            _ => Ok(()),
        }
    }

    fn settle_queue_state(&mut self) {
        if self.queue.is_empty() {
            self.set_state(SessionState::Exhausted);
        } else {
            self.set_state(SessionState::Ready);
        }
    }

    fn set_state(&mut self, next: SessionState) {
        tracing::debug!(from = ?self.state, to = ?next, "session state");
        self.state = next;
    }
}
