pub mod error;
pub mod filter;
pub mod session;
pub mod shuffle;
pub mod store;

pub use error::{SessionError, StoreError};
pub use filter::filter_candidates;
pub use session::{OriginHint, SearchPrefs, Session, SessionState};
pub use shuffle::{shuffle_queue, shuffle_queue_with};
pub use store::{DecisionStore, JsonFileDecisionStore, MemoryDecisionStore};
