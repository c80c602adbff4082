//! Decision-log persistence.
//!
//! The log is an injected store object rather than ambient state: the session
//! appends to it on every swipe and the filter stage reads it fresh at the
//! start of every search. Both verdicts count as "seen"; there is no way to
//! un-swipe short of [`DecisionStore::clear`].

use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use swipedine_core::decision::SwipeDecision;

use crate::error::StoreError;

/// Append-only log of swipe decisions.
pub trait DecisionStore {
    /// Returns the set of place ids the user has already swiped on, either
    /// verdict.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backing storage cannot be read or does
    /// not parse.
    fn load(&self) -> Result<HashSet<String>, StoreError>;

    /// Records one decision.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backing storage cannot be written.
    fn append(&mut self, decision: SwipeDecision) -> Result<(), StoreError>;

    /// Forgets every recorded decision.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backing storage cannot be written.
    fn clear(&mut self) -> Result<(), StoreError>;
}

/// In-memory store; decisions last as long as the value does. The default
/// choice for tests and for embedders that persist elsewhere.
#[derive(Debug, Default)]
pub struct MemoryDecisionStore {
    decisions: Vec<SwipeDecision>,
}

impl MemoryDecisionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The full decision log, in append order.
    #[must_use]
    pub fn decisions(&self) -> &[SwipeDecision] {
        &self.decisions
    }
}

impl DecisionStore for MemoryDecisionStore {
    fn load(&self) -> Result<HashSet<String>, StoreError> {
        Ok(self
            .decisions
            .iter()
            .map(|decision| decision.place_id.clone())
            .collect())
    }

    fn append(&mut self, decision: SwipeDecision) -> Result<(), StoreError> {
        self.decisions.push(decision);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.decisions.clear();
        Ok(())
    }
}

/// Whole-file JSON store: one array of decisions, rewritten on every append.
///
/// Plays the role browser storage has in the original product. A missing file
/// reads as an empty log; no migrations, no schema versioning. Fine for the
/// list sizes a swipe session produces; not meant for concurrent writers.
#[derive(Debug)]
pub struct JsonFileDecisionStore {
    path: PathBuf,
}

impl JsonFileDecisionStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn path_label(&self) -> String {
        self.path.display().to_string()
    }

    fn read_all(&self) -> Result<Vec<SwipeDecision>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                serde_json::from_str(&contents).map_err(|e| StoreError::Corrupt {
                    path: self.path_label(),
                    source: e,
                })
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(StoreError::Read {
                path: self.path_label(),
                source: e,
            }),
        }
    }

    fn write_all(&self, decisions: &[SwipeDecision]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(decisions).map_err(|e| StoreError::Corrupt {
            path: self.path_label(),
            source: e,
        })?;
        fs::write(&self.path, json).map_err(|e| StoreError::Write {
            path: self.path_label(),
            source: e,
        })
    }
}

impl DecisionStore for JsonFileDecisionStore {
    fn load(&self) -> Result<HashSet<String>, StoreError> {
        Ok(self
            .read_all()?
            .into_iter()
            .map(|decision| decision.place_id)
            .collect())
    }

    fn append(&mut self, decision: SwipeDecision) -> Result<(), StoreError> {
        let mut decisions = self.read_all()?;
        decisions.push(decision);
        self.write_all(&decisions)
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.write_all(&[])
    }
}
