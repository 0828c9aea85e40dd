// crates/localekit-core/src/batch.rs
// ============================================================================
// Module: Request Batches
// Description: Ordered, de-duplicated sets of requested locale identifiers.
// Purpose: Carry one save cycle's worth of locales through provisioning.
// Dependencies: crate::id
// ============================================================================

//! ## Overview
//! A [`RequestBatch`] collects the distinct locale identifiers a single save
//! operation needs activated. Duplicates collapse on insertion; first-seen
//! input order is preserved so logging and tests stay deterministic.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::id::LocaleId;
use crate::id::ValidationError;

// ============================================================================
// SECTION: Request Batch
// ============================================================================

/// The set of distinct locale identifiers to activate in one request.
///
/// # Invariants
/// - Identifiers are unique within the batch.
/// - Iteration order is first-seen input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestBatch {
    /// Unique identifiers in first-seen order.
    ids: Vec<LocaleId>,
}

impl RequestBatch {
    /// Creates an empty batch.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ids: Vec::new(),
        }
    }

    /// Builds a batch from already-validated identifiers, collapsing
    /// duplicates.
    #[must_use]
    pub fn from_ids(ids: impl IntoIterator<Item = LocaleId>) -> Self {
        let mut batch = Self::new();
        for id in ids {
            batch.push(id);
        }
        batch
    }

    /// Parses and validates every input string into a batch.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] encountered; a single malformed
    /// identifier rejects the whole batch.
    pub fn parse_all<S: AsRef<str>>(
        values: impl IntoIterator<Item = S>,
    ) -> Result<Self, ValidationError> {
        let mut batch = Self::new();
        for value in values {
            batch.push(LocaleId::parse(value.as_ref())?);
        }
        Ok(batch)
    }

    /// Adds an identifier unless it is already present.
    pub fn push(&mut self, id: LocaleId) {
        if !self.ids.contains(&id) {
            self.ids.push(id);
        }
    }

    /// Returns true when the batch holds no identifiers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Returns the number of distinct identifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Iterates identifiers in first-seen order.
    pub fn iter(&self) -> std::slice::Iter<'_, LocaleId> {
        self.ids.iter()
    }

    /// Returns the identifiers as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[LocaleId] {
        &self.ids
    }

    /// Returns the raw string forms for the wire protocol.
    #[must_use]
    pub fn to_strings(&self) -> Vec<String> {
        self.ids.iter().map(|id| id.as_str().to_string()).collect()
    }
}

impl<'a> IntoIterator for &'a RequestBatch {
    type Item = &'a LocaleId;
    type IntoIter = std::slice::Iter<'a, LocaleId>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for RequestBatch {
    type Item = LocaleId;
    type IntoIter = std::vec::IntoIter<LocaleId>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.into_iter()
    }
}
