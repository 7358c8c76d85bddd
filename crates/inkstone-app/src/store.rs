//! The external store collaborator, as the form sees it.

use std::collections::BTreeMap;

use crate::post::PostRecord;

/// Store write failure, surfaced by the hosting platform.
#[derive(Debug, Clone, thiserror::Error, miette::Diagnostic)]
#[error("post store write failed: {reason}")]
#[diagnostic(code(inkstone::app::store))]
pub struct StoreError {
    pub reason: String,
}

impl StoreError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// A document store keyed by externally assigned post id. Each save is a
/// single create-or-full-overwrite write.
pub trait PostStore {
    fn put(&mut self, record: &PostRecord) -> Result<(), StoreError>;
}

/// In-memory store for tests and offline use.
#[derive(Debug, Default)]
pub struct MemoryPostStore {
    pub records: BTreeMap<u64, PostRecord>,
}

impl MemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PostStore for MemoryPostStore {
    fn put(&mut self, record: &PostRecord) -> Result<(), StoreError> {
        self.records.insert(record.id, record.clone());
        Ok(())
    }
}
