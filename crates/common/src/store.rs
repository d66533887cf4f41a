//! JSON-file record store
//!
//! Each collection is one JSON document holding a flat array of records.
//! Every operation is a whole-document read and/or write: there is no
//! in-memory cache, no file lock and no atomicity across the
//! read-then-write sequence. Two overlapping writers race and the later
//! write wins; that is the accepted contract of this storage scheme.

use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;
use crate::types::{Record, NEW_RECORD_ID};

/// Outcome of an [`JsonStore::upsert`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// A new record was appended and assigned this id.
    Inserted(u32),
    /// An existing record with the same id was replaced in place.
    Updated,
    /// No record carried the requested id; the collection was left untouched.
    NotFound,
}

/// Whole-document store for one homogeneous record collection.
pub struct JsonStore<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: Record> JsonStore<T> {
    /// Create a store backed by the given document path. The file is not
    /// created until the first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full collection.
    ///
    /// A missing backing file reads as an empty collection. A document that
    /// exists but does not parse propagates as a serialization error.
    pub fn load_all(&self) -> Result<Vec<T>> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Find one record by id with a linear scan.
    pub fn find_by_id(&self, id: u32) -> Result<Option<T>> {
        Ok(self.load_all()?.into_iter().find(|r| r.id() == id))
    }

    /// Insert or update a record keyed by its id sentinel.
    ///
    /// An id of [`NEW_RECORD_ID`] inserts: the record is assigned
    /// `collection length + 1` and appended. Note that after a delete this
    /// can hand out an id equal to one still in the collection; the
    /// assignment tracks length, not historical maximum.
    ///
    /// Any other id updates: the matching record is replaced in place. When
    /// no record matches, nothing is persisted and
    /// [`UpsertOutcome::NotFound`] is reported.
    pub fn upsert(&self, mut record: T) -> Result<UpsertOutcome> {
        let mut records = self.load_all()?;

        if record.id() == NEW_RECORD_ID {
            let new_id = records.len() as u32 + 1;
            record.set_id(new_id);
            records.push(record);
            self.persist(&records)?;
            debug!(kind = T::KIND, id = new_id, "inserted record");
            return Ok(UpsertOutcome::Inserted(new_id));
        }

        match records.iter_mut().find(|r| r.id() == record.id()) {
            Some(slot) => {
                let id = record.id();
                *slot = record;
                self.persist(&records)?;
                debug!(kind = T::KIND, id, "updated record");
                Ok(UpsertOutcome::Updated)
            }
            None => {
                debug!(kind = T::KIND, id = record.id(), "update target missing");
                Ok(UpsertOutcome::NotFound)
            }
        }
    }

    /// Remove any record with the given id and rewrite the document.
    /// Deleting an id that is not present is a no-op, not an error.
    pub fn delete_by_id(&self, id: u32) -> Result<()> {
        let mut records = self.load_all()?;
        records.retain(|r| r.id() != id);
        self.persist(&records)?;
        debug!(kind = T::KIND, id, "deleted record");
        Ok(())
    }

    fn persist(&self, records: &[T]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_vec(records)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}
