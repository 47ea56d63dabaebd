//! Typed repository over the key-value store
//!
//! Replaces per-collection get/save helper pairs with one generic facade
//! for list-shaped collections. Map-shaped collections (menus, timetables)
//! use [`Store`] directly with their fixed keys.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;

use crate::store::{Store, StoreError};

/// A record stored in one of the list-shaped collections
pub trait Entity: Serialize + DeserializeOwned {
    /// Fixed storage key of the collection
    const KEY: &'static str;

    /// Stable generated id of this record
    fn id(&self) -> &str;
}

/// Typed view of one collection
pub struct Repository<'a, T: Entity> {
    store: &'a Store,
    _marker: PhantomData<T>,
}

impl<'a, T: Entity> Repository<'a, T> {
    pub fn new(store: &'a Store) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }

    /// All records in insertion order. Unreadable state reads as empty.
    pub fn list(&self) -> Vec<T> {
        self.store.load(T::KEY).unwrap_or_default()
    }

    /// Replace the whole collection
    pub fn save(&self, records: &[T]) -> Result<(), StoreError> {
        self.store.save(T::KEY, &records)
    }

    /// Find one record by id
    pub fn find(&self, id: &str) -> Option<T> {
        self.list().into_iter().find(|r| r.id() == id)
    }

    /// Append a record
    pub fn insert(&self, record: T) -> Result<(), StoreError> {
        let mut records = self.list();
        records.push(record);
        self.save(&records)
    }

    /// Apply a mutation to the record with the given id.
    /// Returns the updated record, or `None` if the id is unknown.
    pub fn update<F>(&self, id: &str, apply: F) -> Result<Option<T>, StoreError>
    where
        T: Clone,
        F: FnOnce(&mut T),
    {
        let mut records = self.list();
        let Some(record) = records.iter_mut().find(|r| r.id() == id) else {
            return Ok(None);
        };
        apply(record);
        let updated = record.clone();
        self.save(&records)?;
        Ok(Some(updated))
    }
}
