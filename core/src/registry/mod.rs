//! In-memory stores of projections and 3D entities.
//!
//! Records are identified by position, never by label: a second label for an
//! already stored position is merged onto the existing record.

use serde::{Deserialize, Serialize};

use crate::model::Labeled;
use crate::naming::{EntityId, Label};

pub mod repository;
pub use repository::Repository;

/// Outcome of storing a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "record", rename_all = "snake_case")]
pub enum Submission<T> {
    /// A new record was stored.
    Created(T),
    /// The label was added to an existing record; nothing new to render.
    Merged { into: EntityId },
}

impl<T> Submission<T> {
    pub fn created(&self) -> Option<&T> {
        match self {
            Submission::Created(record) => Some(record),
            Submission::Merged { .. } => None,
        }
    }
}

/// Outcome of removing a label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "record", rename_all = "snake_case")]
pub enum Removal<T> {
    /// The label was the last one; the record is gone.
    Deleted(T),
    /// The record keeps its other labels.
    Detached,
    NotFound,
}

impl<T> Removal<T> {
    pub fn deleted(self) -> Option<T> {
        match self {
            Removal::Deleted(record) => Some(record),
            _ => None,
        }
    }
}

/// Insertion-ordered collection of labeled records.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Store<T> {
    items: Vec<T>,
}

impl<T> Default for Store<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Labeled> Store<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn by_label(&self, label: &Label) -> Option<&T> {
        self.items.iter().find(|item| item.has_label(label))
    }

    pub fn find(&self, predicate: impl Fn(&T) -> bool) -> Option<&T> {
        self.items.iter().find(|item| predicate(item))
    }

    /// Add `label` to the first record matching `same_position`, or store the
    /// record built by `make`.
    pub fn merge_or_insert(
        &mut self,
        label: Label,
        same_position: impl Fn(&T) -> bool,
        make: impl FnOnce(Label) -> T,
    ) -> Submission<T>
    where
        T: Clone,
    {
        if let Some(existing) = self.items.iter_mut().find(|item| same_position(item)) {
            existing.add_label(label);
            return Submission::Merged { into: existing.id() };
        }
        let record = make(label);
        self.items.push(record.clone());
        Submission::Created(record)
    }

    /// Detach `label` from its record, deleting the record if it was the
    /// last label.
    pub fn remove_label(&mut self, label: &Label) -> Removal<T> {
        let Some(index) = self.items.iter().position(|item| item.has_label(label)) else {
            return Removal::NotFound;
        };
        if self.items[index].labels().len() > 1 {
            self.items[index].remove_label(label);
            Removal::Detached
        } else {
            Removal::Deleted(self.items.remove(index))
        }
    }
}
