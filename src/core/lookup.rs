//! Resolution of list items against live elements.
//!
//! Monthly lists reference elements by id without any foreign key, so an item
//! may point at an element that no longer exists. Callers must say what a
//! missing element means for them through [`MissingElement`].

use crate::{
    entities::{Element, element},
    errors::Result,
};
use sea_orm::{QuerySelect, prelude::*};
use std::collections::{HashMap, HashSet};

/// What to report for an element id that has no live element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingElement {
    /// Keep the value cached on the referencing record
    KeepStored,
    /// Report the element as not completed
    TreatAsIncomplete,
}

/// Live completion flags for a set of element ids, loaded in one query.
#[derive(Debug, Clone, Default)]
pub struct CompletionLookup {
    flags: HashMap<String, bool>,
}

impl CompletionLookup {
    /// Loads the completion flag of every existing element among `ids`.
    pub async fn load<C>(db: &C, ids: &[&str]) -> Result<Self>
    where
        C: ConnectionTrait,
    {
        let wanted: HashSet<&str> = ids.iter().copied().collect();
        if wanted.is_empty() {
            return Ok(Self::default());
        }

        let rows: Vec<(String, bool)> = Element::find()
            .select_only()
            .column(element::Column::Id)
            .column(element::Column::IsCompleted)
            .filter(element::Column::Id.is_in(wanted))
            .into_tuple()
            .all(db)
            .await?;

        Ok(Self {
            flags: rows.into_iter().collect(),
        })
    }

    /// Whether a live element with this id was found.
    #[must_use]
    pub fn exists(&self, element_id: &str) -> bool {
        self.flags.contains_key(element_id)
    }

    /// Live completion of `element_id`, falling back according to `policy`.
    #[must_use]
    pub fn resolve(&self, element_id: &str, stored: bool, policy: MissingElement) -> bool {
        match (self.flags.get(element_id), policy) {
            (Some(&live), _) => live,
            (None, MissingElement::KeepStored) => stored,
            (None, MissingElement::TreatAsIncomplete) => false,
        }
    }
}
