// Copyright 2026-present The talpa authors
// SPDX-License-Identifier: Apache-2.0

//! Immutable catalog of indexed entities.

use crate::error::IndexError;
use crate::types::{Entity, EntityId};

/// Owns every [`Entity`] for the lifetime of an index.
///
/// # Invariants
///
/// 1. **DENSE_IDS**: ids are contiguous starting at 1, in ingestion order
/// 2. **APPEND_ONLY**: entities are never removed or mutated after insertion
#[derive(Debug, Default)]
pub struct EntityStore {
    entities: Vec<Entity>,
}

impl EntityStore {
    pub fn new() -> Self {
        EntityStore {
            entities: Vec::new(),
        }
    }

    /// Append an entity, assigning the next dense id. Returns the id.
    pub(crate) fn push(&mut self, entity: Entity) -> EntityId {
        debug_assert_eq!(entity.id as usize, self.entities.len() + 1);
        let id = entity.id;
        self.entities.push(entity);
        id
    }

    /// Resolve an id, failing with [`IndexError::EntityNotFound`] for ids
    /// outside the dense range.
    pub fn get(&self, id: EntityId) -> Result<&Entity, IndexError> {
        self.entity(id).ok_or(IndexError::EntityNotFound { id })
    }

    /// Infallible variant for internal callers that hold ids drawn from
    /// this store's own inverted lists.
    pub(crate) fn entity(&self, id: EntityId) -> Option<&Entity> {
        if id == 0 {
            return None;
        }
        self.entities.get(id as usize - 1)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Entities in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }
}
