// Copyright 2026-present The talpa authors
// SPDX-License-Identifier: Apache-2.0

//! Core data types shared across the index.

use serde::{Deserialize, Serialize};

use crate::error::IndexError;
use crate::normalize::normalize;

/// Dense, 1-based entity identifier assigned in ingestion order.
pub type EntityId = u32;

/// Number of tab-separated fields in a source record.
pub const RECORD_FIELDS: usize = 7;

/// An indexed entity. Created once at build time, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// 1-based id, dense in ingestion order.
    pub id: EntityId,
    /// Original display name.
    pub name: String,
    /// `normalize(name)`, the string all matching runs against.
    pub normalized_name: String,
    /// Popularity score, parsed once at ingestion.
    pub score: u64,
    pub description: String,
    pub url: String,
    pub wiki_id: String,
    /// Stored as metadata only; synonyms are not indexed.
    pub synonyms: Vec<String>,
    pub image_url: String,
}

/// One parsed source record, before an id is assigned.
///
/// Source form is a tab-separated line with exactly [`RECORD_FIELDS`]
/// fields: name, score, description, url, wiki id, synonyms
/// (semicolon-separated, may be empty), image url.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityRecord {
    pub name: String,
    pub score: u64,
    pub description: String,
    pub url: String,
    pub wiki_id: String,
    pub synonyms: Vec<String>,
    pub image_url: String,
}

impl EntityRecord {
    /// Parse a single tab-separated record line.
    ///
    /// Fails with [`IndexError::MalformedRecord`] when the line does not
    /// split into exactly [`RECORD_FIELDS`] fields, or when the score
    /// field is not a non-negative integer. `line_number` is 1-based and
    /// only used for error reporting.
    pub fn parse(line: &str, line_number: usize) -> Result<Self, IndexError> {
        let line = line.trim_end_matches(['\r', '\n']);
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != RECORD_FIELDS {
            return Err(IndexError::MalformedRecord {
                line: line_number,
                expected: RECORD_FIELDS,
                found: fields.len(),
            });
        }

        let score = fields[1]
            .trim()
            .parse::<u64>()
            .map_err(|_| IndexError::MalformedRecord {
                line: line_number,
                expected: RECORD_FIELDS,
                found: fields.len(),
            })?;

        let synonyms: Vec<String> = fields[5]
            .trim()
            .split(';')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        Ok(EntityRecord {
            name: fields[0].to_string(),
            score,
            description: fields[2].to_string(),
            url: fields[3].to_string(),
            wiki_id: fields[4].to_string(),
            synonyms,
            image_url: fields[6].to_string(),
        })
    }

    /// Promote this record to an [`Entity`] under the given id.
    pub(crate) fn into_entity(self, id: EntityId) -> Entity {
        let normalized_name = normalize(&self.name);
        Entity {
            id,
            name: self.name,
            normalized_name,
            score: self.score,
            description: self.description,
            url: self.url,
            wiki_id: self.wiki_id,
            synonyms: self.synonyms,
            image_url: self.image_url,
        }
    }
}

/// One entry of an inverted list: an entity and how often the list's
/// q-gram occurs in that entity's normalized name.
///
/// INVARIANT: within a single inverted list, `entity_id` is strictly
/// increasing and `frequency >= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    pub entity_id: EntityId,
    pub frequency: u32,
}

impl Posting {
    pub fn new(entity_id: EntityId, frequency: u32) -> Self {
        Posting {
            entity_id,
            frequency,
        }
    }
}

/// A verified query match. Transient, produced per query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Match {
    pub entity_id: EntityId,
    /// Exact prefix edit distance between query and entity name.
    pub distance: usize,
    /// Popularity score copied from the entity for ranking.
    pub score: u64,
}
