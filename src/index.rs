// Copyright 2026-present The talpa authors
// SPDX-License-Identifier: Apache-2.0

//! Q-gram index construction and fuzzy prefix queries.
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **LIST_SORTED**: each inverted list is strictly increasing by
//!    entity id, with per-entity occurrences folded into `frequency`
//! 2. **DENSE_IDS**: entity ids are 1-based and contiguous in ingestion
//!    order; every id in any inverted list resolves in the store
//! 3. **SINGLE_BUILD**: an index is populated by exactly one build pass
//!    and is immutable afterwards, so concurrent readers need no locking

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::IndexError;
use crate::merge::merge_lists;
use crate::normalize::normalize;
use crate::ped::{BandedPed, PedBackend};
use crate::qgram::compute_qgrams;
use crate::store::EntityStore;
use crate::types::{Entity, EntityId, EntityRecord, Match, Posting};

/// A q-gram index over a static catalog of named entities.
///
/// Build once with [`QGramIndex::build_from_file`] or
/// [`QGramIndex::build_from_records`], then query concurrently with
/// [`QGramIndex::find_matches`]. Rebuilding means constructing a new
/// index and swapping the reference on the caller's side.
#[derive(Debug)]
pub struct QGramIndex {
    q: usize,
    inverted_lists: HashMap<String, Vec<Posting>>,
    store: EntityStore,
    ped: Box<dyn PedBackend>,
}

impl QGramIndex {
    /// Build an index from source-form record lines.
    ///
    /// Blank lines are skipped. Any malformed record aborts the whole
    /// build: a structurally invalid input must not produce a partial
    /// index. `q >= 1` is required.
    pub fn build_from_records<I, S>(q: usize, lines: I) -> Result<Self, IndexError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        assert!(q >= 1, "gram width must be at least 1");

        let mut index = QGramIndex {
            q,
            inverted_lists: HashMap::new(),
            store: EntityStore::new(),
            ped: Box::new(BandedPed),
        };

        for (line_idx, line) in lines.into_iter().enumerate() {
            let line = line.as_ref();
            if line.trim().is_empty() {
                continue;
            }
            let record = EntityRecord::parse(line, line_idx + 1)?;
            index.insert_entity(record);
        }

        Ok(index)
    }

    /// Build an index from a TSV file, skipping the header line.
    pub fn build_from_file<P: AsRef<Path>>(q: usize, path: P) -> Result<Self, IndexError> {
        let file = File::open(path)?;
        let mut lines = BufReader::new(file).lines();

        // Header record; its absence in an empty file just yields an
        // empty index.
        if let Some(header) = lines.next() {
            header?;
        }

        let mut raw = Vec::new();
        for line in lines {
            raw.push(line?);
        }
        Self::build_from_records(q, raw)
    }

    /// Swap in a different PED backend without touching any caller.
    pub fn with_ped_backend(mut self, ped: Box<dyn PedBackend>) -> Self {
        self.ped = ped;
        self
    }

    /// Ingest one record: assign the next id, store the entity, and
    /// append its q-grams to the inverted lists.
    fn insert_entity(&mut self, record: EntityRecord) {
        let id = self.store.len() as EntityId + 1;
        let entity = record.into_entity(id);

        // All grams of one entity are inserted in a single contiguous
        // pass, so repeats of a gram within this entity always sit at
        // the tail of its list (LIST_SORTED).
        for gram in compute_qgrams(&entity.normalized_name, self.q) {
            let list = self.inverted_lists.entry(gram).or_default();
            match list.last_mut() {
                Some(last) if last.entity_id == id => last.frequency += 1,
                _ => list.push(Posting::new(id, 1)),
            }
        }

        self.store.push(entity);
    }

    /// Find all entities whose normalized name is within prefix edit
    /// distance `delta` of the (raw) query prefix.
    ///
    /// Candidates are generated from the inverted lists, pruned by the
    /// common-gram count bound, and verified with the exact bounded PED.
    /// The pruning bound is conservative: an edit corrupts at most `q`
    /// grams, so a true match shares at least
    /// `len(normalized_prefix) - q * delta` grams with the prefix. It
    /// admits false positives (caught by verification) but never drops a
    /// true match.
    ///
    /// `delta` is entirely the caller's choice; very large values degrade
    /// the pruning threshold to "shares any gram" and get expensive, and
    /// empty prefixes are best queried with `delta == 0`.
    pub fn find_matches(&self, prefix: &str, delta: usize) -> Vec<Match> {
        let prefix = normalize(prefix);
        let grams = compute_qgrams(&prefix, self.q);

        let fragments: Vec<&[Posting]> = grams
            .iter()
            .map(|gram| {
                self.inverted_lists
                    .get(gram)
                    .map_or(&[][..], Vec::as_slice)
            })
            .collect();
        let merged = merge_lists(fragments);

        // Signed arithmetic: a generous delta drives the bound below
        // zero, which admits every candidate sharing at least one gram.
        let threshold = prefix.chars().count() as i64 - (self.q * delta) as i64;

        let mut matches = Vec::new();
        for posting in merged {
            if i64::from(posting.frequency) < threshold {
                continue;
            }
            // Ids in inverted lists come from this store (DENSE_IDS).
            let Some(entity) = self.store.entity(posting.entity_id) else {
                continue;
            };
            let distance = self.ped.distance(&prefix, &entity.normalized_name, delta);
            if distance <= delta {
                matches.push(Match {
                    entity_id: posting.entity_id,
                    distance,
                    score: entity.score,
                });
            }
        }
        matches
    }

    /// Resolve an entity id returned by [`QGramIndex::find_matches`].
    pub fn lookup_entity(&self, id: EntityId) -> Result<&Entity, IndexError> {
        self.store.get(id)
    }

    /// Gram width this index was built with.
    pub fn q(&self) -> usize {
        self.q
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    /// Shape summary for diagnostics.
    pub fn stats(&self) -> IndexStats {
        let postings: usize = self.inverted_lists.values().map(Vec::len).sum();
        let longest = self
            .inverted_lists
            .iter()
            .max_by_key(|(_, list)| list.len())
            .map(|(gram, list)| (gram.clone(), list.len()));
        IndexStats {
            q: self.q,
            entities: self.store.len(),
            distinct_qgrams: self.inverted_lists.len(),
            postings,
            longest_list: longest,
        }
    }

    #[cfg(test)]
    pub(crate) fn inverted_list(&self, gram: &str) -> Option<&[Posting]> {
        self.inverted_lists.get(gram).map(Vec::as_slice)
    }
}

/// Diagnostic shape of a built index.
#[derive(Debug, Clone, serde::Serialize)]
pub struct IndexStats {
    pub q: usize,
    pub entities: usize,
    pub distinct_qgrams: usize,
    pub postings: usize,
    /// Gram with the most postings, if any.
    pub longest_list: Option<(String, usize)>,
}

/// Stable sort of matches by (distance ascending, score descending).
///
/// Ties on both keys keep their input order.
pub fn rank_matches(mut matches: Vec<Match>) -> Vec<Match> {
    matches.sort_by_key(|m| (m.distance, std::cmp::Reverse(m.score)));
    matches
}
