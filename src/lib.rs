//! Fuzzy prefix search over named entities using q-gram indexes.
//!
//! Given a partial, possibly misspelled query prefix, find entities whose
//! normalized name is within a bounded prefix edit distance (PED) of the
//! prefix, ranked by (distance ascending, score descending).
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ normalize.rs │────▶│   qgram.rs   │────▶│   index.rs   │
//! │ (normalize)  │     │(compute_     │     │ (QGramIndex, │
//! │              │     │   qgrams)    │     │ find_matches)│
//! └──────────────┘     └──────────────┘     └──────┬───────┘
//!                                                  │
//!                   ┌──────────────┐     ┌─────────▼────────┐
//!                   │   merge.rs   │◀────│     ped.rs       │
//!                   │ (merge_lists)│     │ (PedBackend,     │
//!                   └──────────────┘     │  BandedPed)      │
//!                                        └──────────────────┘
//! ```
//!
//! Query flow: normalize the prefix, compute its q-grams, merge the
//! matching inverted lists, prune candidates sharing too few grams, then
//! verify survivors with an exact bounded PED and rank.
//!
//! Once built, a [`QGramIndex`] is immutable and `Send + Sync`; any
//! number of queries may run against it concurrently without locking.
//!
//! # Usage
//!
//! ```
//! use talpa::{rank_matches, QGramIndex};
//!
//! let records = [
//!     "frei\t3\tfree\thttp://w/frei\tQ10\t\thttp://img/frei.png",
//!     "brei\t2\tporridge\thttp://w/brei\tQ20\t\thttp://img/brei.png",
//! ];
//! let index = QGramIndex::build_from_records(3, records).unwrap();
//!
//! let matches = rank_matches(index.find_matches("frei", 2));
//! let best = index.lookup_entity(matches[0].entity_id).unwrap();
//! assert_eq!(best.name, "frei");
//! ```

// Module declarations
mod error;
mod index;
mod merge;
mod normalize;
mod ped;
mod qgram;
mod store;
mod types;

// Re-exports for public API
pub use error::IndexError;
pub use index::{rank_matches, IndexStats, QGramIndex};
pub use merge::merge_lists;
pub use normalize::normalize;
pub use ped::{BandedPed, PedBackend};
pub use qgram::{compute_qgrams, PAD};
pub use store::EntityStore;
pub use types::{Entity, EntityId, EntityRecord, Match, Posting, RECORD_FIELDS};

#[cfg(test)]
mod tests {
    //! Cross-module tests: whole-pipeline behavior that no single
    //! component test covers.

    use super::*;
    use proptest::prelude::*;

    fn record_line(name: &str, score: u64) -> String {
        format!("{name}\t{score}\tdesc\thttp://u/{name}\tQ{score}\t\thttp://i/{name}")
    }

    fn build(names: &[(&str, u64)]) -> QGramIndex {
        let lines: Vec<String> = names.iter().map(|&(n, s)| record_line(n, s)).collect();
        QGramIndex::build_from_records(3, lines).unwrap()
    }

    /// Exhaustive PED over every entity, no pruning. Oracle for the
    /// inverted-list candidate path.
    fn brute_force_matches(index: &QGramIndex, prefix: &str, delta: usize) -> Vec<Match> {
        let prefix = normalize(prefix);
        index
            .store()
            .iter()
            .filter_map(|entity| {
                let distance = BandedPed.distance(&prefix, &entity.normalized_name, delta);
                (distance <= delta).then_some(Match {
                    entity_id: entity.id,
                    distance,
                    score: entity.score,
                })
            })
            .collect()
    }

    #[test]
    fn matches_resolve_and_use_normalized_names() {
        let index = build(&[("Frei, burG !?!", 5), ("Breisgau", 4), ("Brie", 1)]);
        let matches = rank_matches(index.find_matches("freiburg", 1));
        assert!(!matches.is_empty());
        for m in &matches {
            let entity = index.lookup_entity(m.entity_id).unwrap();
            assert_eq!(entity.normalized_name, normalize(&entity.name));
        }
        assert_eq!(
            index.lookup_entity(matches[0].entity_id).unwrap().name,
            "Frei, burG !?!"
        );
    }

    #[test]
    fn distance_grows_with_tolerance() {
        let index = build(&[("frei", 3), ("brei", 2)]);
        assert_eq!(index.find_matches("frei", 0).len(), 1);
        assert_eq!(index.find_matches("frei", 2).len(), 2);
    }

    #[test]
    fn pruned_results_match_brute_force_on_fixed_corpus() {
        let index = build(&[
            ("freiburg", 10),
            ("fribourg", 9),
            ("hamburg", 8),
            ("brandenburg", 7),
            ("frankfurt", 6),
            ("bremen", 5),
        ]);
        // Candidate generation only sees entities sharing at least one
        // gram, so equivalence with brute force holds in the regime
        // len(prefix) - q * delta >= 1, which the len/4 caller policy
        // always satisfies.
        for (prefix, delta) in [
            ("frei", 0),
            ("frei", 1),
            ("frie", 1),
            ("burg", 1),
            ("fra", 0),
            ("hambu", 1),
            ("brandenbu", 2),
            ("frankfurt", 2),
        ] {
            let mut got = index.find_matches(prefix, delta);
            let mut want = brute_force_matches(&index, prefix, delta);
            got.sort_by_key(|m| m.entity_id);
            want.sort_by_key(|m| m.entity_id);
            assert_eq!(got, want, "prefix={prefix:?} delta={delta}");
        }
    }

    fn name_strategy() -> impl Strategy<Value = String> {
        prop::string::string_regex("[ab]{1,7}").unwrap()
    }

    fn corpus_strategy() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec(name_strategy(), 1..12)
    }

    proptest! {
        /// The pruning bound never drops a true match: the candidate
        /// pipeline agrees with brute-force verification of every entity.
        #[test]
        fn prop_pruning_has_no_false_negatives(
            names in corpus_strategy(),
            query in name_strategy(),
            delta in 0usize..3,
        ) {
            // Same regime restriction as the fixed-corpus test: below a
            // threshold of 1 the inverted lists cannot surface
            // zero-overlap candidates.
            prop_assume!(query.chars().count() as i64 - 3 * delta as i64 >= 1);
            let lines: Vec<String> = names
                .iter()
                .enumerate()
                .map(|(i, n)| record_line(n, i as u64))
                .collect();
            let index = QGramIndex::build_from_records(3, lines).unwrap();

            let mut got = index.find_matches(&query, delta);
            let mut want = brute_force_matches(&index, &query, delta);
            got.sort_by_key(|m| m.entity_id);
            want.sort_by_key(|m| m.entity_id);
            prop_assert_eq!(got, want);
        }

        /// Every id a query returns resolves in the store.
        #[test]
        fn prop_returned_ids_resolve(
            names in corpus_strategy(),
            query in name_strategy(),
        ) {
            let lines: Vec<String> = names
                .iter()
                .map(|n| record_line(n, 1))
                .collect();
            let index = QGramIndex::build_from_records(3, lines).unwrap();

            for m in index.find_matches(&query, 1) {
                prop_assert!(index.lookup_entity(m.entity_id).is_ok());
            }
        }

        /// Ranking is a permutation sorted by the two keys.
        #[test]
        fn prop_rank_orders_by_distance_then_score(
            pairs in prop::collection::vec((0usize..4, 0u64..10), 0..20),
        ) {
            let matches: Vec<Match> = pairs
                .iter()
                .enumerate()
                .map(|(i, &(distance, score))| Match {
                    entity_id: i as EntityId + 1,
                    distance,
                    score,
                })
                .collect();
            let ranked = rank_matches(matches.clone());

            prop_assert_eq!(ranked.len(), matches.len());
            for pair in ranked.windows(2) {
                prop_assert!(
                    (pair[0].distance, std::cmp::Reverse(pair[0].score))
                        <= (pair[1].distance, std::cmp::Reverse(pair[1].score))
                );
            }
        }
    }
}
