//! Inverted-list merging.

use std::collections::HashMap;

use crate::types::{EntityId, Posting};

/// Merge any number of inverted-list fragments into one list with
/// per-entity frequencies summed, sorted ascending by entity id.
///
/// Pure aggregation: inputs may be individually unsorted, may contain
/// duplicate ids, and may be empty. Merging only empty fragments yields
/// an empty list.
///
/// ```
/// use talpa::{merge_lists, Posting};
/// let a = vec![Posting::new(1, 2), Posting::new(3, 1), Posting::new(5, 1)];
/// let b = vec![Posting::new(2, 1), Posting::new(3, 2), Posting::new(9, 2)];
/// let merged = merge_lists([a.as_slice(), b.as_slice()]);
/// assert_eq!(
///     merged,
///     vec![
///         Posting::new(1, 2),
///         Posting::new(2, 1),
///         Posting::new(3, 3),
///         Posting::new(5, 1),
///         Posting::new(9, 2),
///     ]
/// );
/// ```
pub fn merge_lists<'a, I>(fragments: I) -> Vec<Posting>
where
    I: IntoIterator<Item = &'a [Posting]>,
{
    let mut totals: HashMap<EntityId, u32> = HashMap::new();
    for fragment in fragments {
        for posting in fragment {
            *totals.entry(posting.entity_id).or_insert(0) += posting.frequency;
        }
    }

    let mut merged: Vec<Posting> = totals
        .into_iter()
        .map(|(entity_id, frequency)| Posting::new(entity_id, frequency))
        .collect();
    merged.sort_unstable_by_key(|posting| posting.entity_id);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(pairs: &[(EntityId, u32)]) -> Vec<Posting> {
        pairs.iter().map(|&(id, f)| Posting::new(id, f)).collect()
    }

    #[test]
    fn test_merge_two_lists() {
        let a = list(&[(1, 2), (3, 1), (5, 1)]);
        let b = list(&[(2, 1), (3, 2), (9, 2)]);
        assert_eq!(
            merge_lists([a.as_slice(), b.as_slice()]),
            list(&[(1, 2), (2, 1), (3, 3), (5, 1), (9, 2)])
        );
    }

    #[test]
    fn test_merge_with_empty_fragment() {
        let a = list(&[(1, 2), (3, 1), (5, 1)]);
        let empty: Vec<Posting> = Vec::new();
        assert_eq!(
            merge_lists([a.as_slice(), empty.as_slice()]),
            list(&[(1, 2), (3, 1), (5, 1)])
        );
    }

    #[test]
    fn test_merge_all_empty() {
        let empty: Vec<Posting> = Vec::new();
        assert!(merge_lists([empty.as_slice(), empty.as_slice()]).is_empty());
        assert!(merge_lists(std::iter::empty::<&[Posting]>()).is_empty());
    }

    #[test]
    fn test_frequencies_accumulate_across_fragments() {
        let a = list(&[(1, 1)]);
        let b = list(&[(1, 1)]);
        let c = list(&[(1, 1), (2, 1)]);
        assert_eq!(
            merge_lists([a.as_slice(), b.as_slice(), c.as_slice()]),
            list(&[(1, 3), (2, 1)])
        );
    }

    #[test]
    fn test_unsorted_input_is_sorted_by_id() {
        let a = list(&[(9, 1), (1, 1), (4, 2)]);
        assert_eq!(
            merge_lists([a.as_slice()]),
            list(&[(1, 1), (4, 2), (9, 1)])
        );
    }

    #[test]
    fn test_duplicates_within_one_fragment_sum() {
        let a = list(&[(2, 1), (2, 3)]);
        assert_eq!(merge_lists([a.as_slice()]), list(&[(2, 4)]));
    }
}
