// Copyright 2026-present The talpa authors
// SPDX-License-Identifier: Apache-2.0

//! Q-gram generation over left-padded strings.
//!
//! Grams are taken from a copy of the input padded on the left with
//! `q - 1` sentinel characters. Left-only padding matters: it makes the
//! first characters of a string appear in `q - 1` extra grams, which is
//! exactly what prefix matching needs. There is no right padding, so
//! trailing characters of long names stay cheap.

/// Padding sentinel. Non-alphanumeric, so it can never collide with a
/// character of normalized text.
pub const PAD: char = '$';

/// Compute all contiguous `q`-length windows of `text` padded on the
/// left with `q - 1` sentinels, in left-to-right order.
///
/// `text` is expected to be already normalized; windows are taken over
/// characters, not bytes. For non-empty input the gram count equals the
/// character count of `text`. Empty input yields the single all-sentinel
/// gram for `q > 1` and nothing for `q == 1`, so an empty query still
/// has something to probe the index with.
///
/// ```
/// use talpa::compute_qgrams;
/// assert_eq!(
///     compute_qgrams("freiburg", 3),
///     vec!["$$f", "$fr", "fre", "rei", "eib", "ibu", "bur", "urg"]
/// );
/// ```
pub fn compute_qgrams(text: &str, q: usize) -> Vec<String> {
    assert!(q >= 1, "gram width must be at least 1");

    let mut padded: Vec<char> = Vec::with_capacity(q - 1 + text.len());
    padded.extend(std::iter::repeat(PAD).take(q - 1));
    padded.extend(text.chars());

    if padded.len() < q {
        // Only reachable for empty input with q > 1: emit the single
        // all-sentinel gram.
        return vec![PAD.to_string().repeat(q)];
    }

    padded
        .windows(q)
        .map(|window| window.iter().collect())
        .collect()
}
