// Copyright 2026-present The talpa authors
// SPDX-License-Identifier: Apache-2.0

//! Bounded prefix edit distance (PED).
//!
//! PED(x, y) is the minimum number of single-character insertions,
//! deletions, and substitutions needed to turn the query `x` into a
//! *prefix* of the target `y`. Trailing characters of `y` beyond the
//! aligned prefix are free, which is what autocomplete matching needs:
//! "freib" is a perfect (distance 0) match for "freiburg".
//!
//! Two early-exit paths keep verification cheap:
//! 1. Only the first `len(x) + max` characters of `y` can participate in
//!    a prefix within distance `max`; the rest is never materialized.
//! 2. Row minima of the DP matrix never decrease, so once a row's
//!    minimum exceeds `max` the computation is abandoned.

/// A swappable PED computation.
///
/// `distance(query, target, max)` returns the exact prefix edit distance
/// whenever it is `<= max`. Any returned value greater than `max` means
/// "exceeds the bound" and carries no further precision. Implementations
/// must be safe to share across concurrent queries.
pub trait PedBackend: Send + Sync + std::fmt::Debug {
    fn distance(&self, query: &str, target: &str, max: usize) -> usize;
}

/// Reference backend: banded dynamic programming with a rolling row.
///
/// O(len(query) * (len(query) + max)) time, one row of memory.
#[derive(Debug, Default, Clone, Copy)]
pub struct BandedPed;

impl PedBackend for BandedPed {
    fn distance(&self, query: &str, target: &str, max: usize) -> usize {
        let query: Vec<char> = query.chars().collect();
        let n = query.len();

        // Prefixes of the target longer than n + max need more than
        // `max` insertions, so they can never win.
        let target: Vec<char> = target.chars().take(n + max).collect();
        let m = target.len();

        // dp[j] = edit distance between the query consumed so far and
        // target[..j]. Row 0: empty query turns into target[..j] with
        // j insertions.
        let mut dp: Vec<usize> = (0..=m).collect();

        for (i, &qc) in query.iter().enumerate() {
            let mut prev = dp[0];
            dp[0] = i + 1;
            let mut row_min = dp[0];

            for (j, &tc) in target.iter().enumerate() {
                let temp = dp[j + 1];
                let cost = usize::from(qc != tc);
                dp[j + 1] = (dp[j + 1] + 1).min(dp[j] + 1).min(prev + cost);
                prev = temp;
                row_min = row_min.min(dp[j + 1]);
            }

            // Row minima are non-decreasing, so no later row can get
            // back under the bound.
            if row_min > max {
                return max + 1;
            }
        }

        // PED: best alignment against any prefix of the target.
        dp.into_iter().min().unwrap_or(0)
    }
}
