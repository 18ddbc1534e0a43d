// Copyright 2026-present The talpa authors
// SPDX-License-Identifier: Apache-2.0

//! Error type for index construction and entity lookup.
//!
//! All failures are value-returned; the index itself never logs or
//! prints. Reporting is the caller's job.

use std::fmt;
use std::io;

use crate::types::EntityId;

/// Errors produced by index construction and the query API.
#[derive(Debug)]
pub enum IndexError {
    /// A source record does not split into the required field count.
    ///
    /// Fatal for the whole build attempt: a corrupt record means the
    /// input file is structurally invalid, so no partial index is kept.
    MalformedRecord {
        /// 1-based line number in the source input.
        line: usize,
        expected: usize,
        found: usize,
    },
    /// A lookup referenced an id not present in the store. Ids returned
    /// by `find_matches` always resolve, so hitting this indicates an
    /// internal invariant violation, not bad user input.
    EntityNotFound { id: EntityId },
    /// Reading the source file failed.
    Io(io::Error),
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexError::MalformedRecord {
                line,
                expected,
                found,
            } => {
                write!(
                    f,
                    "malformed record on line {}: expected {} fields, found {}",
                    line, expected, found
                )
            }
            IndexError::EntityNotFound { id } => {
                write!(f, "entity id {} not present in store", id)
            }
            IndexError::Io(err) => write!(f, "input read failed: {}", err),
        }
    }
}

impl std::error::Error for IndexError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IndexError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for IndexError {
    fn from(err: io::Error) -> Self {
        IndexError::Io(err)
    }
}
