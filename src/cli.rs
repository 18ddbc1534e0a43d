// Copyright 2026-present The talpa authors
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the talpa command-line interface.
//!
//! Two subcommands: `query` builds an index from an entity TSV file and
//! answers a single query, `stats` reports the shape of the index built
//! from a file. Everything interactive or network-facing lives outside
//! this binary; it is a one-shot caller of the library API.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "talpa",
    about = "Fuzzy prefix search over named entities",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build an index from an entity TSV file and answer one query
    Query {
        /// Entity file: one tab-separated record per line, header skipped
        file: String,

        /// Query prefix (normalized before matching)
        query: String,

        /// Maximum edit distance; defaults to len(normalized query) / 4
        #[arg(short, long)]
        delta: Option<usize>,

        /// Maximum number of results to print
        #[arg(short, long, default_value = "5")]
        limit: usize,

        /// Gram width used for the index
        #[arg(short, long, default_value = "3")]
        q: usize,

        /// Emit resolved entities as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Build an index from an entity TSV file and report its shape
    Stats {
        /// Entity file: one tab-separated record per line, header skipped
        file: String,

        /// Gram width used for the index
        #[arg(short, long, default_value = "3")]
        q: usize,
    },
}
