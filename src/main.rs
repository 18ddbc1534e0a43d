// Copyright 2026-present The talpa authors
// SPDX-License-Identifier: Apache-2.0

use std::time::Instant;

use clap::Parser;

use talpa::{normalize, rank_matches, Entity, IndexError, QGramIndex};

mod cli;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Query {
            file,
            query,
            delta,
            limit,
            q,
            json,
        } => run_query(&file, &query, delta, limit, q, json),
        Commands::Stats { file, q } => run_stats(&file, q),
    };

    if let Err(e) = result {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

fn build_index(file: &str, q: usize) -> Result<QGramIndex, IndexError> {
    let start = Instant::now();
    let index = QGramIndex::build_from_file(q, file)?;
    eprintln!(
        "Built {}-gram index over {} entities in {:.3}s",
        q,
        index.store().len(),
        start.elapsed().as_secs_f64()
    );
    Ok(index)
}

fn run_query(
    file: &str,
    query: &str,
    delta: Option<usize>,
    limit: usize,
    q: usize,
    json: bool,
) -> Result<(), IndexError> {
    let index = build_index(file, q)?;

    let normalized = normalize(query);
    // Default tolerance policy: one edit per four query characters.
    let delta = delta.unwrap_or(normalized.chars().count() / 4);
    eprintln!("Query {:?} with delta {}", normalized, delta);

    let start = Instant::now();
    let matches = rank_matches(index.find_matches(&normalized, delta));
    eprintln!(
        "{} match(es) in {:.3}ms",
        matches.len(),
        start.elapsed().as_secs_f64() * 1e3
    );

    let top: Vec<&Entity> = matches
        .iter()
        .take(limit)
        .map(|m| index.lookup_entity(m.entity_id))
        .collect::<Result<_, _>>()?;

    if json {
        let payload = serde_json::to_string_pretty(&top)
            .map_err(|e| IndexError::Io(std::io::Error::other(e)))?;
        println!("{}", payload);
    } else {
        for (rank, entity) in top.iter().enumerate() {
            println!(
                "{}. {}; {}; {}",
                rank + 1,
                entity.name,
                entity.description,
                entity.url
            );
        }
    }
    Ok(())
}

fn run_stats(file: &str, q: usize) -> Result<(), IndexError> {
    let index = build_index(file, q)?;
    let stats = index.stats();

    println!("q:               {}", stats.q);
    println!("entities:        {}", stats.entities);
    println!("distinct q-grams: {}", stats.distinct_qgrams);
    println!("postings:        {}", stats.postings);
    if let Some((gram, len)) = &stats.longest_list {
        println!("longest list:    {:?} with {} postings", gram, len);
    }
    Ok(())
}
