//! Candidate generation by seed-and-mutate sampling.

use rand::seq::SliceRandom;
use std::collections::HashSet;
use tracing::debug;

use molforge_common::{MolforgeError, Result};

use crate::smiles;

/// Base structures the mutation loop starts from.
pub const DEFAULT_SEEDS: &[&str] = &[
    "CCO", "CCC", "CN", "CCN", "CNC", "COC", "CCl", "CCBr", "c1ccccc1", "c1ccncc1", "c1ccc(cc1)N",
];

/// Single-token fragments appended during mutation; the empty string keeps
/// unmodified seeds reachable.
pub const DEFAULT_FRAGMENTS: &[&str] = &["", "C", "O", "N", "Cl", "Br"];

/// Produces distinct, syntactically valid candidate structures.
pub struct CandidateGenerator {
    seeds: Vec<String>,
    fragments: Vec<String>,
    max_attempts: u32,
}

impl CandidateGenerator {
    pub fn new(max_attempts: u32) -> Self {
        Self::with_vocabulary(DEFAULT_SEEDS, DEFAULT_FRAGMENTS, max_attempts)
    }

    pub fn with_vocabulary(seeds: &[&str], fragments: &[&str], max_attempts: u32) -> Self {
        Self {
            seeds: seeds.iter().map(|s| s.to_string()).collect(),
            fragments: fragments.iter().map(|s| s.to_string()).collect(),
            max_attempts,
        }
    }

    /// Generate `n` distinct valid structures.
    ///
    /// Unparseable mutations are discarded silently. If the attempt budget
    /// runs out first, the error carries the partial batch so the caller can
    /// degrade instead of abort.
    pub fn generate(&self, n: usize) -> Result<Vec<String>> {
        let mut rng = rand::thread_rng();
        let mut seen: HashSet<String> = HashSet::with_capacity(n);
        let mut batch: Vec<String> = Vec::with_capacity(n);
        let mut attempts = 0u32;

        while batch.len() < n && attempts < self.max_attempts {
            attempts += 1;
            let (Some(parent), Some(fragment)) =
                (self.seeds.choose(&mut rng), self.fragments.choose(&mut rng))
            else {
                break; // empty vocabulary, nothing can ever be produced
            };
            let candidate = format!("{parent}{fragment}");
            if !smiles::is_valid(&candidate) {
                continue;
            }
            if seen.insert(candidate.clone()) {
                batch.push(candidate);
            }
        }

        if batch.len() < n {
            return Err(MolforgeError::Generation { requested: n, attempts, partial: batch });
        }
        debug!("Generated {} unique structures in {} attempts", batch.len(), attempts);
        Ok(batch)
    }
}
