//! Mock binding-affinity scoring.

use rand::Rng;
use sha2::{Digest, Sha256};

/// Deterministic pseudo-random affinity in [10, 100], lower = better.
///
/// The score is a hash of (salt, structure, target sequence). The salt is
/// drawn once per model instance, so a given pair always scores identically
/// within one process run while different runs explore different landscapes.
#[derive(Debug, Clone)]
pub struct AffinityModel {
    salt: u64,
}

impl AffinityModel {
    pub fn new() -> Self {
        Self { salt: rand::thread_rng().gen() }
    }

    /// Fixed-salt constructor for reproducible tests.
    pub fn with_salt(salt: u64) -> Self {
        Self { salt }
    }

    pub fn score(&self, smiles: &str, sequence: &str) -> f64 {
        let mut hasher = Sha256::new();
        hasher.update(self.salt.to_le_bytes());
        hasher.update(smiles.as_bytes());
        hasher.update([0u8]);
        hasher.update(sequence.as_bytes());
        let digest = hasher.finalize();

        let mut word = [0u8; 8];
        word.copy_from_slice(&digest[..8]);
        let unit = u64::from_le_bytes(word) as f64 / u64::MAX as f64;

        let score = 10.0 + unit * 90.0;
        (score * 100.0).round() / 100.0
    }
}

impl Default for AffinityModel {
    fn default() -> Self {
        Self::new()
    }
}
