//! Round controller: drives the generate → filter → score loop.

use tracing::{info, warn};

use molforge_chem::{Candidate, CandidateGenerator, CandidateScorer, Descriptors};
use molforge_common::{MolforgeError, Result};

use crate::job::Job;

/// Acceptance filter thresholds (strict: exactly 3.0 / 500.0 is rejected).
pub const LOGP_ACCEPT_MAX: f64 = 3.0;
pub const MW_ACCEPT_MAX: f64 = 500.0;

/// A candidate survives to scoring iff it passes this predicate.
pub fn accepts(descriptors: &Descriptors) -> bool {
    descriptors.logp < LOGP_ACCEPT_MAX && descriptors.mw < MW_ACCEPT_MAX
}

/// Runs the configured number of generation rounds for one job, strictly in
/// sequence, and accumulates the accepted candidates.
pub struct RoundController {
    generator: CandidateGenerator,
    scorer: CandidateScorer,
    rounds: u32,
    candidates_per_round: usize,
}

impl RoundController {
    pub fn new(
        generator: CandidateGenerator,
        scorer: CandidateScorer,
        rounds: u32,
        candidates_per_round: usize,
    ) -> Self {
        Self { generator, scorer, rounds, candidates_per_round }
    }

    pub async fn run(&self, job: &Job, sequence: &str) -> Result<Vec<Candidate>> {
        let mut accumulated: Vec<Candidate> = Vec::new();

        for round_id in 1..=self.rounds {
            info!("Round {}/{}: generating {} candidates", round_id, self.rounds,
                self.candidates_per_round);

            let batch = match self.generator.generate(self.candidates_per_round) {
                Ok(batch) => batch,
                Err(MolforgeError::Generation { requested, attempts, partial }) => {
                    // Degrade, do not abort: the round continues with
                    // whatever unique structures the budget allowed.
                    warn!(
                        "Round {round_id}: generation exhausted after {attempts} attempts \
                         ({} of {requested} unique); continuing with partial batch",
                        partial.len()
                    );
                    partial
                }
                Err(e) => return Err(e),
            };

            let mut accepted_in_round = 0usize;
            for smiles in &batch {
                let descriptors = self.scorer.descriptors(smiles).await?;
                if !accepts(&descriptors) {
                    continue; // rejected before any affinity or render cost
                }
                let image_path = job.image_path(round_id, smiles);
                match self
                    .scorer
                    .complete(smiles, sequence, descriptors, &image_path, round_id)
                    .await
                {
                    Ok(candidate) => {
                        accumulated.push(candidate);
                        accepted_in_round += 1;
                    }
                    Err(MolforgeError::Render { smiles, reason }) => {
                        warn!("Round {round_id}: dropping {smiles}, depiction failed: {reason}");
                    }
                    Err(e) => return Err(e),
                }
            }
            info!("Round {round_id} complete: {accepted_in_round}/{} accepted", batch.len());
        }

        info!("All rounds complete: {} candidates accumulated", accumulated.len());
        Ok(accumulated)
    }
}
