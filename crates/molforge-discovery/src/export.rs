//! Ranking and export of the top candidates.

use std::cmp::Ordering;
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

use molforge_chem::Candidate;
use molforge_common::Result;

use crate::job::Job;

pub const JSON_FILE: &str = "top_candidates.json";
pub const CSV_FILE: &str = "top_candidates.csv";

const CSV_HEADER: [&str; 8] =
    ["SMILES", "logP", "MW", "TPSA", "Affinity", "Toxicity", "Round", "Image"];

#[derive(Debug, Clone)]
pub struct ExportedArtifacts {
    pub json_path: PathBuf,
    pub csv_path: PathBuf,
}

/// Selects the top-K candidates and writes the paired result artifacts.
pub struct Exporter {
    top_k: usize,
}

impl Exporter {
    pub fn new(top_k: usize) -> Self {
        Self { top_k }
    }

    /// Stable sort ascending by affinity (lower = better), truncated to
    /// min(top_k, len). Ties keep accumulation order.
    pub fn rank(&self, mut candidates: Vec<Candidate>) -> Vec<Candidate> {
        candidates.sort_by(|a, b| {
            a.affinity_score.partial_cmp(&b.affinity_score).unwrap_or(Ordering::Equal)
        });
        candidates.truncate(self.top_k);
        candidates
    }

    /// Write both artifacts into the job directory.
    ///
    /// Both files are staged under temporary names and only renamed into
    /// place once both writes succeeded, so a failure never leaves one
    /// artifact without the other.
    pub fn export(&self, job: &Job, top: &[Candidate]) -> Result<ExportedArtifacts> {
        let csv_path = job.results_path().join(CSV_FILE);
        let json_path = job.results_path().join(JSON_FILE);
        let csv_tmp = job.results_path().join(format!("{CSV_FILE}.tmp"));
        let json_tmp = job.results_path().join(format!("{JSON_FILE}.tmp"));

        let staged = (|| -> Result<()> {
            let mut writer = csv::Writer::from_path(&csv_tmp)?;
            writer.write_record(CSV_HEADER)?;
            for c in top {
                writer.write_record([
                    c.smiles.clone(),
                    c.logp.to_string(),
                    c.mw.to_string(),
                    c.tpsa.to_string(),
                    c.affinity_score.to_string(),
                    c.toxicity.to_string(),
                    c.round_id.to_string(),
                    c.image_path.clone(),
                ])?;
            }
            writer.flush()?;

            fs::write(&json_tmp, serde_json::to_vec_pretty(top)?)?;
            Ok(())
        })();

        if let Err(e) = staged {
            let _ = fs::remove_file(&csv_tmp);
            let _ = fs::remove_file(&json_tmp);
            return Err(e);
        }

        fs::rename(&csv_tmp, &csv_path)?;
        fs::rename(&json_tmp, &json_path)?;

        info!(
            "Exported {} candidates for {} ({} + {})",
            top.len(),
            job.job_id(),
            CSV_FILE,
            JSON_FILE
        );
        Ok(ExportedArtifacts { json_path, csv_path })
    }

    /// Rank, export, and hand back the ranked list for the final report.
    pub fn rank_and_export(
        &self,
        job: &Job,
        candidates: Vec<Candidate>,
    ) -> Result<(Vec<Candidate>, ExportedArtifacts)> {
        if candidates.is_empty() {
            warn!("No candidates survived filtering for {}; exporting empty set", job.job_id());
        }
        let top = self.rank(candidates);
        let artifacts = self.export(job, &top)?;
        Ok((top, artifacts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use molforge_chem::ToxicityClass;

    fn candidate(smiles: &str, affinity: f64, round_id: u32) -> Candidate {
        Candidate {
            smiles: smiles.to_string(),
            logp: 1.0,
            mw: 100.0,
            tpsa: 20.0,
            affinity_score: affinity,
            image_path: format!("molecule_images/{smiles}.svg"),
            toxicity: ToxicityClass::LowRisk,
            round_id,
        }
    }

    #[test]
    fn test_rank_is_ascending_and_capped_at_top_k() {
        let candidates: Vec<Candidate> = (0..8)
            .map(|i| candidate(&format!("C{i}"), 90.0 - f64::from(i) * 10.0, 1))
            .collect();
        let top = Exporter::new(5).rank(candidates);
        assert_eq!(top.len(), 5);
        for pair in top.windows(2) {
            assert!(pair[0].affinity_score <= pair[1].affinity_score);
        }
    }

    #[test]
    fn test_rank_keeps_all_when_fewer_than_top_k() {
        let candidates = vec![candidate("CCO", 50.0, 1), candidate("CCC", 40.0, 1)];
        let top = Exporter::new(5).rank(candidates);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].smiles, "CCC");
    }

    #[test]
    fn test_rank_ties_keep_accumulation_order() {
        let candidates = vec![
            candidate("first", 30.0, 1),
            candidate("second", 30.0, 1),
            candidate("third", 30.0, 2),
        ];
        let top = Exporter::new(5).rank(candidates);
        let order: Vec<&str> = top.iter().map(|c| c.smiles.as_str()).collect();
        assert_eq!(order, ["first", "second", "third"]);
    }
}
