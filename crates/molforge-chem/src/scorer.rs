//! Candidate scoring: descriptors, affinity, toxicity, depiction.

use serde::{Deserialize, Serialize};
use std::path::Path;

use molforge_common::{MolforgeError, Result};

use crate::affinity::AffinityModel;
use crate::properties::{Descriptors, PropertyEvaluator};
use crate::render::StructureRenderer;
use crate::toxicity::{self, ToxicityClass};

/// One fully scored candidate. Field names are the results-file contract and
/// must not change without updating the viewer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub smiles: String,
    pub logp: f64,
    pub mw: f64,
    pub tpsa: f64,
    pub affinity_score: f64,
    pub image_path: String,
    pub toxicity: ToxicityClass,
    pub round_id: u32,
}

/// Turns an accepted structure into a full `Candidate` record.
pub struct CandidateScorer {
    evaluator: Box<dyn PropertyEvaluator>,
    renderer: Box<dyn StructureRenderer>,
    affinity: AffinityModel,
}

impl CandidateScorer {
    pub fn new(evaluator: Box<dyn PropertyEvaluator>, renderer: Box<dyn StructureRenderer>) -> Self {
        Self { evaluator, renderer, affinity: AffinityModel::new() }
    }

    /// Replace the affinity model (reproducible tests).
    pub fn with_affinity_model(mut self, affinity: AffinityModel) -> Self {
        self.affinity = affinity;
        self
    }

    /// Descriptors only. This is all the acceptance filter needs, so
    /// rejected structures never pay for affinity or rendering.
    pub async fn descriptors(&self, smiles: &str) -> Result<Descriptors> {
        self.evaluator.evaluate(smiles).await
    }

    /// Affinity, toxicity and depiction for an already-accepted structure.
    pub async fn complete(
        &self,
        smiles: &str,
        sequence: &str,
        descriptors: Descriptors,
        image_path: &Path,
        round_id: u32,
    ) -> Result<Candidate> {
        let affinity_score = self.affinity.score(smiles, sequence);
        let toxicity = toxicity::classify(&descriptors);
        self.renderer.render(smiles, image_path).await.map_err(|e| MolforgeError::Render {
            smiles: smiles.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Candidate {
            smiles: smiles.to_string(),
            logp: descriptors.logp,
            mw: descriptors.mw,
            tpsa: descriptors.tpsa,
            affinity_score,
            image_path: image_path.display().to_string(),
            toxicity,
            round_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::HeuristicEvaluator;
    use crate::render::SvgRenderer;
    use async_trait::async_trait;

    struct FailingRenderer;

    #[async_trait]
    impl StructureRenderer for FailingRenderer {
        async fn render(&self, _smiles: &str, _out_path: &Path) -> Result<()> {
            Err(MolforgeError::Export("renderer backend offline".to_string()))
        }
    }

    #[tokio::test]
    async fn test_complete_builds_full_record() {
        let dir = tempfile::tempdir().unwrap();
        let scorer = CandidateScorer::new(
            Box::new(HeuristicEvaluator::new()),
            Box::new(SvgRenderer::new()),
        )
        .with_affinity_model(AffinityModel::with_salt(7));

        let descriptors = scorer.descriptors("CCO").await.unwrap();
        let image = dir.path().join("job_x_r1_CCO.svg");
        let candidate =
            scorer.complete("CCO", "SEQ", descriptors, &image, 1).await.unwrap();

        assert_eq!(candidate.smiles, "CCO");
        assert_eq!(candidate.round_id, 1);
        assert!((10.0..=100.0).contains(&candidate.affinity_score));
        assert_eq!(candidate.toxicity, ToxicityClass::LowRisk);
        assert!(image.exists());
    }

    #[tokio::test]
    async fn test_scoring_is_deterministic_within_a_run() {
        let scorer = CandidateScorer::new(
            Box::new(HeuristicEvaluator::new()),
            Box::new(SvgRenderer::new()),
        );
        let a = scorer.affinity.score("CCO", "SEQ");
        let b = scorer.affinity.score("CCO", "SEQ");
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_render_failure_surfaces_as_render_error() {
        let scorer =
            CandidateScorer::new(Box::new(HeuristicEvaluator::new()), Box::new(FailingRenderer));
        let descriptors = scorer.descriptors("CCO").await.unwrap();
        let err = scorer
            .complete("CCO", "SEQ", descriptors, Path::new("/dev/null/na.svg"), 1)
            .await
            .unwrap_err();
        assert!(matches!(err, MolforgeError::Render { .. }));
    }

    #[test]
    fn test_candidate_serialises_with_contract_field_names() {
        let candidate = Candidate {
            smiles: "CCO".to_string(),
            logp: 0.0,
            mw: 46.07,
            tpsa: 20.23,
            affinity_score: 42.0,
            image_path: "molecule_images/job_r1_CCO.svg".to_string(),
            toxicity: ToxicityClass::LowRisk,
            round_id: 1,
        };
        let json = serde_json::to_value(&candidate).unwrap();
        for key in
            ["smiles", "logp", "mw", "tpsa", "affinity_score", "image_path", "toxicity", "round_id"]
        {
            assert!(json.get(key).is_some(), "missing key {key}");
        }
        assert_eq!(json["toxicity"], "Low Risk");
    }
}
