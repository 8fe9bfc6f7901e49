//! End-to-end pipeline scenario: a tiny vocabulary, one round, a permissive
//! filter, and both artifacts written with the ranked survivors.

use async_trait::async_trait;
use std::path::Path;

use molforge_chem::{
    AffinityModel, Candidate, CandidateGenerator, CandidateScorer, Descriptors,
    PropertyEvaluator, StructureRenderer, SvgRenderer,
};
use molforge_common::{MolforgeError, Result};
use molforge_discovery::{Exporter, Job, RoundController};

/// Evaluator whose descriptors always pass the acceptance filter.
struct PermissiveEvaluator;

#[async_trait]
impl PropertyEvaluator for PermissiveEvaluator {
    async fn evaluate(&self, _smiles: &str) -> Result<Descriptors> {
        Ok(Descriptors { logp: 1.0, mw: 100.0, tpsa: 20.0 })
    }
}

/// Renderer that refuses one specific structure.
struct FlakyRenderer {
    poison: String,
}

#[async_trait]
impl StructureRenderer for FlakyRenderer {
    async fn render(&self, smiles: &str, out_path: &Path) -> Result<()> {
        if smiles == self.poison {
            return Err(MolforgeError::Render {
                smiles: smiles.to_string(),
                reason: "backend refused".to_string(),
            });
        }
        SvgRenderer::new().render(smiles, out_path).await
    }
}

#[tokio::test]
async fn test_single_round_two_candidate_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let job = Job::with_id("job_e2e".to_string(), dir.path(), &dir.path().join("img")).unwrap();

    let generator = CandidateGenerator::with_vocabulary(&["CCO", "CCC"], &["", "C"], 10_000);
    let scorer = CandidateScorer::new(Box::new(PermissiveEvaluator), Box::new(SvgRenderer::new()))
        .with_affinity_model(AffinityModel::with_salt(99));
    let controller = RoundController::new(generator, scorer, 1, 2);

    let accumulated = controller.run(&job, "MENSDLGAVVLGRGAFGKVV").await.unwrap();
    assert_eq!(accumulated.len(), 2);
    assert!(accumulated.iter().all(|c| c.round_id == 1));
    for c in &accumulated {
        assert!(Path::new(&c.image_path).exists(), "missing depiction {}", c.image_path);
    }

    let (top, artifacts) = Exporter::new(5).rank_and_export(&job, accumulated).unwrap();
    assert_eq!(top.len(), 2);
    assert!(top[0].affinity_score <= top[1].affinity_score);

    let from_json: Vec<Candidate> =
        serde_json::from_str(&std::fs::read_to_string(&artifacts.json_path).unwrap()).unwrap();
    assert_eq!(from_json.len(), 2);

    let mut reader = csv::Reader::from_path(&artifacts.csv_path).unwrap();
    assert_eq!(reader.records().count(), 2);
}

#[tokio::test]
async fn test_render_failure_excludes_candidate_without_aborting_round() {
    let dir = tempfile::tempdir().unwrap();
    let job = Job::with_id("job_flaky".to_string(), dir.path(), &dir.path().join("img")).unwrap();

    let generator = CandidateGenerator::with_vocabulary(&["CCO", "CCC"], &["", "C"], 10_000);
    let renderer = FlakyRenderer { poison: "CCO".to_string() };
    let scorer = CandidateScorer::new(Box::new(PermissiveEvaluator), Box::new(renderer));
    let controller = RoundController::new(generator, scorer, 1, 4);

    // Vocabulary yields exactly CCO, CCC, CCOC, CCCC; the poisoned one is dropped.
    let accumulated = controller.run(&job, "SEQ").await.unwrap();
    assert_eq!(accumulated.len(), 3);
    assert!(accumulated.iter().all(|c| c.smiles != "CCO"));
}

#[tokio::test]
async fn test_generation_shortfall_degrades_round() {
    let dir = tempfile::tempdir().unwrap();
    let job = Job::with_id("job_short".to_string(), dir.path(), &dir.path().join("img")).unwrap();

    // Only two unique structures are reachable but ten are requested.
    let generator = CandidateGenerator::with_vocabulary(&["CCO"], &["", "C"], 500);
    let scorer = CandidateScorer::new(Box::new(PermissiveEvaluator), Box::new(SvgRenderer::new()));
    let controller = RoundController::new(generator, scorer, 1, 10);

    let accumulated = controller.run(&job, "SEQ").await.unwrap();
    assert_eq!(accumulated.len(), 2);
}
