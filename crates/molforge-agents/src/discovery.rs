//! Discovery agent: turns one `DiscoveryRequest` into a ranked, exported
//! shortlist and reports it back.

use async_trait::async_trait;
use std::path::PathBuf;
use tracing::{debug, info};

use molforge_common::Result;
use molforge_discovery::{Exporter, Job, RoundController};

use crate::bureau::{Agent, Context};
use crate::messages::{AgentMessage, DiscoveryRequest, FinalSelection};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    Running,
    Exported,
}

pub struct DiscoveryAgent {
    controller: RoundController,
    exporter: Exporter,
    results_dir: PathBuf,
    image_dir: PathBuf,
    state: State,
}

impl DiscoveryAgent {
    pub const NAME: &'static str = "drug_discovery";

    pub fn new(
        controller: RoundController,
        exporter: Exporter,
        results_dir: impl Into<PathBuf>,
        image_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            controller,
            exporter,
            results_dir: results_dir.into(),
            image_dir: image_dir.into(),
            state: State::Idle,
        }
    }

    fn transition(&mut self, next: State) {
        debug!("{}: {:?} -> {:?}", Self::NAME, self.state, next);
        self.state = next;
    }

    async fn handle_request(
        &mut self,
        ctx: &Context,
        from: &str,
        request: DiscoveryRequest,
    ) -> Result<()> {
        self.transition(State::Running);
        let job = Job::create(&self.results_dir, &self.image_dir)?;
        info!("Starting discovery for target {} (Job: {})", request.target, job.job_id());

        let accumulated = self.controller.run(&job, &request.sequence).await?;
        let (top, _artifacts) = self.exporter.rank_and_export(&job, accumulated)?;
        self.transition(State::Exported);

        info!("Discovery complete. Top {} candidates exported.", top.len());
        for (i, c) in top.iter().enumerate() {
            info!("{}. {} | Aff: {} | {}", i + 1, c.smiles, c.affinity_score, c.toxicity);
        }

        ctx.send(
            from,
            AgentMessage::FinalSelection(FinalSelection {
                summary: format!(
                    "Top candidates discovered for {} (Job: {})",
                    request.target,
                    job.job_id()
                ),
                top_smiles: top.into_iter().map(|c| c.smiles).collect(),
            }),
        )?;
        self.transition(State::Idle);
        Ok(())
    }
}

#[async_trait]
impl Agent for DiscoveryAgent {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn on_message(
        &mut self,
        ctx: &Context,
        from: &str,
        message: AgentMessage,
    ) -> Result<()> {
        match message {
            AgentMessage::DiscoveryRequest(request) => {
                let outcome = self.handle_request(ctx, from, request).await;
                if outcome.is_err() {
                    // A failed run sends no FinalSelection; the next request
                    // starts fresh.
                    self.transition(State::Idle);
                }
                outcome
            }
            AgentMessage::FinalSelection(_) => {
                debug!("{} ignoring FinalSelection", Self::NAME);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bureau::{Envelope, Event};
    use async_trait::async_trait;
    use molforge_chem::{
        AffinityModel, CandidateGenerator, CandidateScorer, Descriptors, PropertyEvaluator,
        SvgRenderer,
    };
    use std::path::Path;
    use tokio::sync::mpsc;

    struct PermissiveEvaluator;

    #[async_trait]
    impl PropertyEvaluator for PermissiveEvaluator {
        async fn evaluate(&self, _smiles: &str) -> Result<Descriptors> {
            Ok(Descriptors { logp: 1.0, mw: 100.0, tpsa: 20.0 })
        }
    }

    fn agent(results_dir: &Path, image_dir: &Path) -> DiscoveryAgent {
        let generator = CandidateGenerator::with_vocabulary(&["CCO", "CCC"], &["", "C"], 10_000);
        let scorer =
            CandidateScorer::new(Box::new(PermissiveEvaluator), Box::new(SvgRenderer::new()))
                .with_affinity_model(AffinityModel::with_salt(5));
        DiscoveryAgent::new(
            RoundController::new(generator, scorer, 1, 2),
            Exporter::new(5),
            results_dir,
            image_dir,
        )
    }

    #[tokio::test]
    async fn test_request_produces_final_selection_and_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let results_dir = dir.path().join("results");
        let mut discovery = agent(&results_dir, &dir.path().join("img"));

        let (tx, mut rx) = mpsc::unbounded_channel::<Envelope>();
        let ctx = Context::new(DiscoveryAgent::NAME, tx);
        discovery
            .on_message(
                &ctx,
                "requester",
                AgentMessage::DiscoveryRequest(DiscoveryRequest {
                    target: "EGFR".to_string(),
                    sequence: "MENSDLGAVVLGRGAFGKVV".to_string(),
                }),
            )
            .await
            .unwrap();

        let reply = rx.try_recv().unwrap();
        assert_eq!(reply.to, "requester");
        let Event::Message { from, message } = reply.event else {
            panic!("expected a message event");
        };
        assert_eq!(from, DiscoveryAgent::NAME);
        let AgentMessage::FinalSelection(selection) = message else {
            panic!("expected FinalSelection");
        };
        assert_eq!(selection.top_smiles.len(), 2);
        assert!(selection.summary.contains("EGFR"));

        let job_dir = std::fs::read_dir(&results_dir).unwrap().next().unwrap().unwrap().path();
        assert!(job_dir.join("top_candidates.json").exists());
        assert!(job_dir.join("top_candidates.csv").exists());
    }

    #[tokio::test]
    async fn test_failed_run_sends_no_selection() {
        let dir = tempfile::tempdir().unwrap();
        // Job creation fails because the results base is a plain file.
        let blocked = dir.path().join("results");
        std::fs::write(&blocked, b"not a directory").unwrap();
        let mut discovery = agent(&blocked, &dir.path().join("img"));

        let (tx, mut rx) = mpsc::unbounded_channel::<Envelope>();
        let ctx = Context::new(DiscoveryAgent::NAME, tx);
        let outcome = discovery
            .on_message(
                &ctx,
                "requester",
                AgentMessage::DiscoveryRequest(DiscoveryRequest {
                    target: "EGFR".to_string(),
                    sequence: "SEQ".to_string(),
                }),
            )
            .await;

        assert!(outcome.is_err());
        assert!(rx.try_recv().is_err(), "no message should have been sent");
        assert_eq!(discovery.state, State::Idle);
    }
}
