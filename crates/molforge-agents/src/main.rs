//! Molforge — toy multi-agent drug-candidate discovery pipeline.
//! Entry point for the agent binary.

use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

use molforge_agents::{Bureau, DiscoveryAgent, RequestAgent};
use molforge_chem::{CandidateGenerator, CandidateScorer, HeuristicEvaluator, SvgRenderer};
use molforge_common::Config;
use molforge_discovery::{Exporter, RoundController};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("molforge=debug,info")),
        )
        .init();

    info!("Molforge starting up...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config = Config::load_or_default();
    config.validate()?;
    info!(
        "Discovery: {} rounds x {} candidates, top {} exported, request every {}s",
        config.discovery.rounds,
        config.discovery.candidates_per_round,
        config.discovery.top_k,
        config.request.period_secs
    );

    let scorer = CandidateScorer::new(
        Box::new(HeuristicEvaluator::new()),
        Box::new(SvgRenderer::new()),
    );
    let generator = CandidateGenerator::new(config.discovery.max_generation_attempts);
    let controller = RoundController::new(
        generator,
        scorer,
        config.discovery.rounds,
        config.discovery.candidates_per_round,
    );
    let exporter = Exporter::new(config.discovery.top_k);

    let discovery = DiscoveryAgent::new(
        controller,
        exporter,
        &config.output.results_dir,
        &config.output.image_dir,
    );
    let requester =
        RequestAgent::new(&config.request.target, &config.request.sequence, DiscoveryAgent::NAME);

    let mut bureau = Bureau::new();
    bureau.add(Box::new(discovery));
    bureau.add_with_interval(
        Box::new(requester),
        Duration::from_secs(config.request.period_secs),
    );

    bureau.run().await?;
    Ok(())
}
