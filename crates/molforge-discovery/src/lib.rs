//! molforge-discovery — One discovery run: rounds of generation, filtering
//! and scoring, then ranking and export of the surviving candidates.

pub mod export;
pub mod job;
pub mod rounds;

pub use export::{ExportedArtifacts, Exporter};
pub use job::Job;
pub use rounds::RoundController;
