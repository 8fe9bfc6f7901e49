//! molforge-chem — Chemistry boundary for the Molforge discovery pipeline.
//!
//! This crate covers everything that touches a molecular structure:
//! 1. Syntactic SMILES validation
//! 2. Candidate generation (seed-and-mutate sampling)
//! 3. Physicochemical descriptor estimation (`PropertyEvaluator`)
//! 4. Mock binding-affinity scoring
//! 5. Toxicity classification
//! 6. Depiction rendering (`StructureRenderer`)

pub mod affinity;
pub mod generator;
pub mod properties;
pub mod render;
pub mod scorer;
pub mod smiles;
pub mod toxicity;

pub use affinity::AffinityModel;
pub use generator::CandidateGenerator;
pub use properties::{Descriptors, HeuristicEvaluator, PropertyEvaluator};
pub use render::{StructureRenderer, SvgRenderer};
pub use scorer::{Candidate, CandidateScorer};
pub use toxicity::ToxicityClass;
