//! The closed message protocol between the two agents.

use serde::{Deserialize, Serialize};

/// Asks the discovery agent to run one discovery job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryRequest {
    pub target: String,
    pub sequence: String,
}

/// Reports the ranked shortlist back to the requester. Rank order is
/// ascending affinity score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalSelection {
    pub summary: String,
    pub top_smiles: Vec<String>,
}

/// Every message that can cross an agent boundary. Routing is an exhaustive
/// match, so adding a message shape is a compile-visible change.
#[derive(Debug, Clone)]
pub enum AgentMessage {
    DiscoveryRequest(DiscoveryRequest),
    FinalSelection(FinalSelection),
}
