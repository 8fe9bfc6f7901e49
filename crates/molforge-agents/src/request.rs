//! Request agent: asks for a discovery run on a fixed period and logs the
//! shortlist that comes back.

use async_trait::async_trait;
use tracing::{debug, info};

use molforge_common::Result;

use crate::bureau::{Agent, Context};
use crate::messages::{AgentMessage, DiscoveryRequest};

pub struct RequestAgent {
    target: String,
    sequence: String,
    /// Name of the discovery agent this requester talks to.
    peer: String,
}

impl RequestAgent {
    pub const NAME: &'static str = "requester";

    pub fn new(target: impl Into<String>, sequence: impl Into<String>, peer: impl Into<String>) -> Self {
        Self { target: target.into(), sequence: sequence.into(), peer: peer.into() }
    }
}

#[async_trait]
impl Agent for RequestAgent {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn on_tick(&mut self, ctx: &Context) -> Result<()> {
        info!("[{}] Requesting discovery for target {}", Self::NAME, self.target);
        ctx.send(
            &self.peer,
            AgentMessage::DiscoveryRequest(DiscoveryRequest {
                target: self.target.clone(),
                sequence: self.sequence.clone(),
            }),
        )
    }

    async fn on_message(
        &mut self,
        _ctx: &Context,
        _from: &str,
        message: AgentMessage,
    ) -> Result<()> {
        match message {
            AgentMessage::FinalSelection(selection) => {
                info!("[{}] {}", Self::NAME, selection.summary);
                for (i, smiles) in selection.top_smiles.iter().enumerate() {
                    info!("[{}] Candidate {}: {}", Self::NAME, i + 1, smiles);
                }
                info!("[{}] End of cycle.", Self::NAME);
                Ok(())
            }
            AgentMessage::DiscoveryRequest(_) => {
                debug!("[{}] ignoring DiscoveryRequest", Self::NAME);
                Ok(())
            }
        }
    }
}
