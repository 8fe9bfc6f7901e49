//! Single-worker mailbox runtime.
//!
//! One unbounded queue carries every envelope; one dispatch loop owns every
//! agent and awaits each handler to completion. Handlers therefore never run
//! concurrently or re-enter, which is the guarantee the agents rely on: a
//! discovery run is atomic with respect to all other agent activity, and a
//! request arriving mid-run queues behind it.

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use molforge_common::{MolforgeError, Result};

use crate::messages::AgentMessage;

#[derive(Debug)]
pub enum Event {
    Message { from: String, message: AgentMessage },
    /// Periodic timer fired for the addressed agent.
    Tick,
}

#[derive(Debug)]
pub struct Envelope {
    pub to: String,
    pub event: Event,
}

/// Handle an agent uses to send messages from inside a handler.
#[derive(Clone)]
pub struct Context {
    agent: String,
    tx: mpsc::UnboundedSender<Envelope>,
}

impl Context {
    pub fn new(agent: impl Into<String>, tx: mpsc::UnboundedSender<Envelope>) -> Self {
        Self { agent: agent.into(), tx }
    }

    pub fn agent(&self) -> &str {
        &self.agent
    }

    pub fn send(&self, to: impl Into<String>, message: AgentMessage) -> Result<()> {
        let to = to.into();
        self.tx
            .send(Envelope {
                to: to.clone(),
                event: Event::Message { from: self.agent.clone(), message },
            })
            .map_err(|_| MolforgeError::MailboxClosed(format!("sending {} -> {to}", self.agent)))
    }
}

#[async_trait]
pub trait Agent: Send {
    fn name(&self) -> &str;

    async fn on_message(&mut self, ctx: &Context, from: &str, message: AgentMessage)
        -> Result<()>;

    /// Called when this agent's interval timer fires.
    async fn on_tick(&mut self, _ctx: &Context) -> Result<()> {
        Ok(())
    }
}

/// Hosts the agents and runs the dispatch loop.
pub struct Bureau {
    agents: HashMap<String, Box<dyn Agent>>,
    intervals: Vec<(String, Duration)>,
    tx: mpsc::UnboundedSender<Envelope>,
    rx: mpsc::UnboundedReceiver<Envelope>,
}

impl Bureau {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { agents: HashMap::new(), intervals: Vec::new(), tx, rx }
    }

    pub fn add(&mut self, agent: Box<dyn Agent>) {
        let name = agent.name().to_string();
        if self.agents.insert(name.clone(), agent).is_some() {
            warn!("Agent {name} registered twice; keeping the newer one");
        }
    }

    pub fn add_with_interval(&mut self, agent: Box<dyn Agent>, period: Duration) {
        let name = agent.name().to_string();
        self.add(agent);
        self.intervals.push((name, period));
    }

    /// Sender for injecting envelopes from outside the loop (tests).
    pub fn handle(&self) -> mpsc::UnboundedSender<Envelope> {
        self.tx.clone()
    }

    async fn dispatch(&mut self, envelope: Envelope) {
        let Some(agent) = self.agents.get_mut(&envelope.to) else {
            warn!("Dropping envelope for unknown agent {}", envelope.to);
            return;
        };
        let ctx = Context::new(envelope.to.clone(), self.tx.clone());
        let outcome = match envelope.event {
            Event::Tick => agent.on_tick(&ctx).await,
            Event::Message { from, message } => {
                debug!("Delivering {from} -> {}", envelope.to);
                agent.on_message(&ctx, &from, message).await
            }
        };
        if let Err(e) = outcome {
            // A failed handler loses that cycle only; the loop keeps going.
            error!("Handler error in {}: {e}", envelope.to);
        }
    }

    /// Run forever: spawn interval timers, then deliver envelopes one at a
    /// time until the queue closes (which in production it never does).
    pub async fn run(mut self) -> Result<()> {
        for (name, period) in self.intervals.drain(..) {
            let tx = self.tx.clone();
            tokio::spawn(async move {
                let mut interval = tokio::time::interval(period);
                loop {
                    interval.tick().await;
                    if tx.send(Envelope { to: name.clone(), event: Event::Tick }).is_err() {
                        break;
                    }
                }
            });
        }
        info!("Bureau running with {} agents", self.agents.len());
        while let Some(envelope) = self.rx.recv().await {
            self.dispatch(envelope).await;
        }
        Ok(())
    }

    /// Deliver queued envelopes until the mailbox is momentarily empty.
    /// Test-only driving; production uses `run`.
    pub async fn drain(&mut self) -> usize {
        let mut processed = 0;
        while let Ok(envelope) = self.rx.try_recv() {
            self.dispatch(envelope).await;
            processed += 1;
        }
        processed
    }
}

impl Default for Bureau {
    fn default() -> Self {
        Self::new()
    }
}
