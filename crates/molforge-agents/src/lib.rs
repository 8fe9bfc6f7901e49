//! molforge-agents — Mailbox runtime and the two pipeline agents.

pub mod bureau;
pub mod discovery;
pub mod messages;
pub mod request;

pub use bureau::{Agent, Bureau, Context, Envelope, Event};
pub use discovery::DiscoveryAgent;
pub use messages::{AgentMessage, DiscoveryRequest, FinalSelection};
pub use request::RequestAgent;
