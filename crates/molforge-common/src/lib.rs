//! molforge-common — Shared error type and configuration used across all Molforge crates.

pub mod config;
pub mod error;

pub use config::Config;
pub use error::{MolforgeError, Result};
