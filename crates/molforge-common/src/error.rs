use thiserror::Error;

#[derive(Debug, Error)]
pub enum MolforgeError {
    #[error("candidate generation exhausted after {attempts} attempts: {} of {requested} unique structures", .partial.len())]
    Generation {
        requested: usize,
        attempts: u32,
        /// Unique valid structures produced before the attempt budget ran out.
        partial: Vec<String>,
    },

    #[error("unparseable structure: {0}")]
    InvalidStructure(String),

    #[error("failed to render depiction for {smiles}: {reason}")]
    Render { smiles: String, reason: String },

    #[error("export failed: {0}")]
    Export(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("mailbox closed: {0}")]
    MailboxClosed(String),
}

pub type Result<T> = std::result::Result<T, MolforgeError>;
