//! Error types for rover-agent.

#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// Embedding or completion provider error.
    #[error("LLM error: {0}")]
    Llm(#[from] rover_llm::LlmError),

    /// Datastore error during retrieval.
    #[error("retrieval error: {0}")]
    Index(#[from] rover_index::IndexError),
}

pub type Result<T> = std::result::Result<T, AgentError>;
