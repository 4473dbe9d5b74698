//! Error types for rover-index.

/// Errors that can occur during ingestion and retrieval-side storage access.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// IO error reading source files or managing the scratch directory.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Datastore error (write or read) — fatal for the current operation.
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),

    /// Embedding provider error.
    #[error("LLM error: {0}")]
    Llm(#[from] rover_llm::LlmError),

    /// Source file failed to parse.
    #[error("parse failed: {0}")]
    Parse(String),

    /// `git clone` failed — fatal for the ingestion call.
    #[error("clone of {url} failed: {detail}")]
    Clone { url: String, detail: String },

    /// File extension maps to no supported grammar.
    #[error("unsupported language")]
    UnsupportedLanguage,
}

/// Result type alias using `IndexError`.
pub type Result<T> = std::result::Result<T, IndexError>;
