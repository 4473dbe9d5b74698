use serde::{Deserialize, Serialize};

use crate::error::LlmError;

/// Intent tag sent with every embedding request.
///
/// Document and query embeddings may occupy different regions of the
/// vector space, so the tag used at ingestion time must match the one
/// used at retrieval time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingTask {
    Document,
    Query,
}

impl EmbeddingTask {
    /// Wire value understood by the embedding service.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Document => "RETRIEVAL_DOCUMENT",
            Self::Query => "RETRIEVAL_QUERY",
        }
    }
}

pub trait EmbeddingProvider: Send + Sync {
    /// Map a text to a fixed-dimension vector.
    ///
    /// # Errors
    ///
    /// Returns an error if the service is unreachable or the response is invalid.
    fn embed(
        &self,
        text: &str,
        task: EmbeddingTask,
    ) -> impl Future<Output = Result<Vec<f32>, LlmError>> + Send;

    fn name(&self) -> &'static str;
}

pub trait CompletionProvider: Send + Sync {
    /// Submit a fully formatted prompt and return the raw completion text.
    ///
    /// # Errors
    ///
    /// Returns an error if the service is unreachable or the response is invalid.
    fn complete(&self, prompt: &str) -> impl Future<Output = Result<String, LlmError>> + Send;

    fn name(&self) -> &'static str;
}
