//! The four query steps, composed in order by [`QueryPipeline::answer`].

use std::sync::Arc;

use rover_index::store::{ChunkStore, RetrievedChunk};
use rover_llm::any::{AnyCompleter, AnyEmbedder};
use rover_llm::provider::{CompletionProvider, EmbeddingProvider, EmbeddingTask};

use crate::error::Result;
use crate::prompt::{fill_template, format_context};

/// Output of the context-fetch step.
#[derive(Debug)]
pub struct RetrievedContext {
    pub chunks: Vec<RetrievedChunk>,
    /// Context block rendered for the prompt (sentinel text when empty).
    pub rendered: String,
}

/// Output of the prompt-fill step.
#[derive(Debug)]
pub struct AssembledPrompt {
    pub text: String,
}

/// Output of the model-call step.
#[derive(Debug)]
pub struct Completion {
    pub text: String,
}

/// Step 1: embed the question with the query task tag and fetch the
/// nearest chunks across all ingested repositories.
///
/// # Errors
///
/// Embedding and datastore errors propagate — fatal for this request.
pub async fn fetch_context(
    store: &ChunkStore,
    embedder: &AnyEmbedder,
    question: &str,
    limit: usize,
) -> Result<RetrievedContext> {
    let query_vector = embedder.embed(question, EmbeddingTask::Query).await?;
    let chunks = store.nearest(&query_vector, limit).await?;
    let rendered = format_context(&chunks);
    Ok(RetrievedContext { chunks, rendered })
}

/// Step 2: fill the chat template with question and rendered context.
#[must_use]
pub fn fill_prompt(question: &str, context: &RetrievedContext) -> AssembledPrompt {
    AssembledPrompt {
        text: fill_template(question, &context.rendered),
    }
}

/// Step 3: submit the prompt to the completion model.
///
/// # Errors
///
/// Completion-service errors propagate — fatal for this request.
pub async fn call_model(completer: &AnyCompleter, prompt: &AssembledPrompt) -> Result<Completion> {
    let text = completer.complete(&prompt.text).await?;
    Ok(Completion { text })
}

/// Step 4: reduce the raw completion to the final answer string.
#[must_use]
pub fn parse_output(completion: &Completion) -> String {
    completion.text.trim().to_owned()
}

/// Retrieval-augmented answer pipeline over one store and two providers.
pub struct QueryPipeline {
    store: ChunkStore,
    embedder: Arc<AnyEmbedder>,
    completer: Arc<AnyCompleter>,
    limit: usize,
}

impl QueryPipeline {
    #[must_use]
    pub fn new(
        store: ChunkStore,
        embedder: Arc<AnyEmbedder>,
        completer: Arc<AnyCompleter>,
        limit: usize,
    ) -> Self {
        Self {
            store,
            embedder,
            completer,
            limit,
        }
    }

    /// Run the four steps in order and return the answer text.
    ///
    /// # Errors
    ///
    /// Returns an error if embedding, retrieval, or completion fails.
    pub async fn answer(&self, question: &str) -> Result<String> {
        let context = fetch_context(&self.store, &self.embedder, question, self.limit).await?;
        tracing::debug!(chunks = context.chunks.len(), "context fetched");

        let prompt = fill_prompt(question, &context);
        let completion = call_model(&self.completer, &prompt).await?;
        Ok(parse_output(&completion))
    }
}
