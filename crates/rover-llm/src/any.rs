//! Enum dispatch over provider backends, so callers hold a single
//! concrete type without boxing trait objects.

use crate::error::LlmError;
use crate::gemini::GeminiProvider;
use crate::hugging_face::HuggingFaceProvider;
#[cfg(feature = "mock")]
use crate::mock::{MockCompleter, MockEmbedder};
use crate::provider::{CompletionProvider, EmbeddingProvider, EmbeddingTask};

macro_rules! delegate_embedder {
    ($self:expr, |$p:ident| $expr:expr) => {
        match $self {
            AnyEmbedder::Gemini($p) => $expr,
            #[cfg(feature = "mock")]
            AnyEmbedder::Mock($p) => $expr,
        }
    };
}

#[derive(Debug, Clone)]
pub enum AnyEmbedder {
    Gemini(GeminiProvider),
    #[cfg(feature = "mock")]
    Mock(MockEmbedder),
}

impl EmbeddingProvider for AnyEmbedder {
    async fn embed(&self, text: &str, task: EmbeddingTask) -> Result<Vec<f32>, LlmError> {
        delegate_embedder!(self, |p| p.embed(text, task).await)
    }

    fn name(&self) -> &'static str {
        delegate_embedder!(self, |p| p.name())
    }
}

macro_rules! delegate_completer {
    ($self:expr, |$p:ident| $expr:expr) => {
        match $self {
            AnyCompleter::HuggingFace($p) => $expr,
            #[cfg(feature = "mock")]
            AnyCompleter::Mock($p) => $expr,
        }
    };
}

#[derive(Debug, Clone)]
pub enum AnyCompleter {
    HuggingFace(HuggingFaceProvider),
    #[cfg(feature = "mock")]
    Mock(MockCompleter),
}

impl CompletionProvider for AnyCompleter {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        delegate_completer!(self, |p| p.complete(prompt).await)
    }

    fn name(&self) -> &'static str {
        delegate_completer!(self, |p| p.name())
    }
}
