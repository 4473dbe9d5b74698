//! Test-only mock providers.

use std::sync::{Arc, Mutex};

use crate::error::LlmError;
use crate::provider::{CompletionProvider, EmbeddingProvider, EmbeddingTask};

#[derive(Debug, Clone)]
pub struct MockEmbedder {
    pub vector: Vec<f32>,
    pub fail: bool,
    calls: Arc<Mutex<Vec<(String, EmbeddingTask)>>>,
}

impl Default for MockEmbedder {
    fn default() -> Self {
        Self {
            vector: vec![0.0; 768],
            fail: false,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl MockEmbedder {
    #[must_use]
    pub fn with_vector(vector: Vec<f32>) -> Self {
        Self {
            vector,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Texts and task tags seen so far, in call order.
    #[must_use]
    pub fn calls(&self) -> Vec<(String, EmbeddingTask)> {
        self.calls.lock().unwrap().clone()
    }
}

impl EmbeddingProvider for MockEmbedder {
    async fn embed(&self, text: &str, task: EmbeddingTask) -> Result<Vec<f32>, LlmError> {
        self.calls.lock().unwrap().push((text.to_owned(), task));
        if self.fail {
            return Err(LlmError::Other("mock embedding error".into()));
        }
        Ok(self.vector.clone())
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

#[derive(Debug, Clone)]
pub struct MockCompleter {
    responses: Arc<Mutex<Vec<String>>>,
    pub default_response: String,
    pub fail: bool,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl Default for MockCompleter {
    fn default() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            default_response: "mock completion".into(),
            fail: false,
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl MockCompleter {
    #[must_use]
    pub fn with_responses(responses: Vec<String>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Prompts seen so far, in call order.
    #[must_use]
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl CompletionProvider for MockCompleter {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_owned());
        if self.fail {
            return Err(LlmError::Other("mock completion error".into()));
        }
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(self.default_response.clone())
        } else {
            Ok(responses.remove(0))
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
