use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub embedding: EmbeddingConfig,
    #[serde(default)]
    pub completion: CompletionConfig,
    #[serde(default)]
    pub ingest: IngestConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    #[serde(default)]
    pub gateway: GatewayConfig,
}

/// Connection to the vector-capable relational store.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// MySQL-protocol connection URL (TiDB serverless or self-hosted).
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct EmbeddingConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_embedding_model")]
    pub model: String,
    #[serde(default = "default_embedding_base_url")]
    pub base_url: String,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_embedding_model(),
            base_url: default_embedding_base_url(),
        }
    }
}

fn default_embedding_model() -> String {
    "text-embedding-004".into()
}

fn default_embedding_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".into()
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CompletionConfig {
    #[serde(default)]
    pub api_token: String,
    #[serde(default = "default_completion_model")]
    pub model: String,
    #[serde(default = "default_completion_base_url")]
    pub base_url: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_new_tokens")]
    pub max_new_tokens: u32,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            api_token: String::new(),
            model: default_completion_model(),
            base_url: default_completion_base_url(),
            temperature: default_temperature(),
            max_new_tokens: default_max_new_tokens(),
        }
    }
}

fn default_completion_model() -> String {
    "meta-llama/Meta-Llama-3-8B-Instruct".into()
}

fn default_completion_base_url() -> String {
    "https://api-inference.huggingface.co".into()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_new_tokens() -> u32 {
    1024
}

#[derive(Debug, Deserialize, Serialize)]
pub struct IngestConfig {
    /// Maximum chunk length in characters.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    /// Characters shared between consecutive chunks of one object.
    #[serde(default = "default_overlap")]
    pub overlap: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            overlap: default_overlap(),
        }
    }
}

fn default_chunk_size() -> usize {
    8000
}

fn default_overlap() -> usize {
    200
}

#[derive(Debug, Deserialize, Serialize)]
pub struct RetrievalConfig {
    /// Nearest neighbors fetched per question.
    #[serde(default = "default_retrieval_limit")]
    pub limit: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            limit: default_retrieval_limit(),
        }
    }
}

fn default_retrieval_limit() -> usize {
    5
}

#[derive(Debug, Deserialize, Serialize)]
pub struct GatewayConfig {
    #[serde(default = "default_gateway_bind")]
    pub bind: String,
    #[serde(default = "default_gateway_port")]
    pub port: u16,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bind: default_gateway_bind(),
            port: default_gateway_port(),
        }
    }
}

fn default_gateway_bind() -> String {
    "127.0.0.1".into()
}

fn default_gateway_port() -> u16 {
    8080
}
