use super::Config;

impl Config {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("ROVER_DATABASE_URL") {
            self.database.url = v;
        }
        if let Ok(v) = std::env::var("ROVER_GEMINI_API_KEY") {
            self.embedding.api_key = v;
        }
        if let Ok(v) = std::env::var("ROVER_EMBEDDING_MODEL") {
            self.embedding.model = v;
        }
        if let Ok(v) = std::env::var("ROVER_EMBEDDING_BASE_URL") {
            self.embedding.base_url = v;
        }
        if let Ok(v) = std::env::var("ROVER_HF_API_TOKEN") {
            self.completion.api_token = v;
        }
        if let Ok(v) = std::env::var("ROVER_COMPLETION_MODEL") {
            self.completion.model = v;
        }
        if let Ok(v) = std::env::var("ROVER_COMPLETION_BASE_URL") {
            self.completion.base_url = v;
        }
        if let Ok(v) = std::env::var("ROVER_COMPLETION_TEMPERATURE") {
            if let Ok(t) = v.parse::<f32>() {
                self.completion.temperature = t;
            } else {
                tracing::warn!("ignoring invalid ROVER_COMPLETION_TEMPERATURE value: {v}");
            }
        }
        if let Ok(v) = std::env::var("ROVER_CHUNK_SIZE")
            && let Ok(size) = v.parse::<usize>()
        {
            self.ingest.chunk_size = size;
        }
        if let Ok(v) = std::env::var("ROVER_CHUNK_OVERLAP")
            && let Ok(overlap) = v.parse::<usize>()
        {
            self.ingest.overlap = overlap;
        }
        if let Ok(v) = std::env::var("ROVER_RETRIEVAL_LIMIT")
            && let Ok(limit) = v.parse::<usize>()
        {
            self.retrieval.limit = limit;
        }
        if let Ok(v) = std::env::var("ROVER_GATEWAY_BIND") {
            self.gateway.bind = v;
        }
        if let Ok(v) = std::env::var("ROVER_GATEWAY_PORT")
            && let Ok(port) = v.parse::<u16>()
        {
            self.gateway.port = port;
        }
    }
}
