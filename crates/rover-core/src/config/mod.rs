mod env;
mod types;

#[cfg(test)]
mod tests;

pub use types::*;

use std::path::Path;

use anyhow::Context;

/// Values that mark a credential as never having been filled in.
const PLACEHOLDER_MARKERS: [&str; 2] = ["YOUR_", "changeme"];

impl Config {
    /// Load configuration from a TOML file with env var overrides.
    ///
    /// Falls back to defaults when the file does not exist; credentials
    /// then come entirely from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str::<Self>(&content).context("failed to parse config file")?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Reject startup while any credential is empty or an unfilled placeholder.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first offending setting.
    pub fn validate(&self) -> anyhow::Result<()> {
        for (field, value) in [
            ("database.url", &self.database.url),
            ("embedding.api_key", &self.embedding.api_key),
            ("completion.api_token", &self.completion.api_token),
        ] {
            if value.is_empty() || PLACEHOLDER_MARKERS.iter().any(|m| value.contains(m)) {
                anyhow::bail!("{field} is not set — fill in your credentials before starting");
            }
        }

        if self.ingest.overlap >= self.ingest.chunk_size {
            anyhow::bail!(
                "ingest.overlap ({}) must be smaller than ingest.chunk_size ({})",
                self.ingest.overlap,
                self.ingest.chunk_size
            );
        }

        Ok(())
    }
}
