//! Ingestion orchestrator: clone → extract → chunk → embed → persist → cleanup.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use rover_llm::any::AnyEmbedder;
use rover_llm::provider::{EmbeddingProvider, EmbeddingTask};

use crate::chunker::chunk_text;
use crate::error::{IndexError, Result};
use crate::extractor::scan_tree;
use crate::store::{ChunkInsert, ChunkStore};

/// Ingestion configuration.
#[derive(Debug, Clone)]
pub struct IngestorConfig {
    /// Maximum chunk length in characters (default: 8000).
    pub chunk_size: usize,
    /// Characters shared between consecutive chunks (default: 200).
    pub overlap: usize,
}

impl Default for IngestorConfig {
    fn default() -> Self {
        Self {
            chunk_size: 8000,
            overlap: 200,
        }
    }
}

/// Summary of one ingestion run.
#[derive(Debug, Default)]
pub struct IngestReport {
    pub files_scanned: usize,
    pub files_skipped: usize,
    pub objects_extracted: usize,
    pub chunks_embedded: usize,
    pub chunks_skipped: usize,
    pub duration_ms: u64,
}

/// Outcome of embedding a single chunk. A failed embedding is a tagged
/// skip, never a null or zero vector a caller could mistake for data.
#[derive(Debug)]
pub enum EmbedOutcome {
    Embedded(Vec<f32>),
    Skipped { reason: String },
}

/// Linear ingestion pipeline for one repository URL.
pub struct RepoIngestor {
    store: ChunkStore,
    embedder: Arc<AnyEmbedder>,
    config: IngestorConfig,
}

impl RepoIngestor {
    #[must_use]
    pub fn new(store: ChunkStore, embedder: Arc<AnyEmbedder>, config: IngestorConfig) -> Self {
        Self {
            store,
            embedder,
            config,
        }
    }

    /// Clone, extract, embed, and persist one repository.
    ///
    /// The scratch directory is removed whether the pipeline succeeds or
    /// fails; a removal failure is a logged warning, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the clone or a datastore write fails. Embedding
    /// failures skip the affected chunk and ingestion continues.
    pub async fn ingest(&self, repo_url: &str) -> Result<IngestReport> {
        let scratch = ScratchDir::create()?;
        let result = self.run(repo_url, scratch.path()).await;
        scratch.cleanup().await;
        result
    }

    async fn run(&self, repo_url: &str, root: &Path) -> Result<IngestReport> {
        let start = Instant::now();
        let mut report = IngestReport::default();

        tracing::info!("cloning {repo_url}");
        clone_repo(repo_url, root).await?;

        let scan = scan_tree(root).await;
        report.files_scanned = scan.files_scanned;
        report.files_skipped = scan.files_skipped;
        report.objects_extracted = scan.objects.len();
        tracing::info!(
            files = scan.files_scanned,
            objects = scan.objects.len(),
            "extraction complete"
        );

        for object in &scan.objects {
            let chunks = chunk_text(&object.source, self.config.chunk_size, self.config.overlap);

            for chunk in &chunks {
                tracing::debug!(
                    file = %object.file_path,
                    object = %object.name,
                    "indexing chunk"
                );
                match self.embed_chunk(chunk).await {
                    EmbedOutcome::Embedded(vector) => {
                        self.store
                            .insert_chunk(&ChunkInsert {
                                repo_url,
                                file_path: &object.file_path,
                                object_name: &object.name,
                                code_chunk: chunk,
                                embedding: &vector,
                            })
                            .await?;
                        report.chunks_embedded += 1;
                    }
                    EmbedOutcome::Skipped { reason } => {
                        tracing::warn!(
                            file = %object.file_path,
                            object = %object.name,
                            "chunk skipped: {reason}"
                        );
                        report.chunks_skipped += 1;
                    }
                }
            }
        }

        report.duration_ms = start.elapsed().as_millis().try_into().unwrap_or(u64::MAX);
        tracing::info!(
            embedded = report.chunks_embedded,
            skipped = report.chunks_skipped,
            "ingestion complete"
        );
        Ok(report)
    }

    async fn embed_chunk(&self, chunk: &str) -> EmbedOutcome {
        match self.embedder.embed(chunk, EmbeddingTask::Document).await {
            Ok(vector) => EmbedOutcome::Embedded(vector),
            Err(e) => EmbedOutcome::Skipped {
                reason: e.to_string(),
            },
        }
    }
}

/// Run `git clone <url> <dest>` and fail on non-zero exit.
async fn clone_repo(url: &str, dest: &Path) -> Result<()> {
    let output = tokio::process::Command::new("git")
        .arg("clone")
        .arg(url)
        .arg(dest)
        .output()
        .await
        .map_err(|e| IndexError::Clone {
            url: url.to_owned(),
            detail: format!("failed to spawn git: {e}"),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(IndexError::Clone {
            url: url.to_owned(),
            detail: stderr.trim().to_owned(),
        });
    }

    Ok(())
}

/// Uniquely named scratch directory with best-effort removal.
struct ScratchDir {
    path: PathBuf,
}

impl ScratchDir {
    fn create() -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix("rover-ingest-")
            .tempdir()?;
        // take ownership: removal is explicit so a failure can be logged
        let path = dir.keep();
        tracing::debug!("created scratch directory {}", path.display());
        Ok(Self { path })
    }

    fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the directory. On failure, clear read-only bits over the
    /// whole tree and retry once; a second failure is a warning only.
    async fn cleanup(self) {
        let path = self.path;
        let removed = tokio::task::spawn_blocking(move || {
            if std::fs::remove_dir_all(&path).is_ok() {
                return Ok(());
            }
            clear_readonly(&path);
            std::fs::remove_dir_all(&path).map_err(|e| (path, e))
        })
        .await;

        match removed {
            Ok(Ok(())) => {}
            Ok(Err((path, e))) => {
                tracing::warn!("could not remove scratch directory {}: {e}", path.display());
            }
            Err(e) => {
                tracing::warn!("scratch cleanup task failed: {e}");
            }
        }
    }
}

/// Recursively clear read-only permission bits (git pack files on some
/// platforms are created read-only and block plain removal).
fn clear_readonly(path: &Path) {
    if let Ok(metadata) = std::fs::metadata(path) {
        let mut perms = metadata.permissions();
        if perms.readonly() {
            #[allow(clippy::permissions_set_readonly_false)]
            perms.set_readonly(false);
            let _ = std::fs::set_permissions(path, perms);
        }
        if metadata.is_dir()
            && let Ok(entries) = std::fs::read_dir(path)
        {
            for entry in entries.flatten() {
                clear_readonly(&entry.path());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rover_llm::mock::MockEmbedder;

    use super::*;

    fn test_ingestor(embedder: MockEmbedder) -> RepoIngestor {
        let pool = sqlx::mysql::MySqlPool::connect_lazy("mysql://test@127.0.0.1:1/test").unwrap();
        RepoIngestor::new(
            ChunkStore::new(pool),
            Arc::new(AnyEmbedder::Mock(embedder)),
            IngestorConfig::default(),
        )
    }

    #[test]
    fn default_config_matches_embedding_limits() {
        let config = IngestorConfig::default();
        assert_eq!(config.chunk_size, 8000);
        assert_eq!(config.overlap, 200);
    }

    #[test]
    fn report_defaults_to_zero() {
        let report = IngestReport::default();
        assert_eq!(report.files_scanned, 0);
        assert_eq!(report.chunks_embedded, 0);
    }

    #[tokio::test]
    async fn embed_failure_becomes_tagged_skip() {
        let ingestor = test_ingestor(MockEmbedder::failing());
        match ingestor.embed_chunk("def f(): pass").await {
            EmbedOutcome::Skipped { reason } => assert!(reason.contains("mock embedding error")),
            EmbedOutcome::Embedded(_) => panic!("expected skip"),
        }
    }

    #[tokio::test]
    async fn embed_success_carries_vector() {
        let ingestor = test_ingestor(MockEmbedder::with_vector(vec![0.25, 0.5]));
        match ingestor.embed_chunk("def f(): pass").await {
            EmbedOutcome::Embedded(vector) => assert_eq!(vector, vec![0.25, 0.5]),
            EmbedOutcome::Skipped { .. } => panic!("expected embedding"),
        }
    }

    #[tokio::test]
    async fn document_task_tag_used_for_ingestion() {
        let mock = MockEmbedder::default();
        let ingestor = test_ingestor(mock.clone());
        let _ = ingestor.embed_chunk("def f(): pass").await;
        let calls = mock.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1, rover_llm::EmbeddingTask::Document);
    }

    #[tokio::test]
    async fn scratch_dir_removed_on_cleanup() {
        let scratch = ScratchDir::create().unwrap();
        let path = scratch.path().to_path_buf();
        assert!(path.exists());
        scratch.cleanup().await;
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn scratch_cleanup_clears_readonly_entries() {
        let scratch = ScratchDir::create().unwrap();
        let path = scratch.path().to_path_buf();

        let file = path.join("locked.bin");
        std::fs::write(&file, b"data").unwrap();
        let mut perms = std::fs::metadata(&file).unwrap().permissions();
        perms.set_readonly(true);
        std::fs::set_permissions(&file, perms).unwrap();

        scratch.cleanup().await;
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn clone_invalid_url_is_clone_error() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("checkout");
        let err = clone_repo("file:///nonexistent/definitely-missing.git", &dest)
            .await
            .unwrap_err();
        assert!(matches!(err, IndexError::Clone { .. }));
    }

    #[tokio::test]
    async fn clone_failure_leaves_no_scratch_behind() {
        let scratch = ScratchDir::create().unwrap();
        let path = scratch.path().to_path_buf();
        let result = clone_repo("file:///nonexistent/definitely-missing.git", &path).await;
        assert!(result.is_err());
        scratch.cleanup().await;
        assert!(!path.exists());
    }
}
