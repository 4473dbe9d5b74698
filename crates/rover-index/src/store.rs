//! Vector-capable relational store for code chunks.
//!
//! The `code_embeddings` table is assumed to exist already (see
//! `schema.sql`). Writes are single-statement autocommits — a crash
//! mid-ingestion leaves a partially populated, still-valid table.

use sqlx::MySqlPool;

use crate::error::Result;

/// Parameters for inserting one code chunk.
pub struct ChunkInsert<'a> {
    pub repo_url: &'a str,
    pub file_path: &'a str,
    pub object_name: &'a str,
    pub code_chunk: &'a str,
    pub embedding: &'a [f32],
}

/// A nearest-neighbor hit, closest first.
#[derive(Debug, Clone)]
pub struct RetrievedChunk {
    pub code_chunk: String,
    pub file_path: String,
    pub object_name: String,
}

/// Writer/reader over the `code_embeddings` table.
///
/// Records are append-only: re-ingesting a repository adds duplicate rows,
/// and retrieval searches across every ingested repository.
#[derive(Clone)]
pub struct ChunkStore {
    pool: MySqlPool,
}

impl ChunkStore {
    /// Connect a pool to the configured datastore URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = MySqlPool::connect(url).await?;
        Ok(Self { pool })
    }

    #[must_use]
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Insert one chunk row. One statement, autocommitted.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails — fatal for the current operation.
    pub async fn insert_chunk(&self, chunk: &ChunkInsert<'_>) -> Result<()> {
        sqlx::query(
            "INSERT INTO code_embeddings \
             (repo_url, file_path, object_name, code_chunk, embedding) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(chunk.repo_url)
        .bind(chunk.file_path)
        .bind(chunk.object_name)
        .bind(chunk.code_chunk)
        .bind(vector_literal(chunk.embedding))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// The `limit` records nearest to `query` by cosine distance, ascending.
    ///
    /// No repository filter: a lookup after ingesting multiple repositories
    /// searches across all of them.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails — fatal for the current operation.
    pub async fn nearest(&self, query: &[f32], limit: usize) -> Result<Vec<RetrievedChunk>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows: Vec<(String, String, String)> = sqlx::query_as(
            "SELECT code_chunk, file_path, object_name \
             FROM code_embeddings \
             ORDER BY VEC_COSINE_DISTANCE(embedding, ?) ASC \
             LIMIT ?",
        )
        .bind(vector_literal(query))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(code_chunk, file_path, object_name)| RetrievedChunk {
                code_chunk,
                file_path,
                object_name,
            })
            .collect())
    }
}

/// Encode a vector as the `[v1,v2,...]` literal the store's vector column
/// accepts as a bind parameter.
#[must_use]
pub fn vector_literal(vector: &[f32]) -> String {
    let mut out = String::with_capacity(vector.len() * 10 + 2);
    out.push('[');
    for (i, v) in vector.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&v.to_string());
    }
    out.push(']');
    out
}
